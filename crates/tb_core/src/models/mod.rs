//! Reference data for the team builder.
//!
//! Everything here is immutable once the pool is loaded; only the
//! selection state changes during a run.

pub mod coach;
pub mod formation;
pub mod language;
pub mod player;
pub mod team;

pub use coach::Coach;
pub use formation::{Formation, ViewportClass};
pub use language::{Language, LocalizedName};
pub use player::{Player, Position};
pub use team::{Emblem, Team};

/// Declares a string-backed identifier newtype.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Stable player identity, independent of any localized display name.
    PlayerId
);
string_id!(CoachId);
string_id!(TeamId);
string_id!(EmblemId);
