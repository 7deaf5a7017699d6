use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Position;

/// Screen size class a formation template is authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Phone,
    Laptop,
    Desktop,
}

impl ViewportClass {
    /// Phones up to 479px, laptops below 1600px, desktops above.
    pub fn from_width(width_px: u32) -> Self {
        if width_px <= 479 {
            ViewportClass::Phone
        } else if width_px < 1600 {
            ViewportClass::Laptop
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Named template with an ordered list of required field positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Formation {
    /// Unique name, e.g. "4-4-2 (F-Basic)"
    pub name: String,
    /// Slot `i` must be filled by a player registered for `positions[i]`
    pub positions: Vec<Position>,
    /// Opaque rendering templates, handed to the presentation layer untouched
    #[serde(default)]
    pub templates: HashMap<ViewportClass, String>,
}

impl Formation {
    pub fn new(name: impl Into<String>, positions: Vec<Position>) -> Self {
        Self { name: name.into(), positions, templates: HashMap::new() }
    }

    pub fn with_template(mut self, viewport: ViewportClass, template: impl Into<String>) -> Self {
        self.templates.insert(viewport, template.into());
        self
    }

    pub fn slot_count(&self) -> usize {
        self.positions.len()
    }

    pub fn requirement(&self, slot_index: usize) -> Option<Position> {
        self.positions.get(slot_index).copied()
    }

    /// Count of slots per position, in `Position::ALL` order.
    pub fn position_counts(&self) -> [(Position, usize); 4] {
        Position::ALL.map(|pos| (pos, self.positions.iter().filter(|p| **p == pos).count()))
    }

    /// Template for the viewport, falling back to the desktop layout.
    pub fn template_for(&self, viewport: ViewportClass) -> Option<&str> {
        self.templates
            .get(&viewport)
            .or_else(|| self.templates.get(&ViewportClass::Desktop))
            .map(String::as_str)
    }
}
