// Candidate Sampler: random picks for draft offers and random fills
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{Result, RosterError};

/// Random source for candidate selection.
///
/// Seeded runs are reproducible (same seed, same pool, same choices).
#[derive(Debug, Clone)]
pub struct CandidateSampler {
    rng: ChaCha8Rng,
}

impl CandidateSampler {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    /// One uniformly random element.
    pub fn pick_one<T: Clone>(&mut self, pool: &[T]) -> Result<T> {
        pool.choose(&mut self.rng).cloned().ok_or(RosterError::EmptyPool)
    }

    /// `count` distinct elements in random order.
    ///
    /// Asking for more than the pool holds is not an error: the whole pool
    /// comes back (shuffled).
    pub fn pick_unique<T: Clone>(&mut self, pool: &[T], count: usize) -> Vec<T> {
        if count > pool.len() {
            debug!(
                requested = count,
                available = pool.len(),
                "requested more unique candidates than available, returning all"
            );
        }

        let mut shuffled = pool.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled.truncate(count);
        shuffled
    }
}

impl Default for CandidateSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}
