//! Random number generator seeding

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Source of randomness for a sampler
///
/// `Seed` makes every call reproducible. `Entropy` draws a fresh seed from the
/// operating system on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RandomState {
    #[default]
    Entropy,
    Seed(u64),
}

impl RandomState {
    /// Build a generator for one sampling call
    pub fn rng(&self) -> StdRng {
        match self {
            RandomState::Seed(seed) => StdRng::seed_from_u64(*seed),
            RandomState::Entropy => StdRng::from_os_rng(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        match self {
            RandomState::Seed(seed) => Some(*seed),
            RandomState::Entropy => None,
        }
    }
}

impl From<u64> for RandomState {
    fn from(seed: u64) -> Self {
        RandomState::Seed(seed)
    }
}

impl From<Option<u64>> for RandomState {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(RandomState::Entropy, RandomState::Seed)
    }
}
