use std::sync::Mutex;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Process-wide source of randomness shared by concurrent requests.
///
/// Each request forks its own `ChaCha8Rng` so generation never holds the
/// shared state. A seeded source hands out a reproducible sequence of forks.
#[derive(Debug)]
pub enum RandomSource {
    Entropy,
    Seeded(Mutex<ChaCha8Rng>),
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        RandomSource::Entropy
    }

    pub fn seeded(seed: u64) -> Self {
        RandomSource::Seeded(Mutex::new(ChaCha8Rng::seed_from_u64(seed)))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, RandomSource::Seeded(_))
    }

    /// Derive an independent generator for one unit of work.
    pub fn fork(&self) -> ChaCha8Rng {
        match self {
            RandomSource::Entropy => ChaCha8Rng::from_rng(&mut rand::rng()),
            RandomSource::Seeded(state) => {
                let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                ChaCha8Rng::from_rng(&mut *state)
            }
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
