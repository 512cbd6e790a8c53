//! Seeded simulation environment.

use std::sync::{Arc, Mutex, PoisonError};

use pythia_core::Environment;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic `Environment` backed by a seeded ChaCha RNG.
///
/// Clones share the same RNG stream, matching how a single process shares
/// one entropy source. Given the same seed, every salt and blinding pad in a
/// test run is reproducible.
#[derive(Clone)]
pub struct SimEnv {
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SimEnv {
    /// Create a simulation environment from a seed.
    ///
    /// Log the seed in failing tests so runs can be reproduced.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))) }
    }
}

impl Environment for SimEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        // Poisoning cannot corrupt a ChaCha stream; recover and continue.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.fill_bytes(buffer);
    }
}
