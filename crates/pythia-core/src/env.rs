//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples protocol logic from the system entropy
//! source. Production implementations draw from the OS entropy pool; test
//! implementations use a seeded RNG so that every salt and blinding factor is
//! reproducible from the seed.
//!
//! # Invariants
//!
//! - Determinism: Given the same seed, a simulation environment produces the
//!   same byte sequence
//! - Isolation: Implementations must not share global state

use crate::types::SALT_SIZE;

/// Abstract environment providing randomness to the protocol.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// 1. RNG quality: `random_bytes()` uses cryptographically secure entropy in
///    production
/// 2. Minimal panics: Methods are infallible except in exceptional
///    circumstances (e.g., OS entropy exhaustion, incorrect simulation setup)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Security
    ///
    /// Production implementations MUST use an OS entropy pool (e.g.
    /// `getrandom`). Simulation implementations MUST use a seeded RNG and the
    /// seed MUST be logged for reproducibility.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a fresh record salt.
    ///
    /// Convenience over [`Self::random_bytes`]; the salt is generated exactly
    /// once per record and never regenerated on update.
    fn salt(&self) -> [u8; SALT_SIZE] {
        let mut salt = [0u8; SALT_SIZE];
        self.random_bytes(&mut salt);
        salt
    }
}
