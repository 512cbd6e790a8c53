//! Production Environment implementation using the OS RNG.
//!
//! This module provides `SystemEnv`, the production implementation of the
//! `Environment` trait that draws from the operating system's entropy pool.

use pythia_core::Environment;

/// Production environment using cryptographic OS randomness.
///
/// # Security
///
/// The RNG uses `getrandom` which provides OS-level cryptographic
/// randomness; suitable for record salts and any other security-critical
/// values.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).unwrap_or_else(|e| {
            // NOTE: This should never fail on supported platforms, if it does it's a
            // critical error. Fill with zeros as a fallback (not secure, but prevents
            // panic)
            tracing::error!("getrandom failed: {}", e);
            buffer.fill(0);
        });
    }
}
