//! Deterministic test harness for the breach-proof password protocol.
//!
//! Seeded implementations of the `Environment`, `CryptoEngine`, and
//! `TransformationService` capabilities for reproducible end-to-end testing
//! without real elliptic-curve code or a real network.
//!
//! # Mock algebra
//!
//! [`MockPythia`] models the Pythia transform over XOR and SHA-256: blinding
//! is XOR with a random pad, the service transform XORs in a per-epoch key
//! and a salt mask, and update tokens are the XOR of two epoch keys. Every
//! algebraic relationship the orchestrator relies on holds:
//!
//! - Deblinding cancels the pad, so the deblinded value depends only on
//!   (password, salt, version)
//! - Applying an update token carries a deblinded value between epochs
//! - Proofs are HMAC tags under the per-version proof key, so corruption is
//!   detected by verification
//!
//! # Fault injection
//!
//! Service wrappers simulate misbehaving or unreachable transformation
//! services at the capability boundary: [`TamperingService`],
//! [`ProofStrippingService`], [`UnreachableService`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod faults;
pub mod mock;
pub mod sim_env;

pub use faults::{ProofStrippingService, TamperingService, UnreachableService};
pub use mock::{MockCryptoEngine, MockPythia, MockTransformationService};
pub use sim_env::SimEnv;
