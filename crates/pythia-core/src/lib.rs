//! Pythia protocol data layer.
//!
//! This crate provides the pure, synchronous pieces of the breach-proof
//! password protocol: the value types that cross the orchestration boundary,
//! the versioned proof-key registry, the update-token codec, and the
//! fixed-time comparison primitive.
//!
//! # Design
//!
//! Everything in this crate is deterministic and side-effect free. Random
//! bytes required by the protocol (salt generation, blinding) must be
//! provided by the caller through the [`Environment`] trait, enabling:
//!
//! - Deterministic testing with seeded RNG
//! - No coupling to a global entropy source
//!
//! All value types are immutable once constructed; key rotation produces new
//! [`BreachProofPassword`] instances rather than mutating in place.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod compare;
pub mod env;
pub mod error;
pub mod proof_keys;
pub mod types;
pub mod update_token;

pub use compare::fixed_time_eq;
pub use env::Environment;
pub use error::{ParseError, ProofKeyError};
pub use proof_keys::ProofKeyRegistry;
pub use types::{BreachProofPassword, Proof, ProofKey, SALT_SIZE, UpdateToken};
