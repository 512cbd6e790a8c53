//! Client
//!
//! Orchestration layer for breach-proof passwords over the Pythia protocol.
//! Creates, verifies, and rotates [`BreachProofPassword`] records by
//! composing local blinding with one remote transformation round trip.
//!
//! # Architecture
//!
//! The client holds no mutable state. All effectful collaborators are
//! injected capabilities:
//!
//! - [`CryptoEngine`]: blind / verify-proof / deblind / token-update
//!   primitives (opaque elliptic-curve implementation chosen by the caller)
//! - [`TransformationService`]: the remote transformation round trip
//! - [`Environment`]: randomness for salt generation (deterministic testing)
//!
//! # Security
//!
//! Proof verification gates every transformation result: output from the
//! service is never deblinded or compared before its proof (when requested)
//! verifies against the registry key for the record's own epoch. The final
//! password comparison is fixed-time.
//!
//! # Components
//!
//! - [`BreachProofClient`]: the orchestrator over create / verify / update
//! - [`ProofKeyRegistry`]: versioned proof-key lookup (re-exported)
//! - [`SystemEnv`]: production [`Environment`] backed by OS entropy

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod system_env;
mod traits;

pub use client::BreachProofClient;
pub use error::ClientError;
pub use pythia_core::{
    BreachProofPassword, Environment, ParseError, Proof, ProofKey, ProofKeyError,
    ProofKeyRegistry, SALT_SIZE, UpdateToken,
};
pub use system_env::SystemEnv;
pub use traits::{
    BlindingSecret, CryptoEngine, EngineError, TransformRequest, TransformResponse,
    TransformationService, TransportError,
};
