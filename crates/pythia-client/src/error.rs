//! Orchestration error types.

use pythia_core::{ParseError, ProofKeyError};
use thiserror::Error;

use crate::traits::{EngineError, TransportError};

/// Errors from breach-proof password operations.
///
/// Password mismatch during verification is NOT represented here: it is the
/// normal `false` result of verification, never an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Malformed update token or proof-key descriptor.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Proof-key registry lookup failed.
    #[error("proof key error: {0}")]
    ProofKey(#[from] ProofKeyError),

    /// Update token targets a different epoch than the record is in.
    ///
    /// Guards against applying a token for the wrong rotation epoch or
    /// replaying an old token against an already-updated record.
    #[error("version mismatch: record is at {record_version}, token rotates from {token_prev}")]
    VersionMismatch {
        /// Epoch the record is currently in.
        record_version: u32,
        /// Epoch the token rotates from.
        token_prev: u32,
    },

    /// The transformation proof failed local verification.
    ///
    /// The transformation output is untrusted past this point, independent
    /// of whether the password would have matched.
    #[error("transformation proof failed verification")]
    ProofVerificationFailed,

    /// A proof was requested but the service response omitted it.
    #[error("transformation service omitted the requested proof")]
    MissingProof,

    /// Failure inside the crypto engine.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Network or service failure reaching the transformation service.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Returns true if this error is fatal (unrecoverable).
    ///
    /// Fatal errors indicate misconfiguration, protocol violations, or an
    /// untrustworthy service. Transport failures are transient: the caller
    /// may retry the whole operation.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Parse(_)
            | Self::ProofKey(_)
            | Self::VersionMismatch { .. }
            | Self::ProofVerificationFailed
            | Self::MissingProof
            | Self::Engine(_) => true,

            Self::Transport(_) => false,
        }
    }
}
