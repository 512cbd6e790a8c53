//! Parse and registry error types.

use thiserror::Error;

/// Errors from parsing proof-key descriptors and update tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No proof-key descriptors were supplied at registry construction.
    #[error("no proof keys configured")]
    NoProofKeys,

    /// A proof-key descriptor does not match `PK.<version>.<base64>`.
    #[error("malformed proof key descriptor: {reason}")]
    ProofKey {
        /// Description of the format violation.
        reason: String,
    },

    /// An update token does not match `UT.<prev>.<next>.<base64>`.
    #[error("malformed update token: {reason}")]
    UpdateToken {
        /// Description of the format violation.
        reason: String,
    },
}

/// Errors from proof-key registry lookups.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProofKeyError {
    /// The registry holds no keys.
    ///
    /// Unreachable through the public constructor, which rejects empty
    /// input; kept as an internal-consistency check.
    #[error("proof key registry is empty")]
    EmptyRegistry,

    /// No key in the registry carries the requested version.
    #[error("no proof key for version {version}")]
    UnknownVersion {
        /// The version that was requested.
        version: u32,
    },
}
