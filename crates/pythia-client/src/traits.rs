//! Capability traits for the crypto engine and transformation service.
//!
//! Both collaborators are consumed, never implemented, by this crate. The
//! engine wraps the blind-signature primitives; the service wraps the remote
//! transformation round trip and whatever transport and access tokens it
//! needs. Adapters are chosen by the caller at construction.

use async_trait::async_trait;
use pythia_core::Proof;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Failure inside the opaque crypto engine (e.g. point decoding).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("crypto engine error: {reason}")]
pub struct EngineError {
    /// Description of the engine failure.
    pub reason: String,
}

impl EngineError {
    /// Create an engine error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Network or service failure reaching the transformation service.
///
/// Propagated from the external collaborator, never generated locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transformation service error: {reason}")]
pub struct TransportError {
    /// Description of the transport failure.
    pub reason: String,
}

impl TransportError {
    /// Create a transport error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Secret blinding factor produced by [`CryptoEngine::blind`].
///
/// Never leaves the operation that produced it; zeroized on drop.
///
/// # Security
///
/// - **Debug Redaction**: The `Debug` impl hides the secret bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BlindingSecret(Vec<u8>);

impl BlindingSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for BlindingSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlindingSecret(<redacted {} bytes>)", self.0.len())
    }
}

/// Blind-signature primitives consumed by the orchestrator.
///
/// All operations are local and synchronous. Implementations must be
/// deterministic given their inputs, except [`blind`](Self::blind) which
/// draws a fresh blinding factor per call.
pub trait CryptoEngine: Send + Sync {
    /// Blind a raw password, returning the blinded bytes and the secret
    /// needed to deblind the transformed result.
    fn blind(&self, password: &[u8]) -> Result<(Vec<u8>, BlindingSecret), EngineError>;

    /// Verify the service's zero-knowledge proof over a transformation.
    ///
    /// A `false` return means the proof is well-formed but does not check
    /// out; errors are reserved for malformed inputs.
    fn verify(
        &self,
        transformed_password: &[u8],
        blinded_password: &[u8],
        salt: &[u8],
        proof_key: &[u8],
        proof: &Proof,
    ) -> Result<bool, EngineError>;

    /// Remove the blinding factor from a transformed password.
    fn deblind(
        &self,
        transformed_password: &[u8],
        blinding_secret: &BlindingSecret,
    ) -> Result<Vec<u8>, EngineError>;

    /// Re-derive a deblinded password under a new epoch using rotation token
    /// bytes. Purely local.
    fn update_deblinded_with_token(
        &self,
        deblinded_password: &[u8],
        token: &[u8],
    ) -> Result<Vec<u8>, EngineError>;
}

/// One transformation request.
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    /// Blinded password bytes to transform.
    pub blinded_password: &'a [u8],
    /// Record salt tying the transformation to the user identity.
    pub salt: &'a [u8],
    /// Key epoch to transform under.
    pub version: u32,
    /// Whether the service should attach a zero-knowledge proof.
    pub include_proof: bool,
}

/// Response to a transformation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResponse {
    /// The transformed (still blinded) password bytes.
    pub transformed_password: Vec<u8>,
    /// Proof of correct transformation; present iff requested and supported.
    pub proof: Option<Proof>,
}

/// The remote transformation service.
///
/// The single suspension point of every orchestration operation. Timeouts,
/// retries, and access-token acquisition are the implementation's concern;
/// the orchestrator fails the whole operation on any error.
#[async_trait]
pub trait TransformationService: Send + Sync {
    /// Transform a blinded password under the given epoch.
    async fn transform(
        &self,
        request: TransformRequest<'_>,
    ) -> Result<TransformResponse, TransportError>;
}
