//! Fault-injecting transformation service wrappers.
//!
//! Faults are injected at the capability boundary: each wrapper decorates an
//! inner `TransformationService` the way a compromised or failing deployment
//! would present itself to the orchestrator.

use async_trait::async_trait;
use pythia_client::{TransformRequest, TransformResponse, TransformationService, TransportError};

/// A compromised service: responds normally but corrupts the proof.
///
/// Flips one bit of `value_c` when a proof is attached. The orchestrator
/// must detect this and refuse the transformation output.
pub struct TamperingService<S> {
    inner: S,
}

impl<S> TamperingService<S> {
    /// Wrap a service, corrupting every proof it returns.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: TransformationService> TransformationService for TamperingService<S> {
    async fn transform(
        &self,
        request: TransformRequest<'_>,
    ) -> Result<TransformResponse, TransportError> {
        let mut response = self.inner.transform(request).await?;

        if let Some(proof) = response.proof.as_mut()
            && let Some(byte) = proof.value_c.first_mut()
        {
            *byte ^= 0x01;
        }

        Ok(response)
    }
}

/// A non-conforming service that ignores `include_proof`.
///
/// Strips the proof from every response, simulating a deployment that does
/// not support proofs but accepts the request anyway.
pub struct ProofStrippingService<S> {
    inner: S,
}

impl<S> ProofStrippingService<S> {
    /// Wrap a service, dropping every proof it returns.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: TransformationService> TransformationService for ProofStrippingService<S> {
    async fn transform(
        &self,
        request: TransformRequest<'_>,
    ) -> Result<TransformResponse, TransportError> {
        let mut response = self.inner.transform(request).await?;
        response.proof = None;
        Ok(response)
    }
}

/// A service that is never reachable.
pub struct UnreachableService;

#[async_trait]
impl TransformationService for UnreachableService {
    async fn transform(
        &self,
        _request: TransformRequest<'_>,
    ) -> Result<TransformResponse, TransportError> {
        Err(TransportError::new("simulated network failure"))
    }
}
