//! Breach-proof password orchestrator.
//!
//! The `BreachProofClient` composes injected capabilities into the three
//! protocol operations: create, verify, and update. Every operation is
//! fail-fast; no partial record is ever returned.

use pythia_core::{
    BreachProofPassword, Environment, Proof, ProofKey, ProofKeyRegistry, UpdateToken,
    fixed_time_eq,
};

use crate::{
    error::ClientError,
    traits::{CryptoEngine, TransformRequest, TransformationService},
};

/// Orchestrator over breach-proof password records.
///
/// Holds only read-only collaborators; concurrent operations from multiple
/// callers are safe without locking. Each operation performs at most one
/// network round trip (the transformation call) and blinds with a fresh
/// secret per call, so transcripts of different calls cannot be correlated.
///
/// # Type Parameters
///
/// - `E`: Environment implementation for randomness
/// - `C`: Crypto engine providing the blind-signature primitives
/// - `S`: Remote transformation service
pub struct BreachProofClient<E, C, S> {
    /// Environment for salt generation.
    env: E,

    /// Local blind-signature primitives.
    engine: C,

    /// Remote transformation round trip.
    service: S,

    /// Versioned proof keys for transformation verification.
    proof_keys: ProofKeyRegistry,
}

impl<E, C, S> BreachProofClient<E, C, S>
where
    E: Environment,
    C: CryptoEngine,
    S: TransformationService,
{
    /// Create a new client from its capabilities and proof-key registry.
    pub fn new(env: E, engine: C, service: S, proof_keys: ProofKeyRegistry) -> Self {
        Self { env, engine, service, proof_keys }
    }

    /// The proof-key registry this client verifies against.
    pub fn proof_keys(&self) -> &ProofKeyRegistry {
        &self.proof_keys
    }

    /// Create a breach-proof password from a raw password.
    ///
    /// Generates a fresh salt, blinds the password, transforms it remotely
    /// under the current proof key's epoch, verifies the returned proof, and
    /// deblinds. The proof check is mandatory here: a compromised or
    /// misbehaving service is detected before its output is used.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::ProofVerificationFailed`] or
    /// [`ClientError::MissingProof`] when the transformation cannot be
    /// trusted, or propagates registry, engine, and transport failures.
    pub async fn create_breach_proof_password(
        &self,
        password: &[u8],
    ) -> Result<BreachProofPassword, ClientError> {
        let salt = self.env.salt();
        let (blinded_password, blinding_secret) = self.engine.blind(password)?;
        let current_key = self.proof_keys.current_key()?;

        let response = self
            .service
            .transform(TransformRequest {
                blinded_password: &blinded_password,
                salt: &salt,
                version: current_key.version,
                include_proof: true,
            })
            .await?;

        let proof = response.proof.as_ref().ok_or(ClientError::MissingProof)?;
        self.check_proof(&response.transformed_password, &blinded_password, &salt, current_key, proof)?;

        let deblinded_password =
            self.engine.deblind(&response.transformed_password, &blinding_secret)?;

        tracing::debug!(version = current_key.version, "created breach-proof password");

        Ok(BreachProofPassword { salt, deblinded_password, version: current_key.version })
    }

    /// Verify a raw password against a stored record.
    ///
    /// Blinds with a fresh secret, transforms under the record's own epoch
    /// (never "current"), optionally verifies the proof, deblinds, and
    /// compares in fixed time.
    ///
    /// Returns `Ok(false)` on password mismatch; that is a legitimate
    /// outcome, not an error. Proof-verification failure is an error even
    /// when the password would have matched, because it marks the
    /// transformation itself as untrustworthy.
    pub async fn verify_breach_proof_password(
        &self,
        password: &[u8],
        record: &BreachProofPassword,
        include_proof: bool,
    ) -> Result<bool, ClientError> {
        let (blinded_password, blinding_secret) = self.engine.blind(password)?;
        let proof_key = self.proof_keys.key_for_version(record.version)?;

        let response = self
            .service
            .transform(TransformRequest {
                blinded_password: &blinded_password,
                salt: &record.salt,
                version: record.version,
                include_proof,
            })
            .await?;

        if include_proof {
            let proof = response.proof.as_ref().ok_or(ClientError::MissingProof)?;
            self.check_proof(
                &response.transformed_password,
                &blinded_password,
                &record.salt,
                proof_key,
                proof,
            )?;
        }

        let deblinded_password =
            self.engine.deblind(&response.transformed_password, &blinding_secret)?;

        let matches = fixed_time_eq(&deblinded_password, &record.deblinded_password);
        tracing::debug!(version = record.version, matches, "verified breach-proof password");

        Ok(matches)
    }

    /// Rotate a record to a new epoch using a signed update token.
    ///
    /// Purely local: re-derives the deblinded value under the token's next
    /// epoch without a network call or the raw password. The salt is
    /// preserved unchanged; it ties the record to the user identity, not to
    /// the key epoch.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::VersionMismatch`] unless the record's
    /// version equals the token's previous version exactly.
    pub fn update_breach_proof_password(
        &self,
        update_token: &str,
        record: &BreachProofPassword,
    ) -> Result<BreachProofPassword, ClientError> {
        let token: UpdateToken = update_token.parse()?;

        if record.version != token.prev_version {
            return Err(ClientError::VersionMismatch {
                record_version: record.version,
                token_prev: token.prev_version,
            });
        }

        let deblinded_password =
            self.engine.update_deblinded_with_token(&record.deblinded_password, &token.token)?;

        tracing::debug!(
            from = token.prev_version,
            to = token.next_version,
            "rotated breach-proof password"
        );

        Ok(BreachProofPassword {
            salt: record.salt,
            deblinded_password,
            version: token.next_version,
        })
    }

    /// Verify a transformation proof, mapping a clean `false` to an error.
    fn check_proof(
        &self,
        transformed_password: &[u8],
        blinded_password: &[u8],
        salt: &[u8],
        proof_key: &ProofKey,
        proof: &Proof,
    ) -> Result<(), ClientError> {
        let valid = self.engine.verify(
            transformed_password,
            blinded_password,
            salt,
            &proof_key.key,
            proof,
        )?;

        if valid { Ok(()) } else { Err(ClientError::ProofVerificationFailed) }
    }
}
