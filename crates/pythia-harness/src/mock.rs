//! Algebraic mock of the Pythia transform.
//!
//! Models blinding, transformation, deblinding, proofs, and epoch rotation
//! over XOR and SHA-256 so the orchestrator can be exercised end-to-end with
//! real algebraic relationships but no elliptic-curve arithmetic.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use pythia_client::{
    BlindingSecret, CryptoEngine, EngineError, TransformRequest, TransformResponse,
    TransformationService, TransportError,
};
use pythia_core::{Environment, Proof, fixed_time_eq};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Width of every value in the mock algebra.
const BLOCK_SIZE: usize = 32;

/// Shared model of one mock Pythia deployment.
///
/// Owns the server secret from which per-epoch transform keys and proof keys
/// are derived. Both the [`MockTransformationService`] and the test fixtures
/// (proof-key descriptors, update tokens) derive from the same model, so
/// registry contents and service behavior stay consistent.
#[derive(Clone)]
pub struct MockPythia {
    server_secret: [u8; BLOCK_SIZE],
}

impl MockPythia {
    /// Create a deployment model from a server secret.
    #[must_use]
    pub fn new(server_secret: [u8; BLOCK_SIZE]) -> Self {
        Self { server_secret }
    }

    /// Per-epoch transform key.
    fn epoch_key(&self, version: u32) -> [u8; BLOCK_SIZE] {
        digest(&[b"epoch-key".as_slice(), &version.to_be_bytes(), &self.server_secret])
    }

    /// Salt contribution to the transform, independent of the epoch.
    fn salt_mask(salt: &[u8]) -> [u8; BLOCK_SIZE] {
        digest(&[b"salt-mask".as_slice(), salt])
    }

    /// Public proof-key bytes for an epoch.
    #[must_use]
    pub fn proof_key_bytes(&self, version: u32) -> [u8; BLOCK_SIZE] {
        digest(&[b"proof-key".as_slice(), &version.to_be_bytes(), &self.server_secret])
    }

    /// Registry descriptor (`PK.<version>.<base64>`) for an epoch.
    #[must_use]
    pub fn proof_key_descriptor(&self, version: u32) -> String {
        format!("PK.{version}.{}", STANDARD.encode(self.proof_key_bytes(version)))
    }

    /// Rotation token (`UT.<prev>.<next>.<base64>`) between two epochs.
    ///
    /// The token bytes are the XOR of the two epoch keys, so applying the
    /// token carries a deblinded value from `prev` to `next`.
    #[must_use]
    pub fn update_token(&self, prev_version: u32, next_version: u32) -> String {
        let token = xor(&self.epoch_key(prev_version), &self.epoch_key(next_version));
        format!("UT.{prev_version}.{next_version}.{}", STANDARD.encode(token))
    }

    /// The raw transform: blinded value under an epoch key plus salt mask.
    fn transform(&self, blinded: &[u8; BLOCK_SIZE], salt: &[u8], version: u32) -> [u8; BLOCK_SIZE] {
        xor(&xor(blinded, &self.epoch_key(version)), &Self::salt_mask(salt))
    }
}

/// Proof tag over one transformation, keyed by the epoch's proof key.
fn compute_proof(
    proof_key: &[u8],
    transformed_password: &[u8],
    blinded_password: &[u8],
    salt: &[u8],
) -> Proof {
    Proof {
        value_c: hmac_tag(proof_key, b"c", &[transformed_password, blinded_password, salt]),
        value_u: hmac_tag(proof_key, b"u", &[transformed_password, blinded_password, salt]),
    }
}

/// Mock crypto engine: XOR blinding with a random pad.
///
/// Independent of [`MockPythia`]; proof verification recomputes the HMAC
/// tags from the supplied proof key, exactly as a real engine recomputes the
/// proof equation from public values.
#[derive(Clone)]
pub struct MockCryptoEngine<E> {
    env: E,
}

impl<E: Environment> MockCryptoEngine<E> {
    /// Create an engine drawing blinding pads from the given environment.
    pub fn new(env: E) -> Self {
        Self { env }
    }
}

impl<E: Environment> CryptoEngine for MockCryptoEngine<E> {
    fn blind(&self, password: &[u8]) -> Result<(Vec<u8>, BlindingSecret), EngineError> {
        let mut pad = [0u8; BLOCK_SIZE];
        self.env.random_bytes(&mut pad);

        let hashed = digest(&[b"password".as_slice(), password]);
        let blinded = xor(&hashed, &pad);

        Ok((blinded.to_vec(), BlindingSecret::new(pad.to_vec())))
    }

    fn verify(
        &self,
        transformed_password: &[u8],
        blinded_password: &[u8],
        salt: &[u8],
        proof_key: &[u8],
        proof: &Proof,
    ) -> Result<bool, EngineError> {
        let expected = compute_proof(proof_key, transformed_password, blinded_password, salt);

        Ok(fixed_time_eq(&expected.value_c, &proof.value_c)
            && fixed_time_eq(&expected.value_u, &proof.value_u))
    }

    fn deblind(
        &self,
        transformed_password: &[u8],
        blinding_secret: &BlindingSecret,
    ) -> Result<Vec<u8>, EngineError> {
        let transformed = as_block(transformed_password, "transformed password")?;
        let pad = as_block(blinding_secret.as_bytes(), "blinding secret")?;

        Ok(xor(&transformed, &pad).to_vec())
    }

    fn update_deblinded_with_token(
        &self,
        deblinded_password: &[u8],
        token: &[u8],
    ) -> Result<Vec<u8>, EngineError> {
        let deblinded = as_block(deblinded_password, "deblinded password")?;
        let token = as_block(token, "update token")?;

        Ok(xor(&deblinded, &token).to_vec())
    }
}

/// Mock transformation service applying the model's transform in-process.
#[derive(Clone)]
pub struct MockTransformationService {
    pythia: MockPythia,
}

impl MockTransformationService {
    /// Create a service over a deployment model.
    #[must_use]
    pub fn new(pythia: MockPythia) -> Self {
        Self { pythia }
    }
}

#[async_trait]
impl TransformationService for MockTransformationService {
    async fn transform(
        &self,
        request: TransformRequest<'_>,
    ) -> Result<TransformResponse, TransportError> {
        let blinded: [u8; BLOCK_SIZE] = request
            .blinded_password
            .try_into()
            .map_err(|_| TransportError::new("service rejected malformed blinded password"))?;

        let transformed = self.pythia.transform(&blinded, request.salt, request.version);

        let proof = request.include_proof.then(|| {
            compute_proof(
                &self.pythia.proof_key_bytes(request.version),
                &transformed,
                &blinded,
                request.salt,
            )
        });

        Ok(TransformResponse { transformed_password: transformed.to_vec(), proof })
    }
}

fn digest(parts: &[&[u8]]) -> [u8; BLOCK_SIZE] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

fn hmac_tag(key: &[u8], label: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    // HMAC accepts keys of any length; the zero-key fallback is unreachable.
    let mut mac = HmacSha256::new_from_slice(key)
        .unwrap_or_else(|_| <HmacSha256 as Mac>::new(&Default::default()));
    mac.update(label);
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().to_vec()
}

fn xor(a: &[u8; BLOCK_SIZE], b: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = a[i] ^ b[i];
    }
    out
}

fn as_block(bytes: &[u8], what: &str) -> Result<[u8; BLOCK_SIZE], EngineError> {
    bytes
        .try_into()
        .map_err(|_| EngineError::new(format!("{what} must be {BLOCK_SIZE} bytes, got {}", bytes.len())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::sim_env::SimEnv;

    use super::*;

    #[test]
    fn deblinded_value_is_independent_of_the_pad() {
        let pythia = MockPythia::new([9u8; BLOCK_SIZE]);
        let engine_a = MockCryptoEngine::new(SimEnv::with_seed(1));
        let engine_b = MockCryptoEngine::new(SimEnv::with_seed(2));
        let salt = [5u8; BLOCK_SIZE];

        let mut outputs = Vec::new();
        for engine in [&engine_a, &engine_b] {
            let (blinded, secret) = engine.blind(b"password").unwrap();
            let blinded: [u8; BLOCK_SIZE] = blinded.as_slice().try_into().unwrap();
            let transformed = pythia.transform(&blinded, &salt, 1);
            outputs.push(engine.deblind(&transformed, &secret).unwrap());
        }

        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn update_token_chains_epochs() {
        let pythia = MockPythia::new([9u8; BLOCK_SIZE]);
        let engine = MockCryptoEngine::new(SimEnv::with_seed(3));
        let salt = [5u8; BLOCK_SIZE];

        let (blinded, secret) = engine.blind(b"password").unwrap();
        let blinded: [u8; BLOCK_SIZE] = blinded.as_slice().try_into().unwrap();

        let at_v1 = engine.deblind(&pythia.transform(&blinded, &salt, 1), &secret).unwrap();
        let at_v2 = engine.deblind(&pythia.transform(&blinded, &salt, 2), &secret).unwrap();

        let token: pythia_core::UpdateToken = pythia.update_token(1, 2).parse().unwrap();
        let rotated = engine.update_deblinded_with_token(&at_v1, &token.token).unwrap();

        assert_eq!(rotated, at_v2);
    }

    #[test]
    fn proof_tags_depend_on_every_input() {
        let proof = compute_proof(b"key", b"transformed", b"blinded", b"salt");

        assert_ne!(proof, compute_proof(b"other", b"transformed", b"blinded", b"salt"));
        assert_ne!(proof, compute_proof(b"key", b"transformed!", b"blinded", b"salt"));
        assert_ne!(proof, compute_proof(b"key", b"transformed", b"blinded!", b"salt"));
        assert_ne!(proof, compute_proof(b"key", b"transformed", b"blinded", b"salt!"));
    }
}
