//! End-to-end orchestration tests over the mock Pythia deployment.
//!
//! Every test runs against seeded randomness; a failing case reproduces
//! exactly from the seed baked into it.

#![allow(clippy::unwrap_used)]

use pythia_client::{
    BreachProofClient, ClientError, CryptoEngine, ProofKeyError, ProofKeyRegistry,
    TransformationService,
};
use pythia_harness::{
    MockCryptoEngine, MockPythia, MockTransformationService, ProofStrippingService, SimEnv,
    TamperingService, UnreachableService,
};

const SERVER_SECRET: [u8; 32] = [0x42; 32];

fn pythia() -> MockPythia {
    MockPythia::new(SERVER_SECRET)
}

/// Client over the plain mock service, registry holding `versions` in order.
fn client(
    seed: u64,
    versions: &[u32],
) -> BreachProofClient<SimEnv, MockCryptoEngine<SimEnv>, MockTransformationService> {
    let env = SimEnv::with_seed(seed);
    client_with_service(versions, MockTransformationService::new(pythia()), env)
}

fn client_with_service<S: TransformationService>(
    versions: &[u32],
    service: S,
    env: SimEnv,
) -> BreachProofClient<SimEnv, MockCryptoEngine<SimEnv>, S> {
    let descriptors: Vec<String> =
        versions.iter().map(|v| pythia().proof_key_descriptor(*v)).collect();
    let registry = ProofKeyRegistry::from_descriptors(&descriptors).unwrap();

    BreachProofClient::new(env.clone(), MockCryptoEngine::new(env), service, registry)
}

#[tokio::test]
async fn round_trip_with_and_without_proof() {
    let client = client(1, &[1]);

    let record = client.create_breach_proof_password(b"correct horse").await.unwrap();
    assert_eq!(record.version, 1);

    assert!(client.verify_breach_proof_password(b"correct horse", &record, false).await.unwrap());
    assert!(client.verify_breach_proof_password(b"correct horse", &record, true).await.unwrap());
}

#[tokio::test]
async fn wrong_password_is_false_not_error() {
    let client = client(2, &[1]);

    let record = client.create_breach_proof_password(b"correct horse").await.unwrap();

    assert!(!client.verify_breach_proof_password(b"battery staple", &record, false).await.unwrap());
    assert!(!client.verify_breach_proof_password(b"battery staple", &record, true).await.unwrap());
}

#[tokio::test]
async fn verification_survives_fresh_blinding_secrets() {
    // Create and verify under environments with unrelated seeds: the
    // deblinded value must not depend on the blinding pad.
    let creator = client(3, &[1]);
    let record = creator.create_breach_proof_password(b"correct horse").await.unwrap();

    let verifier = client(99, &[1]);
    assert!(verifier.verify_breach_proof_password(b"correct horse", &record, true).await.unwrap());
}

#[tokio::test]
async fn verify_uses_the_record_epoch_not_the_current_one() {
    // Current key is v2; the record was created back at v1 and must still
    // verify against the v1 key.
    let old_client = client(4, &[1]);
    let record = old_client.create_breach_proof_password(b"correct horse").await.unwrap();

    let new_client = client(5, &[2, 1]);
    assert_eq!(new_client.proof_keys().current_key().unwrap().version, 2);
    assert!(new_client.verify_breach_proof_password(b"correct horse", &record, true).await.unwrap());
}

#[tokio::test]
async fn tampered_proof_fails_create_and_verify() {
    let env = SimEnv::with_seed(6);
    let tampering = TamperingService::new(MockTransformationService::new(pythia()));
    let client = client_with_service(&[1], tampering, env);

    let err = client.create_breach_proof_password(b"correct horse").await.unwrap_err();
    assert_eq!(err, ClientError::ProofVerificationFailed);
    assert!(err.is_fatal());

    // Same failure during verification, even though the password matches.
    let honest = self::client(7, &[1]);
    let record = honest.create_breach_proof_password(b"correct horse").await.unwrap();

    let env = SimEnv::with_seed(8);
    let tampering = TamperingService::new(MockTransformationService::new(pythia()));
    let suspicious = client_with_service(&[1], tampering, env);

    let err =
        suspicious.verify_breach_proof_password(b"correct horse", &record, true).await.unwrap_err();
    assert_eq!(err, ClientError::ProofVerificationFailed);

    // Without a proof request there is nothing to tamper with.
    assert!(suspicious.verify_breach_proof_password(b"correct horse", &record, false).await.unwrap());
}

#[tokio::test]
async fn stripped_proof_is_rejected() {
    let env = SimEnv::with_seed(9);
    let stripping = ProofStrippingService::new(MockTransformationService::new(pythia()));
    let client = client_with_service(&[1], stripping, env);

    let err = client.create_breach_proof_password(b"correct horse").await.unwrap_err();
    assert_eq!(err, ClientError::MissingProof);
}

#[tokio::test]
async fn unreachable_service_is_a_transient_transport_error() {
    let env = SimEnv::with_seed(10);
    let client = client_with_service(&[1], UnreachableService, env);

    let err = client.create_breach_proof_password(b"correct horse").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn rotation_chain_preserves_salt_and_password() {
    let pythia = pythia();
    let v1_client = client(11, &[1]);

    let record = v1_client.create_breach_proof_password(b"correct horse").await.unwrap();

    // v1 -> v2
    let v2_record =
        v1_client.update_breach_proof_password(&pythia.update_token(1, 2), &record).unwrap();
    assert_eq!(v2_record.version, 2);
    assert_eq!(v2_record.salt, record.salt);
    assert_ne!(v2_record.deblinded_password, record.deblinded_password);

    let v2_client = client(12, &[2, 1]);
    assert!(v2_client.verify_breach_proof_password(b"correct horse", &v2_record, true).await.unwrap());
    assert!(!v2_client.verify_breach_proof_password(b"battery staple", &v2_record, true).await.unwrap());

    // v2 -> v3, chained from the updated record.
    let v3_record =
        v2_client.update_breach_proof_password(&pythia.update_token(2, 3), &v2_record).unwrap();
    assert_eq!(v3_record.version, 3);
    assert_eq!(v3_record.salt, record.salt);

    let v3_client = client(13, &[3, 2, 1]);
    assert!(v3_client.verify_breach_proof_password(b"correct horse", &v3_record, true).await.unwrap());
}

#[tokio::test]
async fn stale_update_token_is_rejected() {
    let pythia = pythia();
    let client = client(14, &[1]);

    let record = client.create_breach_proof_password(b"correct horse").await.unwrap();
    let updated =
        client.update_breach_proof_password(&pythia.update_token(1, 2), &record).unwrap();

    // Replaying the 1->2 token against the already-updated record must fail
    // without producing any record.
    let result = client.update_breach_proof_password(&pythia.update_token(1, 2), &updated);
    assert_eq!(
        result.unwrap_err(),
        ClientError::VersionMismatch { record_version: 2, token_prev: 1 }
    );
}

#[test]
fn registry_scenario_from_configuration_order() {
    let pythia = pythia();
    let registry = ProofKeyRegistry::from_descriptors([
        pythia.proof_key_descriptor(1),
        pythia.proof_key_descriptor(2),
    ])
    .unwrap();

    assert_eq!(registry.current_key().unwrap().version, 1);
    assert_eq!(registry.key_for_version(2).unwrap().key, pythia.proof_key_bytes(2));
    assert_eq!(
        registry.key_for_version(3),
        Err(ProofKeyError::UnknownVersion { version: 3 })
    );
}

#[test]
fn engine_rejects_undersized_inputs() {
    let engine = MockCryptoEngine::new(SimEnv::with_seed(15));
    let secret = {
        let (_, secret) = engine.blind(b"pw").unwrap();
        secret
    };

    assert!(engine.deblind(b"short", &secret).is_err());
    assert!(engine.update_deblinded_with_token(b"short", b"also short").is_err());
}
