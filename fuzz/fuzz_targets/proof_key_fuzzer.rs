//! Fuzz target for proof-key descriptor parsing
//!
//! Prevent panics and partial parses on malformed registry configuration
//!
//! # Invariants
//!
//! - NEVER panic on arbitrary input
//! - An accepted descriptor has exactly 3 dot-separated fields with the
//!   literal `PK` tag and base64-decodable key bytes
//! - Re-encoding an accepted key parses back to the same key

#![no_main]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use libfuzzer_sys::fuzz_target;
use pythia_core::ProofKeyRegistry;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(registry) = ProofKeyRegistry::from_descriptors([input]) else {
        return;
    };

    // Accepted input must have had the exact descriptor shape.
    let fields: Vec<&str> = input.split('.').collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0], "PK");

    let key = registry.current_key().expect("constructed registry is non-empty");
    let reencoded = format!("PK.{}.{}", key.version, STANDARD.encode(&key.key));
    let reparsed = ProofKeyRegistry::from_descriptors([reencoded.as_str()])
        .expect("re-encoded descriptor must parse");
    assert_eq!(reparsed.current_key().expect("non-empty"), key);
});
