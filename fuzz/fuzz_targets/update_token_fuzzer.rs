//! Fuzz target for update-token parsing
//!
//! Prevent panics and partial parses on attacker-supplied token strings
//!
//! # Invariants
//!
//! - NEVER panic on arbitrary input
//! - An accepted token has exactly 4 dot-separated fields with the literal
//!   `UT` tag
//! - Re-encoding an accepted token parses back to the same value

#![no_main]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use libfuzzer_sys::fuzz_target;
use pythia_core::UpdateToken;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(token) = input.parse::<UpdateToken>() else {
        return;
    };

    let fields: Vec<&str> = input.split('.').collect();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0], "UT");

    let reencoded = format!(
        "UT.{}.{}.{}",
        token.prev_version,
        token.next_version,
        STANDARD.encode(&token.token)
    );
    let reparsed = reencoded.parse::<UpdateToken>().expect("re-encoded token must parse");
    assert_eq!(reparsed, token);
});
