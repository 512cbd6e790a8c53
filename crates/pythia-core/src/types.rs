//! Protocol value types.
//!
//! All types here are immutable values: key rotation and record updates
//! construct new instances rather than mutating in place, so concurrent
//! readers can never observe a half-applied transition.

use serde::{Deserialize, Serialize};

/// Size of a record salt in bytes.
pub const SALT_SIZE: usize = 32;

/// The persisted breach-proof record for one user.
///
/// Stores the protocol output (`deblinded_password`), never the raw
/// password. The stored value is useless to an attacker without interaction
/// with the transformation service that holds the epoch secret.
///
/// # Security
///
/// - **Debug Redaction**: The `Debug` impl redacts `deblinded_password` to
///   prevent accidental logging of the stored verifier. Always use custom
///   `Debug` implementations for types containing secrets.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachProofPassword {
    /// Random salt, generated once at creation and preserved across updates.
    pub salt: [u8; SALT_SIZE],
    /// The deblinded protocol output; this is what gets stored and compared.
    pub deblinded_password: Vec<u8>,
    /// The key epoch that produced `deblinded_password`.
    pub version: u32,
}

impl std::fmt::Debug for BreachProofPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreachProofPassword")
            .field("salt", &format_args!("{} bytes", self.salt.len()))
            .field(
                "deblinded_password",
                &format_args!("<redacted {} bytes>", self.deblinded_password.len()),
            )
            .field("version", &self.version)
            .finish()
    }
}

/// One versioned proof key from the registry.
///
/// Proof keys are public verification material; they carry no secrecy
/// requirement but are immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofKey {
    /// Key epoch this key verifies.
    pub version: u32,
    /// Raw key bytes, decoded from the descriptor's base64 field.
    pub key: Vec<u8>,
}

/// Zero-knowledge proof returned by the transformation service.
///
/// Exists only within one request's lifetime; verified locally before the
/// transformation result is trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    /// Proof challenge component.
    pub value_c: Vec<u8>,
    /// Proof response component.
    pub value_u: Vec<u8>,
}

/// A parsed key-rotation token.
///
/// Issued by the key-rotation authority as
/// `UT.<prev>.<next>.<base64 bytes>`; consumed once to carry a record from
/// epoch `prev_version` to epoch `next_version` without a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateToken {
    /// Epoch the token applies to.
    pub prev_version: u32,
    /// Epoch the token rotates into.
    pub next_version: u32,
    /// Opaque token bytes.
    pub token: Vec<u8>,
}
