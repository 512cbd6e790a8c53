//! Fixed-time byte comparison.

use subtle::ConstantTimeEq;

/// Compare two byte slices without early exit on the first mismatch.
///
/// Used for the deblinded-password comparison during verification, where a
/// variable-time comparison would leak how many leading bytes matched.
/// Slices of different lengths compare unequal; both sides of the protocol
/// comparison are fixed-shape outputs, so length itself is not secret.
pub fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
