//! Versioned proof-key registry.
//!
//! The registry is constructed once from configuration and never mutated;
//! concurrent lookups from multiple callers need no locking.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{
    error::{ParseError, ProofKeyError},
    types::ProofKey,
};

/// Literal tag opening every proof-key descriptor.
const PROOF_KEY_TAG: &str = "PK";

/// Number of dot-separated fields in a descriptor.
const PROOF_KEY_FIELDS: usize = 3;

/// Ordered set of versioned proof keys.
///
/// Keys are held in configuration order: position 0 is the current key, and
/// version lookups scan in order with the first match winning. Construction
/// rejects empty or malformed input, so a constructed registry always holds
/// at least one key.
#[derive(Debug, Clone)]
pub struct ProofKeyRegistry {
    keys: Vec<ProofKey>,
}

impl ProofKeyRegistry {
    /// Parse a registry from proof-key descriptors.
    ///
    /// Each descriptor must match `PK.<version>.<base64 key>` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoProofKeys`] when the iterator yields nothing,
    /// or [`ParseError::ProofKey`] when any descriptor is malformed.
    pub fn from_descriptors<I, S>(descriptors: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = descriptors
            .into_iter()
            .map(|descriptor| parse_descriptor(descriptor.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if keys.is_empty() {
            return Err(ParseError::NoProofKeys);
        }

        Ok(Self { keys })
    }

    /// The current proof key (configured position 0).
    ///
    /// # Errors
    ///
    /// Returns [`ProofKeyError::EmptyRegistry`] if the registry is somehow
    /// empty; unreachable through [`Self::from_descriptors`].
    pub fn current_key(&self) -> Result<&ProofKey, ProofKeyError> {
        self.keys.first().ok_or(ProofKeyError::EmptyRegistry)
    }

    /// The proof key for a specific epoch.
    ///
    /// Scans in configuration order; the first key whose version matches
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns [`ProofKeyError::UnknownVersion`] if no key carries the
    /// requested version.
    pub fn key_for_version(&self, version: u32) -> Result<&ProofKey, ProofKeyError> {
        self.keys
            .iter()
            .find(|key| key.version == version)
            .ok_or(ProofKeyError::UnknownVersion { version })
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the registry holds no keys (never true after construction).
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Parse one `PK.<version>.<base64>` descriptor.
fn parse_descriptor(descriptor: &str) -> Result<ProofKey, ParseError> {
    let fields: Vec<&str> = descriptor.split('.').collect();

    if fields.len() != PROOF_KEY_FIELDS {
        return Err(ParseError::ProofKey {
            reason: format!("expected {PROOF_KEY_FIELDS} fields, got {}", fields.len()),
        });
    }

    if fields[0] != PROOF_KEY_TAG {
        return Err(ParseError::ProofKey {
            reason: format!("expected tag {PROOF_KEY_TAG:?}, got {:?}", fields[0]),
        });
    }

    let version: u32 = fields[1]
        .parse()
        .map_err(|_| ParseError::ProofKey { reason: format!("invalid version {:?}", fields[1]) })?;

    let key = STANDARD
        .decode(fields[2])
        .map_err(|e| ParseError::ProofKey { reason: format!("invalid base64 key: {e}") })?;

    Ok(ProofKey { version, key })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn descriptor(version: u32, key: &[u8]) -> String {
        format!("PK.{version}.{}", STANDARD.encode(key))
    }

    #[test]
    fn current_key_is_configured_position_zero() {
        let registry =
            ProofKeyRegistry::from_descriptors([descriptor(1, b"key-a"), descriptor(2, b"key-b")])
                .unwrap();

        let current = registry.current_key().unwrap();
        assert_eq!(current.version, 1);
        assert_eq!(current.key, b"key-a");
    }

    #[test]
    fn key_for_version_finds_first_match() {
        let registry =
            ProofKeyRegistry::from_descriptors([descriptor(1, b"key-a"), descriptor(2, b"key-b")])
                .unwrap();

        assert_eq!(registry.key_for_version(2).unwrap().key, b"key-b");
        // First match wins when versions collide.
        let dup = ProofKeyRegistry::from_descriptors([
            descriptor(5, b"first"),
            descriptor(5, b"second"),
        ])
        .unwrap();
        assert_eq!(dup.key_for_version(5).unwrap().key, b"first");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let registry = ProofKeyRegistry::from_descriptors([descriptor(1, b"key-a")]).unwrap();

        assert_eq!(
            registry.key_for_version(3),
            Err(ProofKeyError::UnknownVersion { version: 3 })
        );
    }

    #[test]
    fn empty_input_is_a_configuration_error() {
        let result = ProofKeyRegistry::from_descriptors(Vec::<String>::new());
        assert_eq!(result.unwrap_err(), ParseError::NoProofKeys);
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        for bad in ["PK.1", "PK.1.a.b", "", "PK"] {
            let result = ProofKeyRegistry::from_descriptors([bad]);
            assert!(
                matches!(result, Err(ParseError::ProofKey { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let result = ProofKeyRegistry::from_descriptors([format!("UT.1.{}", STANDARD.encode("k"))]);
        assert!(matches!(result, Err(ParseError::ProofKey { .. })));
    }

    #[test]
    fn non_numeric_version_is_rejected() {
        let result =
            ProofKeyRegistry::from_descriptors([format!("PK.one.{}", STANDARD.encode("k"))]);
        assert!(matches!(result, Err(ParseError::ProofKey { .. })));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let result = ProofKeyRegistry::from_descriptors(["PK.1.!!!not-base64!!!"]);
        assert!(matches!(result, Err(ParseError::ProofKey { .. })));
    }

    #[test]
    fn one_malformed_descriptor_fails_the_whole_registry() {
        let result = ProofKeyRegistry::from_descriptors([descriptor(1, b"ok"), "PK.2".to_string()]);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn lookups_are_idempotent(versions in proptest::collection::vec(0u32..16, 1..8), probe in 0u32..16) {
            let descriptors: Vec<String> =
                versions.iter().map(|v| descriptor(*v, &v.to_be_bytes())).collect();
            let registry = ProofKeyRegistry::from_descriptors(&descriptors).unwrap();

            prop_assert_eq!(registry.current_key().unwrap().version, versions[0]);

            let first = registry.key_for_version(probe).map(Clone::clone);
            let second = registry.key_for_version(probe).map(Clone::clone);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn arbitrary_strings_never_panic(input in ".*") {
            let _ = ProofKeyRegistry::from_descriptors([input.as_str()]);
        }
    }
}
