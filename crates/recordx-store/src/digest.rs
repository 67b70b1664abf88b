//! Snapshot digests
//!
//! Stable SHA256 over the canonical JSON of the record list. Record fields
//! serialize in declaration order and tags are a sorted set, so equal books
//! always hash equally.

use recordx_core::model::Record;
use sha2::{Digest, Sha256};

use crate::errors::{serialization_error, Result};

/// Compute the hex SHA256 digest of a record list
///
/// # Errors
/// `Serialization` if a record cannot be encoded.
pub fn compute_records_digest(records: &[Record]) -> Result<String> {
    let json =
        serde_json::to_vec(records).map_err(|e| serialization_error("compute_digest", &e))?;
    Ok(sha256_hex(&json))
}

/// Hex SHA256 of raw bytes
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordx_core::model::Name;

    fn record(name: &str) -> Record {
        Record::new(Name::parse(name).unwrap())
    }

    #[test]
    fn test_digest_is_64_hex_chars() {
        let digest = compute_records_digest(&[record("Alice")]).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_depends_on_order() {
        let ab = compute_records_digest(&[record("Alice"), record("Benson")]).unwrap();
        let ba = compute_records_digest(&[record("Benson"), record("Alice")]).unwrap();
        assert_ne!(ab, ba);
        assert_eq!(
            ab,
            compute_records_digest(&[record("Alice"), record("Benson")]).unwrap()
        );
    }
}
