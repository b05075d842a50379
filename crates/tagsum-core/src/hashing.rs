//! Transaction hash helpers.
//!
//! The program identifies a record by a 64-character hex transaction hash.
//! Callers that do not have one derive it from the transaction description
//! (sha256, lowercase hex) or generate a random one for test data.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::errors::{TagsumError, TagsumResult};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Hash raw bytes with sha256.
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(bytes);
    h.finalize().into()
}

/// Hash raw bytes and return lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha256(bytes))
}

/// Deterministic transaction hash for a description.
///
/// Leading/trailing whitespace is ignored so that re-submitting the same text
/// maps to the same record address.
pub fn transaction_hash_for(description: &str) -> String {
    sha256_hex(description.trim().as_bytes())
}

/// Random 64-character lowercase hex hash.
pub fn random_transaction_hash() -> String {
    let mut rng = rand::thread_rng();
    (0..64)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

/// Lowercase a user-supplied hash after checking it is hex.
pub fn normalize_transaction_hash(hash: &str) -> TagsumResult<String> {
    let h = hash.trim();
    if h.is_empty() || !h.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TagsumError::invalid_argument(
            "transaction hash must be hexadecimal",
        ));
    }
    Ok(h.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn description_hash_is_stable_and_trimmed() {
        let a = transaction_hash_for("Coffee at the library");
        let b = transaction_hash_for("  Coffee at the library\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn random_hash_shape() {
        let h = random_transaction_hash();
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(h, random_transaction_hash());
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize_transaction_hash(" ABCD ").unwrap(), "abcd");
        assert!(normalize_transaction_hash("xyz").is_err());
        assert!(normalize_transaction_hash("").is_err());
    }
}
