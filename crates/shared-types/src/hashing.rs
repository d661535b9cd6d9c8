//! # SHA-256 Hashing
//!
//! One-shot helpers over the digests the interop core standardizes on.
//! Every canonical digest in the system (bundle digests, attestation
//! hashes, idempotency checks) is SHA-256.

use crate::Hash;
use sha2::{Digest, Sha256};

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple inputs as one stream.
pub fn sha256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().into()
}

/// Lowercase hex encoding of a hash, for log lines and display.
pub fn to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256("abc")
        let hash = sha256(b"abc");
        assert_eq!(
            to_hex(&hash),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_many_matches_concatenation() {
        let joined = sha256(b"hello world");
        let streamed = sha256_many(&[b"hello ", b"world"]);
        assert_eq!(joined, streamed);
    }

    #[test]
    fn test_to_hex_length() {
        let hash = sha256(b"x");
        assert_eq!(to_hex(&hash).len(), 64);
    }
}
