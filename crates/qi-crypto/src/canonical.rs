//! # Canonicalization
//!
//! The exact byte-serialization rules a bundle's digest is computed
//! under. A bundle records which rule it used so any verifier can
//! reproduce the digest bit-for-bit; a digest produced under a different
//! rule, key order, or whitespace convention will not match and the
//! bundle is rejected.

use crate::CryptoError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{sha256, Hash};

/// Named digest rule recorded inside every bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalizationDescriptor {
    /// SHA-256 over the raw message bytes.
    #[serde(rename = "sha256-raw-v1")]
    Sha256Raw,
    /// SHA-256 over the canonical JSON form of the message: keys sorted
    /// lexicographically, no extraneous whitespace, UTF-8.
    #[serde(rename = "sha256-canonical-json-v1")]
    Sha256CanonicalJson,
}

impl CanonicalizationDescriptor {
    /// Compute the digest of `message` under this rule.
    pub fn digest(&self, message: &[u8]) -> Result<Hash, CryptoError> {
        match self {
            CanonicalizationDescriptor::Sha256Raw => Ok(sha256(message)),
            CanonicalizationDescriptor::Sha256CanonicalJson => {
                let value: Value = serde_json::from_slice(message)
                    .map_err(|e| CryptoError::InvalidInput(format!("not valid JSON: {e}")))?;
                Ok(sha256(canonical_json(&value).as_bytes()))
            }
        }
    }
}

/// Render a JSON value in canonical form: object keys sorted
/// lexicographically, no whitespace between tokens.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", parts.join(","))
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let parts: Vec<String> = entries
                .into_iter()
                .map(|(key, val)| {
                    format!("{}:{}", Value::String(key.clone()), canonical_json(val))
                })
                .collect();
            format!("{{{}}}", parts.join(","))
        }
    }
}

/// Serialize any value to its canonical JSON byte sequence.
pub fn canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CryptoError> {
    let json = serde_json::to_value(value).map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
    Ok(canonical_json(&json).into_bytes())
}
