//! # Common Entities
//!
//! Byte aliases and identity types used by every subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash type (32-byte SHA-256).
pub type Hash = [u8; 32];

/// Account address on a chain (20-byte).
pub type Address = [u8; 20];

/// Identity of a signer in a multisig roster or attestation context.
///
/// Signer identities are opaque strings chosen by the operator
/// (organization member names, key-management URIs, and so on). They are
/// compared byte-for-byte and ordered lexicographically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerId(String);

impl SignerId {
    /// Create a new signer identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SignerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
