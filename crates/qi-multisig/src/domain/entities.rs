//! # Domain Entities
//!
//! The signer roster: who is authorized to contribute a bundle, and
//! which public keys each contribution is verified against.

use qi_crypto::PublicKeySet;
use serde::{Deserialize, Serialize};
use shared_types::SignerId;
use std::collections::BTreeMap;

/// The n expected signers of a multisig session, each with the
/// per-algorithm public keys their bundles are verified against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerRoster {
    records: BTreeMap<SignerId, PublicKeySet>,
}

impl SignerRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signer with its public keys. Replaces any previous
    /// registration for the same identity.
    pub fn register(&mut self, id: SignerId, keys: PublicKeySet) -> Option<PublicKeySet> {
        self.records.insert(id, keys)
    }

    /// Whether the identity is among the expected signers.
    pub fn contains(&self, id: &SignerId) -> bool {
        self.records.contains_key(id)
    }

    /// Public keys registered for a signer.
    pub fn keys_for(&self, id: &SignerId) -> Option<&PublicKeySet> {
        self.records.get(id)
    }

    /// Number of expected signers (n).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Expected signer identities, in lexicographic order.
    pub fn signer_ids(&self) -> Vec<SignerId> {
        self.records.keys().cloned().collect()
    }
}
