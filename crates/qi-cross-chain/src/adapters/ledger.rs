//! In-Memory Credit Ledger Adapter
//!
//! Sharded map keyed by foreign transaction reference. The reference is
//! hashed to pick a shard, so concurrent validations of unrelated
//! references land on different locks; the presence check and the
//! insert for one reference happen under a single shard guard.

use crate::domain::{ChainId, CrossChainAttestation, ForeignTransactionReference};
use crate::ports::outbound::{CreditLedger, InsertOutcome};
use parking_lot::Mutex;
use shared_types::Address;
use std::collections::hash_map::{DefaultHasher, Entry, HashMap};
use std::hash::{Hash as _, Hasher};
use tracing::debug;

const SHARD_COUNT: usize = 16;

type Shard = Mutex<HashMap<ForeignTransactionReference, CrossChainAttestation>>;

/// In-memory, shard-locked idempotency store.
pub struct InMemoryCreditLedger {
    shards: [Shard; SHARD_COUNT],
}

impl InMemoryCreditLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            shards: std::array::from_fn(|_| Mutex::new(HashMap::new())),
        }
    }

    fn shard_for(&self, reference: &ForeignTransactionReference) -> &Shard {
        let mut hasher = DefaultHasher::new();
        reference.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARD_COUNT]
    }

    /// Number of recorded mints.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Whether nothing has been minted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All credits minted to a signer, in no particular order.
    pub fn credits_for_signer(&self, signer: &Address) -> Vec<CrossChainAttestation> {
        self.shards
            .iter()
            .flat_map(|shard| {
                shard
                    .lock()
                    .values()
                    .filter(|attestation| attestation.signer == *signer)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Total base units minted against one source chain.
    pub fn total_minted(&self, chain: ChainId) -> u64 {
        self.shards
            .iter()
            .map(|shard| {
                shard
                    .lock()
                    .iter()
                    .filter(|(reference, _)| reference.chain == chain)
                    .map(|(_, attestation)| attestation.amount)
                    .sum::<u64>()
            })
            .sum()
    }
}

impl Default for InMemoryCreditLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CreditLedger for InMemoryCreditLedger {
    fn get(&self, reference: &ForeignTransactionReference) -> Option<CrossChainAttestation> {
        self.shard_for(reference).lock().get(reference).cloned()
    }

    fn insert_if_absent(
        &self,
        reference: ForeignTransactionReference,
        attestation: CrossChainAttestation,
    ) -> InsertOutcome {
        let mut shard = self.shard_for(&reference).lock();
        match shard.entry(reference) {
            Entry::Occupied(existing) => InsertOutcome::AlreadyPresent(existing.get().clone()),
            Entry::Vacant(slot) => {
                debug!("[qi-cross-chain] ledger insert: {}", slot.key());
                slot.insert(attestation);
                InsertOutcome::Inserted
            }
        }
    }
}
