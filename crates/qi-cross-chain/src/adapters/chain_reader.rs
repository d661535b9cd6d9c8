//! Static Chain Reader Adapter
//!
//! In-memory implementation of the `ChainReader` port. In production
//! this would make RPC calls to the foreign chains' own nodes; here
//! transactions are registered up front, heights advance on demand, and
//! faults can be injected to drive the retry and finality paths.

use crate::domain::{ChainId, ForeignTransactionReference, ForeignTxRecord, ReadError};
use crate::ports::outbound::ChainReader;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, Hash};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

#[derive(Clone)]
struct RegisteredTx {
    sender: Address,
    amount: u64,
    asset: String,
    block_number: u64,
}

/// Chain reader over registered transactions.
pub struct StaticChainReader {
    transactions: RwLock<HashMap<ForeignTransactionReference, RegisteredTx>>,
    heights: RwLock<HashMap<ChainId, u64>>,
    faults_remaining: AtomicU32,
}

impl StaticChainReader {
    /// Create a reader with no known chains.
    pub fn new() -> Self {
        Self {
            transactions: RwLock::new(HashMap::new()),
            heights: RwLock::new(HashMap::new()),
            faults_remaining: AtomicU32::new(0),
        }
    }

    /// Create a reader with initial chain heights.
    pub fn with_chains(chains: &[(ChainId, u64)]) -> Self {
        let reader = Self::new();
        {
            let mut heights = reader.heights.write();
            for (chain, height) in chains {
                heights.insert(*chain, *height);
            }
        }
        reader
    }

    /// Register a finalized transaction the reader will serve.
    pub fn register_transaction(
        &self,
        reference: ForeignTransactionReference,
        sender: Address,
        amount: u64,
        asset: impl Into<String>,
        block_number: u64,
    ) {
        self.transactions.write().insert(
            reference,
            RegisteredTx {
                sender,
                amount,
                asset: asset.into(),
                block_number,
            },
        );
    }

    /// Advance a chain's tip by `blocks`.
    pub fn advance_height(&self, chain: ChainId, blocks: u64) {
        let mut heights = self.heights.write();
        let entry = heights.entry(chain).or_insert(0);
        *entry += blocks;
    }

    /// Fail the next `count` fetches with an RPC error.
    pub fn inject_faults(&self, count: u32) {
        self.faults_remaining.store(count, Ordering::SeqCst);
    }

    fn take_fault(&self) -> bool {
        self.faults_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok()
    }
}

impl Default for StaticChainReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainReader for StaticChainReader {
    async fn fetch_transaction(
        &self,
        chain: ChainId,
        tx_hash: Hash,
    ) -> Result<ForeignTxRecord, ReadError> {
        if self.take_fault() {
            return Err(ReadError::Rpc("injected fault".to_string()));
        }

        let reference = ForeignTransactionReference::new(chain, tx_hash);
        debug!("[qi-cross-chain] fetching {}", reference);

        let tx = self
            .transactions
            .read()
            .get(&reference)
            .cloned()
            .ok_or(ReadError::NotFound)?;

        let height = self.heights.read().get(&chain).copied().unwrap_or(0);
        // A transaction in the tip block has one confirmation.
        let confirmations = height.saturating_sub(tx.block_number).saturating_add(1);

        Ok(ForeignTxRecord {
            sender: tx.sender,
            amount: tx.amount,
            asset: tx.asset,
            block_number: tx.block_number,
            confirmations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader_with_tx() -> (StaticChainReader, ForeignTransactionReference) {
        let reader = StaticChainReader::with_chains(&[(ChainId::Ethereum, 120)]);
        let reference = ForeignTransactionReference::new(ChainId::Ethereum, [0xAB; 32]);
        reader.register_transaction(reference, [0x11; 20], 1_500, "ETH", 100);
        (reader, reference)
    }

    #[tokio::test]
    async fn test_fetch_registered_transaction() {
        let (reader, reference) = reader_with_tx();

        let record = reader
            .fetch_transaction(reference.chain, reference.tx_hash)
            .await
            .unwrap();

        assert_eq!(record.sender, [0x11; 20]);
        assert_eq!(record.amount, 1_500);
        assert_eq!(record.confirmations, 21);
    }

    #[tokio::test]
    async fn test_unknown_transaction_not_found() {
        let reader = StaticChainReader::with_chains(&[(ChainId::Ethereum, 120)]);

        let result = reader.fetch_transaction(ChainId::Ethereum, [0xFF; 32]).await;
        assert_eq!(result, Err(ReadError::NotFound));
    }

    #[tokio::test]
    async fn test_confirmations_grow_with_height() {
        let (reader, reference) = reader_with_tx();

        let before = reader
            .fetch_transaction(reference.chain, reference.tx_hash)
            .await
            .unwrap();
        reader.advance_height(ChainId::Ethereum, 10);
        let after = reader
            .fetch_transaction(reference.chain, reference.tx_hash)
            .await
            .unwrap();

        assert_eq!(after.confirmations, before.confirmations + 10);
    }

    #[tokio::test]
    async fn test_injected_faults_then_recovery() {
        let (reader, reference) = reader_with_tx();
        reader.inject_faults(2);

        for _ in 0..2 {
            let result = reader
                .fetch_transaction(reference.chain, reference.tx_hash)
                .await;
            assert!(matches!(result, Err(ReadError::Rpc(_))));
        }

        let record = reader
            .fetch_transaction(reference.chain, reference.tx_hash)
            .await;
        assert!(record.is_ok());
    }
}
