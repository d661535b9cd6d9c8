//! # Outbound Ports
//!
//! Traits for the external collaborators: the foreign chain reader and
//! the credit ledger.

use crate::domain::{
    ChainId, CrossChainAttestation, ForeignTransactionReference, ForeignTxRecord, ReadError,
};
use async_trait::async_trait;
use shared_types::Hash;

/// Read-only access to a foreign chain - outbound port.
///
/// Implementations query the chain's own nodes for a finalized
/// transaction and its consensus-validated sender. The call is
/// read-only and idempotent; the validator retries it freely.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetch a transaction record by chain and native hash.
    async fn fetch_transaction(
        &self,
        chain: ChainId,
        tx_hash: Hash,
    ) -> Result<ForeignTxRecord, ReadError>;
}

/// Outcome of an atomic insert-if-absent on the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The attestation was recorded; this call performed the mint.
    Inserted,
    /// A record already existed; it is returned unchanged.
    AlreadyPresent(CrossChainAttestation),
}

/// Idempotency store for minted credits - outbound port.
///
/// The ledger is the only structure mutated by concurrent validations.
/// `insert_if_absent` must be atomic relative to concurrent calls for
/// the *same* reference: the presence check and the insert happen under
/// one guard, so exactly one caller ever observes `Inserted`.
pub trait CreditLedger: Send + Sync {
    /// The stored attestation for a reference, if any.
    fn get(&self, reference: &ForeignTransactionReference) -> Option<CrossChainAttestation>;

    /// Record an attestation unless one already exists for the reference.
    fn insert_if_absent(
        &self,
        reference: ForeignTransactionReference,
        attestation: CrossChainAttestation,
    ) -> InsertOutcome;
}
