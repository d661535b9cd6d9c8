//! # Domain Value Objects
//!
//! Chain identifiers, the validation state machine, and the
//! idempotency key every mint is recorded under.

use serde::{Deserialize, Serialize};
use shared_types::Hash;
use std::fmt;

/// Supported blockchain identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainId {
    /// Quantum-Interop (our chain, the mint target).
    QuantumInterop,
    /// Ethereum mainnet.
    Ethereum,
    /// Bitcoin mainnet.
    Bitcoin,
    /// Polygon (PoS).
    Polygon,
    /// Base L2.
    Base,
    /// Solana mainnet.
    Solana,
}

impl ChainId {
    /// Default confirmation depth required for finality.
    pub fn required_confirmations(&self) -> u64 {
        match self {
            ChainId::QuantumInterop => 6,
            ChainId::Ethereum => 12, // PoS, 2 epochs
            ChainId::Bitcoin => 6,   // PoW, ~1 hour
            ChainId::Polygon => 128, // Fast blocks, deep reorgs
            ChainId::Base => 12,     // Inherits L1 finality
            ChainId::Solana => 32,   // Rooted slots
        }
    }

    /// Estimated block time in seconds.
    pub fn block_time_secs(&self) -> u64 {
        match self {
            ChainId::QuantumInterop => 10,
            ChainId::Ethereum => 12,
            ChainId::Bitcoin => 600,
            ChainId::Polygon => 2,
            ChainId::Base => 2,
            ChainId::Solana => 1,
        }
    }

    /// Stable wire label.
    pub fn label(&self) -> &'static str {
        match self {
            ChainId::QuantumInterop => "quantum-interop",
            ChainId::Ethereum => "ethereum",
            ChainId::Bitcoin => "bitcoin",
            ChainId::Polygon => "polygon",
            ChainId::Base => "base",
            ChainId::Solana => "solana",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The (source chain, transaction hash) pair a mint is keyed by.
///
/// Globally unique per source chain; used as the idempotency key, so at
/// most one credit is ever minted for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ForeignTransactionReference {
    /// Source chain the transaction was included on.
    pub chain: ChainId,
    /// Chain-native transaction hash.
    #[serde(with = "hex::serde")]
    pub tx_hash: Hash,
}

impl ForeignTransactionReference {
    /// Create a reference.
    pub fn new(chain: ChainId, tx_hash: Hash) -> Self {
        Self { chain, tx_hash }
    }
}

impl fmt::Display for ForeignTransactionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:0x{}", self.chain, hex::encode(self.tx_hash))
    }
}

/// Validation request state machine.
///
/// One instance of the machine exists per validation request. The only
/// suspension point is `Fetching`; everything after signer extraction
/// runs without awaiting so the mint decision cannot be cancelled
/// half-applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationState {
    /// Request accepted, nothing fetched yet.
    #[default]
    Requested,
    /// Chain reader query in flight.
    Fetching,
    /// Query failed (timeout, RPC error, not found); retry pending.
    FetchFailed,
    /// Foreign transaction record in hand.
    Fetched,
    /// Confirmation depth checked against the finality policy.
    FinalityChecked,
    /// Chain-validated sender extracted from the record.
    SignerExtracted,
    /// Record malformed or mismatched; never retried.
    Rejected,
    /// Credit minted; attestation recorded.
    Minted,
    /// A prior mint exists; stored attestation returned unchanged.
    AlreadyMinted,
}

impl ValidationState {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, next: ValidationState) -> bool {
        matches!(
            (self, next),
            (Self::Requested, Self::Fetching)
                | (Self::Fetching, Self::Fetched)
                | (Self::Fetching, Self::FetchFailed)
                | (Self::FetchFailed, Self::Fetching)
                | (Self::Fetched, Self::FinalityChecked)
                | (Self::FinalityChecked, Self::SignerExtracted)
                | (Self::FinalityChecked, Self::Rejected)
                | (Self::SignerExtracted, Self::Rejected)
                | (Self::SignerExtracted, Self::Minted)
                | (Self::SignerExtracted, Self::AlreadyMinted)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Minted | Self::AlreadyMinted)
    }
}
