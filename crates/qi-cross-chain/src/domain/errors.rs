//! # Domain Errors
//!
//! The validator's typed failure surface. Callers must be able to tell
//! "try again later" from "this will never succeed" from "already
//! done": collapsing these into one generic failure misclassifies
//! financial outcomes.

use thiserror::Error;

/// Failures of a chain reader query.
///
/// None of these prove the transaction does not exist; the query is
/// read-only and idempotent, so all of them may be retried freely.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// The query timed out.
    #[error("read timed out")]
    Timeout,

    /// The chain RPC returned an error.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// The transaction is not (yet) known to the queried node.
    #[error("transaction not found")]
    NotFound,
}

/// Why a fetched record was terminally rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RejectReason {
    /// The record carries no sender.
    #[error("record has no sender")]
    MissingSender,

    /// A positive transfer was expected but the record carries zero value.
    #[error("record carries zero value")]
    ZeroAmount,

    /// The record's asset disagrees with what the reference claims.
    #[error("asset mismatch: claimed {claimed}, recorded {recorded}")]
    AssetMismatch {
        /// Asset the caller claimed
        claimed: String,
        /// Asset the chain recorded
        recorded: String,
    },

    /// The record's amount disagrees with what the reference claims.
    #[error("amount mismatch: claimed {claimed}, recorded {recorded}")]
    AmountMismatch {
        /// Amount the caller claimed
        claimed: u64,
        /// Amount the chain recorded
        recorded: u64,
    },
}

/// Validation errors, classified by what the caller should do next.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The foreign transaction could not be fetched within the retry
    /// budget. Recoverable: retry later. Not proof of absence.
    #[error("proof unavailable after {attempts} attempts: {source}")]
    ProofUnavailable {
        /// Fetch attempts made
        attempts: u32,
        /// Last underlying read failure
        #[source]
        source: ReadError,
    },

    /// The transaction exists but is not yet buried deep enough.
    /// Recoverable: retry after a delay.
    #[error("pending finality: {got}/{required} confirmations")]
    PendingFinality {
        /// Confirmations observed
        got: u64,
        /// Confirmations required for the source chain
        required: u64,
    },

    /// The fetched record is malformed or contradicts the claim.
    /// Terminal: do not retry; flag the reference for review.
    #[error("rejected: {0}")]
    Rejected(#[from] RejectReason),

    /// The validator could not produce (or could not self-verify) the
    /// bundle over its own attestation. Fatal: indicates local key
    /// compromise or an adapter bug. Abort and alert.
    #[error("attestation signing failed: {0}")]
    SigningFailure(#[from] qi_crypto::CryptoError),
}

impl ValidationError {
    /// Whether the caller may retry this request later.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ValidationError::ProofUnavailable { .. } | ValidationError::PendingFinality { .. }
        )
    }
}
