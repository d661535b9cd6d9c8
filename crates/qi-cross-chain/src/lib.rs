//! # QI-Cross-Chain - Bridge-Free Credit Issuance
//!
//! Trusts a foreign blockchain's own consensus to validate a
//! transaction's signer, then deterministically and idempotently mints
//! an equivalent native credit. No custody of the original asset, no
//! bridge contract on either chain.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Validation State Machine
//!
//! ```text
//! Requested -> Fetching -> (Fetched | FetchFailed)
//!                             |           \
//!                             v            retry with backoff
//!                       FinalityChecked
//!                             |
//!                   (SignerExtracted | Rejected)
//!                             |
//!                     (Minted | AlreadyMinted)
//! ```
//!
//! ## Failure Classification
//!
//! | Condition | Classification | Caller action |
//! |-----------|----------------|---------------|
//! | RPC error, not-found | `ProofUnavailable` (recoverable) | retry with backoff |
//! | Shallow confirmations | `PendingFinality` (recoverable) | retry after delay |
//! | Malformed/mismatched record | `Rejected` (terminal) | do not retry |
//! | Reference already minted | `AlreadyMinted` (success) | use stored attestation |
//! | Own bundle fails self-check | `SigningFailure` (fatal) | abort, alert |
//!
//! ## Module Structure
//!
//! ```text
//! qi-cross-chain/
//! ├── domain/          # References, records, attestations, state machine
//! ├── ports/           # CrossChainValidatorApi, ChainReader, CreditLedger
//! ├── adapters/        # StaticChainReader, InMemoryCreditLedger
//! └── service          # CrossChainValidator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryCreditLedger, StaticChainReader};
pub use domain::{
    AttestationPayload, ChainId, ClaimedTransfer, CrossChainAttestation,
    ForeignTransactionReference, ForeignTxRecord, MintOutcome, ReadError, RejectReason,
    ValidationError, ValidationResult, ValidationState,
};
pub use ports::{ChainReader, CreditLedger, CrossChainValidatorApi, InsertOutcome};
pub use service::{CrossChainValidator, FinalityPolicy, RetryPolicy, ValidatorConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
