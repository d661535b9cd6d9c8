//! # Cross-Chain Domain
//!
//! Entities, value objects, errors, and invariants for bridge-free
//! validation and idempotent credit minting.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::{
    AttestationPayload, ClaimedTransfer, CrossChainAttestation, ForeignTxRecord, MintOutcome,
    ValidationResult,
};
pub use errors::{ReadError, RejectReason, ValidationError};
pub use value_objects::{ChainId, ForeignTransactionReference, ValidationState};
