//! # Ports
//!
//! Hexagonal boundaries: the inbound validator API and the outbound
//! chain-reader and ledger collaborators.

pub mod inbound;
pub mod outbound;

pub use inbound::CrossChainValidatorApi;
pub use outbound::{ChainReader, CreditLedger, InsertOutcome};
