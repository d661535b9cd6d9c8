//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod chain_reader;
pub mod ledger;

pub use chain_reader::StaticChainReader;
pub use ledger::InMemoryCreditLedger;
