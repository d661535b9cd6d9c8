//! # Quantum-Interop Test Suite
//!
//! Unified test crate containing the cross-crate integration flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── bundle_flows.rs       # QRS-N signing across crate boundaries
//!     ├── multisig_flows.rs     # k-of-n choreography under concurrency
//!     └── cross_chain_flows.rs  # Validation, minting, idempotency
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qi-tests
//!
//! # By category
//! cargo test -p qi-tests integration::bundle_flows::
//! cargo test -p qi-tests integration::cross_chain_flows::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
