//! # QI-Multisig - Threshold Bundle Aggregation
//!
//! Collects redundant signature bundles from distinct signers until a
//! k-of-n threshold is met, verifying each bundle before it is admitted.
//!
//! ## State Machine
//!
//! ```text
//! Collecting --k distinct valid bundles--> Satisfied --finalize()--> Finalized
//! ```
//!
//! Satisfaction is idempotent (it may be observed repeatedly as more
//! signers join) and `finalize()` is safe to call more than once:
//! network retries are expected, so re-finalization returns the same
//! snapshot rather than an error.
//!
//! ## Module Structure
//!
//! ```text
//! qi-multisig/
//! ├── domain/          # Roster, session state, errors
//! └── session          # MultisigSession, FinalizedSet
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod session;

// Re-exports
pub use domain::{MultisigError, SessionState, SignerRoster};
pub use session::{FinalizedSet, MultisigSession, SharedMultisigSession};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
