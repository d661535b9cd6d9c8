//! # Shared Types - Common Primitives
//!
//! Foundational types shared across the Quantum-Interop subsystems.
//!
//! ## Components
//!
//! | Module | Contents |
//! |--------|----------|
//! | `entities` | `Hash`, `Address`, `SignerId` |
//! | `hashing` | SHA-256 helpers used by digests and attestations |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;
pub mod hashing;

// Re-exports
pub use entities::{Address, Hash, SignerId};
pub use hashing::{sha256, sha256_many, to_hex};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
