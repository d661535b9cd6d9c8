//! # QI-Crypto - Redundant Quantum-Resistant Signatures
//!
//! Signature bundles (QRS-N) that compose one classical elliptic-curve
//! signature with two independent post-quantum signatures over a single
//! canonical digest. Breaking any one algorithm is not enough to forge
//! a valid bundle.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 | Classical EC layer (compatibility) |
//! | `ml_dsa` | ML-DSA (Dilithium3) | Lattice-based PQ layer |
//! | `slh_dsa` | SLH-DSA (SPHINCS+-SHA2-128s) | Hash-based PQ layer |
//! | `bundle` | QRS-N composition | Sign/verify redundant bundles |
//! | `canonical` | SHA-256 + canonical JSON | Digest reproduction rules |
//!
//! ## Security Properties
//!
//! - **Atomic signing**: a bundle is emitted with every requested share
//!   or not at all. A silently-downgraded bundle never leaves this crate.
//! - **Strict acceptance**: every present share must verify and the share
//!   count must equal the declared redundancy level. There is no
//!   majority-vote fallback.
//! - **Key hygiene**: private key material is zeroized on drop and never
//!   serialized.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod bundle;
pub mod canonical;
pub mod ecdsa;
pub mod errors;
pub mod keys;
pub mod ml_dsa;
pub mod slh_dsa;

// Re-exports
pub use adapter::{adapter_for, generate_full_keyset, SignatureAdapter};
pub use bundle::{
    sign_bundle, verify_bundle, AlgorithmVerdict, BundlePolicy, PublicKeySet, RedundantBundle,
    SignatureShare, VerificationOutcome, SHARE_FORMAT_VERSION,
};
pub use canonical::{canonical_bytes, canonical_json, CanonicalizationDescriptor};
pub use ecdsa::EcdsaAdapter;
pub use errors::CryptoError;
pub use keys::{AlgorithmKind, KeyPair, PublicKey, SecretBytes};
pub use ml_dsa::MlDsaAdapter;
pub use slh_dsa::SlhDsaAdapter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
