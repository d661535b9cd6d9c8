//! Crypto error types.

use crate::keys::AlgorithmKind;
use thiserror::Error;

/// Cryptographic operation errors.
///
/// Adapter-level variants (`KeyMismatch`, `MalformedShare`) are
/// programming or configuration errors and are never retried.
/// Bundle-level variants (`PartialSignatureFailure`, `RedundancyMismatch`)
/// mean the caller must re-sign from scratch; a partial bundle is never
/// patched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// A key's tagged algorithm disagrees with the adapter invoked.
    #[error("key mismatch: adapter expects {expected}, key is tagged {actual}")]
    KeyMismatch {
        /// Algorithm the adapter implements
        expected: AlgorithmKind,
        /// Algorithm the key is tagged with
        actual: AlgorithmKind,
    },

    /// A share's byte length does not match the algorithm's fixed size.
    #[error("malformed {algorithm} share: expected {expected} bytes, got {actual}")]
    MalformedShare {
        /// Algorithm the share claims
        algorithm: AlgorithmKind,
        /// Fixed signature size for the algorithm
        expected: usize,
        /// Actual share length
        actual: usize,
    },

    /// One adapter call failed while signing a bundle; no bundle is emitted.
    #[error("partial signature failure in {algorithm}: {reason}")]
    PartialSignatureFailure {
        /// Algorithm whose adapter failed
        algorithm: AlgorithmKind,
        /// Underlying failure
        reason: String,
    },

    /// A bundle's share count disagrees with its declared redundancy level.
    #[error("redundancy mismatch: declared {declared}, {present} shares present")]
    RedundancyMismatch {
        /// Declared redundancy level
        declared: u8,
        /// Shares actually present
        present: usize,
    },

    /// Two keypairs or shares carry the same algorithm within one bundle.
    #[error("duplicate algorithm in bundle: {0}")]
    DuplicateAlgorithm(AlgorithmKind),

    /// A bundle was requested with no keypairs at all.
    #[error("cannot sign an empty bundle")]
    EmptyBundle,

    /// No public key was supplied for an algorithm present in the bundle.
    #[error("missing public key for {0}")]
    MissingPublicKey(AlgorithmKind),

    /// A signature that was just produced failed to verify against its
    /// own public key.
    #[error("signature verification failed")]
    VerificationFailed,

    /// Invalid public key bytes.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Invalid private key bytes.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Input could not be canonicalized for digesting.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
