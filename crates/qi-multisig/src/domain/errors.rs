//! # Multisig Errors
//!
//! Rejections at insertion affect only the submitting signer; bundles
//! already accepted from other signers are untouched.

use qi_crypto::CryptoError;
use shared_types::SignerId;
use thiserror::Error;

/// Threshold aggregation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MultisigError {
    /// Threshold k exceeds the number of expected signers n.
    #[error("threshold {threshold} exceeds roster size {signers}")]
    ThresholdExceedsSigners {
        /// Required threshold k
        threshold: usize,
        /// Expected signers n
        signers: usize,
    },

    /// A threshold of zero authorizes nothing and is a configuration error.
    #[error("threshold must be at least 1")]
    ZeroThreshold,

    /// The submitting signer is not among the expected n signers.
    #[error("unauthorized signer: {0}")]
    UnauthorizedSigner(SignerId),

    /// The signer already contributed a bundle; signers may not be replaced.
    #[error("duplicate signer: {0}")]
    DuplicateSigner(SignerId),

    /// The submitted bundle failed verification and was not admitted.
    #[error("bundle from {signer} rejected by verification")]
    RejectedBundle {
        /// Signer whose bundle failed
        signer: SignerId,
    },

    /// Finalize was called before the threshold was met.
    #[error("threshold not satisfied: {collected}/{required} bundles")]
    NotSatisfied {
        /// Distinct valid bundles collected so far
        collected: usize,
        /// Required threshold k
        required: usize,
    },

    /// The session already produced its immutable snapshot.
    #[error("session already finalized")]
    SessionFinalized,

    /// Underlying cryptographic failure while verifying a submission.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
