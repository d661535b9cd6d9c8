//! # Signature Adapters
//!
//! One uniform sign/verify interface per algorithm. Adapters are
//! stateless, thread-safe pure functions over their inputs; every call
//! takes the full key material and digest explicitly.

use crate::bundle::{SignatureShare, SHARE_FORMAT_VERSION};
use crate::keys::{AlgorithmKind, KeyPair, PublicKey};
use crate::{EcdsaAdapter, MlDsaAdapter, SlhDsaAdapter};
use crate::CryptoError;
use shared_types::Hash;

/// Uniform interface over one signature algorithm.
///
/// Inputs are always a 32-byte digest produced under a named
/// canonicalization rule, never raw message bytes, so all algorithms in
/// a bundle sign exactly the same value.
pub trait SignatureAdapter: Send + Sync {
    /// Algorithm this adapter implements.
    fn kind(&self) -> AlgorithmKind;

    /// Fixed signature size of the algorithm in bytes.
    fn signature_len(&self) -> usize;

    /// Generate a fresh keypair.
    fn generate(&self) -> Result<KeyPair, CryptoError>;

    /// Sign a digest with the keypair's private half.
    fn sign(&self, keypair: &KeyPair, digest: &Hash) -> Result<SignatureShare, CryptoError>;

    /// Verify a share against a public key and digest.
    ///
    /// Returns `Ok(false)` for a well-formed share that simply does not
    /// verify; structural problems (wrong key kind, wrong share length)
    /// surface as errors because they indicate misconfiguration, not a
    /// forgery attempt.
    fn verify(
        &self,
        public: &PublicKey,
        digest: &Hash,
        share: &SignatureShare,
    ) -> Result<bool, CryptoError>;
}

static ECDSA_ADAPTER: EcdsaAdapter = EcdsaAdapter;
static ML_DSA_ADAPTER: MlDsaAdapter = MlDsaAdapter;
static SLH_DSA_ADAPTER: SlhDsaAdapter = SlhDsaAdapter;

/// Look up the adapter for an algorithm.
pub fn adapter_for(kind: AlgorithmKind) -> &'static dyn SignatureAdapter {
    match kind {
        AlgorithmKind::ClassicalEc => &ECDSA_ADAPTER,
        AlgorithmKind::LatticePq => &ML_DSA_ADAPTER,
        AlgorithmKind::HashPq => &SLH_DSA_ADAPTER,
    }
}

/// Generate one keypair per algorithm, in bundle order.
///
/// This is the keyset a full-redundancy (QRS-3) signer holds.
pub fn generate_full_keyset() -> Result<Vec<KeyPair>, CryptoError> {
    AlgorithmKind::ALL
        .iter()
        .map(|kind| adapter_for(*kind).generate())
        .collect()
}

/// Check that a key's tagged algorithm matches the adapter invoked.
pub(crate) fn check_key_kind(
    expected: AlgorithmKind,
    actual: AlgorithmKind,
) -> Result<(), CryptoError> {
    if expected != actual {
        return Err(CryptoError::KeyMismatch { expected, actual });
    }
    Ok(())
}

/// Check a share's tag, format version, and byte length.
pub(crate) fn check_share(
    expected_kind: AlgorithmKind,
    expected_len: usize,
    share: &SignatureShare,
) -> Result<(), CryptoError> {
    check_key_kind(expected_kind, share.algorithm)?;
    if share.version != SHARE_FORMAT_VERSION || share.bytes.len() != expected_len {
        return Err(CryptoError::MalformedShare {
            algorithm: expected_kind,
            expected: expected_len,
            actual: share.bytes.len(),
        });
    }
    Ok(())
}
