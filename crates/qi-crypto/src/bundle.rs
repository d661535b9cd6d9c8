//! # Redundant Signature Bundles (QRS-N)
//!
//! A bundle composes N independent algorithm signatures over one
//! canonical digest. Signing is atomic: if any adapter fails, no bundle
//! is emitted, because a silently-downgraded bundle is a security
//! regression. Verification is strict: every present share must verify
//! and the share count must equal the declared redundancy level. A
//! broken algorithm must never be masked by counting, so there is no
//! majority-vote fallback.

use crate::adapter::adapter_for;
use crate::canonical::CanonicalizationDescriptor;
use crate::keys::{AlgorithmKind, KeyPair, PublicKey};
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use shared_types::{to_hex, Hash};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Wire format version stamped on every share.
pub const SHARE_FORMAT_VERSION: u8 = 1;

/// One algorithm's signature over a message digest.
///
/// Produced by exactly one adapter call; immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureShare {
    /// Algorithm that produced this share.
    pub algorithm: AlgorithmKind,
    /// Share format version.
    pub version: u8,
    /// Raw signature bytes, fixed length per algorithm.
    #[serde(with = "hex::serde")]
    pub bytes: Vec<u8>,
}

impl SignatureShare {
    /// Create a share at the current format version.
    pub fn new(algorithm: AlgorithmKind, bytes: Vec<u8>) -> Self {
        Self {
            algorithm,
            version: SHARE_FORMAT_VERSION,
            bytes,
        }
    }
}

/// Per-algorithm public keys for one signer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeySet {
    keys: BTreeMap<AlgorithmKind, PublicKey>,
}

impl PublicKeySet {
    /// Create an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the key set for a signer's keypairs.
    pub fn from_keypairs(keypairs: &[KeyPair]) -> Self {
        let mut set = Self::new();
        for keypair in keypairs {
            set.insert(keypair.public_key().clone());
        }
        set
    }

    /// Insert a key, replacing any previous key for the same algorithm.
    pub fn insert(&mut self, key: PublicKey) -> Option<PublicKey> {
        self.keys.insert(key.algorithm, key)
    }

    /// Get the key for an algorithm.
    pub fn get(&self, kind: AlgorithmKind) -> Option<&PublicKey> {
        self.keys.get(&kind)
    }

    /// Algorithms covered by this set.
    pub fn kinds(&self) -> Vec<AlgorithmKind> {
        self.keys.keys().copied().collect()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Acceptance policy for bundle verification.
///
/// The minimum redundancy floors the bundle's declared level. The
/// default requires all three algorithms, the value-bearing setting.
/// Degraded-mode tolerance ("at least 2 of 3") is an explicit caller
/// opt-in, never a silent fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BundlePolicy {
    min_redundancy: u8,
}

impl BundlePolicy {
    /// Require the full three-algorithm bundle.
    pub fn require_all() -> Self {
        Self { min_redundancy: 3 }
    }

    /// Accept bundles with at least `min` shares (floored at 1).
    pub fn at_least(min: u8) -> Self {
        Self {
            min_redundancy: min.max(1),
        }
    }

    /// The minimum declared redundancy level this policy accepts.
    pub fn min_redundancy(&self) -> u8 {
        self.min_redundancy
    }
}

impl Default for BundlePolicy {
    fn default() -> Self {
        Self::require_all()
    }
}

/// An ordered set of signature shares over one digest.
///
/// Created atomically by the signer; immutable thereafter; consumed by
/// verification, never mutated. Shares are kept in algorithm order so
/// the serialized form is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundantBundle {
    /// Digest every share covers.
    #[serde(with = "hex::serde")]
    pub digest: Hash,
    /// Serialization rule the digest was produced under, recorded so
    /// verifiers reproduce it bit-for-bit.
    pub descriptor: CanonicalizationDescriptor,
    /// Declared redundancy level N.
    pub redundancy_level: u8,
    /// One share per algorithm used.
    pub shares: Vec<SignatureShare>,
}

impl RedundantBundle {
    /// The share for an algorithm, if present.
    pub fn share_for(&self, kind: AlgorithmKind) -> Option<&SignatureShare> {
        self.shares.iter().find(|share| share.algorithm == kind)
    }

    /// Algorithms present in the bundle.
    pub fn algorithm_kinds(&self) -> Vec<AlgorithmKind> {
        self.shares.iter().map(|share| share.algorithm).collect()
    }
}

/// Verdict for one algorithm inside a verification outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmVerdict {
    /// Algorithm checked.
    pub algorithm: AlgorithmKind,
    /// Whether the share verified against its public key.
    pub valid: bool,
}

/// Result of verifying a bundle: a per-algorithm boolean vector plus
/// the aggregate decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Aggregate decision. ACCEPT only when the digest reproduces, the
    /// structure is intact, and every share verifies.
    pub accepted: bool,
    /// Whether the recorded digest matches the recomputed one.
    pub digest_ok: bool,
    /// Redundancy level the bundle declared.
    pub declared_level: u8,
    /// Shares actually present.
    pub present_shares: usize,
    /// Per-algorithm verdicts, in bundle order.
    pub verdicts: Vec<AlgorithmVerdict>,
}

impl VerificationOutcome {
    /// Whether every present share verified.
    pub fn all_shares_valid(&self) -> bool {
        !self.verdicts.is_empty() && self.verdicts.iter().all(|verdict| verdict.valid)
    }
}

/// Sign a message with every supplied keypair, atomically.
///
/// The canonical digest is computed once under `descriptor`, then each
/// keypair's adapter signs it. If any adapter call fails the whole
/// operation fails with [`CryptoError::PartialSignatureFailure`] and no
/// bundle is emitted.
pub fn sign_bundle(
    keypairs: &[KeyPair],
    message: &[u8],
    descriptor: CanonicalizationDescriptor,
) -> Result<RedundantBundle, CryptoError> {
    if keypairs.is_empty() {
        return Err(CryptoError::EmptyBundle);
    }

    let mut seen = BTreeSet::new();
    for keypair in keypairs {
        if !seen.insert(keypair.algorithm()) {
            return Err(CryptoError::DuplicateAlgorithm(keypair.algorithm()));
        }
    }

    let digest = descriptor.digest(message)?;

    let mut shares = Vec::with_capacity(keypairs.len());
    for keypair in keypairs {
        let share = adapter_for(keypair.algorithm())
            .sign(keypair, &digest)
            .map_err(|err| CryptoError::PartialSignatureFailure {
                algorithm: keypair.algorithm(),
                reason: err.to_string(),
            })?;
        shares.push(share);
    }
    shares.sort_by_key(|share| share.algorithm);

    debug!(
        "[qi-crypto] signed bundle: level={} digest={}",
        shares.len(),
        to_hex(&digest)
    );

    Ok(RedundantBundle {
        digest,
        descriptor,
        redundancy_level: shares.len() as u8,
        shares,
    })
}

/// Verify a bundle against a signer's public keys.
///
/// The digest is recomputed from `message` under the bundle's recorded
/// descriptor; shares are verified against the recomputed digest, so a
/// tampered digest field fails both the digest check and every share.
///
/// Rejection (structural damage, a failed share, a level below the
/// policy floor) is reported through the outcome. Errors are reserved
/// for misconfiguration: a missing public key or a malformed share.
pub fn verify_bundle(
    bundle: &RedundantBundle,
    keys: &PublicKeySet,
    message: &[u8],
    policy: &BundlePolicy,
) -> Result<VerificationOutcome, CryptoError> {
    let recomputed = bundle.descriptor.digest(message)?;
    let digest_ok = recomputed == bundle.digest;

    let declared = bundle.redundancy_level;
    let present = bundle.shares.len();

    // Structural acceptance: a bundle claiming level N must carry
    // exactly N shares (no silent omission), with unique algorithms,
    // at or above the caller's floor.
    let mut structure_ok =
        declared >= 1 && present == declared as usize && declared >= policy.min_redundancy();
    let mut seen = BTreeSet::new();
    for share in &bundle.shares {
        if !seen.insert(share.algorithm) {
            structure_ok = false;
        }
    }

    let mut verdicts = Vec::with_capacity(present);
    let mut all_valid = !bundle.shares.is_empty();
    for share in &bundle.shares {
        let public = keys
            .get(share.algorithm)
            .ok_or(CryptoError::MissingPublicKey(share.algorithm))?;
        let valid = adapter_for(share.algorithm).verify(public, &recomputed, share)?;
        if !valid {
            all_valid = false;
        }
        verdicts.push(AlgorithmVerdict {
            algorithm: share.algorithm,
            valid,
        });
    }

    let accepted = digest_ok && structure_ok && all_valid;

    debug!(
        "[qi-crypto] verified bundle: accepted={} digest_ok={} level={} present={}",
        accepted, digest_ok, declared, present
    );

    Ok(VerificationOutcome {
        accepted,
        digest_ok,
        declared_level: declared,
        present_shares: present,
        verdicts,
    })
}
