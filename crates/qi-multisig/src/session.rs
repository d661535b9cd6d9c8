//! # Multisig Session
//!
//! One session aggregates bundles from distinct signers over one
//! message until the k-of-n threshold is met, then snapshots the
//! collected set. The set is append-only: a signer may never be
//! replaced, and the set never shrinks.

use crate::domain::{MultisigError, SessionState, SignerRoster};
use parking_lot::Mutex;
use qi_crypto::{verify_bundle, AlgorithmKind, BundlePolicy, RedundantBundle};
use serde::{Deserialize, Serialize};
use shared_types::SignerId;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable result of a finalized session.
///
/// If more than k valid bundles were collected, all are retained so
/// auditors can see over-subscription; nothing is truncated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedSet {
    /// Required threshold k.
    pub threshold: usize,
    /// Expected signers n.
    pub signers: usize,
    /// Every collected bundle, keyed by signer.
    pub bundles: BTreeMap<SignerId, RedundantBundle>,
    /// Algorithm kinds used across all bundles, for audit.
    pub algorithms_used: BTreeSet<AlgorithmKind>,
}

/// A k-of-n aggregation session over one message.
pub struct MultisigSession {
    roster: SignerRoster,
    threshold: usize,
    policy: BundlePolicy,
    bundles: BTreeMap<SignerId, RedundantBundle>,
    state: SessionState,
    snapshot: Option<FinalizedSet>,
}

impl MultisigSession {
    /// Create a session requiring `threshold` of the roster's signers.
    pub fn new(
        roster: SignerRoster,
        threshold: usize,
        policy: BundlePolicy,
    ) -> Result<Self, MultisigError> {
        if threshold == 0 {
            return Err(MultisigError::ZeroThreshold);
        }
        if threshold > roster.len() {
            return Err(MultisigError::ThresholdExceedsSigners {
                threshold,
                signers: roster.len(),
            });
        }
        Ok(Self {
            roster,
            threshold,
            policy,
            bundles: BTreeMap::new(),
            state: SessionState::Collecting,
            snapshot: None,
        })
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Required threshold k.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Distinct valid bundles collected so far.
    pub fn collected(&self) -> usize {
        self.bundles.len()
    }

    /// Whether the threshold has been met.
    pub fn is_satisfied(&self) -> bool {
        matches!(self.state, SessionState::Satisfied | SessionState::Finalized)
    }

    /// Verify and admit one signer's bundle over `message`.
    ///
    /// The bundle is verified before insertion; a bundle that fails
    /// verification never enters the set. Returns the state observed
    /// after the insert, so callers see the `Collecting -> Satisfied`
    /// transition the moment the k-th distinct signer lands.
    pub fn add_signature(
        &mut self,
        signer_id: SignerId,
        bundle: RedundantBundle,
        message: &[u8],
    ) -> Result<SessionState, MultisigError> {
        if self.state.is_terminal() {
            return Err(MultisigError::SessionFinalized);
        }

        let keys = self
            .roster
            .keys_for(&signer_id)
            .ok_or_else(|| MultisigError::UnauthorizedSigner(signer_id.clone()))?;

        if self.bundles.contains_key(&signer_id) {
            return Err(MultisigError::DuplicateSigner(signer_id));
        }

        let outcome = verify_bundle(&bundle, keys, message, &self.policy)?;
        if !outcome.accepted {
            warn!(
                "[qi-multisig] rejected bundle from {}: digest_ok={} level={} present={}",
                signer_id, outcome.digest_ok, outcome.declared_level, outcome.present_shares
            );
            return Err(MultisigError::RejectedBundle { signer: signer_id });
        }

        self.bundles.insert(signer_id.clone(), bundle);

        if self.state == SessionState::Collecting && self.bundles.len() >= self.threshold {
            self.state = SessionState::Satisfied;
            debug!(
                "[qi-multisig] threshold satisfied: {}/{} signers",
                self.bundles.len(),
                self.threshold
            );
        }

        Ok(self.state)
    }

    /// Snapshot the collected bundles into an immutable result.
    ///
    /// Only callable once `Satisfied`. Calling it again returns the
    /// same snapshot; re-finalization must be safe because network
    /// retries are expected.
    pub fn finalize(&mut self) -> Result<FinalizedSet, MultisigError> {
        match self.state {
            SessionState::Collecting => Err(MultisigError::NotSatisfied {
                collected: self.bundles.len(),
                required: self.threshold,
            }),
            SessionState::Satisfied => {
                let algorithms_used = self
                    .bundles
                    .values()
                    .flat_map(|bundle| bundle.algorithm_kinds())
                    .collect();
                let snapshot = FinalizedSet {
                    threshold: self.threshold,
                    signers: self.roster.len(),
                    bundles: self.bundles.clone(),
                    algorithms_used,
                };
                self.snapshot = Some(snapshot.clone());
                self.state = SessionState::Finalized;
                debug!(
                    "[qi-multisig] finalized with {} bundles",
                    snapshot.bundles.len()
                );
                Ok(snapshot)
            }
            // Invariant: the snapshot is set when entering Finalized.
            SessionState::Finalized => Ok(self.snapshot.clone().unwrap_or_else(|| FinalizedSet {
                threshold: self.threshold,
                signers: self.roster.len(),
                bundles: self.bundles.clone(),
                algorithms_used: self
                    .bundles
                    .values()
                    .flat_map(|bundle| bundle.algorithm_kinds())
                    .collect(),
            })),
        }
    }
}

/// Thread-safe handle over a session for concurrent signer submissions.
///
/// Each append is O(1) plus one bundle verification, so contention on
/// the lock is short-lived.
#[derive(Clone)]
pub struct SharedMultisigSession {
    inner: Arc<Mutex<MultisigSession>>,
}

impl SharedMultisigSession {
    /// Wrap a session.
    pub fn new(session: MultisigSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Verify and admit one signer's bundle. See
    /// [`MultisigSession::add_signature`].
    pub fn add_signature(
        &self,
        signer_id: SignerId,
        bundle: RedundantBundle,
        message: &[u8],
    ) -> Result<SessionState, MultisigError> {
        self.inner.lock().add_signature(signer_id, bundle, message)
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.inner.lock().state()
    }

    /// Whether the threshold has been met.
    pub fn is_satisfied(&self) -> bool {
        self.inner.lock().is_satisfied()
    }

    /// Finalize, idempotently. See [`MultisigSession::finalize`].
    pub fn finalize(&self) -> Result<FinalizedSet, MultisigError> {
        self.inner.lock().finalize()
    }
}
