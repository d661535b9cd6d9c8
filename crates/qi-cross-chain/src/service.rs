//! # Cross-Chain Validator Service
//!
//! Application service implementing the `CrossChainValidatorApi` inbound
//! port. Each request walks the validation state machine: fetch the
//! foreign transaction through the chain reader (the single suspension
//! point, with bounded exponential backoff), gate on confirmation
//! depth, extract the chain-validated sender, and mint exactly once
//! through the ledger's atomic insert-if-absent.
//!
//! The foreign chain's native signature is deliberately NOT re-verified
//! here: the source chain's own consensus already validated its signer,
//! and that trust boundary is what makes the protocol bridge-free. The
//! attestation the validator emits is instead signed with the
//! validator's own QRS-N bundle, so downstream consumers still get the
//! full redundancy guarantee.

use crate::domain::invariants::validate_record;
use crate::domain::{
    AttestationPayload, ChainId, ClaimedTransfer, CrossChainAttestation,
    ForeignTransactionReference, ForeignTxRecord, MintOutcome, ReadError, ValidationError,
    ValidationState,
};
use crate::ports::inbound::CrossChainValidatorApi;
use crate::ports::outbound::{ChainReader, CreditLedger, InsertOutcome};
use async_trait::async_trait;
use qi_crypto::{
    sign_bundle, verify_bundle, BundlePolicy, CanonicalizationDescriptor, CryptoError, KeyPair,
    PublicKeySet,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Chain-specific confirmation requirements, with per-chain overrides.
#[derive(Clone, Debug, Default)]
pub struct FinalityPolicy {
    overrides: HashMap<ChainId, u64>,
}

impl FinalityPolicy {
    /// Use each chain's default confirmation depth.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the confirmation requirement for a chain.
    pub fn with_custom(mut self, chain: ChainId, confirmations: u64) -> Self {
        self.overrides.insert(chain, confirmations);
        self
    }

    /// Low requirements for tests.
    pub fn for_testing() -> Self {
        Self::new()
            .with_custom(ChainId::Ethereum, 2)
            .with_custom(ChainId::Bitcoin, 2)
            .with_custom(ChainId::Polygon, 2)
            .with_custom(ChainId::Base, 2)
            .with_custom(ChainId::Solana, 2)
    }

    /// Required confirmations for a chain.
    pub fn required_confirmations(&self, chain: ChainId) -> u64 {
        self.overrides
            .get(&chain)
            .copied()
            .unwrap_or_else(|| chain.required_confirmations())
    }
}

/// Bounded exponential backoff for chain reader queries.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Maximum fetch attempts before surfacing `ProofUnavailable`.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Cap on the per-retry delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Near-zero delays for tests.
    pub fn for_testing() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        }
    }

    /// Delay before retry number `attempt` (1-based), doubling and capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// Validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Confirmation requirements per source chain.
    pub finality: FinalityPolicy,
    /// Retry budget for chain reader queries.
    pub retry: RetryPolicy,
    /// Upper bound on concurrent chain reader queries, sized to the
    /// foreign chains' RPC concurrency limits.
    pub max_inflight_fetches: usize,
    /// Chain credits are minted on.
    pub target_chain: ChainId,
    /// Acceptance policy applied when self-checking attestation bundles.
    pub bundle_policy: BundlePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            finality: FinalityPolicy::new(),
            retry: RetryPolicy::default(),
            max_inflight_fetches: 8,
            target_chain: ChainId::QuantumInterop,
            bundle_policy: BundlePolicy::require_all(),
        }
    }
}

/// Cross-Chain Validator.
///
/// Holds its own QRS-N keyset for attestation signing and a logical
/// clock for attestation timestamps. Many requests may run through one
/// validator concurrently; the ledger's insert-if-absent is the only
/// shared mint point.
pub struct CrossChainValidator<R: ChainReader, L: CreditLedger> {
    reader: R,
    ledger: L,
    config: ValidatorConfig,
    signing_keys: Vec<KeyPair>,
    verifying_keys: PublicKeySet,
    clock: AtomicU64,
    fetch_permits: Semaphore,
}

impl<R: ChainReader, L: CreditLedger> CrossChainValidator<R, L> {
    /// Create a validator with its signing identity.
    pub fn new(
        reader: R,
        ledger: L,
        config: ValidatorConfig,
        signing_keys: Vec<KeyPair>,
    ) -> Result<Self, CryptoError> {
        if signing_keys.is_empty() {
            return Err(CryptoError::EmptyBundle);
        }
        let verifying_keys = PublicKeySet::from_keypairs(&signing_keys);
        if verifying_keys.len() != signing_keys.len() {
            // Two keys mapped to one algorithm slot.
            let kind = signing_keys[signing_keys.len() - 1].algorithm();
            return Err(CryptoError::DuplicateAlgorithm(kind));
        }
        let permits = config.max_inflight_fetches.max(1);
        Ok(Self {
            reader,
            ledger,
            config,
            signing_keys,
            verifying_keys,
            clock: AtomicU64::new(0),
            fetch_permits: Semaphore::new(permits),
        })
    }

    /// Public keys attestation consumers verify against.
    pub fn verifying_keys(&self) -> &PublicKeySet {
        &self.verifying_keys
    }

    /// The ledger this validator mints into.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The chain reader this validator queries.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    fn advance(
        reference: &ForeignTransactionReference,
        state: &mut ValidationState,
        next: ValidationState,
    ) {
        debug!(
            "[qi-cross-chain] {} state {:?} -> {:?}",
            reference, state, next
        );
        *state = next;
    }

    /// Fetch the foreign transaction with bounded exponential backoff.
    ///
    /// Cancellation is safe anywhere in here: nothing has been written
    /// yet, and the permit is released on drop.
    async fn fetch_with_retry(
        &self,
        reference: &ForeignTransactionReference,
        state: &mut ValidationState,
    ) -> Result<ForeignTxRecord, ValidationError> {
        let _permit =
            self.fetch_permits
                .acquire()
                .await
                .map_err(|_| ValidationError::ProofUnavailable {
                    attempts: 0,
                    source: ReadError::Rpc("fetch pool closed".to_string()),
                })?;

        let attempts = self.config.retry.max_attempts.max(1);
        let mut last_error = ReadError::NotFound;

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.config.retry.delay_for(attempt - 1)).await;
                Self::advance(reference, state, ValidationState::Fetching);
            }

            match self
                .reader
                .fetch_transaction(reference.chain, reference.tx_hash)
                .await
            {
                Ok(record) => {
                    Self::advance(reference, state, ValidationState::Fetched);
                    return Ok(record);
                }
                Err(error) => {
                    warn!(
                        "[qi-cross-chain] {} fetch attempt {}/{} failed: {}",
                        reference, attempt, attempts, error
                    );
                    Self::advance(reference, state, ValidationState::FetchFailed);
                    last_error = error;
                }
            }
        }

        Err(ValidationError::ProofUnavailable {
            attempts,
            source: last_error,
        })
    }

    /// Sign the attestation payload and self-check the bundle.
    ///
    /// A failure here indicates local key compromise or an adapter bug
    /// and is surfaced as fatal `SigningFailure`.
    fn sign_attestation(
        &self,
        payload: AttestationPayload,
    ) -> Result<CrossChainAttestation, ValidationError> {
        let message = payload.canonical_bytes()?;
        let bundle = sign_bundle(
            &self.signing_keys,
            &message,
            CanonicalizationDescriptor::Sha256CanonicalJson,
        )?;

        let outcome = verify_bundle(
            &bundle,
            &self.verifying_keys,
            &message,
            &self.config.bundle_policy,
        )?;
        if !outcome.accepted {
            return Err(ValidationError::SigningFailure(
                CryptoError::VerificationFailed,
            ));
        }

        Ok(CrossChainAttestation::new(payload, bundle))
    }
}

#[async_trait]
impl<R: ChainReader, L: CreditLedger> CrossChainValidatorApi for CrossChainValidator<R, L> {
    async fn validate_and_mint(
        &self,
        reference: ForeignTransactionReference,
        claim: ClaimedTransfer,
    ) -> Result<MintOutcome, ValidationError> {
        let mut state = ValidationState::Requested;

        // Replay short-circuit: a stored attestation is returned as-is
        // without touching the foreign chain again.
        if let Some(existing) = self.ledger.get(&reference) {
            debug!("[qi-cross-chain] {} replayed, returning stored attestation", reference);
            return Ok(MintOutcome::AlreadyMinted(existing));
        }

        Self::advance(&reference, &mut state, ValidationState::Fetching);
        let record = self.fetch_with_retry(&reference, &mut state).await?;

        let required = self.config.finality.required_confirmations(reference.chain);
        if record.confirmations < required {
            debug!(
                "[qi-cross-chain] {} pending finality: {}/{}",
                reference, record.confirmations, required
            );
            return Err(ValidationError::PendingFinality {
                got: record.confirmations,
                required,
            });
        }
        Self::advance(&reference, &mut state, ValidationState::FinalityChecked);

        if let Err(reason) = validate_record(&record, &claim) {
            warn!("[qi-cross-chain] {} rejected: {}", reference, reason);
            Self::advance(&reference, &mut state, ValidationState::Rejected);
            return Err(ValidationError::Rejected(reason));
        }
        Self::advance(&reference, &mut state, ValidationState::SignerExtracted);

        // Mint. No await from here on: once the mint decision is taken
        // it runs to completion, so cancellation cannot strand a
        // half-applied credit.
        let payload = AttestationPayload {
            reference,
            signer: record.sender,
            amount: record.amount,
            asset: record.asset,
            target_chain: self.config.target_chain,
            timestamp: self.clock.fetch_add(1, Ordering::SeqCst) + 1,
        };
        let attestation = self.sign_attestation(payload)?;

        match self.ledger.insert_if_absent(reference, attestation.clone()) {
            InsertOutcome::Inserted => {
                Self::advance(&reference, &mut state, ValidationState::Minted);
                info!(
                    "[qi-cross-chain] minted {} base units for {} (signer 0x{})",
                    attestation.amount,
                    reference,
                    hex::encode(attestation.signer)
                );
                Ok(MintOutcome::Minted(attestation))
            }
            InsertOutcome::AlreadyPresent(existing) => {
                // A concurrent validation of the same reference won the
                // insert; its attestation is the canonical one.
                Self::advance(&reference, &mut state, ValidationState::AlreadyMinted);
                Ok(MintOutcome::AlreadyMinted(existing))
            }
        }
    }

    fn attestation_for(
        &self,
        reference: &ForeignTransactionReference,
    ) -> Option<CrossChainAttestation> {
        self.ledger.get(reference)
    }
}
