//! # Inbound Ports
//!
//! API trait defining what the cross-chain validator can do.

use crate::domain::{
    ClaimedTransfer, CrossChainAttestation, ForeignTransactionReference, MintOutcome,
    ValidationError,
};
use async_trait::async_trait;

/// Cross-chain validation API - inbound port.
#[async_trait]
pub trait CrossChainValidatorApi: Send + Sync {
    /// Validate a foreign transaction reference and mint the equivalent
    /// native credit, exactly once per reference.
    ///
    /// Replaying a reference (including concurrently) returns the stored
    /// attestation as [`MintOutcome::AlreadyMinted`].
    async fn validate_and_mint(
        &self,
        reference: ForeignTransactionReference,
        claim: ClaimedTransfer,
    ) -> Result<MintOutcome, ValidationError>;

    /// The stored attestation for a reference, if one was minted.
    fn attestation_for(
        &self,
        reference: &ForeignTransactionReference,
    ) -> Option<CrossChainAttestation>;
}
