//! # Domain Entities
//!
//! The foreign transaction record, the claim it is checked against,
//! and the attestation the validator mints.

use super::errors::ValidationError;
use super::value_objects::{ChainId, ForeignTransactionReference};
use qi_crypto::{
    canonical_bytes, verify_bundle, BundlePolicy, CryptoError, PublicKeySet, RedundantBundle,
    VerificationOutcome,
};
use serde::{Deserialize, Serialize};
use shared_types::{sha256, Address, Hash};

/// A foreign chain's view of one finalized transaction, as returned by
/// a chain reader.
///
/// The `sender` field is already cryptographically validated by the
/// source chain's own consensus; the validator performs no redundant
/// re-verification of the foreign signature. That is the mechanism
/// that makes the protocol bridge-free.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignTxRecord {
    /// Chain-validated sender of the transaction.
    #[serde(with = "hex::serde")]
    pub sender: Address,
    /// Transferred amount in base units.
    pub amount: u64,
    /// Asset symbol the transfer was denominated in.
    pub asset: String,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Blocks built on top of that block.
    pub confirmations: u64,
}

/// What the submitter claims the referenced transaction transferred.
///
/// Checked against the fetched record; any disagreement is a terminal
/// rejection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedTransfer {
    /// Claimed amount in base units.
    pub amount: u64,
    /// Claimed asset symbol.
    pub asset: String,
}

/// The attestation content the validator's bundle signs.
///
/// Serialized to canonical JSON (keys sorted, no extraneous
/// whitespace, UTF-8) before digesting, so any verifier reproduces the
/// signed bytes bit-for-bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationPayload {
    /// The foreign transaction this credit is minted for.
    pub reference: ForeignTransactionReference,
    /// Sender extracted from the chain-validated record.
    #[serde(with = "hex::serde")]
    pub signer: Address,
    /// Credited amount in base units.
    pub amount: u64,
    /// Asset symbol.
    pub asset: String,
    /// Chain the credit is minted on.
    pub target_chain: ChainId,
    /// Monotonically increasing logical timestamp.
    pub timestamp: u64,
}

impl AttestationPayload {
    /// Canonical JSON bytes of the payload.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        canonical_bytes(self)
    }
}

/// The validator's output: a self-verifiable record of one mint.
///
/// Created once per successful validation, immutable, and persisted by
/// the credit ledger keyed by its reference so re-submission returns
/// this exact value instead of re-minting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossChainAttestation {
    /// The foreign transaction this credit was minted for.
    pub reference: ForeignTransactionReference,
    /// Sender extracted from the chain-validated record.
    #[serde(with = "hex::serde")]
    pub signer: Address,
    /// Credited amount in base units.
    pub amount: u64,
    /// Asset symbol.
    pub asset: String,
    /// Chain the credit was minted on.
    pub target_chain: ChainId,
    /// Monotonically increasing logical timestamp.
    pub timestamp: u64,
    /// The validator's own QRS-N bundle over the payload, so downstream
    /// consumers get the full redundancy guarantee.
    pub redundant_bundle: RedundantBundle,
}

impl CrossChainAttestation {
    /// Assemble an attestation from its signed payload and bundle.
    pub fn new(payload: AttestationPayload, redundant_bundle: RedundantBundle) -> Self {
        Self {
            reference: payload.reference,
            signer: payload.signer,
            amount: payload.amount,
            asset: payload.asset,
            target_chain: payload.target_chain,
            timestamp: payload.timestamp,
            redundant_bundle,
        }
    }

    /// The payload the bundle covers.
    pub fn payload(&self) -> AttestationPayload {
        AttestationPayload {
            reference: self.reference,
            signer: self.signer,
            amount: self.amount,
            asset: self.asset.clone(),
            target_chain: self.target_chain,
            timestamp: self.timestamp,
        }
    }

    /// Canonical JSON bytes of the full attestation (bundle included).
    ///
    /// This is the persisted interchange form: any deviation in key
    /// order, whitespace, or encoding produces a different hash and
    /// must be rejected by a verifier expecting the canonical form.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        canonical_bytes(self)
    }

    /// SHA-256 over the canonical byte sequence.
    pub fn hash(&self) -> Result<Hash, CryptoError> {
        Ok(sha256(&self.canonical_bytes()?))
    }

    /// Verify the attestation's bundle against the validator's keys.
    pub fn verify(
        &self,
        validator_keys: &PublicKeySet,
        policy: &BundlePolicy,
    ) -> Result<VerificationOutcome, CryptoError> {
        verify_bundle(
            &self.redundant_bundle,
            validator_keys,
            &self.payload().canonical_bytes()?,
            policy,
        )
    }
}

/// Result of a successful validation.
///
/// `AlreadyMinted` is not an error: replaying a reference returns the
/// stored attestation unchanged, which is what makes retries after
/// recoverable failures safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MintOutcome {
    /// A new credit was minted for the reference.
    Minted(CrossChainAttestation),
    /// A prior mint existed; its attestation is returned unchanged.
    AlreadyMinted(CrossChainAttestation),
}

impl MintOutcome {
    /// The attestation, whichever way it was produced.
    pub fn attestation(&self) -> &CrossChainAttestation {
        match self {
            MintOutcome::Minted(attestation) => attestation,
            MintOutcome::AlreadyMinted(attestation) => attestation,
        }
    }

    /// Whether this call performed the mint.
    pub fn was_minted(&self) -> bool {
        matches!(self, MintOutcome::Minted(_))
    }
}

/// Alias for validator results.
pub type ValidationResult = Result<MintOutcome, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use qi_crypto::{
        generate_full_keyset, sign_bundle, CanonicalizationDescriptor,
    };

    fn sample_payload() -> AttestationPayload {
        AttestationPayload {
            reference: ForeignTransactionReference::new(ChainId::Ethereum, [0xAB; 32]),
            signer: [0x11; 20],
            amount: 1_500_000_000,
            asset: "ETH".to_string(),
            target_chain: ChainId::QuantumInterop,
            timestamp: 7,
        }
    }

    #[test]
    fn test_payload_canonical_bytes_are_sorted_and_compact() {
        let bytes = sample_payload().canonical_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(!text.contains(' '));
        let amount_pos = text.find("\"amount\"").unwrap();
        let signer_pos = text.find("\"signer\"").unwrap();
        let timestamp_pos = text.find("\"timestamp\"").unwrap();
        assert!(amount_pos < signer_pos);
        assert!(signer_pos < timestamp_pos);
    }

    #[test]
    fn test_attestation_hash_is_deterministic() {
        let keyset = generate_full_keyset().unwrap();
        let payload = sample_payload();
        let bundle = sign_bundle(
            &keyset,
            &payload.canonical_bytes().unwrap(),
            CanonicalizationDescriptor::Sha256CanonicalJson,
        )
        .unwrap();
        let attestation = CrossChainAttestation::new(payload, bundle);

        assert_eq!(attestation.hash().unwrap(), attestation.hash().unwrap());
    }

    #[test]
    fn test_attestation_self_verifies() {
        let keyset = generate_full_keyset().unwrap();
        let keys = PublicKeySet::from_keypairs(&keyset);
        let payload = sample_payload();
        let bundle = sign_bundle(
            &keyset,
            &payload.canonical_bytes().unwrap(),
            CanonicalizationDescriptor::Sha256CanonicalJson,
        )
        .unwrap();
        let attestation = CrossChainAttestation::new(payload, bundle);

        let outcome = attestation
            .verify(&keys, &BundlePolicy::require_all())
            .unwrap();
        assert!(outcome.accepted);
    }

    #[test]
    fn test_tampered_attestation_fails_verification() {
        let keyset = generate_full_keyset().unwrap();
        let keys = PublicKeySet::from_keypairs(&keyset);
        let payload = sample_payload();
        let bundle = sign_bundle(
            &keyset,
            &payload.canonical_bytes().unwrap(),
            CanonicalizationDescriptor::Sha256CanonicalJson,
        )
        .unwrap();
        let mut attestation = CrossChainAttestation::new(payload, bundle);

        attestation.amount += 1;

        let outcome = attestation
            .verify(&keys, &BundlePolicy::require_all())
            .unwrap();
        assert!(!outcome.accepted);
    }

    #[test]
    fn test_mint_outcome_accessors() {
        let keyset = generate_full_keyset().unwrap();
        let payload = sample_payload();
        let bundle = sign_bundle(
            &keyset,
            &payload.canonical_bytes().unwrap(),
            CanonicalizationDescriptor::Sha256CanonicalJson,
        )
        .unwrap();
        let attestation = CrossChainAttestation::new(payload, bundle);

        let minted = MintOutcome::Minted(attestation.clone());
        let replayed = MintOutcome::AlreadyMinted(attestation.clone());

        assert!(minted.was_minted());
        assert!(!replayed.was_minted());
        assert_eq!(minted.attestation(), replayed.attestation());
    }
}
