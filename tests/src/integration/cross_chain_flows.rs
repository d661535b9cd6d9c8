//! # Cross-Chain Integration Flows
//!
//! The full bridge-free path: a finalized foreign transfer becomes
//! exactly one native credit, attested with the validator's QRS-3
//! bundle, under replay and under concurrency.

#[cfg(test)]
mod tests {
    use qi_cross_chain::{
        ChainId, ClaimedTransfer, CrossChainAttestation, CrossChainValidator,
        CrossChainValidatorApi, FinalityPolicy, ForeignTransactionReference, InMemoryCreditLedger,
        MintOutcome, RetryPolicy, StaticChainReader, ValidationError, ValidatorConfig,
    };
    use qi_crypto::{generate_full_keyset, BundlePolicy};
    use shared_types::sha256;
    use std::sync::Arc;

    const SENDER: [u8; 20] = [0x51; 20];

    /// 1.5 tokens at 9 decimal places.
    const AMOUNT: u64 = 1_500_000_000;

    fn claim() -> ClaimedTransfer {
        ClaimedTransfer {
            amount: AMOUNT,
            asset: "ETH".to_string(),
        }
    }

    fn scenario_validator(
        required_confirmations: u64,
        tip_height: u64,
    ) -> (
        Arc<CrossChainValidator<StaticChainReader, InMemoryCreditLedger>>,
        ForeignTransactionReference,
    ) {
        let reference = ForeignTransactionReference::new(ChainId::Ethereum, [0xAB; 32]);
        let reader = StaticChainReader::with_chains(&[(ChainId::Ethereum, tip_height)]);
        // Block 100: confirmations = tip - 100 + 1.
        reader.register_transaction(reference, SENDER, AMOUNT, "ETH", 100);

        let config = ValidatorConfig {
            finality: FinalityPolicy::new().with_custom(ChainId::Ethereum, required_confirmations),
            retry: RetryPolicy::for_testing(),
            ..ValidatorConfig::default()
        };
        let validator = CrossChainValidator::new(
            reader,
            InMemoryCreditLedger::new(),
            config,
            generate_full_keyset().unwrap(),
        )
        .unwrap();

        (Arc::new(validator), reference)
    }

    #[tokio::test]
    async fn test_worked_scenario_mint_then_replay() {
        // 12 confirmations observed, 10 required.
        let (validator, reference) = scenario_validator(10, 111);

        let outcome = validator.validate_and_mint(reference, claim()).await.unwrap();
        assert!(outcome.was_minted());

        let attestation = outcome.attestation();
        assert_eq!(attestation.reference, reference);
        assert_eq!(attestation.signer, SENDER);
        assert_eq!(attestation.amount, AMOUNT);
        assert_eq!(attestation.target_chain, ChainId::QuantumInterop);

        // Re-submitting the identical reference returns the stored
        // attestation unchanged.
        let replay = validator.validate_and_mint(reference, claim()).await.unwrap();
        match replay {
            MintOutcome::AlreadyMinted(stored) => assert_eq!(&stored, attestation),
            MintOutcome::Minted(_) => panic!("replay must not re-mint"),
        }
        assert_eq!(validator.ledger().len(), 1);
    }

    #[tokio::test]
    async fn test_finality_gate_blocks_then_admits() {
        // 12 required; tip gives only 5 confirmations.
        let (validator, reference) = scenario_validator(12, 104);

        let early = validator.validate_and_mint(reference, claim()).await;
        match early {
            Err(ValidationError::PendingFinality { got, required }) => {
                assert_eq!(got, 5);
                assert_eq!(required, 12);
            }
            other => panic!("expected PendingFinality, got {other:?}"),
        }
        assert!(validator.attestation_for(&reference).is_none());
        assert!(validator.ledger().is_empty());

        // Seven more blocks land; the retried submission mints.
        validator.reader().advance_height(ChainId::Ethereum, 7);

        let outcome = validator.validate_and_mint(reference, claim()).await.unwrap();
        assert!(outcome.was_minted());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_mint_exactly_once() {
        let (validator, reference) = scenario_validator(2, 120);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let validator = Arc::clone(&validator);
            handles.push(tokio::spawn(async move {
                validator.validate_and_mint(reference, claim()).await.unwrap()
            }));
        }

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }

        let mint_count = outcomes.iter().filter(|outcome| outcome.was_minted()).count();
        assert_eq!(mint_count, 1, "exactly one caller performs the mint");

        // Every caller observes an identical attestation.
        let canonical: Vec<&CrossChainAttestation> =
            outcomes.iter().map(|outcome| outcome.attestation()).collect();
        assert!(canonical.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(validator.ledger().len(), 1);
    }

    #[tokio::test]
    async fn test_attestation_is_canonical_and_self_verifiable() {
        let (validator, reference) = scenario_validator(2, 120);

        let outcome = validator.validate_and_mint(reference, claim()).await.unwrap();
        let attestation = outcome.attestation();

        // Persisted form: canonical JSON, keys sorted, no whitespace.
        let bytes = attestation.canonical_bytes().unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(!text.contains("\": "));
        assert!(text.contains("\"redundant_bundle\""));
        let mut top_level_keys = vec![
            "amount",
            "asset",
            "redundant_bundle",
            "reference",
            "signer",
            "target_chain",
            "timestamp",
        ];
        top_level_keys.sort_unstable();
        let mut last = 0;
        for key in top_level_keys {
            let position = text.find(&format!("\"{key}\"")).unwrap();
            assert!(position >= last, "{key} out of canonical order");
            last = position;
        }

        // The documented hash is SHA-256 over exactly those bytes.
        assert_eq!(attestation.hash().unwrap(), sha256(&bytes));

        // Downstream consumers verify the bundle with the validator's keys.
        let check = attestation
            .verify(validator.verifying_keys(), &BundlePolicy::require_all())
            .unwrap();
        assert!(check.accepted);

        // Round-trip through the wire preserves the hash.
        let wire = serde_json::to_string(attestation).unwrap();
        let restored: CrossChainAttestation = serde_json::from_str(&wire).unwrap();
        assert_eq!(restored.hash().unwrap(), attestation.hash().unwrap());
    }

    #[tokio::test]
    async fn test_distinct_references_mint_independently() {
        let reader = StaticChainReader::with_chains(&[(ChainId::Ethereum, 200), (ChainId::Bitcoin, 500)]);
        let eth = ForeignTransactionReference::new(ChainId::Ethereum, [0x01; 32]);
        let btc = ForeignTransactionReference::new(ChainId::Bitcoin, [0x02; 32]);
        reader.register_transaction(eth, SENDER, 100, "ETH", 150);
        reader.register_transaction(btc, SENDER, 250, "BTC", 400);

        let config = ValidatorConfig {
            finality: FinalityPolicy::for_testing(),
            retry: RetryPolicy::for_testing(),
            ..ValidatorConfig::default()
        };
        let validator = CrossChainValidator::new(
            reader,
            InMemoryCreditLedger::new(),
            config,
            generate_full_keyset().unwrap(),
        )
        .unwrap();

        let eth_outcome = validator
            .validate_and_mint(eth, ClaimedTransfer { amount: 100, asset: "ETH".into() })
            .await
            .unwrap();
        let btc_outcome = validator
            .validate_and_mint(btc, ClaimedTransfer { amount: 250, asset: "BTC".into() })
            .await
            .unwrap();

        assert!(eth_outcome.was_minted());
        assert!(btc_outcome.was_minted());
        assert_eq!(validator.ledger().len(), 2);
        assert_eq!(validator.ledger().total_minted(ChainId::Ethereum), 100);
        assert_eq!(validator.ledger().total_minted(ChainId::Bitcoin), 250);
        assert_eq!(validator.ledger().credits_for_signer(&SENDER).len(), 2);
    }
}
