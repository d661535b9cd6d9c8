//! # Bundle Integration Flows
//!
//! QRS-N bundles as they travel between parties: signed by one
//! process, serialized, and verified by another against registered
//! public keys.

#[cfg(test)]
mod tests {
    use qi_crypto::{
        generate_full_keyset, sign_bundle, verify_bundle, AlgorithmKind, BundlePolicy,
        CanonicalizationDescriptor, PublicKeySet, RedundantBundle,
    };

    #[test]
    fn test_bundle_integrity_across_serialization_boundary() {
        let keyset = generate_full_keyset().unwrap();
        let keys = PublicKeySet::from_keypairs(&keyset);
        let message = b"transfer 1500 base units to 0x11";

        let bundle =
            sign_bundle(&keyset, message, CanonicalizationDescriptor::Sha256Raw).unwrap();

        // Ship the bundle and the verifier's key set as JSON, the way a
        // remote verifier would receive them.
        let bundle_wire = serde_json::to_string(&bundle).unwrap();
        let keys_wire = serde_json::to_string(&keys).unwrap();

        let received_bundle: RedundantBundle = serde_json::from_str(&bundle_wire).unwrap();
        let received_keys: PublicKeySet = serde_json::from_str(&keys_wire).unwrap();

        let outcome = verify_bundle(
            &received_bundle,
            &received_keys,
            message,
            &BundlePolicy::require_all(),
        )
        .unwrap();

        assert!(outcome.accepted);
        assert_eq!(outcome.verdicts.len(), 3);
        assert!(outcome.verdicts.iter().all(|verdict| verdict.valid));
    }

    #[test]
    fn test_bundle_from_another_signer_rejected() {
        let signer_keys = generate_full_keyset().unwrap();
        let verifier_registered = PublicKeySet::from_keypairs(&generate_full_keyset().unwrap());
        let message = b"impersonation attempt";

        let bundle =
            sign_bundle(&signer_keys, message, CanonicalizationDescriptor::Sha256Raw).unwrap();
        let outcome = verify_bundle(
            &bundle,
            &verifier_registered,
            message,
            &BundlePolicy::require_all(),
        )
        .unwrap();

        // All three layers must fail: no single-algorithm overlap helps.
        assert!(!outcome.accepted);
        assert!(outcome.verdicts.iter().all(|verdict| !verdict.valid));
    }

    #[test]
    fn test_canonical_json_descriptor_tolerates_reordered_payload() {
        let keyset = generate_full_keyset().unwrap();
        let keys = PublicKeySet::from_keypairs(&keyset);

        let signed_form = br#"{"amount":1500,"asset":"ETH","to":"0x11"}"#;
        let reordered_form = br#"{ "to": "0x11", "asset": "ETH", "amount": 1500 }"#;

        let bundle = sign_bundle(
            &keyset,
            signed_form,
            CanonicalizationDescriptor::Sha256CanonicalJson,
        )
        .unwrap();

        // A verifier holding a differently-ordered but semantically
        // identical JSON document reproduces the same digest.
        let outcome = verify_bundle(
            &bundle,
            &keys,
            reordered_form,
            &BundlePolicy::require_all(),
        )
        .unwrap();
        assert!(outcome.accepted);
    }

    #[test]
    fn test_share_mutation_detected_per_algorithm() {
        let keyset = generate_full_keyset().unwrap();
        let keys = PublicKeySet::from_keypairs(&keyset);
        let message = b"mutation probe";

        for target in AlgorithmKind::ALL {
            let mut bundle =
                sign_bundle(&keyset, message, CanonicalizationDescriptor::Sha256Raw).unwrap();
            let position = bundle
                .shares
                .iter()
                .position(|share| share.algorithm == target)
                .unwrap();
            let last = bundle.shares[position].bytes.len() - 1;
            bundle.shares[position].bytes[last] ^= 0x01;

            let outcome =
                verify_bundle(&bundle, &keys, message, &BundlePolicy::require_all()).unwrap();

            assert!(!outcome.accepted, "mutated {target} share must reject");
            let verdict = outcome
                .verdicts
                .iter()
                .find(|verdict| verdict.algorithm == target)
                .unwrap();
            assert!(!verdict.valid);
            // The other two layers still verify, and that must not help.
            assert_eq!(
                outcome.verdicts.iter().filter(|verdict| verdict.valid).count(),
                2
            );
        }
    }
}
