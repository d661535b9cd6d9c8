//! # Multisig Integration Flows
//!
//! Full organizational-signature choreography: independent signers
//! produce QRS-3 bundles over one message and race them into a shared
//! k-of-n session.

#[cfg(test)]
mod tests {
    use qi_crypto::{
        generate_full_keyset, sign_bundle, BundlePolicy, CanonicalizationDescriptor, KeyPair,
        PublicKeySet, RedundantBundle,
    };
    use qi_multisig::{MultisigSession, SessionState, SharedMultisigSession, SignerRoster};
    use shared_types::SignerId;

    struct Signer {
        id: SignerId,
        keyset: Vec<KeyPair>,
    }

    fn org_signers(count: usize) -> (SignerRoster, Vec<Signer>) {
        let mut roster = SignerRoster::new();
        let mut signers = Vec::new();
        for index in 0..count {
            let keyset = generate_full_keyset().unwrap();
            let id = SignerId::new(format!("org-signer-{index}"));
            roster.register(id.clone(), PublicKeySet::from_keypairs(&keyset));
            signers.push(Signer { id, keyset });
        }
        (roster, signers)
    }

    fn bundle(signer: &Signer, message: &[u8]) -> RedundantBundle {
        sign_bundle(
            &signer.keyset,
            message,
            CanonicalizationDescriptor::Sha256Raw,
        )
        .unwrap()
    }

    #[test]
    fn test_three_of_five_organizational_signature() {
        let (roster, signers) = org_signers(5);
        let mut session =
            MultisigSession::new(roster, 3, BundlePolicy::require_all()).unwrap();
        let message = b"rotate the treasury key";

        let mut states = Vec::new();
        for signer in &signers {
            states.push(
                session
                    .add_signature(signer.id.clone(), bundle(signer, message), message)
                    .unwrap(),
            );
        }

        // Satisfied fires exactly on the 3rd distinct signer, not before,
        // and holds through the 4th and 5th.
        assert_eq!(
            states,
            vec![
                SessionState::Collecting,
                SessionState::Collecting,
                SessionState::Satisfied,
                SessionState::Satisfied,
                SessionState::Satisfied,
            ]
        );

        let snapshot = session.finalize().unwrap();
        assert_eq!(snapshot.bundles.len(), 5);
        assert_eq!(snapshot.threshold, 3);
        assert_eq!(snapshot.signers, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_reach_threshold() {
        let (roster, signers) = org_signers(5);
        let session = SharedMultisigSession::new(
            MultisigSession::new(roster, 3, BundlePolicy::require_all()).unwrap(),
        );
        let message: &[u8] = b"concurrent approval";

        let mut handles = Vec::new();
        for signer in &signers {
            let session = session.clone();
            let id = signer.id.clone();
            let signed = bundle(signer, message);
            let message = message.to_vec();
            handles.push(tokio::spawn(async move {
                session.add_signature(id, signed, &message).unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(session.is_satisfied());

        // Finalize twice concurrently; both callers get the same snapshot.
        let first = session.finalize().unwrap();
        let second = session.finalize().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.bundles.len(), 5);
    }

    #[test]
    fn test_snapshot_serializes_for_audit() {
        let (roster, signers) = org_signers(3);
        let mut session =
            MultisigSession::new(roster, 2, BundlePolicy::require_all()).unwrap();
        let message = b"audited decision";

        for signer in signers.iter().take(2) {
            session
                .add_signature(signer.id.clone(), bundle(signer, message), message)
                .unwrap();
        }

        let snapshot = session.finalize().unwrap();
        let wire = serde_json::to_string(&snapshot).unwrap();

        assert!(wire.contains("org-signer-0"));
        assert!(wire.contains("classical-ec"));
        assert!(wire.contains("lattice-pq"));
        assert!(wire.contains("hash-pq"));

        let restored: qi_multisig::FinalizedSet = serde_json::from_str(&wire).unwrap();
        assert_eq!(restored, snapshot);
    }
}
