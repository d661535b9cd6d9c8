//! # ECDSA Adapter (secp256k1)
//!
//! Classical elliptic-curve layer of the bundle.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Constant-time operations
//!
//! This layer exists for compatibility with today's chain tooling; the
//! post-quantum layers carry the long-term guarantee.

use crate::adapter::{check_key_kind, check_share, SignatureAdapter};
use crate::bundle::SignatureShare;
use crate::keys::{AlgorithmKind, KeyPair, PublicKey};
use crate::CryptoError;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use shared_types::Hash;

/// ECDSA signature length (64 bytes, r||s format).
pub const ECDSA_SIGNATURE_LEN: usize = 64;

/// Compressed SEC1 public key length (33 bytes).
pub const ECDSA_PUBLIC_KEY_LEN: usize = 33;

/// secp256k1 ECDSA adapter.
pub struct EcdsaAdapter;

impl SignatureAdapter for EcdsaAdapter {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::ClassicalEc
    }

    fn signature_len(&self) -> usize {
        ECDSA_SIGNATURE_LEN
    }

    fn generate(&self) -> Result<KeyPair, CryptoError> {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let public = signing_key.verifying_key().to_sec1_bytes().to_vec();
        let secret = signing_key.to_bytes().to_vec();
        Ok(KeyPair::from_parts(self.kind(), public, secret))
    }

    fn sign(&self, keypair: &KeyPair, digest: &Hash) -> Result<SignatureShare, CryptoError> {
        check_key_kind(self.kind(), keypair.algorithm())?;

        let secret: [u8; 32] = keypair
            .secret()
            .as_bytes()
            .try_into()
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        let signing_key =
            SigningKey::from_bytes((&secret).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;

        let signature: Signature = signing_key.sign(digest.as_slice());
        Ok(SignatureShare::new(
            self.kind(),
            signature.to_bytes().to_vec(),
        ))
    }

    fn verify(
        &self,
        public: &PublicKey,
        digest: &Hash,
        share: &SignatureShare,
    ) -> Result<bool, CryptoError> {
        check_key_kind(self.kind(), public.algorithm)?;
        check_share(self.kind(), self.signature_len(), share)?;

        let verifying_key = VerifyingKey::from_sec1_bytes(&public.bytes)
            .map_err(|_| CryptoError::InvalidPublicKey)?;

        // A right-length share with out-of-range scalars is a failed
        // verification, not a configuration error.
        let signature = match Signature::from_slice(&share.bytes) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };

        Ok(verifying_key.verify(digest.as_slice(), &signature).is_ok())
    }
}
