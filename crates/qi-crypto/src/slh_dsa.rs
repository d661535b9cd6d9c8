//! # SLH-DSA Adapter (SPHINCS+-SHA2-128s)
//!
//! Hash-based post-quantum layer of the bundle (FIPS 205 family).
//! Stateless Merkle-tree signatures; security rests only on the
//! collision resistance of the underlying hash, so this layer stays
//! standing even if both structured-math layers fall.

use crate::adapter::{check_key_kind, check_share, SignatureAdapter};
use crate::bundle::SignatureShare;
use crate::keys::{AlgorithmKind, KeyPair, PublicKey};
use crate::CryptoError;
use pqcrypto_sphincsplus::sphincssha2128ssimple as sphincs;
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};
use shared_types::Hash;

/// SLH-DSA (SPHINCS+-SHA2-128s-simple) adapter.
pub struct SlhDsaAdapter;

impl SignatureAdapter for SlhDsaAdapter {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::HashPq
    }

    fn signature_len(&self) -> usize {
        sphincs::signature_bytes()
    }

    fn generate(&self) -> Result<KeyPair, CryptoError> {
        let (public, secret) = sphincs::keypair();
        Ok(KeyPair::from_parts(
            self.kind(),
            public.as_bytes().to_vec(),
            secret.as_bytes().to_vec(),
        ))
    }

    fn sign(&self, keypair: &KeyPair, digest: &Hash) -> Result<SignatureShare, CryptoError> {
        check_key_kind(self.kind(), keypair.algorithm())?;

        let secret = sphincs::SecretKey::from_bytes(keypair.secret().as_bytes())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        let signature = sphincs::detached_sign(digest.as_slice(), &secret);

        Ok(SignatureShare::new(
            self.kind(),
            signature.as_bytes().to_vec(),
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

        let public_key = sphincs::PublicKey::from_bytes(&public.bytes)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let signature = match sphincs::DetachedSignature::from_bytes(&share.bytes) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };

        Ok(
            sphincs::verify_detached_signature(&signature, digest.as_slice(), &public_key)
                .is_ok(),
        )
    }
}
