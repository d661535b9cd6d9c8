//! # ML-DSA Adapter (Dilithium3)
//!
//! Lattice-based post-quantum layer of the bundle (FIPS 204 family).
//! Security rests on the Module-SIS problem, believed hard for quantum
//! computers.

use crate::adapter::{check_key_kind, check_share, SignatureAdapter};
use crate::bundle::SignatureShare;
use crate::keys::{AlgorithmKind, KeyPair, PublicKey};
use crate::CryptoError;
use pqcrypto_dilithium::dilithium3;
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};
use shared_types::Hash;

/// ML-DSA (Dilithium3) adapter.
pub struct MlDsaAdapter;

impl SignatureAdapter for MlDsaAdapter {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::LatticePq
    }

    fn signature_len(&self) -> usize {
        dilithium3::signature_bytes()
    }

    fn generate(&self) -> Result<KeyPair, CryptoError> {
        let (public, secret) = dilithium3::keypair();
        Ok(KeyPair::from_parts(
            self.kind(),
            public.as_bytes().to_vec(),
            secret.as_bytes().to_vec(),
        ))
    }

    fn sign(&self, keypair: &KeyPair, digest: &Hash) -> Result<SignatureShare, CryptoError> {
        check_key_kind(self.kind(), keypair.algorithm())?;

        let secret = dilithium3::SecretKey::from_bytes(keypair.secret().as_bytes())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        let signature = dilithium3::detached_sign(digest.as_slice(), &secret);

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

        let public_key = dilithium3::PublicKey::from_bytes(&public.bytes)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let signature = match dilithium3::DetachedSignature::from_bytes(&share.bytes) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };

        Ok(
            dilithium3::verify_detached_signature(&signature, digest.as_slice(), &public_key)
                .is_ok(),
        )
    }
}
