//! # Keys and Algorithm Tags
//!
//! Key material for the redundant signature scheme. Every key is tagged
//! with the algorithm it belongs to so a key can never be fed to the
//! wrong adapter unnoticed.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The three independent signature algorithms a bundle composes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Classical elliptic-curve signatures (secp256k1 ECDSA).
    ClassicalEc,
    /// Lattice-based post-quantum signatures (ML-DSA / Dilithium3).
    LatticePq,
    /// Hash-based post-quantum signatures (SLH-DSA / SPHINCS+).
    HashPq,
}

impl AlgorithmKind {
    /// All algorithms, in bundle order.
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::ClassicalEc,
        AlgorithmKind::LatticePq,
        AlgorithmKind::HashPq,
    ];

    /// Stable wire label for the algorithm.
    pub fn label(&self) -> &'static str {
        match self {
            AlgorithmKind::ClassicalEc => "classical-ec",
            AlgorithmKind::LatticePq => "lattice-pq",
            AlgorithmKind::HashPq => "hash-pq",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Private key bytes that zeroize on drop.
///
/// Never serialized and never printed; `Debug` redacts the contents.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes {
    inner: Vec<u8>,
}

impl SecretBytes {
    /// Wrap secret bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { inner: bytes }
    }

    /// Borrow the secret bytes (use immediately, do not hold on to them).
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Length of the secret in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretBytes(***)")
    }
}

/// Public key bytes tagged with their algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Algorithm this key belongs to.
    pub algorithm: AlgorithmKind,
    /// Raw public key bytes (SEC1-compressed for ECDSA, scheme-native
    /// encodings for the PQ algorithms).
    #[serde(with = "hex::serde")]
    pub bytes: Vec<u8>,
}

impl PublicKey {
    /// Create a tagged public key.
    pub fn new(algorithm: AlgorithmKind, bytes: Vec<u8>) -> Self {
        Self { algorithm, bytes }
    }
}

/// An algorithm-tagged keypair.
///
/// The private component is owned exclusively by the signing context
/// holding this value and is zeroized when the keypair is dropped. Only
/// the public half can be serialized.
pub struct KeyPair {
    algorithm: AlgorithmKind,
    public: PublicKey,
    secret: SecretBytes,
}

impl KeyPair {
    /// Reassemble a keypair from stored parts.
    pub fn from_parts(algorithm: AlgorithmKind, public_bytes: Vec<u8>, secret_bytes: Vec<u8>) -> Self {
        Self {
            algorithm,
            public: PublicKey::new(algorithm, public_bytes),
            secret: SecretBytes::new(secret_bytes),
        }
    }

    /// Algorithm this keypair belongs to.
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// Public half of the keypair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Private half, visible to the adapters in this crate only.
    pub(crate) fn secret(&self) -> &SecretBytes {
        &self.secret
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &self.algorithm)
            .field("public", &hex::encode(&self.public.bytes))
            .field("secret", &"***")
            .finish()
    }
}
