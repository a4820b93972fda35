//! # Digests — Pluggable Fixed-Size Hashing
//!
//! Defines the `HashFunction` seam used by `keccak256:` expressions, the
//! 32-byte `Digest` it returns, and the two shipped implementations.
//!
//! The grammar treats the hash as a one-way function returning exactly
//! 32 bytes. `Keccak256` (legacy Keccak padding, as used by the VM) is the
//! default; `Sha256` exists for harnesses that want a different digest
//! behind the same prefix.

use serde::{Deserialize, Serialize};
use sha3::Digest as _;

use crate::error::HashError;

/// Length in bytes of every digest produced through [`HashFunction`].
pub const DIGEST_LEN: usize = 32;

/// The hash algorithm that produced a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// Keccak-256 with the original (pre-SHA-3) padding.
    Keccak256,
    /// SHA-256.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 32-byte digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw digest value.
    pub bytes: [u8; DIGEST_LEN],
}

impl Digest {
    /// Create a digest from raw bytes and algorithm.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; DIGEST_LEN]) -> Self {
        Self { algorithm, bytes }
    }

    /// Create a digest from a hasher's output, checking its length.
    pub fn from_slice(algorithm: DigestAlgorithm, output: &[u8]) -> Result<Self, HashError> {
        let bytes: [u8; DIGEST_LEN] =
            output.try_into().map_err(|_| HashError::DigestLength {
                algorithm: algorithm.as_str(),
                len: output.len(),
            })?;
        Ok(Self::new(algorithm, bytes))
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The digest bytes as an owned vector, ready to splice into a value.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// A one-way function producing a fixed 32-byte digest.
pub trait HashFunction: Send + Sync {
    /// The algorithm this function implements.
    fn algorithm(&self) -> DigestAlgorithm;

    /// Hash `data`.
    fn hash(&self, data: &[u8]) -> Result<Digest, HashError>;
}

/// Legacy Keccak-256, the digest behind `keccak256:` expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256;

impl HashFunction for Keccak256 {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Keccak256
    }

    fn hash(&self, data: &[u8]) -> Result<Digest, HashError> {
        let output = sha3::Keccak256::digest(data);
        Digest::from_slice(self.algorithm(), &output)
    }
}

/// SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl HashFunction for Sha256 {
    fn algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Sha256
    }

    fn hash(&self, data: &[u8]) -> Result<Digest, HashError> {
        let output = sha2::Sha256::digest(data);
        Digest::from_slice(self.algorithm(), &output)
    }
}
