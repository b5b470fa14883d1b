//! Opaque public keys.
//!
//! [`OpaquePublicKey`] holds a public key for an algorithm with no built-in
//! wire codec, such as one served by a decoder registered at runtime. The
//! key material following the key type is kept as raw bytes.

use crate::{Algorithm, AlgorithmName, Result};
use encoding::{CheckedSum, Encode, Reader, Writer};

/// An opaque public key with a custom algorithm name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OpaquePublicKey {
    algorithm: AlgorithmName,
    key: Vec<u8>,
}

impl OpaquePublicKey {
    /// Create a new `OpaquePublicKey` from the bytes which follow the key
    /// type in its wire form.
    pub fn new(algorithm: AlgorithmName, key: Vec<u8>) -> Self {
        Self { algorithm, key }
    }

    /// Get the [`Algorithm`] for this public key type.
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::Other(self.algorithm.clone())
    }

    /// Get the algorithm name.
    pub fn name(&self) -> &AlgorithmName {
        &self.algorithm
    }

    /// Borrow the raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Consume every remaining byte of `reader` as the key material for
    /// `algorithm`.
    pub fn decode_as(reader: &mut impl Reader, algorithm: AlgorithmName) -> Result<Self> {
        let mut key = vec![0u8; reader.remaining_len()];
        reader.read(&mut key)?;
        Ok(Self::new(algorithm, key))
    }
}

impl AsRef<[u8]> for OpaquePublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Encode for OpaquePublicKey {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [self.algorithm.as_str().encoded_len()?, self.key.len()].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.algorithm.as_str().encode(writer)?;
        writer.write(&self.key)
    }
}
