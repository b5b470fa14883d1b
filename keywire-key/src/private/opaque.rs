//! Opaque keypairs.
//!
//! [`OpaqueKeypair`] holds a keypair for an algorithm with no built-in wire
//! codec. It can be carried around and compared, but not serialized.

use crate::{public::OpaquePublicKey, Algorithm};
use core::fmt;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// An opaque keypair with a custom algorithm name.
#[derive(Clone)]
pub struct OpaqueKeypair {
    /// The opaque public key.
    pub public: OpaquePublicKey,

    /// The opaque private key bytes.
    private: Vec<u8>,
}

impl OpaqueKeypair {
    /// Create a new `OpaqueKeypair`.
    pub fn new(private_key: Vec<u8>, public: OpaquePublicKey) -> Self {
        Self {
            public,
            private: private_key,
        }
    }

    /// Get the [`Algorithm`] for this key type.
    pub fn algorithm(&self) -> Algorithm {
        self.public.algorithm()
    }

    /// Borrow the private key bytes.
    pub fn private_bytes(&self) -> &[u8] {
        &self.private
    }
}

impl ConstantTimeEq for OpaqueKeypair {
    fn ct_eq(&self, other: &Self) -> Choice {
        Choice::from((self.public == other.public) as u8)
            & self.private.as_slice().ct_eq(other.private.as_slice())
    }
}

impl Eq for OpaqueKeypair {}

impl PartialEq for OpaqueKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<&OpaqueKeypair> for OpaquePublicKey {
    fn from(keypair: &OpaqueKeypair) -> OpaquePublicKey {
        keypair.public.clone()
    }
}

impl fmt::Debug for OpaqueKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueKeypair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl Drop for OpaqueKeypair {
    fn drop(&mut self) {
        self.private.zeroize();
    }
}
