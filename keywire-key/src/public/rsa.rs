//! Rivest–Shamir–Adleman (RSA) public keys.

use crate::{Algorithm, Error, Mpint, Result};
use core::hash::{Hash, Hasher};
use encoding::{CheckedSum, Decode, Encode, Reader, Writer};
use rsa::traits::PublicKeyParts;

/// RSA public key.
///
/// Wire layout after the key type is `mpint e` followed by `mpint n`.
///
/// Described in [RFC4253 § 6.6](https://datatracker.ietf.org/doc/html/rfc4253#section-6.6).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RsaPublicKey {
    /// RSA public exponent.
    e: Mpint,

    /// RSA modulus.
    n: Mpint,
}

impl RsaPublicKey {
    /// Create a new [`RsaPublicKey`] with the given components:
    ///
    /// - `e`: RSA public exponent.
    /// - `n`: RSA modulus.
    pub fn new(e: Mpint, n: Mpint) -> Self {
        Self { e, n }
    }

    /// Get the RSA public exponent.
    pub fn e(&self) -> &Mpint {
        &self.e
    }

    /// Get the RSA modulus.
    pub fn n(&self) -> &Mpint {
        &self.n
    }

    /// Get the size of the RSA modulus in bits.
    pub fn key_size(&self) -> usize {
        match self.n.as_positive_bytes() {
            [first, rest @ ..] => rest.len() * 8 + (8 - first.leading_zeros() as usize),
            [] => 0,
        }
    }
}

impl Decode for RsaPublicKey {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        let e = Mpint::decode(reader)?;
        let n = Mpint::decode(reader)?;
        Ok(Self::new(e, n))
    }
}

impl Encode for RsaPublicKey {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [self.e.encoded_len()?, self.n.encoded_len()?].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.e.encode(writer)?;
        self.n.encode(writer)
    }
}

impl Hash for RsaPublicKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.e.as_positive_bytes().hash(state);
        self.n.as_positive_bytes().hash(state);
    }
}

impl TryFrom<&RsaPublicKey> for rsa::RsaPublicKey {
    type Error = Error;

    fn try_from(key: &RsaPublicKey) -> Result<rsa::RsaPublicKey> {
        rsa::RsaPublicKey::new(rsa::BigUint::from(&key.n), rsa::BigUint::from(&key.e))
            .map_err(|err| Error::rejected(Algorithm::Rsa, err))
    }
}

impl TryFrom<RsaPublicKey> for rsa::RsaPublicKey {
    type Error = Error;

    fn try_from(key: RsaPublicKey) -> Result<rsa::RsaPublicKey> {
        rsa::RsaPublicKey::try_from(&key)
    }
}

impl From<&rsa::RsaPublicKey> for RsaPublicKey {
    fn from(key: &rsa::RsaPublicKey) -> RsaPublicKey {
        RsaPublicKey::new(key.e().into(), key.n().into())
    }
}

impl From<rsa::RsaPublicKey> for RsaPublicKey {
    fn from(key: rsa::RsaPublicKey) -> RsaPublicKey {
        RsaPublicKey::from(&key)
    }
}
