//! Rivest–Shamir–Adleman (RSA) private keys.

use crate::{public::RsaPublicKey, Algorithm, Error, Mpint, Result};
use core::fmt;
use encoding::{CheckedSum, Decode, Encode, Reader, Writer};
use rand_core::CryptoRngCore;
use rsa::{
    traits::{PrivateKeyParts, PublicKeyParts},
    BigUint,
};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// RSA private key.
///
/// The CRT exponents `dp` and `dq` aren't part of the wire form; they are
/// derived from `d`, `p` and `q` on construction.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// RSA private exponent.
    d: Mpint,

    /// CRT coefficient: `(inverse of q) mod p`.
    iqmp: Mpint,

    /// First prime factor of `n`.
    p: Mpint,

    /// Second prime factor of `n`.
    q: Mpint,

    /// CRT exponent: `d mod (p - 1)`.
    dp: Mpint,

    /// CRT exponent: `d mod (q - 1)`.
    dq: Mpint,
}

impl RsaPrivateKey {
    /// Create a new RSA private key with the following components:
    ///
    /// - `d`: RSA private exponent.
    /// - `iqmp`: CRT coefficient: `(inverse of q) mod p`.
    /// - `p`: First prime factor of `n`.
    /// - `q`: Second prime factor of `n`.
    ///
    /// # Returns
    /// - `Err(Error::KeyMaterialRejected)` if either prime is less than 2.
    pub fn new(d: Mpint, iqmp: Mpint, p: Mpint, q: Mpint) -> Result<Self> {
        let d_int = BigUint::from(&d);
        let dp = crt_exponent(&d_int, &p)?;
        let dq = crt_exponent(&d_int, &q)?;
        Ok(Self {
            d,
            iqmp,
            p,
            q,
            dp,
            dq,
        })
    }

    /// RSA private exponent.
    pub fn d(&self) -> &Mpint {
        &self.d
    }

    /// CRT coefficient: `(inverse of q) mod p`.
    pub fn iqmp(&self) -> &Mpint {
        &self.iqmp
    }

    /// First prime factor of `n`.
    pub fn p(&self) -> &Mpint {
        &self.p
    }

    /// Second prime factor of `n`.
    pub fn q(&self) -> &Mpint {
        &self.q
    }

    /// CRT exponent `d mod (p - 1)`.
    pub fn dp(&self) -> &Mpint {
        &self.dp
    }

    /// CRT exponent `d mod (q - 1)`.
    pub fn dq(&self) -> &Mpint {
        &self.dq
    }
}

/// Compute `d mod (prime - 1)`.
fn crt_exponent(d: &BigUint, prime: &Mpint) -> Result<Mpint> {
    let one = BigUint::from(1u8);
    let prime = BigUint::from(prime);

    if prime <= one {
        return Err(Error::rejected(Algorithm::Rsa, "prime factor less than 2"));
    }

    Ok(Mpint::from(d % (&prime - &one)))
}

impl ConstantTimeEq for RsaPrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.d.ct_eq(&other.d)
            & self.iqmp.ct_eq(&other.iqmp)
            & self.p.ct_eq(&other.p)
            & self.q.ct_eq(&other.q)
    }
}

impl Eq for RsaPrivateKey {}

impl PartialEq for RsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.iqmp.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
    }
}

/// RSA private/public keypair.
///
/// Wire layout after the key type is `mpint e`, `mpint n`, `mpint d`,
/// `mpint iqmp`, `mpint q`, `mpint p`.
#[derive(Clone)]
pub struct RsaKeypair {
    /// Public key.
    pub public: RsaPublicKey,

    /// Private key.
    pub private: RsaPrivateKey,
}

impl RsaKeypair {
    /// Minimum allowed RSA key size when generating keys.
    pub const MIN_KEY_SIZE: usize = 1024;

    /// Generate a random RSA keypair of the given size.
    pub fn random(rng: &mut impl CryptoRngCore, bit_size: usize) -> Result<Self> {
        if bit_size < Self::MIN_KEY_SIZE {
            return Err(Error::rejected(
                Algorithm::Rsa,
                format!("key size {bit_size} is below the {} bit minimum", Self::MIN_KEY_SIZE),
            ));
        }

        rsa::RsaPrivateKey::new(rng, bit_size)
            .map_err(|err| Error::rejected(Algorithm::Rsa, err))?
            .try_into()
    }

    /// Get the size of the RSA modulus in bits.
    pub fn key_size(&self) -> usize {
        self.public.key_size()
    }
}

impl Decode for RsaKeypair {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        let public = RsaPublicKey::decode(reader)?;
        let d = Mpint::decode(reader)?;
        let iqmp = Mpint::decode(reader)?;
        let q = Mpint::decode(reader)?;
        let p = Mpint::decode(reader)?;
        let private = RsaPrivateKey::new(d, iqmp, p, q)?;
        Ok(RsaKeypair { public, private })
    }
}

impl Encode for RsaKeypair {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [
            self.public.encoded_len()?,
            self.private.d.encoded_len()?,
            self.private.iqmp.encoded_len()?,
            self.private.q.encoded_len()?,
            self.private.p.encoded_len()?,
        ]
        .checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.public.encode(writer)?;
        self.private.d.encode(writer)?;
        self.private.iqmp.encode(writer)?;
        self.private.q.encode(writer)?;
        self.private.p.encode(writer)
    }
}

impl ConstantTimeEq for RsaKeypair {
    fn ct_eq(&self, other: &Self) -> Choice {
        Choice::from((self.public == other.public) as u8) & self.private.ct_eq(&other.private)
    }
}

impl Eq for RsaKeypair {}

impl PartialEq for RsaKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<RsaKeypair> for RsaPublicKey {
    fn from(keypair: RsaKeypair) -> RsaPublicKey {
        keypair.public
    }
}

impl From<&RsaKeypair> for RsaPublicKey {
    fn from(keypair: &RsaKeypair) -> RsaPublicKey {
        keypair.public.clone()
    }
}

impl fmt::Debug for RsaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeypair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&RsaKeypair> for rsa::RsaPrivateKey {
    type Error = Error;

    fn try_from(key: &RsaKeypair) -> Result<rsa::RsaPrivateKey> {
        rsa::RsaPrivateKey::from_components(
            BigUint::from(key.public.n()),
            BigUint::from(key.public.e()),
            BigUint::from(&key.private.d),
            vec![BigUint::from(&key.private.p), BigUint::from(&key.private.q)],
        )
        .map_err(|err| Error::rejected(Algorithm::Rsa, err))
    }
}

impl TryFrom<RsaKeypair> for rsa::RsaPrivateKey {
    type Error = Error;

    fn try_from(key: RsaKeypair) -> Result<rsa::RsaPrivateKey> {
        rsa::RsaPrivateKey::try_from(&key)
    }
}

impl TryFrom<&rsa::RsaPrivateKey> for RsaKeypair {
    type Error = Error;

    fn try_from(key: &rsa::RsaPrivateKey) -> Result<RsaKeypair> {
        // Multi-prime keys have no SSH representation.
        let (p, q) = match key.primes() {
            [p, q] => (p, q),
            _ => return Err(Error::rejected(Algorithm::Rsa, "expected exactly two primes")),
        };

        let iqmp = key
            .crt_coefficient()
            .ok_or_else(|| Error::rejected(Algorithm::Rsa, "missing CRT coefficient"))?;

        Ok(RsaKeypair {
            public: RsaPublicKey::new(key.e().into(), key.n().into()),
            private: RsaPrivateKey::new(key.d().into(), iqmp.into(), p.into(), q.into())?,
        })
    }
}

impl TryFrom<rsa::RsaPrivateKey> for RsaKeypair {
    type Error = Error;

    fn try_from(key: rsa::RsaPrivateKey) -> Result<RsaKeypair> {
        RsaKeypair::try_from(&key)
    }
}
