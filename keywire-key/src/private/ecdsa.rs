//! Elliptic Curve Digital Signature Algorithm (ECDSA) private keys.

use crate::{public::EcdsaPublicKey, Algorithm, EcdsaCurve, Error, Mpint, Result};
use core::fmt;
use encoding::{CheckedSum, Decode, Encode, Reader, Writer};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Elliptic Curve Digital Signature Algorithm (ECDSA) private key.
///
/// Holds the private scalar as a non-negative integer.
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    scalar: Mpint,
}

impl EcdsaPrivateKey {
    /// Create a new private key from its scalar.
    pub fn new(scalar: Mpint) -> Self {
        Self { scalar }
    }

    /// Get the private scalar.
    pub fn scalar(&self) -> &Mpint {
        &self.scalar
    }
}

impl ConstantTimeEq for EcdsaPrivateKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.scalar.ct_eq(&other.scalar)
    }
}

impl Eq for EcdsaPrivateKey {}

impl PartialEq for EcdsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey").finish_non_exhaustive()
    }
}

impl Drop for EcdsaPrivateKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

/// Elliptic Curve Digital Signature Algorithm (ECDSA) private/public keypair.
///
/// Wire layout after the key type is the public key fields followed by the
/// private scalar as an `mpint`.
#[derive(Clone)]
pub struct EcdsaKeypair {
    /// Public key.
    pub public: EcdsaPublicKey,

    /// Private key.
    pub private: EcdsaPrivateKey,
}

impl EcdsaKeypair {
    /// Generate a random ECDSA keypair on the given curve.
    pub fn random(rng: &mut impl CryptoRngCore, curve: EcdsaCurve) -> Result<Self> {
        match curve {
            EcdsaCurve::NistP256 => p256::SecretKey::random(rng).try_into(),
            EcdsaCurve::NistP384 => p384::SecretKey::random(rng).try_into(),
            EcdsaCurve::NistP521 => p521::SecretKey::random(rng).try_into(),
        }
    }

    /// Get the [`Algorithm`] for this keypair.
    pub fn algorithm(&self) -> Algorithm {
        self.public.algorithm()
    }

    /// Get the [`EcdsaCurve`] for this keypair.
    pub fn curve(&self) -> EcdsaCurve {
        self.public.curve()
    }

    /// Decode the keypair body for the curve named by the key type.
    pub(crate) fn decode_as(reader: &mut impl Reader, curve: EcdsaCurve) -> Result<Self> {
        let public = EcdsaPublicKey::decode_as(reader, curve)?;
        let private = EcdsaPrivateKey::new(Mpint::decode(reader)?);
        Ok(Self { public, private })
    }
}

impl Encode for EcdsaKeypair {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [self.public.encoded_len()?, self.private.scalar.encoded_len()?].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.public.encode(writer)?;
        self.private.scalar.encode(writer)
    }
}

impl ConstantTimeEq for EcdsaKeypair {
    fn ct_eq(&self, other: &Self) -> Choice {
        Choice::from((self.public == other.public) as u8) & self.private.ct_eq(&other.private)
    }
}

impl Eq for EcdsaKeypair {}

impl PartialEq for EcdsaKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<EcdsaKeypair> for EcdsaPublicKey {
    fn from(keypair: EcdsaKeypair) -> EcdsaPublicKey {
        keypair.public
    }
}

impl From<&EcdsaKeypair> for EcdsaPublicKey {
    fn from(keypair: &EcdsaKeypair) -> EcdsaPublicKey {
        keypair.public.clone()
    }
}

impl fmt::Debug for EcdsaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaKeypair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

macro_rules! impl_native_conversions {
    ($native:ident, $curve:expr) => {
        impl TryFrom<&EcdsaKeypair> for $native::SecretKey {
            type Error = Error;

            fn try_from(keypair: &EcdsaKeypair) -> Result<$native::SecretKey> {
                let public = $native::PublicKey::try_from(&keypair.public)?;
                let scalar = keypair.private.scalar.to_padded_bytes($curve.field_size())?;
                let secret = $native::SecretKey::from_slice(&scalar)
                    .map_err(|_| Error::rejected(keypair.algorithm(), "scalar out of range"))?;

                if secret.public_key() == public {
                    Ok(secret)
                } else {
                    Err(Error::rejected(
                        keypair.algorithm(),
                        "public point doesn't match private scalar",
                    ))
                }
            }
        }

        impl TryFrom<&$native::SecretKey> for EcdsaKeypair {
            type Error = Error;

            fn try_from(secret: &$native::SecretKey) -> Result<EcdsaKeypair> {
                Ok(EcdsaKeypair {
                    public: EcdsaPublicKey::try_from(secret.public_key())?,
                    private: EcdsaPrivateKey::new(Mpint::from_positive_bytes(&secret.to_bytes())),
                })
            }
        }

        impl TryFrom<$native::SecretKey> for EcdsaKeypair {
            type Error = Error;

            fn try_from(secret: $native::SecretKey) -> Result<EcdsaKeypair> {
                EcdsaKeypair::try_from(&secret)
            }
        }
    };
}

impl_native_conversions!(p256, EcdsaCurve::NistP256);
impl_native_conversions!(p384, EcdsaCurve::NistP384);
impl_native_conversions!(p521, EcdsaCurve::NistP521);
