//! Conversion of decoded key material into native key objects.

use crate::{
    private::{EcdsaKeypair, KeypairData},
    public::{EcdsaPublicKey, KeyData},
    Algorithm, EcdsaCurve, Error, Result,
};

/// Native public key produced by a [`KeyFactory`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum NativePublicKey {
    /// DSA verifying key.
    Dsa(dsa::VerifyingKey),

    /// NIST P-256 public key.
    EcdsaP256(p256::PublicKey),

    /// NIST P-384 public key.
    EcdsaP384(p384::PublicKey),

    /// NIST P-521 public key.
    EcdsaP521(p521::PublicKey),

    /// RSA public key.
    Rsa(rsa::RsaPublicKey),
}

impl NativePublicKey {
    /// Get the [`Algorithm`] of this key.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Dsa(_) => Algorithm::Dsa,
            Self::EcdsaP256(_) => EcdsaCurve::NistP256.into(),
            Self::EcdsaP384(_) => EcdsaCurve::NistP384.into(),
            Self::EcdsaP521(_) => EcdsaCurve::NistP521.into(),
            Self::Rsa(_) => Algorithm::Rsa,
        }
    }
}

impl TryFrom<&NativePublicKey> for KeyData {
    type Error = Error;

    fn try_from(key: &NativePublicKey) -> Result<KeyData> {
        Ok(match key {
            NativePublicKey::Dsa(key) => KeyData::Dsa(key.into()),
            NativePublicKey::EcdsaP256(key) => KeyData::Ecdsa(EcdsaPublicKey::try_from(key)?),
            NativePublicKey::EcdsaP384(key) => KeyData::Ecdsa(EcdsaPublicKey::try_from(key)?),
            NativePublicKey::EcdsaP521(key) => KeyData::Ecdsa(EcdsaPublicKey::try_from(key)?),
            NativePublicKey::Rsa(key) => KeyData::Rsa(key.into()),
        })
    }
}

/// Native private/public keypair produced by a [`KeyFactory`].
#[derive(Clone)]
#[non_exhaustive]
pub enum NativeKeypair {
    /// DSA signing key.
    Dsa(dsa::SigningKey),

    /// NIST P-256 secret key.
    EcdsaP256(p256::SecretKey),

    /// NIST P-384 secret key.
    EcdsaP384(p384::SecretKey),

    /// NIST P-521 secret key.
    EcdsaP521(p521::SecretKey),

    /// RSA private key.
    Rsa(rsa::RsaPrivateKey),
}

impl NativeKeypair {
    /// Get the [`Algorithm`] of this keypair.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Dsa(_) => Algorithm::Dsa,
            Self::EcdsaP256(_) => EcdsaCurve::NistP256.into(),
            Self::EcdsaP384(_) => EcdsaCurve::NistP384.into(),
            Self::EcdsaP521(_) => EcdsaCurve::NistP521.into(),
            Self::Rsa(_) => Algorithm::Rsa,
        }
    }

    /// Get the public half of this keypair.
    pub fn public_key(&self) -> NativePublicKey {
        match self {
            Self::Dsa(key) => NativePublicKey::Dsa(key.verifying_key().clone()),
            Self::EcdsaP256(key) => NativePublicKey::EcdsaP256(key.public_key()),
            Self::EcdsaP384(key) => NativePublicKey::EcdsaP384(key.public_key()),
            Self::EcdsaP521(key) => NativePublicKey::EcdsaP521(key.public_key()),
            Self::Rsa(key) => NativePublicKey::Rsa(key.to_public_key()),
        }
    }
}

impl TryFrom<&NativeKeypair> for KeypairData {
    type Error = Error;

    fn try_from(keypair: &NativeKeypair) -> Result<KeypairData> {
        Ok(match keypair {
            NativeKeypair::Dsa(key) => KeypairData::Dsa(key.into()),
            NativeKeypair::EcdsaP256(key) => KeypairData::Ecdsa(EcdsaKeypair::try_from(key)?),
            NativeKeypair::EcdsaP384(key) => KeypairData::Ecdsa(EcdsaKeypair::try_from(key)?),
            NativeKeypair::EcdsaP521(key) => KeypairData::Ecdsa(EcdsaKeypair::try_from(key)?),
            NativeKeypair::Rsa(key) => KeypairData::Rsa(key.try_into()?),
        })
    }
}

/// Produces native key objects from decoded numeric key fields.
///
/// Decoders call into a key factory once per decoded key, so key material
/// the native implementation refuses surfaces as
/// [`Error::KeyMaterialRejected`].
pub trait KeyFactory: Send + Sync {
    /// Convert a decoded public key into its native form.
    fn public_key(&self, key: &KeyData) -> Result<NativePublicKey>;

    /// Convert a decoded keypair into its native form.
    fn keypair(&self, keypair: &KeypairData) -> Result<NativeKeypair>;
}

/// [`KeyFactory`] backed by the `rsa`, `dsa`, `p256`, `p384` and `p521`
/// crates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NativeKeyFactory;

impl KeyFactory for NativeKeyFactory {
    fn public_key(&self, key: &KeyData) -> Result<NativePublicKey> {
        match key {
            KeyData::Dsa(key) => Ok(NativePublicKey::Dsa(key.try_into()?)),
            KeyData::Ecdsa(key) => match key.curve() {
                EcdsaCurve::NistP256 => Ok(NativePublicKey::EcdsaP256(key.try_into()?)),
                EcdsaCurve::NistP384 => Ok(NativePublicKey::EcdsaP384(key.try_into()?)),
                EcdsaCurve::NistP521 => Ok(NativePublicKey::EcdsaP521(key.try_into()?)),
            },
            KeyData::Rsa(key) => Ok(NativePublicKey::Rsa(key.try_into()?)),
            KeyData::Other(key) => Err(key.algorithm().unsupported_error()),
        }
    }

    fn keypair(&self, keypair: &KeypairData) -> Result<NativeKeypair> {
        match keypair {
            KeypairData::Dsa(key) => Ok(NativeKeypair::Dsa(key.try_into()?)),
            KeypairData::Ecdsa(key) => match key.curve() {
                EcdsaCurve::NistP256 => Ok(NativeKeypair::EcdsaP256(key.try_into()?)),
                EcdsaCurve::NistP384 => Ok(NativeKeypair::EcdsaP384(key.try_into()?)),
                EcdsaCurve::NistP521 => Ok(NativeKeypair::EcdsaP521(key.try_into()?)),
            },
            KeypairData::Rsa(key) => Ok(NativeKeypair::Rsa(key.try_into()?)),
            KeypairData::Other(key) => Err(key.algorithm().unsupported_error()),
        }
    }
}
