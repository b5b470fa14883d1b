//! Keypairs and their SSH binary wire form.
//!
//! An encoded keypair is the key-type identifier, the public key fields,
//! and then the private components, with no further framing.

mod dsa;
mod ecdsa;
mod opaque;
mod rsa;

pub use self::{
    dsa::{DsaKeypair, DsaPrivateKey},
    ecdsa::{EcdsaKeypair, EcdsaPrivateKey},
    opaque::OpaqueKeypair,
    rsa::{RsaKeypair, RsaPrivateKey},
};

use crate::{public::KeyData, Algorithm, Error, Result};
use encoding::{CheckedSum, Decode, Encode, Reader, Writer};
use subtle::{Choice, ConstantTimeEq};

/// Private key data: digital signature keypairs, tagged by algorithm.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum KeypairData {
    /// Digital Signature Algorithm (DSA) keypair.
    Dsa(DsaKeypair),

    /// ECDSA keypair.
    Ecdsa(EcdsaKeypair),

    /// RSA keypair.
    Rsa(RsaKeypair),

    /// Keypair for an algorithm without a built-in codec.
    Other(OpaqueKeypair),
}

impl KeypairData {
    /// Decode a complete keypair blob, rejecting trailing bytes.
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        let keypair = Self::decode(&mut bytes)?;
        Ok(bytes.finish(keypair)?)
    }

    /// Encode as a keypair blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.encode_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Encode the key type followed by the public and private components.
    ///
    /// # Returns
    /// - `Err(Error::KeyTypeUnsupported)` for keypairs outside the RSA, DSA
    ///   and ECDSA families.
    pub fn encode_to(&self, writer: &mut impl Writer) -> Result<()> {
        if let Self::Other(_) = self {
            return Err(self.unsupported_error());
        }

        self.algorithm().as_str().encode(writer)?;

        match self {
            Self::Dsa(key) => key.encode(writer)?,
            Self::Ecdsa(key) => key.encode(writer)?,
            Self::Rsa(key) => key.encode(writer)?,
            Self::Other(_) => (),
        }

        Ok(())
    }

    /// Get the length of the encoded keypair.
    pub fn encoded_len(&self) -> Result<usize> {
        let body_len = match self {
            Self::Dsa(key) => key.encoded_len()?,
            Self::Ecdsa(key) => key.encoded_len()?,
            Self::Rsa(key) => key.encoded_len()?,
            Self::Other(_) => return Err(self.unsupported_error()),
        };

        Ok([self.algorithm().as_str().encoded_len()?, body_len].checked_sum()?)
    }

    /// Get the [`Algorithm`] for this keypair.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Dsa(_) => Algorithm::Dsa,
            Self::Ecdsa(key) => key.algorithm(),
            Self::Rsa(_) => Algorithm::Rsa,
            Self::Other(key) => key.algorithm(),
        }
    }

    /// Get the public half of this keypair.
    pub fn public(&self) -> KeyData {
        match self {
            Self::Dsa(key) => KeyData::Dsa(key.public.clone()),
            Self::Ecdsa(key) => KeyData::Ecdsa(key.public.clone()),
            Self::Rsa(key) => KeyData::Rsa(key.public.clone()),
            Self::Other(key) => KeyData::Other(key.public.clone()),
        }
    }

    /// Get DSA keypair if this key is the correct type.
    pub fn dsa(&self) -> Option<&DsaKeypair> {
        match self {
            Self::Dsa(key) => Some(key),
            _ => None,
        }
    }

    /// Get ECDSA keypair if this key is the correct type.
    pub fn ecdsa(&self) -> Option<&EcdsaKeypair> {
        match self {
            Self::Ecdsa(key) => Some(key),
            _ => None,
        }
    }

    /// Get RSA keypair if this key is the correct type.
    pub fn rsa(&self) -> Option<&RsaKeypair> {
        match self {
            Self::Rsa(key) => Some(key),
            _ => None,
        }
    }

    /// Decode the fields which follow the key type for the given algorithm.
    pub fn decode_as(reader: &mut impl Reader, algorithm: &Algorithm) -> Result<Self> {
        match algorithm {
            Algorithm::Dsa => DsaKeypair::decode(reader).map(Self::Dsa),
            Algorithm::Ecdsa { curve } => EcdsaKeypair::decode_as(reader, *curve).map(Self::Ecdsa),
            Algorithm::Rsa => RsaKeypair::decode(reader).map(Self::Rsa),
            Algorithm::Other(_) => Err(algorithm.unsupported_error()),
        }
    }

    fn unsupported_error(&self) -> Error {
        Error::KeyTypeUnsupported {
            key_type: self.algorithm().as_str().into(),
        }
    }
}

impl Decode for KeypairData {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        let key_type = String::decode(reader)?;
        let algorithm = match Algorithm::new(&key_type) {
            Ok(algorithm) if algorithm.is_builtin() => algorithm,
            _ => return Err(Error::AlgorithmUnsupported { name: key_type }),
        };

        Self::decode_as(reader, &algorithm)
    }
}

impl ConstantTimeEq for KeypairData {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Note: constant-time with respect to key *data* comparisons, not algorithms
        match (self, other) {
            (Self::Dsa(a), Self::Dsa(b)) => a.ct_eq(b),
            (Self::Ecdsa(a), Self::Ecdsa(b)) => a.ct_eq(b),
            (Self::Rsa(a), Self::Rsa(b)) => a.ct_eq(b),
            (Self::Other(a), Self::Other(b)) => a.ct_eq(b),
            _ => Choice::from(0),
        }
    }
}

impl Eq for KeypairData {}

impl PartialEq for KeypairData {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<DsaKeypair> for KeypairData {
    fn from(keypair: DsaKeypair) -> KeypairData {
        Self::Dsa(keypair)
    }
}

impl From<EcdsaKeypair> for KeypairData {
    fn from(keypair: EcdsaKeypair) -> KeypairData {
        Self::Ecdsa(keypair)
    }
}

impl From<RsaKeypair> for KeypairData {
    fn from(keypair: RsaKeypair) -> KeypairData {
        Self::Rsa(keypair)
    }
}

impl From<OpaqueKeypair> for KeypairData {
    fn from(keypair: OpaqueKeypair) -> KeypairData {
        Self::Other(keypair)
    }
}
