//! Public keys and their SSH binary wire form.
//!
//! Every encoded public key starts with its key-type identifier as a
//! `string`, followed by algorithm-specific fields.

mod dsa;
mod ecdsa;
mod opaque;
mod rsa;

pub use self::{dsa::DsaPublicKey, ecdsa::EcdsaPublicKey, opaque::OpaquePublicKey, rsa::RsaPublicKey};

use crate::{Algorithm, Error, Fingerprint, HashAlg, Result};
use encoding::{CheckedSum, Decode, Encode, Reader, Writer};

/// Public key data, tagged by algorithm.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum KeyData {
    /// Digital Signature Algorithm (DSA) public key data.
    Dsa(DsaPublicKey),

    /// Elliptic Curve Digital Signature Algorithm (ECDSA) public key data.
    Ecdsa(EcdsaPublicKey),

    /// RSA public key data.
    Rsa(RsaPublicKey),

    /// Public key data for an algorithm without a built-in codec.
    Other(OpaquePublicKey),
}

impl KeyData {
    /// Decode a complete key blob, rejecting trailing bytes.
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        let key = Self::decode(&mut bytes)?;
        Ok(bytes.finish(key)?)
    }

    /// Encode as a key blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.encode_vec()?)
    }

    /// Get the [`Algorithm`] for this public key.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Dsa(_) => Algorithm::Dsa,
            Self::Ecdsa(key) => key.algorithm(),
            Self::Rsa(_) => Algorithm::Rsa,
            Self::Other(key) => key.algorithm(),
        }
    }

    /// Get DSA public key if this key is the correct type.
    pub fn dsa(&self) -> Option<&DsaPublicKey> {
        match self {
            Self::Dsa(key) => Some(key),
            _ => None,
        }
    }

    /// Get ECDSA public key if this key is the correct type.
    pub fn ecdsa(&self) -> Option<&EcdsaPublicKey> {
        match self {
            Self::Ecdsa(key) => Some(key),
            _ => None,
        }
    }

    /// Get RSA public key if this key is the correct type.
    pub fn rsa(&self) -> Option<&RsaPublicKey> {
        match self {
            Self::Rsa(key) => Some(key),
            _ => None,
        }
    }

    /// Get the opaque public key if this key has no built-in codec.
    pub fn other(&self) -> Option<&OpaquePublicKey> {
        match self {
            Self::Other(key) => Some(key),
            _ => None,
        }
    }

    /// Is this key a DSA key?
    pub fn is_dsa(&self) -> bool {
        matches!(self, Self::Dsa(_))
    }

    /// Is this key an ECDSA key?
    pub fn is_ecdsa(&self) -> bool {
        matches!(self, Self::Ecdsa(_))
    }

    /// Is this key an RSA key?
    pub fn is_rsa(&self) -> bool {
        matches!(self, Self::Rsa(_))
    }

    /// Compute a fingerprint of this key's blob.
    pub fn fingerprint(&self, hash_alg: HashAlg) -> Result<Fingerprint> {
        Fingerprint::new(hash_alg, self)
    }

    /// Decode the fields which follow the key type for the given algorithm.
    ///
    /// # Returns
    /// - `Err(Error::AlgorithmUnsupported)` for algorithms without a
    ///   built-in codec.
    pub fn decode_as(reader: &mut impl Reader, algorithm: &Algorithm) -> Result<Self> {
        match algorithm {
            Algorithm::Dsa => DsaPublicKey::decode(reader).map(Self::Dsa),
            Algorithm::Ecdsa { curve } => EcdsaPublicKey::decode_as(reader, *curve).map(Self::Ecdsa),
            Algorithm::Rsa => RsaPublicKey::decode(reader).map(Self::Rsa),
            Algorithm::Other(_) => Err(algorithm.unsupported_error()),
        }
    }

    /// Get the encoded length of the fields which follow the key type.
    pub(crate) fn encoded_key_data_len(&self) -> encoding::Result<usize> {
        match self {
            Self::Dsa(key) => key.encoded_len(),
            Self::Ecdsa(key) => key.encoded_len(),
            Self::Rsa(key) => key.encoded_len(),
            Self::Other(key) => Ok(key.as_bytes().len()),
        }
    }

    /// Encode the fields which follow the key type.
    pub(crate) fn encode_key_data(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        match self {
            Self::Dsa(key) => key.encode(writer),
            Self::Ecdsa(key) => key.encode(writer),
            Self::Rsa(key) => key.encode(writer),
            Self::Other(key) => writer.write(key.as_bytes()),
        }
    }
}

impl Decode for KeyData {
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

impl Encode for KeyData {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [
            self.algorithm().as_str().encoded_len()?,
            self.encoded_key_data_len()?,
        ]
        .checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.algorithm().as_str().encode(writer)?;
        self.encode_key_data(writer)
    }
}

impl From<DsaPublicKey> for KeyData {
    fn from(public_key: DsaPublicKey) -> KeyData {
        Self::Dsa(public_key)
    }
}

impl From<EcdsaPublicKey> for KeyData {
    fn from(public_key: EcdsaPublicKey) -> KeyData {
        Self::Ecdsa(public_key)
    }
}

impl From<RsaPublicKey> for KeyData {
    fn from(public_key: RsaPublicKey) -> KeyData {
        Self::Rsa(public_key)
    }
}

impl From<OpaquePublicKey> for KeyData {
    fn from(public_key: OpaquePublicKey) -> KeyData {
        Self::Other(public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyData;
    use crate::Error;
    use hex_literal::hex;

    #[test]
    fn unknown_key_type_is_named() {
        let blob = hex!("0000000b 7373682d6578616d706c65 00000001 00");
        assert_eq!(
            KeyData::from_bytes(&blob).err(),
            Some(Error::AlgorithmUnsupported {
                name: "ssh-example".into()
            })
        );
    }

    #[test]
    fn reject_trailing_bytes() {
        let blob = hex!("00000007 7373682d727361 00000001 03 00000001 05 ff");
        assert!(matches!(
            KeyData::from_bytes(&blob),
            Err(Error::Encoding(encoding::Error::TrailingData { remaining: 1 }))
        ));
    }
}
