//! SSH public key fingerprints.

use crate::{public::KeyData, Error, HashAlg, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use encoding::{
    base64::{Base64Unpadded, Encoding},
    DigestWriter, Encode,
};
use sha2::{Digest, Sha256, Sha512};

/// SSH public key fingerprints.
///
/// A fingerprint is the digest of a public key's wire-encoded blob. The
/// [`FromStr`] and [`Display`] impls use the OpenSSH string form:
///
/// ```text
/// SHA256:OVDXbyilk2t7i/K9i3WrkLiY7wQU/mXDN96VmBm19sA
/// ```
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Fingerprint {
    /// Fingerprints computed using SHA-256.
    Sha256([u8; HashAlg::Sha256.digest_size()]),

    /// Fingerprints computed using SHA-512.
    Sha512([u8; HashAlg::Sha512.digest_size()]),
}

impl Fingerprint {
    /// Size of a SHA-512 hash encoded as Base64.
    const SHA512_BASE64_SIZE: usize = 86;

    /// Create a fingerprint of the given public key data using the provided
    /// hash algorithm.
    pub fn new(algorithm: HashAlg, public_key: &KeyData) -> Result<Self> {
        match algorithm {
            HashAlg::Sha256 => {
                let mut digest = Sha256::new();
                public_key.encode(&mut DigestWriter(&mut digest))?;
                Ok(Self::Sha256(digest.finalize().into()))
            }
            HashAlg::Sha512 => {
                let mut digest = Sha512::new();
                public_key.encode(&mut DigestWriter(&mut digest))?;
                Ok(Self::Sha512(digest.finalize().into()))
            }
        }
    }

    /// Get the hash algorithm used for this fingerprint.
    pub fn algorithm(self) -> HashAlg {
        match self {
            Self::Sha256(_) => HashAlg::Sha256,
            Self::Sha512(_) => HashAlg::Sha512,
        }
    }

    /// Get the name of the hash algorithm (upper case e.g. "SHA256").
    pub fn prefix(self) -> &'static str {
        match self.algorithm() {
            HashAlg::Sha256 => "SHA256",
            HashAlg::Sha512 => "SHA512",
        }
    }

    /// Get the raw digest output for the fingerprint as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sha256(bytes) => bytes.as_slice(),
            Self::Sha512(bytes) => bytes.as_slice(),
        }
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.prefix();

        // Sized for the largest supported digest
        let mut buf = [0u8; Self::SHA512_BASE64_SIZE];
        let base64 = Base64Unpadded::encode(self.as_bytes(), &mut buf).map_err(|_| fmt::Error)?;
        write!(f, "{prefix}:{base64}")
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self> {
        let (alg_str, base64) = id
            .split_once(':')
            .ok_or_else(|| Error::bad_format("missing fingerprint algorithm", id))?;

        // Fingerprints use a special upper-case hash algorithm encoding.
        let algorithm = match alg_str {
            "SHA256" => HashAlg::Sha256,
            "SHA512" => HashAlg::Sha512,
            _ => {
                return Err(Error::AlgorithmUnsupported {
                    name: alg_str.into(),
                })
            }
        };

        let mut buf = [0u8; HashAlg::Sha512.digest_size()];
        let decoded_bytes = Base64Unpadded::decode(base64, &mut buf)?;
        let length_error = |_| Error::Encoding(encoding::Error::Length);

        match algorithm {
            HashAlg::Sha256 => Ok(Self::Sha256(decoded_bytes.try_into().map_err(length_error)?)),
            HashAlg::Sha512 => Ok(Self::Sha512(decoded_bytes.try_into().map_err(length_error)?)),
        }
    }
}
