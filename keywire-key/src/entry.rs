//! OpenSSH single-line public key entries.

use crate::{public::KeyData, DecoderRegistry, Error, Result};
use core::{fmt, str::FromStr};
use encoding::base64;

/// Public key in the OpenSSH one-line text format:
///
/// ```text
/// <key-type> <base64-key-blob>[ <ignored>]
/// ```
///
/// The key data is the decoded blob, which itself begins with the embedded
/// key-type string. Equality and hashing consider only the key type and the
/// key data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PublicKeyEntry {
    key_type: String,
    key_data: Vec<u8>,
}

impl PublicKeyEntry {
    /// Create an entry from a key type and decoded key blob.
    pub fn new(key_type: impl Into<String>, key_data: impl Into<Vec<u8>>) -> Self {
        Self {
            key_type: key_type.into(),
            key_data: key_data.into(),
        }
    }

    /// Start building an entry.
    pub fn builder() -> PublicKeyEntryBuilder {
        PublicKeyEntryBuilder::default()
    }

    /// Wrap a typed public key for serialization.
    pub fn from_key_data(key: &KeyData) -> Result<Self> {
        Ok(Self::new(key.algorithm().as_str(), key.to_bytes()?))
    }

    /// Key-type identifier as written in the entry.
    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    /// Decoded key blob.
    pub fn key_data(&self) -> &[u8] {
        &self.key_data
    }

    /// Parse a single line. Empty input yields `None`.
    ///
    /// Anything after the Base64 payload is ignored.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        if line.is_empty() {
            return Ok(None);
        }

        Self::parse_with_trailer(line).map(|(entry, _)| Some(entry))
    }

    /// Parse an entry and return whatever follows the Base64 payload.
    pub(crate) fn parse_with_trailer(line: &str) -> Result<(Self, Option<&str>)> {
        let start = match line.find(' ') {
            Some(start) if start > 0 => start,
            _ => return Err(Error::bad_format("no key data delimiter", line)),
        };

        let key_type = &line[..start];
        let rest = &line[(start + 1)..];

        let (payload, trailer) = match rest.find(' ') {
            Some(end) => (&rest[..end], Some(&rest[(end + 1)..])),
            None => (rest, None),
        };

        let key_data = base64::decode_vec(payload.trim())
            .map_err(|_| Error::bad_format("invalid Base64 key data", line))?;

        if key_data.is_empty() {
            return Err(Error::bad_format("no Base64 key data", line));
        }

        Ok((Self::new(key_type, key_data), trailer))
    }

    /// Decode the key data with the decoder registered for this key type.
    ///
    /// # Returns
    /// - `Err(Error::AlgorithmUnsupported)` if no decoder is registered.
    /// - `Err(Error::KeyTypeMismatch)` if the blob embeds a different key type.
    pub fn resolve_public_key(&self, registry: &DecoderRegistry) -> Result<KeyData> {
        registry.decode_public_key(&self.key_type, &self.key_data)
    }
}

impl FromStr for PublicKeyEntry {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        Self::parse_line(line)?.ok_or_else(|| Error::bad_format("empty entry", line))
    }
}

impl fmt::Display for PublicKeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key_data.is_empty() {
            write!(f, "{} <no-key>", self.key_type)
        } else {
            write!(f, "{} {}", self.key_type, base64::encode_string(&self.key_data))
        }
    }
}

/// Builder for [`PublicKeyEntry`], yielding an immutable entry once both
/// the key type and key data are set.
#[derive(Clone, Debug, Default)]
pub struct PublicKeyEntryBuilder {
    key_type: Option<String>,
    key_data: Option<Vec<u8>>,
}

impl PublicKeyEntryBuilder {
    /// Set the key type.
    pub fn key_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }

    /// Set the decoded key blob.
    pub fn key_data(mut self, key_data: impl Into<Vec<u8>>) -> Self {
        self.key_data = Some(key_data.into());
        self
    }

    /// Build the entry.
    ///
    /// # Returns
    /// - `Err(Error::BadFormat)` if the key type is missing or empty, or the
    ///   key data is missing or empty.
    pub fn build(self) -> Result<PublicKeyEntry> {
        let key_type = self
            .key_type
            .filter(|key_type| !key_type.is_empty())
            .ok_or_else(|| Error::bad_format("missing key type", ""))?;

        let key_data = self
            .key_data
            .filter(|key_data| !key_data.is_empty())
            .ok_or_else(|| Error::bad_format("missing key data", &key_type))?;

        Ok(PublicKeyEntry { key_type, key_data })
    }
}
