//! Base64 support.
//!
//! OpenSSH text formats carry binary key blobs as padded, standard-alphabet
//! Base64 without line wrapping.

pub use base64ct::{Base64, Base64Unpadded, Encoding, Error};

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// Decode a padded Base64 string into a freshly allocated byte vector.
#[cfg(feature = "alloc")]
pub fn decode_vec(input: &str) -> crate::Result<Vec<u8>> {
    Ok(Base64::decode_vec(input)?)
}

/// Encode bytes as a padded Base64 string.
#[cfg(feature = "alloc")]
pub fn encode_string(input: &[u8]) -> String {
    Base64::encode_string(input)
}
