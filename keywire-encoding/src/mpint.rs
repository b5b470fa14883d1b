//! Multiple precision integer

use crate::{checked::CheckedSum, Decode, Encode, Error, Reader, Result, Writer};
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "subtle")]
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Non-negative multiple precision integer, a.k.a. "mpint".
///
/// This type is used for representing the big integer components of
/// DSA, RSA and ECDSA keys.
///
/// Described in [RFC4251 § 5](https://datatracker.ietf.org/doc/html/rfc4251#section-5):
///
/// > Represents multiple precision integers in two's complement format,
/// > stored as a string, 8 bits per byte, MSB first.  Negative numbers
/// > have the value 1 as the most significant bit of the first byte of
/// > the data partition.  If the most significant bit would be set for
/// > a positive number, the number MUST be preceded by a zero byte.
/// > Unnecessary leading bytes with the value 0 or 255 MUST NOT be
/// > included.  The value zero MUST be stored as a string with zero
/// > bytes of data.
///
/// Key material never carries negative values, so decoding interprets the
/// data partition as an unsigned magnitude: redundant leading zero bytes are
/// tolerated, and a set MSB is *not* read as a sign bit. Encoding always
/// produces the canonical form.
///
/// ## Examples
///
/// | value (hex)     | representation (hex) |
/// |-----------------|----------------------|
/// | 0               | `00 00 00 00`
/// | 9a378f9b2e332a7 | `00 00 00 08 09 a3 78 f9 b2 e3 32 a7`
/// | 80              | `00 00 00 02 00 80`
#[derive(Clone, Default, Eq)]
pub struct Mpint {
    /// Big endian magnitude with no leading zero bytes.
    inner: Vec<u8>,
}

impl Mpint {
    /// Create a new multiple precision integer from the given big endian
    /// magnitude. Leading zero bytes are stripped.
    pub fn from_positive_bytes(bytes: &[u8]) -> Self {
        let start = bytes
            .iter()
            .position(|&byte| byte != 0)
            .unwrap_or(bytes.len());

        Self {
            inner: bytes[start..].to_vec(),
        }
    }

    /// Create a new multiple precision integer from a two's complement data
    /// partition (i.e. with a leading zero on values whose MSB is set).
    ///
    /// # Returns
    /// - `Err(Error::MpintEncoding)` if the value would be negative.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            Some(byte) if *byte >= 0x80 => Err(Error::MpintEncoding),
            _ => Ok(Self::from_positive_bytes(bytes)),
        }
    }

    /// Get the big endian magnitude, without any sign padding.
    ///
    /// Zero is represented by an empty slice.
    pub fn as_positive_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Get the big endian magnitude left-padded with zeroes to `len` bytes.
    ///
    /// # Returns
    /// - `Err(Error::Length)` if the magnitude does not fit.
    pub fn to_padded_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let pad = len.checked_sub(self.inner.len()).ok_or(Error::Length)?;
        let mut ret = vec![0u8; pad];
        ret.extend_from_slice(&self.inner);
        Ok(ret)
    }

    /// Is this integer zero?
    pub fn is_zero(&self) -> bool {
        self.inner.is_empty()
    }

    /// Does the canonical encoding need a leading zero byte?
    fn needs_pad(&self) -> bool {
        matches!(self.inner.first(), Some(byte) if *byte >= 0x80)
    }
}

impl AsRef<[u8]> for Mpint {
    fn as_ref(&self) -> &[u8] {
        self.as_positive_bytes()
    }
}

#[cfg(feature = "subtle")]
impl ConstantTimeEq for Mpint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_ref().ct_eq(other.as_ref())
    }
}

impl PartialEq for Mpint {
    #[cfg(feature = "subtle")]
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }

    #[cfg(not(feature = "subtle"))]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Decode for Mpint {
    type Error = Error;

    fn decode(reader: &mut impl Reader) -> Result<Self> {
        Ok(Self::from_positive_bytes(&Vec::decode(reader)?))
    }
}

/// Zero is written as an empty `string` (`00 00 00 00`) per RFC 4251 § 5.
/// Encoders that emit a single zero octet (`00 00 00 01 00`) produce a
/// different blob for the same value, though both decode to zero.
impl Encode for Mpint {
    fn encoded_len(&self) -> Result<usize> {
        [4, usize::from(self.needs_pad()), self.inner.len()].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> Result<()> {
        if self.needs_pad() {
            let body_len = [1, self.inner.len()].checked_sum()?;
            crate::encode::encode_length(body_len, writer)?;
            writer.write(&[0])?;
            writer.write(&self.inner)
        } else {
            self.inner.encode(writer)
        }
    }
}

impl From<u32> for Mpint {
    fn from(n: u32) -> Mpint {
        Mpint::from_positive_bytes(&n.to_be_bytes())
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Mpint {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl fmt::Debug for Mpint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mpint({self:X})")
    }
}

impl fmt::Display for Mpint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:X}")
    }
}

impl fmt::LowerHex for Mpint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        for byte in &self.inner {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for Mpint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        for byte in &self.inner {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "bigint")]
impl From<num_bigint::BigUint> for Mpint {
    fn from(uint: num_bigint::BigUint) -> Mpint {
        Mpint::from(&uint)
    }
}

#[cfg(feature = "bigint")]
impl From<&num_bigint::BigUint> for Mpint {
    fn from(uint: &num_bigint::BigUint) -> Mpint {
        Mpint::from_positive_bytes(&uint.to_bytes_be())
    }
}

#[cfg(feature = "bigint")]
impl From<Mpint> for num_bigint::BigUint {
    fn from(mpint: Mpint) -> num_bigint::BigUint {
        num_bigint::BigUint::from(&mpint)
    }
}

#[cfg(feature = "bigint")]
impl From<&Mpint> for num_bigint::BigUint {
    fn from(mpint: &Mpint) -> num_bigint::BigUint {
        num_bigint::BigUint::from_bytes_be(mpint.as_positive_bytes())
    }
}
