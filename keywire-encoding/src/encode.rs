//! Encoders for the wire data types of [RFC4251 § 5].
//!
//! [RFC4251 § 5]: https://datatracker.ietf.org/doc/html/rfc4251#section-5

use crate::{checked::CheckedSum, writer::Writer, Error};

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// Types with an SSH wire representation.
pub trait Encode {
    /// Number of bytes [`Encode::encode`] will write.
    fn encoded_len(&self) -> Result<usize, Error>;

    /// Write the wire representation of this value.
    fn encode(&self, writer: &mut impl Writer) -> Result<(), Error>;

    /// Number of bytes [`Encode::encode_prefixed`] will write.
    fn encoded_len_prefixed(&self) -> Result<usize, Error> {
        [4, self.encoded_len()?].checked_sum()
    }

    /// Write a `uint32` holding [`Encode::encoded_len`], then the value.
    fn encode_prefixed(&self, writer: &mut impl Writer) -> Result<(), Error> {
        encode_length(self.encoded_len()?, writer)?;
        self.encode(writer)
    }

    /// Encode into a freshly allocated `Vec<u8>`.
    #[cfg(feature = "alloc")]
    fn encode_vec(&self) -> Result<Vec<u8>, Error> {
        let mut ret = Vec::with_capacity(self.encoded_len()?);
        self.encode(&mut ret)?;
        Ok(ret)
    }
}

/// Encode the `uint32` length prefix of a `string`, rejecting lengths which
/// would read back as negative.
pub(crate) fn encode_length(len: usize, writer: &mut impl Writer) -> Result<(), Error> {
    let len = i32::try_from(len)?;
    writer.write(&len.to_be_bytes())
}

/// `boolean`: exactly `0` for false and `1` for true.
impl Encode for bool {
    fn encoded_len(&self) -> Result<usize, Error> {
        Ok(1)
    }

    fn encode(&self, writer: &mut impl Writer) -> Result<(), Error> {
        writer.write(&[u8::from(*self)])
    }
}

macro_rules! impl_fixed_width {
    ($($int:ty),+) => {
        $(
            impl Encode for $int {
                fn encoded_len(&self) -> Result<usize, Error> {
                    Ok(core::mem::size_of::<$int>())
                }

                fn encode(&self, writer: &mut impl Writer) -> Result<(), Error> {
                    writer.write(&self.to_be_bytes())
                }
            }
        )+
    };
}

// `byte`, `uint16`, `uint32` and `uint64`, all big endian.
impl_fixed_width!(u8, u16, u32, u64);

/// `string`: a `uint32` length followed by the raw bytes.
impl Encode for [u8] {
    fn encoded_len(&self) -> Result<usize, Error> {
        [4, self.len()].checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> Result<(), Error> {
        encode_length(self.len(), writer)?;
        writer.write(self)
    }
}

/// `byte[n]`: raw bytes with no length prefix.
impl<const N: usize> Encode for [u8; N] {
    fn encoded_len(&self) -> Result<usize, Error> {
        Ok(N)
    }

    fn encode(&self, writer: &mut impl Writer) -> Result<(), Error> {
        writer.write(self)
    }
}

macro_rules! impl_as_string {
    ($($(#[$attr:meta])* $type:ty => |$value:ident| $bytes:expr;)+) => {
        $(
            $(#[$attr])*
            impl Encode for $type {
                fn encoded_len(&self) -> Result<usize, Error> {
                    let $value = self;
                    $bytes.encoded_len()
                }

                fn encode(&self, writer: &mut impl Writer) -> Result<(), Error> {
                    let $value = self;
                    $bytes.encode(writer)
                }
            }
        )+
    };
}

impl_as_string! {
    str => |s| s.as_bytes();

    #[cfg(feature = "alloc")]
    Vec<u8> => |v| v.as_slice();

    #[cfg(feature = "alloc")]
    String => |s| s.as_bytes();
}
