//! Error types.

use crate::LabelError;
use core::fmt;

/// Result type with the wire codec's [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Wire codec errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Text is not valid Base64.
    #[cfg(feature = "base64")]
    Base64(base64ct::Error),

    /// A `string` is not valid UTF-8.
    CharacterEncoding,

    /// A label such as a key-type or curve name is malformed.
    Label(LabelError),

    /// A value does not have the length its context requires.
    Length,

    /// A declared length prefix is negative when read as a signed `int32`.
    MalformedLength {
        /// Raw length prefix as read from the input.
        length: u32,
    },

    /// An `mpint` is negative.
    MpintEncoding,

    /// A length or size doesn't fit the target integer type.
    Overflow,

    /// Bytes remain after a value which should have consumed all input.
    TrailingData {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// Fewer unread bytes are available than an operation requires.
    Underflow {
        /// Number of bytes the operation needed.
        requested: usize,

        /// Number of unread bytes actually available.
        available: usize,
    },
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            #[cfg(all(feature = "base64", feature = "std"))]
            Self::Base64(err) => Some(err),
            Self::Label(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "base64")]
            Error::Base64(err) => write!(f, "invalid Base64: {err}"),
            Error::CharacterEncoding => write!(f, "invalid UTF-8 string"),
            Error::Label(err) => write!(f, "{err}"),
            Error::Length => write!(f, "invalid length"),
            Error::MalformedLength { length } => {
                write!(f, "bad item length: {}", *length as i32)
            }
            Error::MpintEncoding => write!(f, "negative mpint"),
            Error::Overflow => write!(f, "length overflow"),
            Error::TrailingData { remaining } => {
                write!(f, "{remaining} bytes of trailing data")
            }
            Error::Underflow {
                requested,
                available,
            } => write!(
                f,
                "buffer underflow: {requested} bytes requested, {available} available"
            ),
        }
    }
}

impl From<LabelError> for Error {
    fn from(err: LabelError) -> Error {
        Error::Label(err)
    }
}

impl From<core::num::TryFromIntError> for Error {
    fn from(_: core::num::TryFromIntError) -> Error {
        Error::Overflow
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(_: core::str::Utf8Error) -> Error {
        Error::CharacterEncoding
    }
}

#[cfg(feature = "alloc")]
impl From<alloc::string::FromUtf8Error> for Error {
    fn from(_: alloc::string::FromUtf8Error) -> Error {
        Error::CharacterEncoding
    }
}

#[cfg(feature = "base64")]
impl From<base64ct::Error> for Error {
    fn from(err: base64ct::Error) -> Error {
        Error::Base64(err)
    }
}

#[cfg(feature = "base64")]
impl From<base64ct::InvalidLengthError> for Error {
    fn from(_: base64ct::InvalidLengthError) -> Error {
        Error::Length
    }
}
