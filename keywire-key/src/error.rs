//! Error types

use crate::Algorithm;
use core::fmt;

/// Result type with `keywire-key`'s [`Error`] as the error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// No decoder or wire codec exists for the given key-type identifier.
    AlgorithmUnsupported {
        /// Offending key-type identifier.
        name: String,
    },

    /// Text violates the single-line public key or `authorized_keys` format.
    BadFormat {
        /// What was wrong with the line.
        reason: &'static str,

        /// The offending line.
        line: String,
    },

    /// Elliptic curve point uses a compression indicator which can't be
    /// handled in this context.
    CompressionUnsupported {
        /// Raw compression indicator byte.
        indicator: u8,
    },

    /// The curve name embedded in an ECDSA key doesn't match its key type.
    CurveMismatch {
        /// Curve implied by the key-type identifier.
        expected: String,

        /// Curve name found in the key data.
        actual: String,
    },

    /// A login option appears more than once in a single entry.
    DuplicateOption {
        /// Option name (lowercase).
        name: String,
    },

    /// A decoder claims a key-type identifier which is already registered.
    DuplicateRegistration {
        /// Colliding key-type identifier.
        name: String,
    },

    /// Encoding errors.
    Encoding(encoding::Error),

    /// Elliptic curve point octet string is empty or entirely zero.
    InvalidPoint,

    /// Input/output errors.
    Io(std::io::ErrorKind),

    /// Decoded key material was refused by the native key implementation.
    KeyMaterialRejected {
        /// Algorithm of the refused key.
        algorithm: Algorithm,

        /// Reason given by the key implementation.
        reason: String,
    },

    /// The key-type identifier inside a key blob differs from the one it was
    /// declared under.
    KeyTypeMismatch {
        /// Declared key type.
        expected: String,

        /// Key type found in the key data.
        actual: String,
    },

    /// Key type can't be used for the requested operation (e.g. encoding a
    /// keypair of an unsupported family).
    KeyTypeUnsupported {
        /// Offending key-type identifier.
        key_type: String,
    },

    /// Uncompressed elliptic curve point coordinates can't be split evenly.
    MalformedPoint {
        /// Number of coordinate bytes following the indicator.
        len: usize,
    },
}

impl Error {
    /// Build a [`Error::BadFormat`] for the given line.
    pub(crate) fn bad_format(reason: &'static str, line: &str) -> Self {
        Error::BadFormat {
            reason,
            line: line.into(),
        }
    }

    /// Build a [`Error::KeyMaterialRejected`] from a native key error.
    pub(crate) fn rejected(algorithm: Algorithm, reason: impl fmt::Display) -> Self {
        Error::KeyMaterialRejected {
            algorithm,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlgorithmUnsupported { name } => write!(f, "unsupported algorithm: {name}"),
            Error::BadFormat { reason, line } => write!(f, "bad format ({reason}): {line}"),
            Error::CompressionUnsupported { indicator } => {
                write!(f, "unsupported EC point compression indicator: 0x{indicator:02x}")
            }
            Error::CurveMismatch { expected, actual } => {
                write!(f, "mismatched key curve name ({expected}) vs. encoded one ({actual})")
            }
            Error::DuplicateOption { name } => write!(f, "duplicate login option: {name}"),
            Error::DuplicateRegistration { name } => {
                write!(f, "key type already registered: {name}")
            }
            Error::Encoding(err) => write!(f, "{err}"),
            Error::InvalidPoint => write!(f, "invalid EC point: empty or all zeroes"),
            Error::Io(err) => write!(f, "I/O error: {}", std::io::Error::from(*err)),
            Error::KeyMaterialRejected { algorithm, reason } => {
                write!(f, "{algorithm} key material rejected: {reason}")
            }
            Error::KeyTypeMismatch { expected, actual } => {
                write!(f, "key type mismatch: expected {expected}, found {actual}")
            }
            Error::KeyTypeUnsupported { key_type } => {
                write!(f, "unsupported key type: {key_type}")
            }
            Error::MalformedPoint { len } => {
                write!(f, "malformed EC point: odd coordinate length {len}")
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Encoding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<encoding::Error> for Error {
    fn from(err: encoding::Error) -> Error {
        Error::Encoding(err)
    }
}

impl From<encoding::LabelError> for Error {
    fn from(err: encoding::LabelError) -> Error {
        Error::Encoding(err.into())
    }
}

impl From<encoding::base64::Error> for Error {
    fn from(err: encoding::base64::Error) -> Error {
        Error::Encoding(err.into())
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(err: core::str::Utf8Error) -> Error {
        Error::Encoding(err.into())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::Encoding(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err.kind())
    }
}
