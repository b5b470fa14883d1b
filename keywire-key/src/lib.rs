#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
//! ```
//! use keywire_key::{AuthorizedKeyEntry, DecoderRegistry, KeyData};
//!
//! let line = concat!(
//!     r#"no-touch-required,command="/bin/true" "#,
//!     "ecdsa-sha2-nistp256 AAAAE2VjZHNhLXNoYTItbmlzdHAyNTYAAAAIbmlzdHAyNTYAAABBBPKk6oKr3pR8mn3FAyO2",
//!     "K2vSScFsawmKeDG1Ps24u5EDTcaCgELAhyK7sPV8FrYEALoCFMlexjDh8VR0QszckmA= ec256"
//! );
//!
//! let registry = DecoderRegistry::global();
//! let entry = AuthorizedKeyEntry::parse_line(line, registry)?.expect("not a comment");
//! assert_eq!(entry.login_options().get("command"), Some("/bin/true"));
//! assert_eq!(entry.comment(), Some("ec256"));
//!
//! let key = entry.resolve_public_key(registry)?;
//! assert!(matches!(key, KeyData::Ecdsa(_)));
//! # Ok::<(), keywire_key::Error>(())
//! ```

mod algorithm;
mod authorized_keys;
mod buffer;
mod ec_point;
mod entry;
mod error;
mod fingerprint;
mod key_factory;
mod login_options;
mod registry;

pub mod private;
pub mod public;

pub use crate::{
    algorithm::{Algorithm, AlgorithmName, EcdsaCurve, HashAlg},
    authorized_keys::{
        default_authorized_keys_path, read_authorized_keys, read_authorized_keys_file,
        read_default_authorized_keys, resolve_authorized_keys, AuthorizedKeyEntry,
    },
    buffer::BufferExt,
    ec_point::{EcPoint, PointCompression},
    entry::{PublicKeyEntry, PublicKeyEntryBuilder},
    error::{Error, Result},
    fingerprint::Fingerprint,
    key_factory::{KeyFactory, NativeKeypair, NativePublicKey, NativeKeyFactory},
    login_options::LoginOptions,
    private::KeypairData,
    public::KeyData,
    registry::{
        DecoderRegistry, DsaDecoder, EcdsaDecoder, KeyDecoder, ParsedAlgorithmList, RsaDecoder,
    },
};
pub use encoding::{self, Buffer, Mpint};
pub use sha2;

/// Character which introduces a comment line in key files.
pub const COMMENT_CHAR: char = '#';
