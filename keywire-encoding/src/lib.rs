#![no_std]
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
//! # #[cfg(feature = "alloc")]
//! # {
//! use keywire_encoding::Buffer;
//!
//! let mut buffer = Buffer::new();
//! buffer.put_int(0x29b7f4aa);
//! buffer.put_string("testing")?;
//!
//! assert_eq!(buffer.get_int()?, 0x29b7f4aa);
//! assert_eq!(buffer.get_string()?, "testing");
//! assert_eq!(buffer.available(), 0);
//! # }
//! # Ok::<(), keywire_encoding::Error>(())
//! ```

#[cfg(feature = "alloc")]
#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "base64")]
pub mod base64;

mod checked;
mod decode;
mod encode;
mod error;
mod label;
mod reader;
mod writer;

#[cfg(feature = "alloc")]
mod buffer;
#[cfg(feature = "alloc")]
mod mpint;

pub use crate::{
    checked::CheckedSum,
    decode::Decode,
    encode::Encode,
    error::{Error, Result},
    label::{Label, LabelError},
    reader::Reader,
    writer::Writer,
};

#[cfg(feature = "alloc")]
pub use crate::{buffer::Buffer, mpint::Mpint};

#[cfg(feature = "digest")]
pub use crate::writer::DigestWriter;

#[cfg(feature = "bigint")]
pub use num_bigint::BigUint;
