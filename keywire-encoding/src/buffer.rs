//! Growable octet buffer with independent read and write cursors.

use crate::{
    decode::decode_length, encode::encode_length, Decode, Encode, Error, Mpint, Reader, Result,
    Writer,
};
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write as _};

/// Initial capacity of a buffer which grows from empty.
const DEFAULT_CAPACITY: usize = 256;

/// Growable, cursor-addressed byte container.
///
/// Bytes are read from the read position (`rpos`) forward and written at
/// the write position (`wpos`), which always satisfy
/// `rpos <= wpos <= capacity`. The region `[rpos, wpos)` holds the unread
/// data.
///
/// A buffer implements both [`Reader`] and [`Writer`], so any type with a
/// [`Decode`] or [`Encode`] impl can be moved through it, in addition to the
/// named `get_*`/`put_*` primitives.
///
/// Buffers provide no internal synchronization: a single owner drives all
/// reads and writes.
#[derive(Clone, Default)]
pub struct Buffer {
    /// Backing storage; its length is the buffer's capacity.
    data: Vec<u8>,
    rpos: usize,
    wpos: usize,
}

impl Buffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty buffer able to hold `capacity` bytes before
    /// growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            rpos: 0,
            wpos: 0,
        }
    }

    /// Current read position.
    pub fn rpos(&self) -> usize {
        self.rpos
    }

    /// Move the read position.
    ///
    /// # Returns
    /// - `Err(Error::Length)` if `rpos` would move past the write position.
    pub fn set_rpos(&mut self, rpos: usize) -> Result<()> {
        if rpos > self.wpos {
            return Err(Error::Length);
        }

        self.rpos = rpos;
        Ok(())
    }

    /// Current write position.
    pub fn wpos(&self) -> usize {
        self.wpos
    }

    /// Move the write position, growing the backing storage if it moves past
    /// the current capacity.
    ///
    /// # Returns
    /// - `Err(Error::Length)` if `wpos` would move before the read position.
    pub fn set_wpos(&mut self, wpos: usize) -> Result<()> {
        if wpos < self.rpos {
            return Err(Error::Length);
        }

        if wpos > self.wpos {
            self.ensure_capacity(wpos - self.wpos);
        }

        self.wpos = wpos;
        Ok(())
    }

    /// Size of the backing storage.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of unread bytes, i.e. `wpos - rpos`.
    pub fn available(&self) -> usize {
        self.wpos - self.rpos
    }

    /// Ensure at least `len` unread bytes remain.
    ///
    /// # Returns
    /// - `Err(Error::Underflow)` if fewer than `len` bytes are available.
    pub fn ensure_available(&self, len: usize) -> Result<()> {
        let available = self.available();

        if available < len {
            Err(Error::Underflow {
                requested: len,
                available,
            })
        } else {
            Ok(())
        }
    }

    /// Grow the backing storage so that `len` more bytes can be written at
    /// the write position.
    ///
    /// Storage at least doubles on each growth so repeated small writes are
    /// amortized.
    pub fn ensure_capacity(&mut self, len: usize) {
        let required = self.wpos.saturating_add(len);

        if required > self.data.len() {
            let grown = self
                .data
                .len()
                .saturating_mul(2)
                .max(DEFAULT_CAPACITY)
                .max(required);

            self.data.resize(grown, 0);
        }
    }

    /// Discard the consumed prefix, shifting the unread region to offset 0.
    pub fn compact(&mut self) {
        if self.rpos > 0 {
            self.data.copy_within(self.rpos..self.wpos, 0);
            self.wpos -= self.rpos;
            self.rpos = 0;
        }
    }

    /// Reset both positions to zero, logically discarding all content.
    pub fn clear(&mut self) {
        self.rpos = 0;
        self.wpos = 0;
    }

    /// Borrow the unread region.
    pub fn as_unread(&self) -> &[u8] {
        &self.data[self.rpos..self.wpos]
    }

    /// Copy the unread region into a new vector without consuming it.
    pub fn compact_data(&self) -> Vec<u8> {
        self.as_unread().to_vec()
    }

    /// Render the unread region as colon-separated hex octets.
    pub fn print_hex(&self) -> String {
        let mut out = String::with_capacity(self.available().saturating_mul(3));

        for (i, byte) in self.as_unread().iter().enumerate() {
            if i > 0 {
                out.push(':');
            }
            // Writing to a `String` cannot fail.
            let _ = write!(out, "{byte:02x}");
        }

        out
    }

    /// Append raw bytes without a length prefix.
    pub fn put_raw_bytes(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        let end = self.wpos + bytes.len();
        self.data[self.wpos..end].copy_from_slice(bytes);
        self.wpos = end;
    }

    /// Fill `out` with raw bytes from the read position.
    pub fn get_raw_bytes(&mut self, out: &mut [u8]) -> Result<()> {
        self.ensure_available(out.len())?;
        let end = self.rpos + out.len();
        out.copy_from_slice(&self.data[self.rpos..end]);
        self.rpos = end;
        Ok(())
    }

    /// Append the unread region of another buffer. `other` is not consumed.
    pub fn put_buffer(&mut self, other: &Buffer) {
        self.put_raw_bytes(other.as_unread());
    }

    /// Write any [`Encode`] value.
    pub fn put<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Read any [`Decode`] value.
    pub fn get<T: Decode>(&mut self) -> core::result::Result<T, T::Error> {
        T::decode(self)
    }

    /// Write a single byte.
    pub fn put_byte(&mut self, byte: u8) {
        self.put_raw_bytes(&[byte]);
    }

    /// Read a single byte.
    pub fn get_byte(&mut self) -> Result<u8> {
        u8::decode(self)
    }

    /// Write a boolean as exactly `0` or `1`.
    pub fn put_boolean(&mut self, value: bool) {
        self.put_byte(u8::from(value));
    }

    /// Read a boolean; any non-zero byte is `true`.
    pub fn get_boolean(&mut self) -> Result<bool> {
        bool::decode(self)
    }

    /// Write a big endian 16-bit integer.
    pub fn put_short(&mut self, value: u16) {
        self.put_raw_bytes(&value.to_be_bytes());
    }

    /// Read a big endian 16-bit integer.
    pub fn get_short(&mut self) -> Result<u16> {
        u16::decode(self)
    }

    /// Write a big endian 32-bit integer.
    pub fn put_int(&mut self, value: u32) {
        self.put_raw_bytes(&value.to_be_bytes());
    }

    /// Read a big endian 32-bit integer.
    pub fn get_int(&mut self) -> Result<u32> {
        u32::decode(self)
    }

    /// Read a big endian 32-bit integer widened into the 64-bit unsigned
    /// domain (no sign extension).
    pub fn get_uint(&mut self) -> Result<u64> {
        self.get_int().map(u64::from)
    }

    /// Write a big endian 64-bit integer.
    pub fn put_long(&mut self, value: u64) {
        self.put_raw_bytes(&value.to_be_bytes());
    }

    /// Read a big endian 64-bit integer.
    pub fn get_long(&mut self) -> Result<u64> {
        u64::decode(self)
    }

    /// Write a length-prefixed byte string.
    ///
    /// # Returns
    /// - `Err(Error::Overflow)` if the length does not fit a signed `int32`.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        bytes.encode(self)
    }

    /// Read a length-prefixed byte string.
    ///
    /// # Returns
    /// - `Err(Error::MalformedLength)` if the declared length is negative.
    /// - `Err(Error::Underflow)` if fewer bytes remain than declared.
    pub fn get_bytes(&mut self) -> Result<Vec<u8>> {
        Vec::decode(self)
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn put_string(&mut self, string: &str) -> Result<()> {
        string.encode(self)
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// Text in other character sets can be read with
    /// [`Buffer::get_string_as_bytes`] and converted by the caller.
    pub fn get_string(&mut self) -> Result<String> {
        String::decode(self)
    }

    /// Read a length-prefixed string without interpreting its encoding.
    pub fn get_string_as_bytes(&mut self) -> Result<Vec<u8>> {
        self.get_bytes()
    }

    /// Write a non-negative multiple precision integer.
    pub fn put_mpint(&mut self, mpint: &Mpint) -> Result<()> {
        mpint.encode(self)
    }

    /// Read a multiple precision integer as a non-negative value.
    pub fn get_mpint(&mut self) -> Result<Mpint> {
        Mpint::decode(self)
    }

    /// Write a length-prefixed sub-buffer whose body is produced by `f`.
    ///
    /// A 4-byte placeholder is reserved, `f` writes the body, then the
    /// placeholder is backpatched with the number of bytes written.
    ///
    /// If `f` fails, the write position is rolled back to where it was
    /// before the placeholder.
    pub fn put_prefixed<T, E, F>(&mut self, f: F) -> core::result::Result<T, E>
    where
        E: From<Error>,
        F: FnOnce(&mut Self) -> core::result::Result<T, E>,
    {
        let start = self.wpos;
        self.put_int(0);

        let ret = match f(self) {
            Ok(ret) => ret,
            Err(err) => {
                self.wpos = start;
                return Err(err);
            }
        };

        let body_len = self.wpos - start - 4;
        let wpos = self.wpos;
        self.wpos = start;
        let patched = encode_length(body_len, self);
        self.wpos = wpos;

        if let Err(err) = patched {
            self.wpos = start;
            return Err(err.into());
        }

        Ok(ret)
    }
}

impl From<Vec<u8>> for Buffer {
    /// Wrap existing bytes so they are ready to be read.
    fn from(data: Vec<u8>) -> Buffer {
        let wpos = data.len();
        Self { data, rpos: 0, wpos }
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Buffer {
        Buffer::from(bytes.to_vec())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("rpos", &self.rpos)
            .field("wpos", &self.wpos)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl Reader for Buffer {
    fn read<'o>(&mut self, out: &'o mut [u8]) -> Result<&'o [u8]> {
        self.get_raw_bytes(out)?;
        Ok(out)
    }

    fn remaining_len(&self) -> usize {
        self.available()
    }

    /// Constrains reads to the declared sub-range by temporarily lowering
    /// the write position, which is restored afterwards whether or not `f`
    /// succeeds.
    fn read_prefixed<T, E, F>(&mut self, f: F) -> core::result::Result<T, E>
    where
        E: From<Error>,
        F: FnOnce(&mut Self) -> core::result::Result<T, E>,
    {
        let len = decode_length(self)?;
        self.ensure_available(len)?;

        let saved_wpos = self.wpos;
        self.wpos = self.rpos + len;

        let ret = f(self).and_then(|value| {
            self.ensure_finished()?;
            Ok(value)
        });

        self.wpos = saved_wpos;
        ret
    }
}

impl Writer for Buffer {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_raw_bytes(bytes);
        Ok(())
    }
}
