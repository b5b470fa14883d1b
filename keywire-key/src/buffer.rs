//! Key-material operations on [`Buffer`].

use crate::{
    key_factory::{KeyFactory, NativeKeyFactory},
    private::KeypairData,
    public::KeyData,
    Result,
};
use encoding::{Buffer, Decode, Encode, Reader};

/// Extension trait which moves public keys and keypairs through a [`Buffer`].
///
/// Every `get_*` method hands the decoded key to [`NativeKeyFactory`] before
/// returning it, so key material the native implementation refuses fails with
/// [`Error::KeyMaterialRejected`](crate::Error::KeyMaterialRejected).
pub trait BufferExt {
    /// Write a public key as a length-prefixed sub-buffer:
    /// `uint32 length || key-type || key fields`.
    ///
    /// The length is backpatched once the key has been written.
    fn put_public_key(&mut self, key: &KeyData) -> Result<()>;

    /// Read a length-prefixed public key written by
    /// [`BufferExt::put_public_key`].
    ///
    /// Reads are constrained to the declared sub-range, which the key must
    /// consume entirely. Data following it is left in place.
    fn get_public_key(&mut self) -> Result<KeyData>;

    /// Write a public key without the outer length prefix.
    fn put_raw_public_key(&mut self, key: &KeyData) -> Result<()>;

    /// Read a public key which has no outer length prefix.
    fn get_raw_public_key(&mut self) -> Result<KeyData>;

    /// Write a keypair: key type, public fields, then private fields.
    fn put_key_pair(&mut self, keypair: &KeypairData) -> Result<()>;

    /// Read a keypair written by [`BufferExt::put_key_pair`].
    fn get_key_pair(&mut self) -> Result<KeypairData>;
}

impl BufferExt for Buffer {
    fn put_public_key(&mut self, key: &KeyData) -> Result<()> {
        self.put_prefixed(|buffer| buffer.put_raw_public_key(key))
    }

    fn get_public_key(&mut self) -> Result<KeyData> {
        self.read_prefixed(|buffer| buffer.get_raw_public_key())
    }

    fn put_raw_public_key(&mut self, key: &KeyData) -> Result<()> {
        Ok(key.encode(self)?)
    }

    fn get_raw_public_key(&mut self) -> Result<KeyData> {
        let key = KeyData::decode(self)?;
        NativeKeyFactory.public_key(&key)?;
        Ok(key)
    }

    fn put_key_pair(&mut self, keypair: &KeypairData) -> Result<()> {
        keypair.encode_to(self)
    }

    fn get_key_pair(&mut self) -> Result<KeypairData> {
        let keypair = KeypairData::decode(self)?;
        NativeKeyFactory.keypair(&keypair)?;
        Ok(keypair)
    }
}
