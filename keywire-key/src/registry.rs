//! Runtime-extensible mapping from key-type identifiers to key decoders.

use crate::{
    key_factory::{KeyFactory, NativeKeyFactory},
    public::KeyData,
    Algorithm, EcdsaCurve, Error, Result,
};
use core::fmt;
use encoding::{Decode, Reader};
use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};
use tracing::{debug, trace};

/// Decoder for the key material of one or more key types.
pub trait KeyDecoder: Send + Sync + fmt::Debug {
    /// Key-type identifiers this decoder handles.
    fn key_types(&self) -> Vec<String>;

    /// Decode a complete key blob declared as `key_type`.
    ///
    /// The blob starts with its own embedded key-type string, which must
    /// agree with `key_type`.
    fn decode_public_key(&self, key_type: &str, blob: &[u8]) -> Result<KeyData>;

    /// Key factory used to turn decoded fields into native keys.
    fn key_factory(&self) -> &dyn KeyFactory;
}

/// Decode a blob with one of the built-in wire codecs, then have the
/// factory accept the key material.
fn decode_builtin(
    decoder: &dyn KeyDecoder,
    key_type: &str,
    mut blob: &[u8],
) -> Result<KeyData> {
    let embedded = String::decode(&mut blob)?;

    if !embedded.eq_ignore_ascii_case(key_type) {
        return Err(Error::KeyTypeMismatch {
            expected: key_type.into(),
            actual: embedded,
        });
    }

    // Key-type names compare case-insensitively, both against the declared
    // type and when resolving the algorithm.
    let algorithm = Algorithm::new(&embedded.to_ascii_lowercase())
        .ok()
        .filter(|algorithm| {
            decoder
                .key_types()
                .iter()
                .any(|name| name == algorithm.as_str())
        })
        .ok_or(Error::AlgorithmUnsupported { name: embedded })?;

    let key = KeyData::decode_as(&mut blob, &algorithm)?;
    blob.ensure_finished()?;
    decoder.key_factory().public_key(&key)?;
    Ok(key)
}

/// Built-in decoder for `ssh-rsa` keys.
#[derive(Copy, Clone, Debug, Default)]
pub struct RsaDecoder;

impl KeyDecoder for RsaDecoder {
    fn key_types(&self) -> Vec<String> {
        vec![Algorithm::Rsa.as_str().into()]
    }

    fn decode_public_key(&self, key_type: &str, blob: &[u8]) -> Result<KeyData> {
        decode_builtin(self, key_type, blob)
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &NativeKeyFactory
    }
}

/// Built-in decoder for `ssh-dss` keys.
#[derive(Copy, Clone, Debug, Default)]
pub struct DsaDecoder;

impl KeyDecoder for DsaDecoder {
    fn key_types(&self) -> Vec<String> {
        vec![Algorithm::Dsa.as_str().into()]
    }

    fn decode_public_key(&self, key_type: &str, blob: &[u8]) -> Result<KeyData> {
        decode_builtin(self, key_type, blob)
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &NativeKeyFactory
    }
}

/// Built-in decoder for `ecdsa-sha2-*` keys on every supported curve.
///
/// The curve is taken from the key-type suffix.
#[derive(Copy, Clone, Debug, Default)]
pub struct EcdsaDecoder;

impl KeyDecoder for EcdsaDecoder {
    fn key_types(&self) -> Vec<String> {
        EcdsaCurve::ALL
            .iter()
            .map(|curve| curve.key_type().into())
            .collect()
    }

    fn decode_public_key(&self, key_type: &str, blob: &[u8]) -> Result<KeyData> {
        decode_builtin(self, key_type, blob)
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &NativeKeyFactory
    }
}

/// Outcome of parsing a comma-separated list of key-type names.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedAlgorithmList {
    /// Names with a decoder, in list order (lowercase).
    pub parsed: Vec<String>,

    /// Names without a decoder, in list order, as written.
    pub unsupported: Vec<String>,
}

/// Registry of key decoders, keyed by case-insensitive key-type identifier.
///
/// Built-in decoders for RSA, DSA and ECDSA are always present and can't be
/// shadowed or removed. Extension decoders may be registered and
/// unregistered at runtime; every operation takes the internal lock, so a
/// lookup never observes a partial registration.
pub struct DecoderRegistry {
    builtins: BTreeMap<String, Arc<dyn KeyDecoder>>,
    extensions: RwLock<BTreeMap<String, Arc<dyn KeyDecoder>>>,
}

impl DecoderRegistry {
    /// Create a registry holding only the built-in decoders.
    pub fn new() -> Self {
        let decoders: [Arc<dyn KeyDecoder>; 3] =
            [Arc::new(RsaDecoder), Arc::new(DsaDecoder), Arc::new(EcdsaDecoder)];

        let mut builtins = BTreeMap::new();
        for decoder in decoders {
            for name in decoder.key_types() {
                builtins.insert(name.to_ascii_lowercase(), Arc::clone(&decoder));
            }
        }

        Self {
            builtins,
            extensions: RwLock::new(BTreeMap::new()),
        }
    }

    /// Process-wide registry, created with the built-in decoders on first use.
    pub fn global() -> &'static DecoderRegistry {
        static GLOBAL: OnceLock<DecoderRegistry> = OnceLock::new();
        GLOBAL.get_or_init(DecoderRegistry::new)
    }

    /// Register an extension decoder under every name it claims.
    ///
    /// # Returns
    /// - `Err(Error::DuplicateRegistration)` if any claimed name (compared
    ///   case-insensitively) belongs to a built-in or an existing extension.
    ///   Nothing is registered in that case.
    pub fn register(&self, decoder: Arc<dyn KeyDecoder>) -> Result<()> {
        let names: Vec<String> = decoder
            .key_types()
            .iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();

        let mut extensions = self.extensions.write().unwrap_or_else(PoisonError::into_inner);

        for (i, name) in names.iter().enumerate() {
            if self.builtins.contains_key(name)
                || extensions.contains_key(name)
                || names[..i].contains(name)
            {
                return Err(Error::DuplicateRegistration { name: name.clone() });
            }
        }

        for name in names {
            debug!(key_type = %name, "registered key decoder");
            extensions.insert(name, Arc::clone(&decoder));
        }

        Ok(())
    }

    /// Remove an extension decoder, along with any other names it was
    /// registered under.
    ///
    /// Returns `None` if no extension is registered as `name`. Built-in
    /// decoders are never removed.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn KeyDecoder>> {
        let mut extensions = self.extensions.write().unwrap_or_else(PoisonError::into_inner);
        let decoder = extensions.remove(&name.to_ascii_lowercase())?;
        extensions.retain(|_, other| !Arc::ptr_eq(other, &decoder));
        debug!(key_type = %name, "unregistered key decoder");
        Some(decoder)
    }

    /// Look up the decoder for a key type, checking built-ins first.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn KeyDecoder>> {
        let key = name.to_ascii_lowercase();

        if let Some(decoder) = self.builtins.get(&key) {
            return Some(Arc::clone(decoder));
        }

        let extensions = self.extensions.read().unwrap_or_else(PoisonError::into_inner);
        let decoder = extensions.get(&key).cloned();

        if decoder.is_none() {
            trace!(key_type = %name, "no decoder registered");
        }

        decoder
    }

    /// Is there a decoder for this key type?
    pub fn is_supported(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Decode a key blob declared as `key_type` with the matching decoder.
    ///
    /// # Returns
    /// - `Err(Error::AlgorithmUnsupported)` if no decoder is registered.
    pub fn decode_public_key(&self, key_type: &str, blob: &[u8]) -> Result<KeyData> {
        self.resolve(key_type)
            .ok_or_else(|| Error::AlgorithmUnsupported {
                name: key_type.into(),
            })?
            .decode_public_key(key_type, blob)
    }

    /// Names of the built-in decoders, sorted.
    pub fn builtin_names(&self) -> Vec<String> {
        self.builtins.keys().cloned().collect()
    }

    /// Names of the registered extension decoders, sorted.
    pub fn registered_extensions(&self) -> Vec<String> {
        let extensions = self.extensions.read().unwrap_or_else(PoisonError::into_inner);
        extensions.keys().cloned().collect()
    }

    /// Split a comma-separated list of key-type names into those with a
    /// decoder and those without. Blank items are skipped.
    pub fn parse_algorithm_list(&self, list: &str) -> ParsedAlgorithmList {
        let mut result = ParsedAlgorithmList::default();

        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if self.is_supported(name) {
                result.parsed.push(name.to_ascii_lowercase());
            } else {
                result.unsupported.push(name.into());
            }
        }

        result
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("builtins", &self.builtin_names())
            .field("extensions", &self.registered_extensions())
            .finish()
    }
}
