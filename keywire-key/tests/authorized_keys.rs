//! `authorized_keys` parsing tests.

use keywire_key::{
    public::OpaquePublicKey, read_authorized_keys, read_authorized_keys_file,
    resolve_authorized_keys, AuthorizedKeyEntry, DecoderRegistry, Error, KeyData, KeyDecoder,
    KeyFactory, NativeKeyFactory, Result,
};
use std::{io::Cursor, path::Path, sync::Arc};

/// Example `authorized_keys` file.
const AUTHORIZED_KEYS_EXAMPLE: &str = include_str!("examples/authorized_keys");

/// Ed25519 key which has no built-in decoder.
const ED25519_ENTRY: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAILM+rvN+ot98qgEN796jTiQfZfG1KaT0PtFDJ/XFSqti user@example.com";

/// Decoder for `ssh-ed25519` which keeps the key bytes as-is.
#[derive(Debug)]
struct Ed25519Decoder;

impl KeyDecoder for Ed25519Decoder {
    fn key_types(&self) -> Vec<String> {
        vec!["ssh-ed25519".into()]
    }

    fn decode_public_key(&self, key_type: &str, blob: &[u8]) -> Result<KeyData> {
        // 4-byte length + 11-byte name + 4-byte length + 32-byte point
        let key = blob.get(15..).filter(|key| key.len() == 36).ok_or(Error::BadFormat {
            reason: "bad Ed25519 key length",
            line: key_type.into(),
        })?;

        Ok(OpaquePublicKey::new(key_type.parse()?, key.to_vec()).into())
    }

    fn key_factory(&self) -> &dyn KeyFactory {
        &NativeKeyFactory
    }
}

#[test]
fn read_example_file() {
    let registry = DecoderRegistry::new();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/examples/authorized_keys");
    let entries = read_authorized_keys_file(path, &registry).unwrap();
    assert_eq!(entries.len(), 2);

    let ecdsa = &entries[0];
    assert_eq!(ecdsa.key_type(), "ecdsa-sha2-nistp256");
    assert_eq!(ecdsa.login_options().len(), 2);
    assert_eq!(ecdsa.login_options().get("no-touch-required"), Some("true"));
    assert_eq!(ecdsa.login_options().get("Command"), Some("/bin/true"));
    assert_eq!(ecdsa.comment(), Some("ec256"));

    let rsa = &entries[1];
    assert_eq!(rsa.key_type(), "ssh-rsa");
    assert!(rsa.login_options().is_empty());
    assert_eq!(rsa.comment(), Some("laptop key"));

    let keys = resolve_authorized_keys(&entries, &registry).unwrap();
    assert!(keys[0].is_ecdsa());
    assert!(keys[1].is_rsa());
}

#[test]
fn read_from_stream() {
    let registry = DecoderRegistry::new();
    let entries =
        read_authorized_keys(Cursor::new(AUTHORIZED_KEYS_EXAMPLE), &registry).unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn abort_on_malformed_line() {
    let registry = DecoderRegistry::new();
    let file = format!("{AUTHORIZED_KEYS_EXAMPLE}\nssh-rsa !!!not-base64!!!\n");

    assert_eq!(
        read_authorized_keys(Cursor::new(file), &registry),
        Err(Error::BadFormat {
            reason: "invalid Base64 key data",
            line: "ssh-rsa !!!not-base64!!!".into(),
        })
    );
}

#[test]
fn reject_unregistered_key_type() {
    let registry = DecoderRegistry::new();

    assert!(matches!(
        AuthorizedKeyEntry::parse_line(ED25519_ENTRY, &registry),
        Err(Error::BadFormat { .. })
    ));
}

#[test]
fn registered_extension_key_type() {
    let registry = DecoderRegistry::new();
    registry.register(Arc::new(Ed25519Decoder)).unwrap();

    let line = format!("restrict,from=\"10.0.0.0/8\" {ED25519_ENTRY}");
    let entry = AuthorizedKeyEntry::parse_line(&line, &registry)
        .unwrap()
        .unwrap();

    assert_eq!(entry.login_options().get("restrict"), Some("true"));
    assert_eq!(entry.login_options().get("from"), Some("10.0.0.0/8"));
    assert_eq!(entry.comment(), Some("user@example.com"));

    let key = entry.resolve_public_key(&registry).unwrap();
    assert_eq!(key.algorithm().as_str(), "ssh-ed25519");
    assert_eq!(key.other().unwrap().as_bytes().len(), 36);

    assert!(registry.unregister("SSH-ED25519").is_some());
    assert!(!registry.is_supported("ssh-ed25519"));
}

#[test]
fn duplicate_registration() {
    let registry = DecoderRegistry::new();
    registry.register(Arc::new(Ed25519Decoder)).unwrap();

    assert_eq!(
        registry.register(Arc::new(Ed25519Decoder)),
        Err(Error::DuplicateRegistration {
            name: "ssh-ed25519".into()
        })
    );
}

#[test]
fn parse_algorithm_list() {
    let registry = DecoderRegistry::new();
    let list = registry.parse_algorithm_list("ssh-rsa, SSH-ED25519,,ecdsa-sha2-nistp521");

    assert_eq!(list.parsed, ["ssh-rsa", "ecdsa-sha2-nistp521"]);
    assert_eq!(list.unsupported, ["SSH-ED25519"]);
}
