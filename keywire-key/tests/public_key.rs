//! Public key parsing, encoding and fingerprint tests.

use keywire_key::{
    public::{DsaPublicKey, EcdsaPublicKey, RsaPublicKey},
    Algorithm, Buffer, BufferExt, DecoderRegistry, EcPoint, EcdsaCurve, Error, Fingerprint,
    HashAlg, KeyData, Mpint, PublicKeyEntry,
};

/// DSA 1024-bit example key.
const DSA_1024_EXAMPLE: &str = include_str!("examples/id_dsa_1024.pub");

/// ECDSA/P-256 example key.
const ECDSA_P256_EXAMPLE: &str = include_str!("examples/id_ecdsa_p256.pub");

/// ECDSA/P-384 example key.
const ECDSA_P384_EXAMPLE: &str = include_str!("examples/id_ecdsa_p384.pub");

/// ECDSA/P-521 example key.
const ECDSA_P521_EXAMPLE: &str = include_str!("examples/id_ecdsa_p521.pub");

/// RSA 1024-bit example key.
const RSA_1024_EXAMPLE: &str = include_str!("examples/id_rsa_1024.pub");

/// RSA 2048-bit example key.
const RSA_2048_EXAMPLE: &str = include_str!("examples/id_rsa_2048.pub");

/// Parse an example file and resolve its key with the built-in decoders.
fn resolve(example: &str) -> (PublicKeyEntry, KeyData) {
    let entry: PublicKeyEntry = example.trim_end().parse().unwrap();
    let key = entry.resolve_public_key(&DecoderRegistry::new()).unwrap();
    (entry, key)
}

#[test]
fn decode_dsa_1024() {
    let (entry, key) = resolve(DSA_1024_EXAMPLE);
    assert_eq!(entry.key_type(), "ssh-dss");
    assert_eq!(entry.key_data().len(), 433);
    assert_eq!(key.algorithm(), Algorithm::Dsa);

    let dsa_key = key.dsa().unwrap();
    assert_eq!(dsa_key.p.as_positive_bytes().len(), 128);
    assert_eq!(dsa_key.q.as_positive_bytes().len(), 20);
    assert_eq!(
        key.fingerprint(HashAlg::Sha256).unwrap().to_string(),
        "SHA256:udqwzShULShPl0Qum7M2T36ZqTSbkHAo9oLgkh5pjP0"
    );
}

#[test]
fn decode_ecdsa_p256() {
    let (entry, key) = resolve(ECDSA_P256_EXAMPLE);
    assert_eq!(entry.key_data().len(), 104);

    let ecdsa_key = key.ecdsa().unwrap();
    assert_eq!(ecdsa_key.curve(), EcdsaCurve::NistP256);
    assert_eq!(ecdsa_key.to_sec1_bytes().unwrap().len(), 65);
    assert_eq!(
        key.fingerprint(HashAlg::Sha256).unwrap().to_string(),
        "SHA256:OVDXbyilk2t7i/K9i3WrkLiY7wQU/mXDN96VmBm19sA"
    );
}

#[test]
fn decode_ecdsa_p384() {
    let (entry, key) = resolve(ECDSA_P384_EXAMPLE);
    assert_eq!(entry.key_data().len(), 136);

    let ecdsa_key = key.ecdsa().unwrap();
    assert_eq!(ecdsa_key.curve(), EcdsaCurve::NistP384);
    assert_eq!(ecdsa_key.to_sec1_bytes().unwrap().len(), 97);
    assert_eq!(
        key.fingerprint(HashAlg::Sha256).unwrap().to_string(),
        "SHA256:BgxXVTIID/weame+yBuCy3r+EjuALMkcpX1Zv8hVWaU"
    );
}

#[test]
fn decode_ecdsa_p521() {
    let (entry, key) = resolve(ECDSA_P521_EXAMPLE);
    assert_eq!(entry.key_data().len(), 172);

    let ecdsa_key = key.ecdsa().unwrap();
    assert_eq!(ecdsa_key.curve(), EcdsaCurve::NistP521);
    assert_eq!(ecdsa_key.to_sec1_bytes().unwrap().len(), 133);
    assert_eq!(
        key.fingerprint(HashAlg::Sha256).unwrap().to_string(),
        "SHA256:aZgQSdiDwRGbj44wy0w50f9/MEhB+cBfjh9d05YfoTc"
    );
}

#[test]
fn decode_rsa_1024() {
    let (entry, key) = resolve(RSA_1024_EXAMPLE);
    assert_eq!(entry.key_data().len(), 151);

    let rsa_key = key.rsa().unwrap();
    assert_eq!(rsa_key.e(), &Mpint::from(65537u32));
    assert_eq!(rsa_key.key_size(), 1024);
    assert_eq!(
        key.fingerprint(HashAlg::Sha256).unwrap().to_string(),
        "SHA256:JQqBcBzdul+nhAOvPAgec289cbrq/32vvDZUhNFthpE"
    );
}

#[test]
fn decode_rsa_2048() {
    let (entry, key) = resolve(RSA_2048_EXAMPLE);
    assert_eq!(entry.key_data().len(), 279);
    assert_eq!(key.rsa().unwrap().key_size(), 2048);
    assert_eq!(
        key.fingerprint(HashAlg::Sha256).unwrap().to_string(),
        "SHA256:blgiT2hbEgyXKFgCm0iuZGYnP+/5kYtYUEdQVdAL/RM"
    );
}

#[test]
fn encode_matches_original_blob() {
    for example in [
        DSA_1024_EXAMPLE,
        ECDSA_P256_EXAMPLE,
        ECDSA_P384_EXAMPLE,
        ECDSA_P521_EXAMPLE,
        RSA_1024_EXAMPLE,
        RSA_2048_EXAMPLE,
    ] {
        let (entry, key) = resolve(example);
        assert_eq!(key.to_bytes().unwrap(), entry.key_data());

        let reencoded = PublicKeyEntry::from_key_data(&key).unwrap();
        assert_eq!(reencoded, entry);
    }
}

#[test]
fn fingerprint_parse() {
    let (_, key) = resolve(ECDSA_P256_EXAMPLE);
    let fingerprint = key.fingerprint(HashAlg::Sha256).unwrap();
    let parsed: Fingerprint = fingerprint.to_string().parse().unwrap();
    assert_eq!(parsed, fingerprint);
    assert_eq!(parsed.algorithm(), HashAlg::Sha256);

    assert!("MD5:0123".parse::<Fingerprint>().is_err());
    assert!("SHA256".parse::<Fingerprint>().is_err());
}

#[test]
fn prefixed_public_key_preserves_trailing_data() {
    let (_, key) = resolve(RSA_2048_EXAMPLE);

    let mut buffer = Buffer::new();
    buffer.put_public_key(&key).unwrap();
    buffer.put_int(0xdead_beef);

    assert_eq!(buffer.get_int().unwrap(), key.to_bytes().unwrap().len() as u32);
    buffer.set_rpos(0).unwrap();

    assert_eq!(buffer.get_public_key().unwrap(), key);
    assert_eq!(buffer.get_int().unwrap(), 0xdead_beef);
    assert_eq!(buffer.available(), 0);
}

#[test]
fn raw_public_key_round_trip() {
    for example in [DSA_1024_EXAMPLE, ECDSA_P384_EXAMPLE, RSA_1024_EXAMPLE] {
        let (_, key) = resolve(example);
        let mut buffer = Buffer::new();
        buffer.put_raw_public_key(&key).unwrap();
        assert_eq!(buffer.get_raw_public_key().unwrap(), key);
    }
}

#[test]
fn prefixed_public_key_must_be_consumed() {
    let (_, key) = resolve(ECDSA_P256_EXAMPLE);
    let blob = key.to_bytes().unwrap();

    // Declared length covers one extra byte which the key doesn't use.
    let mut buffer = Buffer::new();
    buffer.put_int(blob.len() as u32 + 1);
    buffer.put_raw_bytes(&blob);
    buffer.put_byte(0);

    assert!(buffer.get_public_key().is_err());
}

#[test]
fn buffer_rejects_off_curve_point() {
    let key = KeyData::from(EcdsaPublicKey::new(
        EcdsaCurve::NistP256,
        EcPoint::new(Mpint::from(1u32), Mpint::from(2u32)),
    ));

    let mut buffer = Buffer::new();
    buffer.put_public_key(&key).unwrap();

    assert!(matches!(
        buffer.get_public_key(),
        Err(Error::KeyMaterialRejected {
            algorithm: Algorithm::Ecdsa {
                curve: EcdsaCurve::NistP256
            },
            ..
        })
    ));
}

#[test]
fn buffer_rejects_even_rsa_modulus() {
    let key = KeyData::from(RsaPublicKey::new(Mpint::from(3u32), Mpint::from(0x1000u32)));

    let mut buffer = Buffer::new();
    buffer.put_public_key(&key).unwrap();
    assert!(matches!(
        buffer.get_public_key(),
        Err(Error::KeyMaterialRejected {
            algorithm: Algorithm::Rsa,
            ..
        })
    ));

    let mut buffer = Buffer::new();
    buffer.put_raw_public_key(&key).unwrap();
    assert!(matches!(
        buffer.get_raw_public_key(),
        Err(Error::KeyMaterialRejected {
            algorithm: Algorithm::Rsa,
            ..
        })
    ));
}

#[test]
fn reject_oversized_ecdsa_coordinates() {
    // nistp256 coordinates are 32 bytes wide; these are 33.
    let mut octets = vec![0x04];
    octets.extend_from_slice(&[0x5a; 66]);

    let mut buffer = Buffer::new();
    buffer.put_string("ecdsa-sha2-nistp256").unwrap();
    buffer.put_string("nistp256").unwrap();
    buffer.put_bytes(&octets).unwrap();

    assert_eq!(
        KeyData::from_bytes(buffer.as_unread()),
        Err(Error::MalformedPoint { len: 66 })
    );
    assert_eq!(
        EcdsaPublicKey::from_sec1_bytes(EcdsaCurve::NistP256, &octets),
        Err(Error::MalformedPoint { len: 66 })
    );
}

#[test]
fn failed_put_public_key_leaves_buffer_untouched() {
    let oversized = KeyData::from(EcdsaPublicKey::new(
        EcdsaCurve::NistP256,
        EcPoint::new(
            Mpint::from_positive_bytes(&[0x5a; 33]),
            Mpint::from_positive_bytes(&[0x5a; 33]),
        ),
    ));

    let mut buffer = Buffer::new();
    buffer.put_int(0xdead_beef);
    assert!(buffer.put_public_key(&oversized).is_err());

    assert_eq!(buffer.available(), 4);
    assert_eq!(buffer.get_int().unwrap(), 0xdead_beef);
}

#[test]
fn reject_curve_mismatch() {
    let (_, key) = resolve(ECDSA_P256_EXAMPLE);
    let mut blob = key.to_bytes().unwrap();

    // Swap the outer key type for P-384 while keeping the nistp256 curve name.
    let p384 = b"ecdsa-sha2-nistp384";
    blob[4..4 + p384.len()].copy_from_slice(p384);

    assert_eq!(
        KeyData::from_bytes(&blob),
        Err(Error::CurveMismatch {
            expected: "nistp384".into(),
            actual: "nistp256".into(),
        })
    );
}

#[test]
fn registry_rejects_embedded_key_type_mismatch() {
    let (entry, _) = resolve(RSA_1024_EXAMPLE);
    let registry = DecoderRegistry::new();

    assert_eq!(
        registry.decode_public_key("ssh-dss", entry.key_data()),
        Err(Error::KeyTypeMismatch {
            expected: "ssh-dss".into(),
            actual: "ssh-rsa".into(),
        })
    );
}

#[test]
fn registry_ignores_key_type_case() {
    let (entry, key) = resolve(RSA_1024_EXAMPLE);
    let registry = DecoderRegistry::new();

    assert_eq!(
        registry.decode_public_key("SSH-RSA", entry.key_data()).unwrap(),
        key
    );

    // Same key with the embedded key type upper-cased.
    let mut blob = entry.key_data().to_vec();
    blob[4..11].copy_from_slice(b"SSH-RSA");
    assert_eq!(registry.decode_public_key("ssh-rsa", &blob).unwrap(), key);
}

#[test]
fn registry_rejects_even_rsa_modulus() {
    let key = KeyData::from(RsaPublicKey::new(
        Mpint::from(65537u32),
        Mpint::from_positive_bytes(&[0xc0; 128]),
    ));
    let blob = key.to_bytes().unwrap();

    assert!(matches!(
        DecoderRegistry::new().decode_public_key("ssh-rsa", &blob),
        Err(Error::KeyMaterialRejected {
            algorithm: Algorithm::Rsa,
            ..
        })
    ));

    // Wire decoding alone doesn't consult the key factory.
    assert_eq!(KeyData::from_bytes(&blob).unwrap(), key);
}

#[test]
fn compressed_points_decompress() {
    for example in [ECDSA_P256_EXAMPLE, ECDSA_P384_EXAMPLE, ECDSA_P521_EXAMPLE] {
        let (_, key) = resolve(example);
        let ecdsa_key = key.ecdsa().unwrap();
        let curve = ecdsa_key.curve();
        let uncompressed = ecdsa_key.to_sec1_bytes().unwrap();

        let field_size = (uncompressed.len() - 1) / 2;
        let y_is_odd = uncompressed[uncompressed.len() - 1] & 1 == 1;
        let mut compressed = vec![if y_is_odd { 3 } else { 2 }];
        compressed.extend_from_slice(&uncompressed[1..=field_size]);

        let point = EcPoint::from_octet_string(&compressed, Some(curve)).unwrap();
        assert_eq!(&point, ecdsa_key.point());
        assert_eq!(point.to_octet_string(curve).unwrap(), uncompressed);

        let from_compressed = EcdsaPublicKey::from_sec1_bytes(curve, &compressed).unwrap();
        assert_eq!(&from_compressed, ecdsa_key);

        assert_eq!(
            EcPoint::from_octet_string(&compressed, None),
            Err(Error::CompressionUnsupported {
                indicator: compressed[0]
            })
        );
    }
}

#[test]
fn native_public_key_conversions() {
    let (_, key) = resolve(RSA_2048_EXAMPLE);
    let rsa_key = key.rsa().unwrap();
    let native = rsa::RsaPublicKey::try_from(rsa_key).unwrap();
    assert_eq!(&RsaPublicKey::from(&native), rsa_key);

    let (_, key) = resolve(DSA_1024_EXAMPLE);
    let dsa_key = key.dsa().unwrap();
    let native = dsa::VerifyingKey::try_from(dsa_key).unwrap();
    assert_eq!(&DsaPublicKey::from(&native), dsa_key);

    let (_, key) = resolve(ECDSA_P521_EXAMPLE);
    let ecdsa_key = key.ecdsa().unwrap();
    let native = p521::PublicKey::try_from(ecdsa_key).unwrap();
    assert_eq!(&EcdsaPublicKey::try_from(&native).unwrap(), ecdsa_key);
    assert!(p256::PublicKey::try_from(ecdsa_key).is_err());
}
