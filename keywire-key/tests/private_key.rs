//! Keypair wire encoding and native conversion tests.

use hex_literal::hex;
use keywire_key::{
    private::{DsaKeypair, EcdsaKeypair, OpaqueKeypair, RsaKeypair},
    public::OpaquePublicKey,
    Algorithm, Buffer, BufferExt, DecoderRegistry, EcdsaCurve, Error, KeyFactory, KeypairData,
    Mpint, NativeKeyFactory, NativeKeypair, PublicKeyEntry,
};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

/// DSA 1024-bit example key, used for its domain parameters.
const DSA_1024_EXAMPLE: &str = include_str!("examples/id_dsa_1024.pub");

/// P-256 private scalar from RFC 6979 § A.2.5.
const P256_D: [u8; 32] = hex!("C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721");

/// Public point matching [`P256_D`].
const P256_X: [u8; 32] = hex!("60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6");
const P256_Y: [u8; 32] = hex!("7903FE1008B8BC99A41AE9E95628BC64F2F1B20C2D7E9F5177A3C294D4462299");

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::from_seed([42; 32])
}

/// Write a keypair to a buffer, read it back and compare.
fn buffer_round_trip(keypair: &KeypairData) {
    let mut buffer = Buffer::new();
    buffer.put_key_pair(keypair).unwrap();
    assert_eq!(buffer.available(), keypair.encoded_len().unwrap());

    let decoded = buffer.get_key_pair().unwrap();
    assert_eq!(&decoded, keypair);
    assert_eq!(decoded.public(), keypair.public());
    assert_eq!(buffer.available(), 0);

    assert_eq!(
        &KeypairData::from_bytes(&keypair.to_bytes().unwrap()).unwrap(),
        keypair
    );
}

#[test]
fn rsa_keypair_round_trip() {
    let keypair = RsaKeypair::random(&mut rng(), 1024).unwrap();
    assert_eq!(keypair.key_size(), 1024);

    let native = rsa::RsaPrivateKey::try_from(&keypair).unwrap();
    assert_eq!(RsaKeypair::try_from(&native).unwrap(), keypair);

    buffer_round_trip(&keypair.into());
}

#[test]
fn rsa_keypair_too_small() {
    assert!(RsaKeypair::random(&mut rng(), 512).is_err());
}

#[test]
fn rsa_keypair_field_order() {
    let keypair = RsaKeypair::random(&mut rng(), 1024).unwrap();
    let mut buffer = Buffer::new();
    buffer.put_key_pair(&keypair.clone().into()).unwrap();

    assert_eq!(buffer.get_string().unwrap(), "ssh-rsa");
    assert_eq!(&buffer.get_mpint().unwrap(), keypair.public.e());
    assert_eq!(&buffer.get_mpint().unwrap(), keypair.public.n());
    assert_eq!(&buffer.get_mpint().unwrap(), keypair.private.d());
    assert_eq!(&buffer.get_mpint().unwrap(), keypair.private.iqmp());
    assert_eq!(&buffer.get_mpint().unwrap(), keypair.private.q());
    assert_eq!(&buffer.get_mpint().unwrap(), keypair.private.p());
    assert_eq!(buffer.available(), 0);
}

#[test]
fn dsa_keypair_round_trip() {
    let entry: PublicKeyEntry = DSA_1024_EXAMPLE.parse().unwrap();
    let domain = entry.resolve_public_key(&DecoderRegistry::new()).unwrap();
    let domain = domain.dsa().unwrap();

    let keypair = DsaKeypair::random(&mut rng(), domain).unwrap();
    assert_eq!(keypair.public.p, domain.p);
    assert_eq!(keypair.public.q, domain.q);
    assert_eq!(keypair.public.g, domain.g);

    let native = dsa::SigningKey::try_from(&keypair).unwrap();
    assert_eq!(DsaKeypair::from(&native), keypair);

    buffer_round_trip(&keypair.into());
}

#[test]
fn dsa_keypair_rejects_zero_private_key() {
    let entry: PublicKeyEntry = DSA_1024_EXAMPLE.parse().unwrap();
    let domain = entry.resolve_public_key(&DecoderRegistry::new()).unwrap();

    let mut keypair = DsaKeypair::random(&mut rng(), domain.dsa().unwrap()).unwrap();
    keypair.private = keywire_key::private::DsaPrivateKey::new(Mpint::default());

    assert!(matches!(
        NativeKeyFactory.keypair(&keypair.into()),
        Err(Error::KeyMaterialRejected {
            algorithm: Algorithm::Dsa,
            ..
        })
    ));
}

#[test]
fn ecdsa_keypair_round_trip() {
    for curve in [
        EcdsaCurve::NistP256,
        EcdsaCurve::NistP384,
        EcdsaCurve::NistP521,
    ] {
        let keypair = EcdsaKeypair::random(&mut rng(), curve).unwrap();
        assert_eq!(keypair.curve(), curve);

        let keypair = KeypairData::from(keypair);
        let native = NativeKeyFactory.keypair(&keypair).unwrap();
        assert_eq!(native.algorithm(), Algorithm::Ecdsa { curve });
        assert_eq!(KeypairData::try_from(&native).unwrap(), keypair);

        buffer_round_trip(&keypair);
    }
}

#[test]
fn ecdsa_keypair_from_known_scalar() {
    let secret_key = p256::SecretKey::from_slice(&P256_D).unwrap();
    let keypair = EcdsaKeypair::try_from(&secret_key).unwrap();

    assert_eq!(keypair.private.scalar(), &Mpint::from_positive_bytes(&P256_D));
    assert_eq!(keypair.public.point().x(), &Mpint::from_positive_bytes(&P256_X));
    assert_eq!(keypair.public.point().y(), &Mpint::from_positive_bytes(&P256_Y));

    let native = NativeKeyFactory.keypair(&keypair.into()).unwrap();
    assert!(matches!(native, NativeKeypair::EcdsaP256(_)));
}

#[test]
fn ecdsa_keypair_rejects_mismatched_public_key() {
    let mut keypair = EcdsaKeypair::random(&mut rng(), EcdsaCurve::NistP256).unwrap();
    let other = EcdsaKeypair::random(&mut ChaCha8Rng::from_seed([7; 32]), EcdsaCurve::NistP256)
        .unwrap();
    keypair.public = other.public.clone();

    assert!(p256::SecretKey::try_from(&keypair).is_err());
}

#[test]
fn opaque_keypair_is_not_encodable() {
    let public = OpaquePublicKey::new("ssh-ed25519".parse().unwrap(), vec![0x11; 36]);
    let keypair = KeypairData::from(OpaqueKeypair::new(vec![0x22; 32], public));

    let expected = Err(Error::KeyTypeUnsupported {
        key_type: "ssh-ed25519".into(),
    });
    assert_eq!(keypair.to_bytes(), expected.clone());
    assert_eq!(Buffer::new().put_key_pair(&keypair), expected.map(|_| ()));
    assert!(NativeKeyFactory.keypair(&keypair).is_err());
}

#[test]
fn reject_unknown_keypair_type() {
    let mut buffer = Buffer::new();
    buffer.put_string("ssh-ed25519").unwrap();
    buffer.put_bytes(&[0x11; 32]).unwrap();

    assert_eq!(
        buffer.get_key_pair(),
        Err(Error::AlgorithmUnsupported {
            name: "ssh-ed25519".into()
        })
    );
}
