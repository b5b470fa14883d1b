//! Tests for the `Encode` trait.

use hex_literal::hex;
use keywire_encoding::Encode;

#[test]
fn encode_u8() {
    let mut out = Vec::new();
    0x42u8.encode(&mut out).unwrap();
    assert_eq!(out, hex!("42"));
}

#[test]
fn encode_boolean() {
    let mut out = Vec::new();
    true.encode(&mut out).unwrap();
    false.encode(&mut out).unwrap();
    assert_eq!(out, hex!("01 00"));
}

#[test]
fn encode_u32() {
    let mut out = Vec::new();
    699921578u32.encode(&mut out).unwrap();
    assert_eq!(out, hex!("29b7f4aa"));
}

#[test]
fn encode_u64() {
    let mut out = Vec::new();
    0xDEADBEEFCAFEu64.encode(&mut out).unwrap();
    assert_eq!(out, hex!("0000DEADBEEFCAFE"));
}

#[test]
fn encode_byte_array_without_prefix() {
    let mut out = Vec::new();
    b"example".encode(&mut out).unwrap();
    assert_eq!(out, hex!("6578616d706c65"));
}

#[test]
fn encode_byte_slice() {
    let mut out = Vec::new();
    b"example".as_slice().encode(&mut out).unwrap();
    assert_eq!(out, hex!("000000076578616d706c65"));
}

#[test]
fn encode_str() {
    let mut out = Vec::new();
    "testing".encode(&mut out).unwrap();
    assert_eq!(out, hex!("00000007 74657374696e67"));
}

#[test]
fn encode_prefixed() {
    let mut out = Vec::new();
    0xCAFEu16.encode_prefixed(&mut out).unwrap();
    assert_eq!(out, hex!("00000002 CAFE"));
    assert_eq!(0xCAFEu16.encoded_len_prefixed().unwrap(), 6);
}
