//! Tests for HPACK encoding through the EntropyCoder interface

use h2_header_framing::{EntropyCoder, H2Header, HpackEncoder};
use pretty_assertions::assert_eq;

fn decode(data: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
    fluke_hpack::Decoder::new().decode(data).unwrap()
}

#[test]
fn test_encode_appends_to_buffer() {
    let mut encoder = HpackEncoder::new();
    let mut buf = vec![0xAA];
    encoder.encode(&mut buf, b":method", b"GET", false).unwrap();
    encoder.encode(&mut buf, b":path", b"/", false).unwrap();
    assert_eq!(buf, vec![0xAA, 0x82, 0x84]);
}

#[test]
fn test_encode_literal_header() {
    let mut encoder = HpackEncoder::new();
    let encoded = encoder
        .encode_all(&[H2Header::new("x-custom", "value")])
        .unwrap();
    assert_eq!(decode(&encoded), vec![(b"x-custom".to_vec(), b"value".to_vec())]);
}

#[test]
fn test_encode_binary_value() {
    let mut encoder = HpackEncoder::new();
    let value = vec![0x00, 0xFF, 0x7F, 0x80];
    let encoded = encoder
        .encode_all(&[H2Header::new("x-bin", value.clone())])
        .unwrap();
    assert_eq!(decode(&encoded), vec![(b"x-bin".to_vec(), value)]);
}

#[test]
fn test_sensitive_field_roundtrip_and_not_indexed() {
    let mut encoder = HpackEncoder::new();
    let mut decoder = fluke_hpack::Decoder::new();

    let mut first = Vec::new();
    encoder
        .encode(&mut first, b"authorization", b"Bearer abc", true)
        .unwrap();
    let mut second = Vec::new();
    encoder
        .encode(&mut second, b"authorization", b"Bearer abc", true)
        .unwrap();

    // never indexed, so repeating it costs the same
    assert_eq!(first, second);
    assert_eq!(first[0] & 0xF0, 0x10);
    assert_eq!(
        decoder.decode(&first).unwrap(),
        vec![(b"authorization".to_vec(), b"Bearer abc".to_vec())]
    );
}

#[test]
fn test_h2header_from_bytes_and_str() {
    let a = H2Header::new("content-type", "text/html");
    let b = H2Header::new(b"content-type".to_vec(), b"text/html".to_vec());
    assert_eq!(a, b);
}

#[test]
fn test_encode_decode_comprehensive_roundtrip() {
    // Mixed pseudo + regular headers
    let mut encoder = HpackEncoder::new();
    let mut decoder = fluke_hpack::Decoder::new();

    let headers = vec![
        H2Header::new(":status", "200"),
        H2Header::new("content-type", "application/json"),
        H2Header::new("x-request-id", "abc-123-def"),
        H2Header::new("set-cookie", "session=xyz"),
        H2Header::new("set-cookie", "theme=dark"),
    ];

    let encoded = encoder.encode_all(&headers).unwrap();
    let decoded = decoder.decode(&encoded).unwrap();

    assert_eq!(decoded.len(), headers.len());
    for (orig, (name, value)) in headers.iter().zip(decoded.iter()) {
        assert_eq!(&orig.name, name);
        assert_eq!(&orig.value, value);
    }
}
