//! Tests for dynamic table size updates

use h2_header_framing::{EntropyCoder, HpackEncoder};
use pretty_assertions::assert_eq;

#[test]
fn test_default_table_size() {
    let encoder = HpackEncoder::new();
    assert_eq!(encoder.max_table_size(), 4096);
}

#[test]
fn test_size_update_small_value() {
    let mut encoder = HpackEncoder::new();
    let mut buf = Vec::new();
    encoder.set_max_table_size(&mut buf, 30).unwrap();
    // fits in the 5-bit prefix
    assert_eq!(buf, vec![0x3e]);
    assert_eq!(encoder.max_table_size(), 30);
}

#[test]
fn test_size_update_max_value() {
    let mut encoder = HpackEncoder::new();
    let mut buf = Vec::new();
    encoder.set_max_table_size(&mut buf, u32::MAX).unwrap();

    // 0x3f prefix then u32::MAX - 31 as a base-128 varint
    assert_eq!(buf, vec![0x3f, 0xe0, 0xff, 0xff, 0xff, 0x0f]);
    assert_eq!(encoder.max_table_size(), u32::MAX);
}

#[test]
fn test_size_update_accepted_by_decoder() {
    let mut encoder = HpackEncoder::new();
    let mut decoder = fluke_hpack::Decoder::new();

    let mut buf = Vec::new();
    encoder.set_max_table_size(&mut buf, 256).unwrap();
    encoder.encode(&mut buf, b"x-custom", b"value", false).unwrap();

    assert_eq!(
        decoder.decode(&buf).unwrap(),
        vec![(b"x-custom".to_vec(), b"value".to_vec())]
    );
}

#[test]
fn test_updates_append_in_call_order() {
    let mut encoder = HpackEncoder::new();
    let mut buf = Vec::new();
    encoder.set_max_table_size(&mut buf, 0).unwrap();
    encoder.set_max_table_size(&mut buf, 4096).unwrap();
    assert_eq!(buf, vec![0x20, 0x3f, 0xe1, 0x1f]);
    assert_eq!(encoder.max_table_size(), 4096);
}
