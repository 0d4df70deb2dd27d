//! Tests for serializing emitted frames to wire bytes

use h2_header_framing::{
    flags, frame_type, H2FrameHeader, HeaderBlock, HeaderFramer, PrioritySpec, Setting,
    SettingsAck, DEFAULT_MAX_FRAME_SIZE, FRAME_HEADER_LEN, PRIORITY_SPEC_LEN,
};
use pretty_assertions::assert_eq;

use crate::helpers::{encoded, headers_with_cookie};

/// Split a byte stream back into (header, payload) pairs
fn parse_frames(mut data: &[u8]) -> Vec<(H2FrameHeader, Vec<u8>)> {
    let mut frames = Vec::new();
    while let Some(header) = H2FrameHeader::parse(data) {
        let total = header.total_size();
        frames.push((header, data[FRAME_HEADER_LEN..total].to_vec()));
        data = &data[total..];
    }
    assert!(data.is_empty(), "trailing bytes after last frame");
    frames
}

#[test]
fn test_split_block_on_the_wire() {
    let headers = headers_with_cookie(45_000);
    let block = encoded(&headers);

    let mut framer = HeaderFramer::new();
    let mut wire = Vec::new();
    for frame in framer
        .process(HeaderBlock::new(1, headers).with_end_stream(true))
        .unwrap()
    {
        frame.encode_into(&mut wire);
    }

    let frames = parse_frames(&wire);
    assert!(frames.len() >= 3);

    let (first, rest) = frames.split_first().unwrap();
    assert_eq!(first.0.frame_type, frame_type::HEADERS);
    assert_eq!(first.0.flags, flags::END_STREAM);
    assert_eq!(first.0.stream_id, 1);

    for (i, (header, _)) in rest.iter().enumerate() {
        assert_eq!(header.frame_type, frame_type::CONTINUATION);
        assert_eq!(header.stream_id, 1);
        assert_eq!(header.is_end_headers(), i == rest.len() - 1);
    }

    for (header, _) in &frames {
        assert!(header.length <= DEFAULT_MAX_FRAME_SIZE);
    }

    let reassembled: Vec<u8> = frames.into_iter().flat_map(|(_, p)| p).collect();
    assert_eq!(reassembled, block);
}

#[test]
fn test_priority_block_on_the_wire() {
    let headers = headers_with_cookie(20_000);
    let block = encoded(&headers);
    let priority = PrioritySpec::new(0, 41, false);

    let mut framer = HeaderFramer::new();
    let wire: Vec<u8> = framer
        .process(HeaderBlock::new(3, headers).with_priority(priority))
        .unwrap()
        .iter()
        .flat_map(|f| f.to_bytes())
        .collect();

    let frames = parse_frames(&wire);
    let (first, rest) = frames.split_first().unwrap();
    assert!(first.0.has_priority());
    assert_eq!(first.0.length, DEFAULT_MAX_FRAME_SIZE);
    assert_eq!(PrioritySpec::parse(&first.1), Some(priority));
    assert!(rest.iter().all(|(h, _)| !h.has_priority()));

    let mut reassembled = first.1[PRIORITY_SPEC_LEN..].to_vec();
    for (_, payload) in rest {
        reassembled.extend_from_slice(payload);
    }
    assert_eq!(reassembled, block);
}

#[test]
fn test_settings_ack_on_the_wire() {
    let mut framer = HeaderFramer::new();
    let frame = framer
        .push(SettingsAck::new(vec![Setting::header_table_size(8192)]))
        .unwrap();

    let bytes = frame.to_bytes();
    assert_eq!(bytes.len(), FRAME_HEADER_LEN);
    let header = H2FrameHeader::parse(&bytes).unwrap();
    assert_eq!(header.frame_type, frame_type::SETTINGS);
    assert_eq!(header.flags, flags::ACK);
    assert_eq!(header.stream_id, 0);
    assert_eq!(header.length, 0);
}
