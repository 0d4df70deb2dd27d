//! HTTP/2 wire frames produced by the header framing stage.
//!
//! The stage emits [`WireFrame`] values; [`WireFrame::encode_into`] turns them
//! into the 9-byte frame header + payload layout from RFC 9113 Section 4.1.
//! [`H2FrameHeader::parse`] reads a header back, which is mostly useful for
//! inspecting what went out.
//!
//! Reference: RFC 9113 (HTTP/2)

use crate::settings::SettingsAck;

/// HTTP/2 frame types emitted by this crate (RFC 9113 Section 6)
pub mod frame_type {
    pub const HEADERS: u8 = 0x1;
    pub const SETTINGS: u8 = 0x4;
    pub const CONTINUATION: u8 = 0x9;
}

/// HTTP/2 frame flags
pub mod flags {
    pub const END_STREAM: u8 = 0x1;
    /// Same bit as END_STREAM, only meaningful on SETTINGS and PING
    pub const ACK: u8 = 0x1;
    pub const END_HEADERS: u8 = 0x4;
    pub const PRIORITY: u8 = 0x20;
}

/// HTTP/2 error codes (RFC 9113 Section 7) that framing failures map to
pub mod error_code {
    pub const PROTOCOL_ERROR: u32 = 0x1;
    pub const INTERNAL_ERROR: u32 = 0x2;
    pub const FRAME_SIZE_ERROR: u32 = 0x6;
    pub const COMPRESSION_ERROR: u32 = 0x9;
}

/// Size of the frame header that precedes every payload
pub const FRAME_HEADER_LEN: usize = 9;

/// Size of the stream dependency + weight block on a HEADERS frame with PRIORITY set
pub const PRIORITY_SPEC_LEN: usize = 5;

/// Highest stream identifier (31 bits, high bit reserved)
pub const MAX_STREAM_ID: u32 = 0x7FFF_FFFF;

/// An HTTP/2 frame header (9 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H2FrameHeader {
    pub length: u32, // 24 bits
    pub frame_type: u8,
    pub flags: u8,
    pub stream_id: u32, // 31 bits (high bit reserved)
}

impl H2FrameHeader {
    pub fn new(length: u32, frame_type: u8, flags: u8, stream_id: u32) -> Self {
        Self {
            length,
            frame_type,
            flags,
            stream_id,
        }
    }

    /// Parse a 9-byte frame header
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < FRAME_HEADER_LEN {
            return None;
        }

        let length = ((data[0] as u32) << 16) | ((data[1] as u32) << 8) | (data[2] as u32);
        let stream_id = u32::from_be_bytes([data[5], data[6], data[7], data[8]]) & MAX_STREAM_ID;

        Some(Self {
            length,
            frame_type: data[3],
            flags: data[4],
            stream_id,
        })
    }

    /// Append the 9-byte wire form of this header to `out`
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.push((self.length >> 16) as u8);
        out.push((self.length >> 8) as u8);
        out.push(self.length as u8);
        out.push(self.frame_type);
        out.push(self.flags);
        out.extend_from_slice(&(self.stream_id & MAX_STREAM_ID).to_be_bytes());
    }

    /// Total frame size including header
    pub fn total_size(&self) -> usize {
        FRAME_HEADER_LEN + self.length as usize
    }

    pub fn is_end_stream(&self) -> bool {
        self.flags & flags::END_STREAM != 0
    }

    pub fn is_end_headers(&self) -> bool {
        self.flags & flags::END_HEADERS != 0
    }

    pub fn has_priority(&self) -> bool {
        self.flags & flags::PRIORITY != 0
    }
}

/// Stream dependency and weight, carried on the first HEADERS frame of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrioritySpec {
    pub exclusive: bool,
    pub stream_dependency: u32,
    /// 0-255 on the wire means weight 1-256
    pub weight: u8,
}

impl PrioritySpec {
    pub fn new(stream_dependency: u32, weight: u8, exclusive: bool) -> Self {
        Self {
            exclusive,
            stream_dependency,
            weight,
        }
    }

    /// Parse the 5-byte priority block found at the start of a HEADERS payload
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < PRIORITY_SPEC_LEN {
            return None;
        }
        let raw = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        Some(Self {
            exclusive: raw & !MAX_STREAM_ID != 0,
            stream_dependency: raw & MAX_STREAM_ID,
            weight: data[4],
        })
    }

    pub fn write_into(&self, out: &mut Vec<u8>) {
        let mut raw = self.stream_dependency & MAX_STREAM_ID;
        if self.exclusive {
            raw |= !MAX_STREAM_ID;
        }
        out.extend_from_slice(&raw.to_be_bytes());
        out.push(self.weight);
    }
}

/// A frame emitted downstream by [`HeaderFramer`](crate::HeaderFramer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFrame {
    /// First fragment of a header block
    Headers {
        stream_id: u32,
        end_stream: bool,
        end_headers: bool,
        payload: Vec<u8>,
        priority: Option<PrioritySpec>,
    },
    /// A later fragment of a header block
    Continuation {
        stream_id: u32,
        end_headers: bool,
        payload: Vec<u8>,
    },
    /// Settings acknowledgement, passed through unchanged
    SettingsAck(SettingsAck),
}

impl WireFrame {
    /// Stream the frame belongs to; 0 for the connection-level settings ack
    pub fn stream_id(&self) -> u32 {
        match self {
            WireFrame::Headers { stream_id, .. } | WireFrame::Continuation { stream_id, .. } => {
                *stream_id
            }
            WireFrame::SettingsAck(_) => 0,
        }
    }

    /// Header block fragment carried by this frame (empty for a settings ack)
    pub fn payload(&self) -> &[u8] {
        match self {
            WireFrame::Headers { payload, .. } | WireFrame::Continuation { payload, .. } => {
                payload.as_slice()
            }
            WireFrame::SettingsAck(_) => &[],
        }
    }

    pub fn is_end_headers(&self) -> bool {
        match self {
            WireFrame::Headers { end_headers, .. }
            | WireFrame::Continuation { end_headers, .. } => *end_headers,
            WireFrame::SettingsAck(_) => false,
        }
    }

    pub fn priority(&self) -> Option<PrioritySpec> {
        match self {
            WireFrame::Headers { priority, .. } => *priority,
            _ => None,
        }
    }

    /// Frame header this frame serializes with
    pub fn frame_header(&self) -> H2FrameHeader {
        match self {
            WireFrame::Headers {
                stream_id,
                end_stream,
                end_headers,
                payload,
                priority,
            } => {
                let mut flags_byte = 0x0;
                if *end_stream {
                    flags_byte |= flags::END_STREAM;
                }
                if *end_headers {
                    flags_byte |= flags::END_HEADERS;
                }
                let mut length = payload.len();
                if priority.is_some() {
                    flags_byte |= flags::PRIORITY;
                    length += PRIORITY_SPEC_LEN;
                }
                H2FrameHeader::new(length as u32, frame_type::HEADERS, flags_byte, *stream_id)
            }
            WireFrame::Continuation {
                stream_id,
                end_headers,
                payload,
            } => {
                let flags_byte = if *end_headers { flags::END_HEADERS } else { 0x0 };
                H2FrameHeader::new(
                    payload.len() as u32,
                    frame_type::CONTINUATION,
                    flags_byte,
                    *stream_id,
                )
            }
            WireFrame::SettingsAck(_) => {
                H2FrameHeader::new(0, frame_type::SETTINGS, flags::ACK, 0)
            }
        }
    }

    /// Append the wire form of this frame (header + payload) to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let header = self.frame_header();
        out.reserve(header.total_size());
        header.write_into(out);
        if let Some(priority) = self.priority() {
            priority.write_into(out);
        }
        out.extend_from_slice(self.payload());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }
}
