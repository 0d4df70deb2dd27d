//! h2-header-framing: sans-I/O outbound HTTP/2 header framing
//!
//! This crate takes header lists that are ready to go out on a stream,
//! compresses them with HPACK and cuts the result into a HEADERS frame plus
//! as many CONTINUATION frames as the max frame size requires.
//!
//! # Features
//!
//! - **Sans-I/O Design**: no async runtime, no sockets, just values in and out
//! - **Backpressure**: the HEADERS frame is returned immediately, CONTINUATION
//!   frames only when the downstream pulls them
//! - **Dynamic table resizing**: acknowledged SETTINGS_HEADER_TABLE_SIZE values
//!   resize the HPACK encoder (out-of-range values are clamped)
//! - **HPACK Support**: header compression via fluke-hpack, behind the
//!   [`EntropyCoder`] trait
//! - **Wire encoding**: every [`WireFrame`] serializes to RFC 9113 frame bytes
//!
//! # Quick Start
//!
//! ```rust
//! use h2_header_framing::{H2Header, HeaderBlock, HeaderFramer, WireFrame};
//!
//! let mut framer = HeaderFramer::new();
//!
//! let block = HeaderBlock::new(1, vec![
//!     H2Header::new(":status", "200"),
//!     H2Header::new("content-type", "text/plain"),
//! ])
//! .with_end_stream(true);
//!
//! // The first fragment comes back right away
//! let first = framer.push(block).unwrap();
//! assert!(matches!(first, WireFrame::Headers { end_headers: true, .. }));
//!
//! // Continuations (none here) are pulled when the writer has room
//! assert!(framer.pull().is_none());
//!
//! let mut out = Vec::new();
//! first.encode_into(&mut out);
//! ```
//!
//! # Architecture
//!
//! It provides:
//! - The framing state machine ([`HeaderFramer`])
//! - Frame encoding (frames → bytes)
//! - An HPACK encoder wrapper
//!
//! It does NOT provide:
//! - The inbound direction (CONTINUATION reassembly, HPACK decoding)
//! - Transport, TLS, or settings negotiation
//! - Flow control, priority scheduling, or stream multiplexing

pub mod config;
pub mod error;
pub mod frame;
pub mod framing;
pub mod hpack;
pub mod settings;

pub use config::{FramerConfig, DEFAULT_MAX_FRAME_SIZE, MAX_ALLOWED_FRAME_SIZE, MAX_HEADER_BLOCK_SIZE};
pub use error::FramingError;
pub use frame::{
    error_code, flags, frame_type, H2FrameHeader, PrioritySpec, WireFrame, FRAME_HEADER_LEN,
    PRIORITY_SPEC_LEN,
};
pub use framing::{Continuations, FramerEvent, HeaderBlock, HeaderFramer};
pub use hpack::{EntropyCoder, H2Header, HpackEncoder};
pub use settings::{settings_id, Setting, SettingsAck, MAX_TABLE_SIZE};
