//! HPACK: Header Compression for HTTP/2 (RFC 7541)
//!
//! The framing stage only needs two things from a compressor: append one
//! field to a header block, and resize the dynamic table. [`EntropyCoder`]
//! captures that boundary; [`HpackEncoder`] implements it on top of
//! `fluke-hpack`.

use std::io;

use fluke_hpack::encoder::encode_integer_into;

/// A header field to compress. Names and values are raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H2Header {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl H2Header {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The compressor the framing stage encodes header blocks with.
///
/// Implementations own the dynamic table. Both operations append to `buf`,
/// which the stage turns into the next header block.
pub trait EntropyCoder {
    /// Append the compressed representation of one field.
    ///
    /// `sensitive` fields must never enter the dynamic table.
    fn encode(
        &mut self,
        buf: &mut Vec<u8>,
        name: &[u8],
        value: &[u8],
        sensitive: bool,
    ) -> io::Result<()>;

    /// Resize the dynamic table and append the matching size update instruction.
    fn set_max_table_size(&mut self, buf: &mut Vec<u8>, size: u32) -> io::Result<()>;
}

/// HPACK encoder for HTTP/2 header blocks.
/// Wraps `fluke_hpack::Encoder` which maintains dynamic table state per-connection.
pub struct HpackEncoder {
    inner: fluke_hpack::Encoder<'static>,
    max_table_size: u32,
}

impl std::fmt::Debug for HpackEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HpackEncoder")
            .field("max_table_size", &self.max_table_size)
            .finish()
    }
}

impl Default for HpackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Initial dynamic table size (RFC 7541 Section 4.2)
pub const DEFAULT_TABLE_SIZE: u32 = 4096;

impl HpackEncoder {
    pub fn new() -> Self {
        Self {
            inner: fluke_hpack::Encoder::new(),
            max_table_size: DEFAULT_TABLE_SIZE,
        }
    }

    /// Current dynamic table capacity
    pub fn max_table_size(&self) -> u32 {
        self.max_table_size
    }

    /// Encode a whole header list into a fresh header block.
    pub fn encode_all(&mut self, headers: &[H2Header]) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        for h in headers {
            self.encode(&mut buf, &h.name, &h.value, false)?;
        }
        Ok(buf)
    }
}

impl EntropyCoder for HpackEncoder {
    fn encode(
        &mut self,
        buf: &mut Vec<u8>,
        name: &[u8],
        value: &[u8],
        sensitive: bool,
    ) -> io::Result<()> {
        if sensitive {
            // Literal Header Field Never Indexed, new name (RFC 7541 Section 6.2.3)
            encode_integer_into(0, 4, 0x10, buf)?;
            write_string(buf, name)?;
            write_string(buf, value)?;
            return Ok(());
        }
        self.inner.encode_header_into((name, value), buf)
    }

    fn set_max_table_size(&mut self, buf: &mut Vec<u8>, size: u32) -> io::Result<()> {
        let size_usize = usize::try_from(size).unwrap_or(usize::MAX);
        // Dynamic Table Size Update (RFC 7541 Section 6.3)
        encode_integer_into(size_usize, 5, 0x20, buf)?;
        self.inner.set_max_table_size(size_usize);
        self.max_table_size = size;
        Ok(())
    }
}

/// Append a raw (non-Huffman) string literal (RFC 7541 Section 5.2)
fn write_string(buf: &mut Vec<u8>, s: &[u8]) -> io::Result<()> {
    encode_integer_into(s.len(), 7, 0x00, buf)?;
    buf.extend_from_slice(s);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
