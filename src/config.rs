use crate::error::FramingError;

/// Initial SETTINGS_MAX_FRAME_SIZE (RFC 9113 Section 6.5.2)
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 16_384;

/// Largest value SETTINGS_MAX_FRAME_SIZE may take (2^24 - 1)
pub const MAX_ALLOWED_FRAME_SIZE: u32 = 16_777_215;

/// Maximum encoded header block size (256 KB).
/// Matches the bound the inbound side puts on reassembled blocks.
pub const MAX_HEADER_BLOCK_SIZE: usize = 256 * 1024;

/// Header framing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramerConfig {
    /// Largest frame payload, in bytes, the peer accepts
    pub max_frame_size: u32,
    /// Largest encoded header block the stage will fragment
    pub max_header_block_size: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            max_header_block_size: MAX_HEADER_BLOCK_SIZE,
        }
    }
}

impl FramerConfig {
    pub fn with_max_frame_size(mut self, max_frame_size: u32) -> Result<Self, FramingError> {
        if !(DEFAULT_MAX_FRAME_SIZE..=MAX_ALLOWED_FRAME_SIZE).contains(&max_frame_size) {
            return Err(FramingError::InvalidMaxFrameSize(max_frame_size));
        }
        self.max_frame_size = max_frame_size;
        Ok(self)
    }

    pub fn with_max_header_block_size(mut self, max_header_block_size: usize) -> Self {
        self.max_header_block_size = max_header_block_size;
        self
    }
}
