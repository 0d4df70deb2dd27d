use crate::frame::error_code;

/// Failures of the framing stage.
///
/// None of these are recoverable locally: they mean the upstream
/// demultiplexer broke its contract (or was misconfigured), and the
/// connection should be torn down with [`FramingError::h2_error_code`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    /// A header block arrived while another one is still being drained
    #[error("header block for stream {stream_id} arrived while stream {pending_stream_id} still has continuation frames pending")]
    HeaderBlockInProgress {
        pending_stream_id: u32,
        stream_id: u32,
    },

    /// A settings ack arrived in the middle of a header block
    #[error("settings ack arrived while stream {pending_stream_id} still has continuation frames pending")]
    SettingsDuringHeaderBlock { pending_stream_id: u32 },

    /// Header blocks can't be sent on stream 0 or with the reserved bit set
    #[error("invalid stream id {0} for a header block")]
    InvalidStreamId(u32),

    /// The encoded block is larger than the configured bound
    #[error("Header block too large ({size} bytes, max {max})")]
    HeaderBlockTooLarge { size: usize, max: usize },

    /// The entropy coder could not represent a field
    #[error("hpack encoding error: {0}")]
    Compression(#[source] std::io::Error),

    /// An earlier encoding failure left the coder out of step with the peer
    #[error("framer is unusable after an earlier header block failed to encode")]
    Poisoned,

    /// max frame size outside of 16384..=16777215
    #[error("invalid max frame size {0}, must be between 16384 and 16777215")]
    InvalidMaxFrameSize(u32),
}

impl FramingError {
    /// HTTP/2 error code to put in the GOAWAY that tears the connection down
    pub fn h2_error_code(&self) -> u32 {
        match self {
            FramingError::HeaderBlockInProgress { .. }
            | FramingError::SettingsDuringHeaderBlock { .. }
            | FramingError::InvalidStreamId(_) => error_code::PROTOCOL_ERROR,
            FramingError::HeaderBlockTooLarge { .. } => error_code::INTERNAL_ERROR,
            FramingError::Compression(_) | FramingError::Poisoned => error_code::COMPRESSION_ERROR,
            FramingError::InvalidMaxFrameSize(_) => error_code::FRAME_SIZE_ERROR,
        }
    }
}
