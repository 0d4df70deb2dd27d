//! The outbound header framing stage.
//!
//! [`HeaderFramer`] turns header blocks into one HEADERS frame followed by as
//! many CONTINUATION frames as the max frame size requires. The HEADERS frame
//! comes back from [`HeaderFramer::push`] right away; continuations are only
//! produced when the downstream asks for them with [`HeaderFramer::pull`], so
//! a stalled writer never makes the stage run ahead of it.
//!
//! HTTP/2 forbids interleaving header blocks, so while continuations are
//! pending the stage refuses any other event.
//!
//! A header block that fails after encoding has started (coder error or size
//! bound) leaves the HPACK tables out of step with the peer. The stage is
//! then poisoned and refuses everything until it is dropped.

use tracing::{debug, trace, warn};

use crate::config::FramerConfig;
use crate::error::FramingError;
use crate::frame::{PrioritySpec, WireFrame, MAX_STREAM_ID, PRIORITY_SPEC_LEN};
use crate::hpack::{EntropyCoder, H2Header, HpackEncoder};
use crate::settings::{clamp_table_size, settings_id, SettingsAck};

/// A header list ready to be compressed and framed for one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub stream_id: u32,
    pub end_stream: bool,
    pub headers: Vec<H2Header>,
    /// Only ever sent on the HEADERS frame
    pub priority: Option<PrioritySpec>,
}

impl HeaderBlock {
    pub fn new(stream_id: u32, headers: Vec<H2Header>) -> Self {
        Self {
            stream_id,
            end_stream: false,
            headers,
            priority: None,
        }
    }

    pub fn with_end_stream(mut self, end_stream: bool) -> Self {
        self.end_stream = end_stream;
        self
    }

    pub fn with_priority(mut self, priority: PrioritySpec) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Events accepted by the framing stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramerEvent {
    /// A header block to compress and frame
    Headers(HeaderBlock),
    /// Settings the peer acknowledged
    SettingsAck(SettingsAck),
}

impl From<HeaderBlock> for FramerEvent {
    fn from(block: HeaderBlock) -> Self {
        FramerEvent::Headers(block)
    }
}

impl From<SettingsAck> for FramerEvent {
    fn from(ack: SettingsAck) -> Self {
        FramerEvent::SettingsAck(ack)
    }
}

/// Unsent tail of a header block.
#[derive(Debug)]
struct FragmentCursor {
    stream_id: u32,
    block: Vec<u8>,
    offset: usize,
}

impl FragmentCursor {
    fn remaining(&self) -> usize {
        self.block.len() - self.offset
    }

    /// Take the next fragment of at most `max` bytes.
    /// Returns it along with whether the block is now fully sent.
    fn take(&mut self, max: usize) -> (Vec<u8>, bool) {
        let end = self.block.len().min(self.offset + max);
        let fragment = self.block[self.offset..end].to_vec();
        self.offset = end;
        (fragment, self.offset == self.block.len())
    }
}

#[derive(Debug, Default)]
enum FramerState {
    #[default]
    Idle,
    Draining(FragmentCursor),
    /// Terminal: the coder's table no longer matches what the peer has seen
    Failed,
}

/// Sans-I/O HTTP/2 header framing stage for one connection.
#[derive(Debug)]
pub struct HeaderFramer<C = HpackEncoder> {
    coder: C,
    config: FramerConfig,
    state: FramerState,
    /// Table size updates waiting to prefix the next header block
    scratch: Vec<u8>,
}

impl Default for HeaderFramer<HpackEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderFramer<HpackEncoder> {
    pub fn new() -> Self {
        Self::with_coder(HpackEncoder::new(), FramerConfig::default())
    }
}

impl<C: EntropyCoder> HeaderFramer<C> {
    pub fn with_coder(coder: C, config: FramerConfig) -> Self {
        Self {
            coder,
            config,
            state: FramerState::Idle,
            scratch: Vec::new(),
        }
    }

    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    pub fn coder(&self) -> &C {
        &self.coder
    }

    /// True while a header block still has continuation frames to send
    pub fn is_draining(&self) -> bool {
        matches!(self.state, FramerState::Draining(_))
    }

    /// True once an encoding failure has made the framer unusable
    pub fn is_failed(&self) -> bool {
        matches!(self.state, FramerState::Failed)
    }

    /// Stream whose header block is being drained, if any
    pub fn pending_stream_id(&self) -> Option<u32> {
        match &self.state {
            FramerState::Draining(cursor) => Some(cursor.stream_id),
            FramerState::Idle | FramerState::Failed => None,
        }
    }

    /// Bytes of the current header block not yet handed out
    pub fn pending_len(&self) -> usize {
        match &self.state {
            FramerState::Draining(cursor) => cursor.remaining(),
            FramerState::Idle | FramerState::Failed => 0,
        }
    }

    /// Number of continuation frames left to pull
    pub fn pending_fragments(&self) -> usize {
        self.pending_len().div_ceil(self.config.max_frame_size as usize)
    }

    /// Feed one event and get the frame it produces right away.
    ///
    /// A settings ack is applied and handed back unchanged. A header block
    /// is encoded and its first fragment returned as a HEADERS frame; if it
    /// didn't fit, the rest has to be pulled before the next event.
    ///
    /// Compression failures and oversized blocks poison the framer: every
    /// later call fails with [`FramingError::Poisoned`].
    pub fn push(&mut self, event: impl Into<FramerEvent>) -> Result<WireFrame, FramingError> {
        let event = event.into();

        match &self.state {
            FramerState::Idle => {}
            FramerState::Draining(cursor) => {
                let pending_stream_id = cursor.stream_id;
                return Err(match event {
                    FramerEvent::Headers(block) => FramingError::HeaderBlockInProgress {
                        pending_stream_id,
                        stream_id: block.stream_id,
                    },
                    FramerEvent::SettingsAck(_) => {
                        FramingError::SettingsDuringHeaderBlock { pending_stream_id }
                    }
                });
            }
            FramerState::Failed => return Err(FramingError::Poisoned),
        }

        let result = match event {
            FramerEvent::SettingsAck(ack) => self
                .apply_settings(&ack)
                .map(|()| WireFrame::SettingsAck(ack)),
            FramerEvent::Headers(block) => self.start_header_block(block),
        };

        if let Err(err) = &result {
            if matches!(
                err,
                FramingError::Compression(_) | FramingError::HeaderBlockTooLarge { .. }
            ) {
                warn!(%err, "hpack state no longer matches the peer, framer is poisoned");
                self.state = FramerState::Failed;
                self.scratch.clear();
            }
        }
        result
    }

    /// Produce the next CONTINUATION frame, or `None` when no block is pending.
    pub fn pull(&mut self) -> Option<WireFrame> {
        let FramerState::Draining(cursor) = &mut self.state else {
            return None;
        };

        let (payload, end_headers) = cursor.take(self.config.max_frame_size as usize);
        let stream_id = cursor.stream_id;
        trace!(%stream_id, len = payload.len(), %end_headers, "continuation fragment");

        if end_headers {
            self.state = FramerState::Idle;
        }

        Some(WireFrame::Continuation {
            stream_id,
            end_headers,
            payload,
        })
    }

    /// Iterator pulling continuation frames until the current block is done
    pub fn continuations(&mut self) -> Continuations<'_, C> {
        Continuations { framer: self }
    }

    /// Push one event and drain every fragment it produces, in order.
    ///
    /// For downstreams that don't need backpressure.
    pub fn process(&mut self, event: impl Into<FramerEvent>) -> Result<Vec<WireFrame>, FramingError> {
        let first = self.push(event)?;
        let mut frames = Vec::with_capacity(1 + self.pending_fragments());
        frames.push(first);
        frames.extend(self.continuations());
        Ok(frames)
    }

    fn apply_settings(&mut self, ack: &SettingsAck) -> Result<(), FramingError> {
        for setting in &ack.settings {
            match setting.id {
                settings_id::HEADER_TABLE_SIZE => {
                    let (size, clamped) = clamp_table_size(setting.value);
                    if clamped {
                        warn!(value = setting.value, %size, "header table size out of range, clamping");
                    }
                    debug!(%size, "resizing hpack dynamic table");
                    self.coder
                        .set_max_table_size(&mut self.scratch, size)
                        .map_err(FramingError::Compression)?;
                }
                id => {
                    trace!(%id, value = setting.value, "ignoring setting");
                }
            }
        }
        Ok(())
    }

    fn start_header_block(&mut self, block: HeaderBlock) -> Result<WireFrame, FramingError> {
        let HeaderBlock {
            stream_id,
            end_stream,
            headers,
            priority,
        } = block;

        if stream_id == 0 || stream_id > MAX_STREAM_ID {
            return Err(FramingError::InvalidStreamId(stream_id));
        }

        // pending size updates must lead the block
        let mut payload = std::mem::take(&mut self.scratch);
        for h in &headers {
            self.coder
                .encode(&mut payload, &h.name, &h.value, false)
                .map_err(FramingError::Compression)?;
        }

        if payload.len() > self.config.max_header_block_size {
            return Err(FramingError::HeaderBlockTooLarge {
                size: payload.len(),
                max: self.config.max_header_block_size,
            });
        }

        let max_frame_size = self.config.max_frame_size as usize;
        let first_len = match priority {
            Some(_) => max_frame_size - PRIORITY_SPEC_LEN,
            None => max_frame_size,
        };

        if payload.len() <= first_len {
            debug!(%stream_id, len = payload.len(), "header block fits in a single frame");
            return Ok(WireFrame::Headers {
                stream_id,
                end_stream,
                end_headers: true,
                payload,
                priority,
            });
        }

        let rest = payload.split_off(first_len);
        debug!(
            %stream_id,
            len = first_len + rest.len(),
            %max_frame_size,
            "splitting header block into continuation frames"
        );
        self.state = FramerState::Draining(FragmentCursor {
            stream_id,
            block: rest,
            offset: 0,
        });

        Ok(WireFrame::Headers {
            stream_id,
            end_stream,
            end_headers: false,
            payload,
            priority,
        })
    }
}

/// Pulls continuation frames out of a [`HeaderFramer`].
/// See [`HeaderFramer::continuations`].
#[derive(Debug)]
pub struct Continuations<'a, C> {
    framer: &'a mut HeaderFramer<C>,
}

impl<C: EntropyCoder> Iterator for Continuations<'_, C> {
    type Item = WireFrame;

    fn next(&mut self) -> Option<WireFrame> {
        self.framer.pull()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.framer.pending_fragments();
        (n, Some(n))
    }
}
