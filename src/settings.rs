//! Settings acknowledgements flowing through the framing stage.

/// HTTP/2 SETTINGS identifiers (RFC 9113 Section 6.5.2)
pub mod settings_id {
    pub const HEADER_TABLE_SIZE: u16 = 0x1;
    pub const ENABLE_PUSH: u16 = 0x2;
    pub const MAX_CONCURRENT_STREAMS: u16 = 0x3;
    pub const INITIAL_WINDOW_SIZE: u16 = 0x4;
    pub const MAX_FRAME_SIZE: u16 = 0x5;
    pub const MAX_HEADER_LIST_SIZE: u16 = 0x6;
}

/// Largest dynamic table size the entropy coder accepts.
pub const MAX_TABLE_SIZE: u32 = u32::MAX;

/// One (identifier, value) entry.
///
/// The value is wider than the 32-bit wire field so that sign-extended values
/// from upstream parsers arrive intact and can be clamped here instead of
/// silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    pub id: u16,
    pub value: i64,
}

impl Setting {
    pub fn new(id: u16, value: i64) -> Self {
        Self { id, value }
    }

    pub fn header_table_size(value: i64) -> Self {
        Self::new(settings_id::HEADER_TABLE_SIZE, value)
    }
}

/// Settings the peer has just accepted, in the order it sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsAck {
    pub settings: Vec<Setting>,
}

impl SettingsAck {
    pub fn new(settings: Vec<Setting>) -> Self {
        Self { settings }
    }

    /// Header table sizes carried by this ack, in order
    pub fn header_table_sizes(&self) -> impl Iterator<Item = i64> + '_ {
        self.settings
            .iter()
            .filter(|s| s.id == settings_id::HEADER_TABLE_SIZE)
            .map(|s| s.value)
    }
}

impl From<Vec<(u16, u32)>> for SettingsAck {
    /// Build from the `(id, value)` pairs a frame parser hands out
    fn from(pairs: Vec<(u16, u32)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, value)| Setting::new(id, value as i64))
                .collect(),
        )
    }
}

/// Clamp a header table size into the coder's range.
///
/// Returns the size to apply and whether clamping happened. Negative values
/// are treated as overflowed unsigned quantities and mapped to the maximum.
pub fn clamp_table_size(value: i64) -> (u32, bool) {
    match u32::try_from(value) {
        Ok(size) => (size, false),
        Err(_) => (MAX_TABLE_SIZE, true),
    }
}
