//! Compression settings.

/// How the count of meaningful bits in the final message byte is written.
///
/// Readers accept either convention: a count of 0 discards the final byte,
/// 1 through 8 keep that many of its leading bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailerMode {
    /// Count in `1..=8`; 8 marks a final byte made entirely of message bits.
    #[default]
    Explicit,
    /// Count is the bit length modulo 8.
    ///
    /// Byte-compatible with older writers. A message whose bit length is a
    /// multiple of 8 is written with a count of 0, so its last byte is
    /// discarded on decode: only the code words that end before that byte
    /// are recovered.
    Legacy,
}

impl TrailerMode {
    /// Final-byte count for a message of `bit_len` bits.
    pub fn final_bits(self, bit_len: usize) -> u8 {
        match self {
            TrailerMode::Explicit if bit_len == 0 => 0,
            TrailerMode::Explicit => ((bit_len - 1) % 8 + 1) as u8,
            TrailerMode::Legacy => (bit_len % 8) as u8,
        }
    }
}

/// Settings for [`compress_with`](crate::compress_with).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Final-byte count convention.
    pub trailer: TrailerMode,
}

impl Config {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `trailer` for the final-byte count.
    pub fn with_trailer(mut self, trailer: TrailerMode) -> Self {
        self.trailer = trailer;
        self
    }
}
