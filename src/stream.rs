//! Whole-stream adapters over [`Read`] and [`Write`].
//!
//! The codec needs the complete frequency table before it can emit a single
//! code word, so both directions buffer the entire input in memory.

use std::io::{Read, Write};

use tracing::debug;

use crate::codec;
use crate::config::Config;
use crate::error::Result;

/// Sizes of one compression or decompression pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Bytes read from the input.
    pub input_len: u64,
    /// Bytes written to the output.
    pub output_len: u64,
}

impl Stats {
    /// Fraction of the input saved: `1 - output / input`.
    ///
    /// Negative when the output grew, 0.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        1.0 - self.output_len as f64 / self.input_len as f64
    }
}

/// Compress everything from `reader` into `writer`.
///
/// Nothing reaches `writer` unless the whole input encodes.
pub fn compress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    config: &Config,
) -> Result<Stats> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let output = codec::compress_with(&input, config)?;
    writer.write_all(&output)?;
    writer.flush()?;

    let stats = Stats {
        input_len: input.len() as u64,
        output_len: output.len() as u64,
    };
    debug!(?stats, "compressed stream");
    Ok(stats)
}

/// Decompress everything from `reader` into `writer`.
///
/// Nothing reaches `writer` unless the whole input decodes.
pub fn decompress_stream<R: Read, W: Write>(mut reader: R, mut writer: W) -> Result<Stats> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let output = codec::decompress(&input)?;
    writer.write_all(&output)?;
    writer.flush()?;

    let stats = Stats {
        input_len: input.len() as u64,
        output_len: output.len() as u64,
    };
    debug!(?stats, "decompressed stream");
    Ok(stats)
}
