//! Bit-level packing and unpacking.
//!
//! Bits are grouped into bytes MSB-first: the first bit of a sequence lands
//! in bit 7 of the first byte. A sequence whose length is not a multiple of
//! 8 is zero-padded in the low-order bits of its final byte.
//!
//! The number of meaningful bits in the final byte travels separately as a
//! single count `r`:
//!
//! - `1..=8`: keep the first `r` bits of the final byte.
//! - `0`: discard the final byte entirely. Older writers emit this when the
//!   bit length is a multiple of 8, so the discarded byte may hold message
//!   bits; [`decompress`](crate::decompress) then returns only the code words
//!   that end before it.

use crate::error::{Error, Result};

/// Largest accepted final-byte count.
pub const MAX_FINAL_BITS: u8 = 8;

/// Pack an ordered bit sequence into bytes, MSB-first.
///
/// Convenience over [`BitWriter`] for bits already held in a slice; the
/// codec writes code words into a `BitWriter` directly.
pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(bits.len());
    writer.extend(bits);
    writer.into_bytes()
}

/// Unpack `bytes` into bits, keeping only `final_bits` bits of the last byte.
///
/// Collects a [`BitReader`] bounded by [`bit_len`]; the codec uses that
/// reader directly instead of materializing the bits.
///
/// # Errors
/// Returns `Error::MalformedHeader` if `final_bits > 8`, and
/// `Error::TruncatedMessage` if `bytes` is empty.
pub fn unpack(bytes: &[u8], final_bits: u8) -> Result<Vec<bool>> {
    let bit_len = bit_len(bytes.len(), final_bits)?;
    Ok(BitReader::with_limit(bytes, bit_len).collect())
}

/// Number of meaningful bits in `byte_len` packed bytes whose final byte
/// carries `final_bits` message bits.
pub fn bit_len(byte_len: usize, final_bits: u8) -> Result<usize> {
    if final_bits > MAX_FINAL_BITS {
        return Err(Error::malformed(format!(
            "final-byte count {final_bits} exceeds {MAX_FINAL_BITS}"
        )));
    }
    if byte_len == 0 {
        return Err(Error::truncated(format!(
            "final-byte count {final_bits} declared but no message bytes follow"
        )));
    }
    // r = 0 drops all 8 bits of the last byte.
    Ok((byte_len - 1) * 8 + final_bits as usize)
}

/// Accumulates bits MSB-first into a byte buffer.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_len: 0,
        }
    }

    /// Append one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            // Non-empty after the push above.
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << (7 - offset);
            }
        }
        self.bit_len += 1;
    }

    /// Append every bit of `bits` in order.
    pub fn extend(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push(bit);
        }
    }

    /// Append the 8 bits of `byte`, most significant first.
    pub fn push_byte(&mut self, byte: u8) {
        for shift in (0..8).rev() {
            self.push((byte >> shift) & 1 == 1);
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Finish writing; the final byte is zero-padded.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Reads bits MSB-first from a byte slice, up to a fixed bit count.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> BitReader<'a> {
    /// Read every bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_limit(bytes, bytes.len() * 8)
    }

    /// Read at most `bit_len` bits of `bytes`.
    pub fn with_limit(bytes: &'a [u8], bit_len: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            end: bit_len.min(bytes.len() * 8),
        }
    }

    /// Bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Read 8 bits as a byte, MSB-first. `None` if fewer than 8 remain.
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.remaining() < 8 {
            return None;
        }
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | u8::from(self.next()?);
        }
        Some(byte)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        let bit = (self.bytes[self.pos / 8] >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitReader<'_> {}
