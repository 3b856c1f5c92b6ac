//! # Static Huffman Compression
//!
//! *Two passes over a byte buffer: count, then code.*
//!
//! ## Intuition First
//!
//! In plain storage every byte costs 8 bits, whether it is the `e` that
//! appears on every line or the `~` that appears once. Huffman coding hands
//! out shorter bit strings to frequent bytes and longer ones to rare bytes.
//! No bit string is a prefix of another, so the decoder never needs a
//! delimiter to know where one byte's code ends.
//!
//! ## The Problem
//!
//! Given the count of each byte value in a message, find a prefix-free code
//! minimizing the total encoded length, and ship it alongside the message so
//! the receiver can invert it.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon      Entropy as the lower bound on average code length
//! 1949  Fano         Top-down splitting: prefix-free, not always optimal
//! 1952  Huffman      Bottom-up merging of the two rarest nodes: optimal
//! 1985  Vitter       Adaptive (one-pass) Huffman coding
//! ```
//!
//! ## The Algorithm
//!
//! 1. Count each byte value ([`FrequencyTable`]).
//! 2. Start with one leaf per byte value; repeatedly join the two
//!    lowest-count nodes under a new parent until one root is left
//!    ([`HuffmanTree`]).
//! 3. A byte's code is its path from the root, `0` for left, `1` for right
//!    ([`Codebook`]).
//! 4. Concatenate the codes of the message and pack them into bytes
//!    ([`Encoder`], [`bitstream`]).
//!
//! Decoding walks the tree bit by bit and emits a byte at every leaf
//! ([`Decoder`]).
//!
//! ## Container
//!
//! The tree travels in front of the message as a preorder bit string, see
//! [`codec`] for the byte layout. The count of meaningful bits in the final
//! message byte is written in `1..=8` by default; [`TrailerMode::Legacy`]
//! writes `bit_len mod 8` instead for byte compatibility with older output.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(n + k \log k)$ for `n` input bytes and `k <= 256` distinct values.
//! - **Space**: $O(n)$; input, bits and output are all held in memory.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: no tree exists, [`Error::EmptyInput`].
//! 2. **Header overhead**: a short input with many distinct bytes can grow,
//!    since the tree costs 9 bits per distinct byte.
//!
//! ## Quick Start
//!
//! ```rust
//! let data = b"abracadabra";
//! let packed = hufzip::compress(data)?;
//! assert_eq!(hufzip::decompress(&packed)?, data.to_vec());
//! # Ok::<(), hufzip::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod codebook;
pub mod codec;
pub mod config;
pub mod error;
pub mod frequency;
pub mod stream;
pub mod tree;

pub use codebook::Codebook;
pub use codec::{compress, compress_with, decompress, Decoder, Encoder, Frame};
pub use config::{Config, TrailerMode};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use stream::{compress_stream, decompress_stream, Stats};
pub use tree::HuffmanTree;
