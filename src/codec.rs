//! Message encoding, decoding and the compressed container.
//!
//! # Container layout
//!
//! ```text
//! offset      size      field
//! 0           2         tree length `n`, little-endian u16
//! 2           n         packed preorder tree
//! 2 + n       1         meaningful bits in the final message byte
//! 3 + n       rest      packed message bits
//! ```

use tracing::{debug, trace};

use crate::bitstream::{self, BitReader, BitWriter};
use crate::codebook::Codebook;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Size of the tree length field.
pub const TREE_LEN_BYTES: usize = 2;

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct Encoder {
    codebook: Codebook,
}

impl Encoder {
    /// Create an encoder from an existing codebook.
    pub fn new(codebook: Codebook) -> Self {
        Self { codebook }
    }

    /// Create an encoder for the codes of `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        Self::new(Codebook::from_tree(tree))
    }

    /// The codebook in use.
    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// Append the code word of every byte of `data` to `writer`.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for the first byte without a code word.
    /// Bits of the bytes before it have already been written.
    pub fn encode_into(&self, data: &[u8], writer: &mut BitWriter) -> Result<()> {
        for code in self.codes(data) {
            writer.extend(code?);
        }
        Ok(())
    }

    /// Encode a byte sequence into an unpacked bit sequence.
    ///
    /// Same code words as [`encode_into`](Self::encode_into), which
    /// [`compress`] uses to write them packed.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<bool>> {
        let mut bits = Vec::new();
        for code in self.codes(data) {
            bits.extend_from_slice(code?);
        }
        Ok(bits)
    }

    fn codes<'s>(&'s self, data: &'s [u8]) -> impl Iterator<Item = Result<&'s [bool]>> + 's {
        data.iter()
            .map(|&b| self.codebook.get(b).ok_or(Error::UnknownSymbol(b)))
    }
}

/// Huffman decoder.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    tree: &'a HuffmanTree,
}

impl<'a> Decoder<'a> {
    /// Create a decoder walking `tree`.
    pub fn new(tree: &'a HuffmanTree) -> Self {
        Self { tree }
    }

    /// Decode a bit sequence into bytes.
    ///
    /// Against a single-leaf tree every bit yields the one symbol.
    ///
    /// # Errors
    /// Returns `Error::TruncatedMessage` if the bits end inside a code word.
    pub fn decode<I>(&self, bits: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = bool>,
    {
        let (out, complete) = self.walk(bits);
        if !complete {
            return Err(Error::truncated(format!(
                "message ends inside a code word after {} bytes",
                out.len()
            )));
        }
        Ok(out)
    }

    /// Decode every complete code word, dropping a trailing partial one.
    ///
    /// This is how streams whose final byte was discarded are read.
    pub fn decode_prefix<I>(&self, bits: I) -> Vec<u8>
    where
        I: IntoIterator<Item = bool>,
    {
        self.walk(bits).0
    }

    /// Walk the tree; the flag is false if the bits end inside a code word.
    fn walk<I>(&self, bits: I) -> (Vec<u8>, bool)
    where
        I: IntoIterator<Item = bool>,
    {
        let tree = self.tree;
        let root = tree.root();
        let bits = bits.into_iter();

        if let Node::Leaf { symbol, .. } = *tree.node(root) {
            return (bits.map(|_| symbol).collect(), true);
        }

        let mut out = Vec::with_capacity(bits.size_hint().0 / 2);
        let mut curr = root;
        for bit in bits {
            if let Node::Leaf { symbol, .. } = *tree.node(curr) {
                out.push(symbol);
                curr = root;
            }
            if let Node::Internal { left, right, .. } = *tree.node(curr) {
                curr = if bit { right } else { left };
            }
        }

        match *tree.node(curr) {
            Node::Leaf { symbol, .. } => {
                out.push(symbol);
                (out, true)
            }
            Node::Internal { .. } => (out, curr == root),
        }
    }
}

/// The sections of a compressed container, borrowed from its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Packed preorder tree.
    pub tree: &'a [u8],
    /// Meaningful bits in the final message byte.
    pub final_bits: u8,
    /// Packed message bits.
    pub message: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Split a container into its sections.
    ///
    /// # Errors
    /// Returns `Error::MalformedHeader` if the tree length field or the tree
    /// itself is cut short, and `Error::TruncatedMessage` if nothing follows
    /// the tree.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let (len_bytes, rest) = data
            .split_first_chunk::<TREE_LEN_BYTES>()
            .ok_or_else(|| Error::malformed("missing tree length"))?;
        let tree_len = u16::from_le_bytes(*len_bytes) as usize;

        if rest.len() < tree_len {
            return Err(Error::malformed(format!(
                "tree length {tree_len} exceeds the {} bytes available",
                rest.len()
            )));
        }
        let (tree, rest) = rest.split_at(tree_len);

        let (&final_bits, message) = rest
            .split_first()
            .ok_or_else(|| Error::truncated("missing final-byte count"))?;

        Ok(Self {
            tree,
            final_bits,
            message,
        })
    }

    /// Serialized size of this frame.
    pub fn encoded_len(&self) -> usize {
        TREE_LEN_BYTES + self.tree.len() + 1 + self.message.len()
    }

    /// Append the container bytes to `out`.
    ///
    /// # Errors
    /// Returns `Error::MalformedHeader` if the tree does not fit the length field.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let tree_len = u16::try_from(self.tree.len()).map_err(|_| {
            Error::malformed(format!("tree of {} bytes exceeds u16 length", self.tree.len()))
        })?;
        out.reserve(self.encoded_len());
        out.extend_from_slice(&tree_len.to_le_bytes());
        out.extend_from_slice(self.tree);
        out.push(self.final_bits);
        out.extend_from_slice(self.message);
        Ok(())
    }
}

/// Compress `data` with default settings.
///
/// # Errors
/// Returns `Error::EmptyInput` if `data` is empty.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &Config::default())
}

/// Compress `data`.
///
/// # Errors
/// Returns `Error::EmptyInput` if `data` is empty.
pub fn compress_with(data: &[u8], config: &Config) -> Result<Vec<u8>> {
    let table = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&table)?;
    let header = tree.serialize();
    let encoder = Encoder::from_tree(&tree);

    let capacity = encoder.codebook().encoded_len(&table).unwrap_or(0) as usize;
    let mut writer = BitWriter::with_capacity(capacity);
    encoder.encode_into(data, &mut writer)?;

    let bit_len = writer.bit_len();
    let final_bits = config.trailer.final_bits(bit_len);
    let message = writer.into_bytes();

    debug!(
        input_len = data.len(),
        symbols = table.distinct(),
        tree_bytes = header.len(),
        bit_len,
        final_bits,
        "compressed"
    );

    let frame = Frame {
        tree: &header,
        final_bits,
        message: &message,
    };
    let mut out = Vec::with_capacity(frame.encoded_len());
    frame.write_to(&mut out)?;
    Ok(out)
}

/// Decompress a container produced by [`compress`] or [`compress_with`].
///
/// A final-byte count of 0 discards the last message byte; whatever complete
/// code words precede it are returned, and a code word cut by the discarded
/// byte is dropped.
///
/// # Errors
/// Returns `Error::MalformedHeader` or `Error::TruncatedMessage` if `data`
/// is not a well-formed container.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let frame = Frame::parse(data)?;
    let tree = HuffmanTree::deserialize(frame.tree)?;
    trace!(
        tree_bytes = frame.tree.len(),
        leaves = tree.leaf_count(),
        "read tree"
    );

    let bit_len = bitstream::bit_len(frame.message.len(), frame.final_bits)?;
    let bits = BitReader::with_limit(frame.message, bit_len);
    let decoder = Decoder::new(&tree);
    let out = if frame.final_bits == 0 {
        decoder.decode_prefix(bits)
    } else {
        decoder.decode(bits)?
    };

    debug!(
        input_len = data.len(),
        bit_len,
        output_len = out.len(),
        "decompressed"
    );
    Ok(out)
}
