//! Huffman code tree.
//!
//! The tree is stored as an arena: every node lives in one `Vec<Node>` and
//! children are referenced by index. The tree owns the arena and the index
//! of its root, and is never mutated after construction.
//!
//! # Construction
//!
//! The classic greedy merge: keep a queue ordered by frequency, repeatedly
//! take the two smallest nodes, join them under a new internal node (first
//! taken on the left) and queue the result. Ties are broken towards the most
//! recently queued node, so a freshly merged node is taken before an older
//! node of equal frequency. Leaves are queued in ascending byte order, which
//! makes the shape, and therefore the compressed output, fully determined by
//! the input.
//!
//! # Header encoding
//!
//! Preorder, one marker bit per node: `1` followed by the 8 bits of the byte
//! value for a leaf, `0` followed by the left then right subtree for an
//! internal node.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// Maximum number of internal nodes over a byte alphabet.
const MAX_INTERNAL: usize = 255;

/// A node of the code tree.
///
/// Trees read back from a header carry no frequencies; their nodes report 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Terminal node holding one byte value.
    Leaf {
        /// The byte value.
        symbol: u8,
        /// Occurrences of `symbol`.
        freq: u64,
    },
    /// Node with exactly two children.
    Internal {
        /// Subtree reached by a `0` bit.
        left: NodeId,
        /// Subtree reached by a `1` bit.
        right: NodeId,
        /// Sum of the children's frequencies.
        freq: u64,
    },
}

impl Node {
    /// Frequency of this node.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// True for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Queue entry for construction.
#[derive(Debug, PartialEq, Eq)]
struct Queued {
    freq: u64,
    seq: usize,
    id: NodeId,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: smallest frequency first, then latest insertion.
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman code tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// A table with a single distinct byte yields a tree whose root is a leaf.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if the table has no entries.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let distinct = table.distinct();
        let mut nodes = Vec::with_capacity((2 * distinct).saturating_sub(1));
        let mut queue = BinaryHeap::with_capacity(distinct);
        let mut seq = 0;

        for (symbol, freq) in table.iter() {
            nodes.push(Node::Leaf { symbol, freq });
            queue.push(Queued {
                freq,
                seq,
                id: nodes.len() - 1,
            });
            seq += 1;
        }

        let root = loop {
            let Some(left) = queue.pop() else {
                return Err(Error::EmptyInput);
            };
            let Some(right) = queue.pop() else {
                break left.id;
            };
            let freq = left.freq + right.freq;
            nodes.push(Node::Internal {
                left: left.id,
                right: right.id,
                freq,
            });
            queue.push(Queued {
                freq,
                seq,
                id: nodes.len() - 1,
            });
            seq += 1;
        };

        Ok(Self { nodes, root })
    }

    /// Build a tree directly from the bytes of a message.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::build(&FrequencyTable::from_bytes(data))
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node at `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves, i.e. distinct byte values.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// True for the degenerate tree of a single-symbol input.
    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    /// Leaf byte values in preorder (left to right).
    pub fn symbols(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => out.push(symbol),
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }

    /// Write the preorder encoding of the tree into `writer`.
    pub fn write_bits(&self, writer: &mut BitWriter) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => {
                    writer.push(true);
                    writer.push_byte(symbol);
                }
                Node::Internal { left, right, .. } => {
                    writer.push(false);
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }

    /// Preorder encoding of the tree, packed into bytes.
    pub fn serialize(&self) -> Vec<u8> {
        // 9 bits per leaf, 1 per internal node.
        let leaves = self.leaf_count();
        let mut writer = BitWriter::with_capacity(9 * leaves + self.nodes.len() - leaves);
        self.write_bits(&mut writer);
        writer.into_bytes()
    }

    /// Rebuild a tree from its packed preorder encoding.
    ///
    /// Bits left over after the traversal completes are padding and ignored.
    ///
    /// # Errors
    /// Returns `Error::MalformedHeader` if the bits run out before the
    /// traversal completes, or if the encoding describes more nodes than a
    /// byte alphabet allows or repeats a byte value.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        enum Token {
            Leaf(u8),
            Internal,
        }

        let mut reader = BitReader::new(bytes);
        let mut tokens = Vec::new();
        let mut seen = [false; 256];
        let mut internal = 0;
        let mut pending = 1usize;

        while pending > 0 {
            let marker = reader
                .next()
                .ok_or_else(|| Error::malformed("tree encoding ends mid-traversal"))?;
            pending -= 1;
            if marker {
                let symbol = reader
                    .read_byte()
                    .ok_or_else(|| Error::malformed("tree encoding ends inside a leaf value"))?;
                if std::mem::replace(&mut seen[symbol as usize], true) {
                    return Err(Error::malformed(format!(
                        "byte 0x{symbol:02x} appears on more than one leaf"
                    )));
                }
                tokens.push(Token::Leaf(symbol));
            } else {
                internal += 1;
                if internal > MAX_INTERNAL {
                    return Err(Error::malformed(format!(
                        "more than {MAX_INTERNAL} internal nodes"
                    )));
                }
                pending += 2;
                tokens.push(Token::Internal);
            }
        }

        // Reversed preorder: both subtrees of a node are complete, left on
        // top of right, by the time the node itself is reached.
        let mut nodes = Vec::with_capacity(tokens.len());
        let mut stack: Vec<NodeId> = Vec::new();
        for token in tokens.iter().rev() {
            let node = match *token {
                Token::Leaf(symbol) => Node::Leaf { symbol, freq: 0 },
                Token::Internal => {
                    let (Some(left), Some(right)) = (stack.pop(), stack.pop()) else {
                        return Err(Error::malformed("internal node is missing a child"));
                    };
                    Node::Internal {
                        left,
                        right,
                        freq: 0,
                    }
                }
            };
            nodes.push(node);
            stack.push(nodes.len() - 1);
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(root), true) => Ok(Self { nodes, root }),
            _ => Err(Error::malformed("tree encoding does not form a single tree")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn child(tree: &HuffmanTree, id: NodeId, right: bool) -> NodeId {
        match tree.node(id) {
            Node::Internal {
                left, right: r, ..
            } => {
                if right {
                    *r
                } else {
                    *left
                }
            }
            Node::Leaf { .. } => panic!("leaf has no children"),
        }
    }

    fn symbol(tree: &HuffmanTree, id: NodeId) -> u8 {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => *symbol,
            Node::Internal { .. } => panic!("internal node has no symbol"),
        }
    }

    #[test]
    fn test_empty_table_is_error() {
        let err = HuffmanTree::from_bytes(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn test_single_symbol_is_single_leaf() {
        let tree = HuffmanTree::from_bytes(b"aaaa").unwrap();
        assert!(tree.is_single_leaf());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.node(tree.root()).freq(), 4);
        assert_eq!(tree.symbols(), vec![b'a']);
    }

    #[test]
    fn test_skewed_shape() {
        // c(1) and b(2) merge first into a node of weight 3, which is then
        // taken before the older a(3).
        let tree = HuffmanTree::from_bytes(b"aaabbc").unwrap();
        let root = tree.root();
        assert_eq!(tree.node(root).freq(), 6);

        let left = child(&tree, root, false);
        let right = child(&tree, root, true);
        assert_eq!(tree.node(left).freq(), 3);
        assert_eq!(symbol(&tree, right), b'a');
        assert_eq!(symbol(&tree, child(&tree, left, false)), b'c');
        assert_eq!(symbol(&tree, child(&tree, left, true)), b'b');
    }

    #[test]
    fn test_tie_prefers_latest() {
        // All four symbols tie at 1; the most recently queued leaf is taken first.
        let tree = HuffmanTree::from_bytes(b"abcd").unwrap();
        assert_eq!(tree.symbols(), vec![b'b', b'a', b'd', b'c']);
    }

    #[test]
    fn test_internal_frequencies_are_sums() {
        let tree = HuffmanTree::from_bytes(b"the quick brown fox jumps over the lazy dog").unwrap();
        for id in 0..tree.node_count() {
            if let Node::Internal { left, right, freq } = *tree.node(id) {
                assert_eq!(freq, tree.node(left).freq() + tree.node(right).freq());
            }
        }
        assert_eq!(tree.node_count(), 2 * tree.leaf_count() - 1);
    }

    #[test]
    fn test_serialize_layout() {
        // 0, 0, 1 'c', 1 'b', 1 'a'
        let tree = HuffmanTree::from_bytes(b"aaabbc").unwrap();
        let mut writer = BitWriter::new();
        tree.write_bits(&mut writer);
        assert_eq!(writer.bit_len(), 2 + 3 * 9);

        let bytes = tree.serialize();
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[0], 0b0010_1100);
        assert_eq!(bytes[1], 0b0111_0110);
    }

    #[test]
    fn test_serialize_single_leaf() {
        let tree = HuffmanTree::from_bytes(b"zz").unwrap();
        assert_eq!(tree.serialize(), vec![0b1011_1101, 0b0000_0000]);
        let back = HuffmanTree::deserialize(&tree.serialize()).unwrap();
        assert!(back.is_single_leaf());
        assert_eq!(back.symbols(), vec![b'z']);
    }

    #[test]
    fn test_deserialize_truncated() {
        let bytes = HuffmanTree::from_bytes(b"aaabbc").unwrap().serialize();
        let err = HuffmanTree::deserialize(&bytes[..2]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
        assert!(matches!(
            HuffmanTree::deserialize(&[]),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_deserialize_all_internal_markers() {
        let err = HuffmanTree::deserialize(&[0u8; 64]).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }

    #[test]
    fn test_deserialize_duplicate_leaf() {
        // 0, 1 'a', 1 'a'
        let mut writer = BitWriter::new();
        writer.push(false);
        writer.push(true);
        writer.push_byte(b'a');
        writer.push(true);
        writer.push_byte(b'a');
        let err = HuffmanTree::deserialize(&writer.into_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader(_)));
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.node_count(), 511);
        let back = HuffmanTree::deserialize(&tree.serialize()).unwrap();
        assert_eq!(back.symbols(), tree.symbols());
    }

    #[test]
    fn test_deep_tree_is_iterative() {
        // Fibonacci-like weights give a maximally unbalanced tree.
        let mut data = Vec::new();
        let (mut a, mut b) = (1usize, 1usize);
        for symbol in 0..25u8 {
            data.extend(std::iter::repeat(symbol).take(a));
            (a, b) = (b, a + b);
        }
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let back = HuffmanTree::deserialize(&tree.serialize()).unwrap();
        assert_eq!(back.serialize(), tree.serialize());
    }

    proptest! {
        #[test]
        fn prop_tree_roundtrip(data in prop::collection::vec(any::<u8>(), 1..500)) {
            let tree = HuffmanTree::from_bytes(&data).unwrap();
            let back = HuffmanTree::deserialize(&tree.serialize()).unwrap();
            prop_assert_eq!(back.symbols(), tree.symbols());
            prop_assert_eq!(back.serialize(), tree.serialize());
            prop_assert_eq!(back.node_count(), tree.node_count());
        }
    }
}
