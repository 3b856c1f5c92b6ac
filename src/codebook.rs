//! Symbol to code word mapping derived from a tree.

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node, NodeId};

/// Prefix-free code words for every byte value present in a tree.
///
/// A code word is the path from the root to the symbol's leaf, `false` for
/// a left turn and `true` for a right turn. The degenerate single-leaf tree
/// has no path, so its one symbol gets the code `[true]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    codes: Vec<Vec<bool>>, // symbol -> bit sequence, empty if absent
}

impl Codebook {
    /// Derive the codebook of `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![Vec::new(); 256];

        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            codes[symbol as usize] = vec![true];
            return Self { codes };
        }

        let mut stack: Vec<(NodeId, Vec<bool>)> = vec![(tree.root(), Vec::new())];
        while let Some((id, path)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => codes[symbol as usize] = path,
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
            }
        }

        Self { codes }
    }

    /// Code word of `symbol`, or `None` if the tree has no such leaf.
    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        let code = &self.codes[symbol as usize];
        (!code.is_empty()).then_some(code.as_slice())
    }

    /// Number of symbols with a code word.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| !c.is_empty()).count()
    }

    /// True if no symbol has a code word.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols and their code words, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(s, c)| (s as u8, c.as_slice()))
    }

    /// Bits needed to encode a message with the given symbol counts, or
    /// `None` if some counted symbol has no code word.
    pub fn encoded_len(&self, table: &FrequencyTable) -> Option<u64> {
        table.iter().try_fold(0u64, |acc, (symbol, count)| {
            self.get(symbol).map(|code| acc + count * code.len() as u64)
        })
    }
}
