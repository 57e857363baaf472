use std::fmt;
use std::ops::{Deref, DerefMut};

use bitvec::prelude::*;

use crate::frequency::{FrequencyTable, SYMBOL_COUNT};
use crate::hufftree::{HuffNode, HuffmanTree};

/// A code: root-to-leaf directions, `false` for left and `true` for right.
pub type Code = BitVec<u8, Msb0>;

/// The direction stack maintained while walking the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    bits: Code,
}

impl Path {
    pub fn new() -> Self {
        Path { bits: BitVec::new() }
    }

    pub fn push(&mut self, direction: bool) {
        self.bits.push(direction);
    }

    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }
}

/// Borrow of a path that puts it back to its starting length when dropped,
/// whichever way the traversal ends.
struct PathScope<'p> {
    path: &'p mut Path,
    base: usize,
}

impl<'p> PathScope<'p> {
    fn new(path: &'p mut Path) -> Self {
        let base = path.len();
        PathScope { path, base }
    }
}

impl Deref for PathScope<'_> {
    type Target = Path;

    fn deref(&self) -> &Path {
        self.path
    }
}

impl DerefMut for PathScope<'_> {
    fn deref_mut(&mut self) -> &mut Path {
        self.path
    }
}

impl Drop for PathScope<'_> {
    fn drop(&mut self) {
        self.path.truncate(self.base);
    }
}

/// Code for every byte value present in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesDictionary {
    codes: Vec<Option<Code>>,
}

impl BytesDictionary {
    pub fn new() -> Self {
        BytesDictionary {
            codes: vec![None; SYMBOL_COUNT],
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol as usize].as_deref()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.codes[symbol as usize].is_some()
    }

    fn record(&mut self, symbol: u8, code: &BitSlice<u8, Msb0>) {
        self.codes[symbol as usize] = Some(code.to_bitvec());
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|code| (symbol as u8, code)))
    }

    pub fn max_code_length(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Total encoded length in bits of an input with these counts.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| frequencies.get(symbol).saturating_mul(code.len() as u64))
            .fold(0u64, u64::saturating_add)
    }
}

impl Default for BytesDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BytesDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            let bits: String = code.iter().by_vals().map(|bit| if bit { '1' } else { '0' }).collect();
            writeln!(
                f,
                "'{}' ({}): {}",
                (symbol as char).escape_default(),
                symbol,
                bits
            )?;
        }
        Ok(())
    }
}

enum Visit<'a> {
    Enter(&'a HuffNode, Option<bool>),
    Leave(bool),
}

/// Record the code of every leaf under `root` into `dictionary`.
///
/// Walks depth-first, left before right, with an explicit stack. The
/// direction taken is pushed onto `path` when entering a node and popped
/// after its subtree is done, so each leaf sees exactly its own root-to-leaf
/// sequence (prefixed by whatever `path` held on entry). A leaf at the root
/// gets the one-bit code `0`. `path` is back at its original length on return.
///
/// Codes already in `dictionary` are overwritten by this tree's. A symbol
/// reached twice in one walk (the zero-frequency copy of a self-paired leaf)
/// keeps the code of its first leaf.
///
/// Returns the number of nodes visited.
pub fn build_bytes_dictionary(
    root: &HuffNode,
    dictionary: &mut BytesDictionary,
    path: &mut Path,
) -> usize {
    let mut path = PathScope::new(path);
    let mut stack = vec![Visit::Enter(root, None)];
    let mut visited = 0;
    let mut seen = [false; SYMBOL_COUNT];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(node, direction) => {
                visited += 1;
                if let Some(bit) = direction {
                    path.push(bit);
                }
                stack.push(Visit::Leave(direction.is_some()));

                match node {
                    HuffNode::Leaf { symbol, .. } if seen[*symbol as usize] => {}
                    HuffNode::Leaf { symbol, .. } => {
                        seen[*symbol as usize] = true;
                        if path.is_empty() {
                            dictionary.record(*symbol, bits![u8, Msb0; 0]);
                        } else {
                            dictionary.record(*symbol, path.as_bitslice());
                        }
                    }
                    HuffNode::Internal { left, right, .. } => {
                        stack.push(Visit::Enter(right, Some(true)));
                        stack.push(Visit::Enter(left, Some(false)));
                    }
                }
            }
            Visit::Leave(pushed) => {
                if pushed {
                    path.pop();
                }
            }
        }
    }

    debug_assert_eq!(path.len(), path.base);
    visited
}

impl HuffmanTree {
    /// Codes for every symbol in the tree. Empty for an empty tree.
    pub fn bytes_dictionary(&self) -> BytesDictionary {
        let mut dictionary = BytesDictionary::new();
        if let Some(root) = self.root() {
            let visited = build_bytes_dictionary(root, &mut dictionary, &mut Path::new());
            tracing::debug!(visited, symbols = dictionary.len(), "built bytes dictionary");
        }
        dictionary
    }
}
