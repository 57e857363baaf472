use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::priority_queue::PriorityQueue;

/// Node of a Huffman tree: one input symbol, or the merge of two subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: u8, frequency: u64) -> Self {
        HuffNode::Leaf { symbol, frequency }
    }

    pub fn frequency(&self) -> u64 {
        match self {
            HuffNode::Leaf { frequency, .. } => *frequency,
            HuffNode::Internal { frequency, .. } => *frequency,
        }
    }

    /// Payload of a leaf; internal nodes carry none.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            HuffNode::Leaf { symbol, .. } => Some(*symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(&HuffNode, &HuffNode)> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }

    pub fn left(&self) -> Option<&HuffNode> {
        self.children().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&HuffNode> {
        self.children().map(|(_, right)| right)
    }

    /// True iff the node has no children. Never looks at the payload.
    pub fn is_leaf(&self) -> bool {
        self.children().is_none()
    }

    /// Join two subtrees; `a` goes left (bit 0) and `b` right (bit 1).
    pub fn merge(a: Self, b: Self) -> Result<Self> {
        let (left, right) = (a.frequency(), b.frequency());
        let frequency = left
            .checked_add(right)
            .ok_or(HuffmanError::FrequencyOverflow { left, right })?;
        Ok(HuffNode::Internal {
            frequency,
            left: Box::new(a),
            right: Box::new(b),
        })
    }

    /// Pair a lone leaf with a zero-frequency copy of itself so its code is
    /// one bit long. The copy sits on the right and never gets a code.
    fn self_paired(symbol: u8, frequency: u64) -> Self {
        HuffNode::Internal {
            frequency,
            left: Box::new(HuffNode::leaf(symbol, frequency)),
            right: Box::new(HuffNode::leaf(symbol, 0)),
        }
    }
}

/// Queue every symbol with a non-zero count as a leaf, in ascending symbol order.
pub fn build_frequency_queue(frequency_table: &FrequencyTable) -> Result<PriorityQueue<HuffNode>> {
    let mut queue = PriorityQueue::new();
    for (symbol, frequency) in frequency_table.present() {
        queue.insert(HuffNode::leaf(symbol, frequency), frequency)?;
    }
    Ok(queue)
}

/// Merge the two lowest-frequency entries until a single root remains.
///
/// An empty queue gives an empty tree. A queue holding a single leaf gives
/// a three-node tree: the leaf paired with a zero-frequency copy of itself.
pub fn build_huffman_tree(mut queue: PriorityQueue<HuffNode>) -> Result<HuffmanTree> {
    match queue.size() {
        0 => {
            tracing::debug!("no symbols present, returning empty tree");
            return Ok(HuffmanTree::empty());
        }
        1 => {
            let (only, _) = queue.extract_min()?;
            let root = match only {
                HuffNode::Leaf { symbol, frequency } => {
                    tracing::debug!(symbol, frequency, "single-symbol alphabet, self-pairing leaf");
                    HuffNode::self_paired(symbol, frequency)
                }
                internal => internal,
            };
            return Ok(HuffmanTree::from_root(root));
        }
        _ => {}
    }

    let leaves = queue.size();
    while queue.size() > 1 {
        let (x, _) = queue.extract_min()?;
        let (y, _) = queue.extract_min()?;

        let z = HuffNode::merge(x, y)?;
        tracing::trace!(frequency = z.frequency(), remaining = queue.size(), "merged two subtrees");

        let frequency = z.frequency();
        queue.insert(z, frequency)?;
    }
    let (root, frequency) = queue.extract_min()?;
    tracing::debug!(leaves, frequency, "built huffman tree");

    Ok(HuffmanTree::from_root(root))
}

/// An owned Huffman tree. `root` is `None` for an empty alphabet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<HuffNode>,
}

impl HuffmanTree {
    pub fn empty() -> Self {
        HuffmanTree { root: None }
    }

    pub fn from_root(root: HuffNode) -> Self {
        HuffmanTree { root: Some(root) }
    }

    pub fn from_frequencies(frequency_table: &FrequencyTable) -> Result<Self> {
        build_huffman_tree(build_frequency_queue(frequency_table)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    pub fn root(&self) -> Option<&HuffNode> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<HuffNode> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total node count, internal and leaf. Zero for an empty tree.
    pub fn tree_size(&self) -> usize {
        self.pre_order_iter().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.pre_order_iter().filter(|node| node.is_leaf()).count()
    }

    /// Visit every node root, left, right. Serialization depends on this order.
    pub fn pre_order<F>(&self, mut callback: F)
    where
        F: FnMut(&HuffNode),
    {
        for node in self.pre_order_iter() {
            callback(node);
        }
    }

    pub fn pre_order_iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.root.iter().collect(),
        }
    }
}

/// Lazy pre-order walk over a tree, driven by an explicit stack.
pub struct PreOrder<'a> {
    stack: Vec<&'a HuffNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a HuffNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some((left, right)) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root() else {
            return writeln!(f, "<empty tree>");
        };

        let mut stack = vec![(root, 0usize, "root")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                HuffNode::Leaf { symbol, frequency } => {
                    writeln!(
                        f,
                        "{}{}-> Leaf: '{}' ({}) [frequency: {}]",
                        indent,
                        label,
                        (*symbol as char).escape_default(),
                        symbol,
                        frequency
                    )?;
                }
                HuffNode::Internal { frequency, left, right } => {
                    writeln!(f, "{}{}-> Internal [frequency: {}]", indent, label, frequency)?;
                    stack.push((&**right, depth + 1, "R"));
                    stack.push((&**left, depth + 1, "L"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn textbook_table() -> FrequencyTable {
        [(b'A', 5), (b'B', 9), (b'C', 12), (b'D', 13), (b'E', 16), (b'F', 45)]
            .into_iter()
            .collect()
    }

    fn symbols_in_pre_order(tree: &HuffmanTree) -> Vec<Option<u8>> {
        tree.pre_order_iter().map(HuffNode::symbol).collect()
    }

    #[test]
    fn test_textbook_shape() {
        let tree = HuffmanTree::from_frequencies(&textbook_table()).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.frequency(), 100);
        assert_eq!(root.left(), Some(&HuffNode::leaf(b'F', 45)));

        // root(F, 55(25(C, D), 30(14(A, B), E)))
        assert_eq!(
            symbols_in_pre_order(&tree),
            vec![
                None,
                Some(b'F'),
                None,
                None,
                Some(b'C'),
                Some(b'D'),
                None,
                None,
                Some(b'A'),
                Some(b'B'),
                Some(b'E'),
            ]
        );
        assert_eq!(tree.tree_size(), 11);
        assert_eq!(tree.leaf_count(), 6);
    }

    #[test]
    fn test_equal_frequencies_merge_in_insertion_order() {
        let table: FrequencyTable = [(b'a', 1), (b'b', 1), (b'c', 1), (b'd', 1)]
            .into_iter()
            .collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        assert_eq!(
            symbols_in_pre_order(&tree),
            vec![None, None, Some(b'a'), Some(b'b'), None, Some(b'c'), Some(b'd')]
        );
    }

    #[test]
    fn test_older_leaf_beats_newer_internal_on_tie() {
        let table: FrequencyTable = [(b'a', 1), (b'b', 1), (b'c', 2)].into_iter().collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        assert_eq!(tree.root().unwrap().left(), Some(&HuffNode::leaf(b'c', 2)));
    }

    #[test]
    fn test_single_symbol_is_self_paired() {
        let tree = HuffmanTree::from_bytes(b"aaaa").unwrap();
        assert_eq!(tree.tree_size(), 3);
        let root = tree.root().unwrap();
        assert!(!root.is_leaf());
        assert_eq!(root.frequency(), 4);
        assert_eq!(root.left(), Some(&HuffNode::leaf(b'a', 4)));
        assert_eq!(root.right(), Some(&HuffNode::leaf(b'a', 0)));
    }

    #[test]
    fn test_empty_input_gives_empty_tree() {
        let tree = HuffmanTree::from_bytes(b"").unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.tree_size(), 0);
        assert_eq!(tree.pre_order_iter().next(), None);
    }

    #[test]
    fn test_is_leaf_is_structural() {
        let leaf = HuffNode::leaf(0, 0);
        assert!(leaf.is_leaf());
        let internal = HuffNode::merge(HuffNode::leaf(1, 1), HuffNode::leaf(2, 1)).unwrap();
        assert!(!internal.is_leaf());
        assert_eq!(internal.symbol(), None);
    }

    #[test]
    fn test_merge_overflow() {
        let err = HuffNode::merge(HuffNode::leaf(0, u64::MAX), HuffNode::leaf(1, 1)).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::FrequencyOverflow { left: u64::MAX, right: 1 }
        ));
    }

    #[test]
    fn test_pre_order_callback_matches_iterator() {
        let tree = HuffmanTree::from_bytes(b"mississippi").unwrap();
        let mut visited = Vec::new();
        tree.pre_order(|node| visited.push(node.frequency()));
        let expected: Vec<u64> = tree.pre_order_iter().map(HuffNode::frequency).collect();
        assert_eq!(visited, expected);
        assert_eq!(visited[0], 11);
    }

    #[test]
    fn test_display() {
        let table: FrequencyTable = [(b'a', 1), (b'b', 2)].into_iter().collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let expected = "root-> Internal [frequency: 3]\n  \
                        L-> Leaf: 'a' (97) [frequency: 1]\n  \
                        R-> Leaf: 'b' (98) [frequency: 2]\n";
        assert_eq!(tree.to_string(), expected);
        assert_eq!(HuffmanTree::empty().to_string(), "<empty tree>\n");
    }
}
