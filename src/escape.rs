//! Reserved marker bytes and the pre-order byte form of a tree.
//!
//! In serialized form an internal node is written as [`INTERNAL_MARKER`] and
//! a leaf as its payload byte. A leaf whose payload equals one of the
//! reserved markers is written with a leading [`ESCAPE_MARKER`], so
//! `b"*\\*a"` is an internal node whose children are the leaves `*` and `a`.

use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Marks an internal node in the serialized tree.
pub const INTERNAL_MARKER: u8 = b'*';

/// Precedes a leaf payload that collides with a marker.
pub const ESCAPE_MARKER: u8 = b'\\';

pub const RESERVED_MARKERS: [u8; 2] = [INTERNAL_MARKER, ESCAPE_MARKER];

pub fn is_reserved(byte: u8) -> bool {
    RESERVED_MARKERS.contains(&byte)
}

impl HuffNode {
    /// True iff this is a leaf whose payload equals a reserved marker.
    ///
    /// Depends only on the payload value, never on position or frequency.
    pub fn is_escaped_char(&self) -> bool {
        self.symbol().map_or(false, is_reserved)
    }
}

impl HuffmanTree {
    /// Serialize the tree shape in pre-order. An empty tree is an empty string.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.tree_size());
        self.pre_order(|node| match node.symbol() {
            None => bytes.push(INTERNAL_MARKER),
            Some(symbol) => {
                if node.is_escaped_char() {
                    bytes.push(ESCAPE_MARKER);
                }
                bytes.push(symbol);
            }
        });
        tracing::debug!(nodes = self.tree_size(), bytes = bytes.len(), "serialized tree");
        bytes
    }

    /// Rebuild a tree from [`HuffmanTree::serialize`] output.
    ///
    /// Frequencies are not part of the byte form, so every node comes back
    /// with frequency 0.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(HuffmanTree::empty());
        }

        // each slot is an open internal node, holding its left child once known
        let mut open: Vec<Option<HuffNode>> = Vec::new();
        let mut bytes = data.iter().copied().enumerate();

        while let Some((offset, byte)) = bytes.next() {
            // offset of the last byte this leaf consumed
            let mut end = offset;
            let mut done = match byte {
                INTERNAL_MARKER => {
                    open.try_reserve(1)?;
                    open.push(None);
                    continue;
                }
                ESCAPE_MARKER => match bytes.next() {
                    Some((escaped_offset, escaped)) if is_reserved(escaped) => {
                        end = escaped_offset;
                        HuffNode::leaf(escaped, 0)
                    }
                    Some((_, escaped)) => {
                        return Err(HuffmanError::invalid_data(format!(
                            "escape at offset {} precedes non-marker byte {:#04x}",
                            offset, escaped
                        )))
                    }
                    None => return Err(HuffmanError::invalid_data("dangling escape at end of tree")),
                },
                symbol => HuffNode::leaf(symbol, 0),
            };

            // attach the finished subtree, closing every node it completes
            loop {
                match open.pop() {
                    None => {
                        if end + 1 != data.len() {
                            return Err(HuffmanError::invalid_data(format!(
                                "{} trailing bytes after tree",
                                data.len() - end - 1
                            )));
                        }
                        return Ok(HuffmanTree::from_root(done));
                    }
                    Some(None) => {
                        open.push(Some(done));
                        break;
                    }
                    Some(Some(left)) => {
                        done = HuffNode::Internal {
                            frequency: 0,
                            left: Box::new(left),
                            right: Box::new(done),
                        };
                    }
                }
            }
        }

        Err(HuffmanError::invalid_data(format!(
            "truncated tree, {} internal nodes left open",
            open.len()
        )))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frequency::FrequencyTable;

    #[test]
    fn test_classifier() {
        assert!(HuffNode::leaf(b'*', 3).is_escaped_char());
        assert!(HuffNode::leaf(b'\\', 0).is_escaped_char());
        assert!(!HuffNode::leaf(b'a', 3).is_escaped_char());
        assert!(!HuffNode::leaf(b'/', 3).is_escaped_char());

        let internal = HuffNode::merge(HuffNode::leaf(b'*', 1), HuffNode::leaf(b'*', 1)).unwrap();
        assert!(!internal.is_escaped_char());
    }

    #[test]
    fn test_serialize_textbook() {
        let table: FrequencyTable =
            [(b'A', 5), (b'B', 9), (b'C', 12), (b'D', 13), (b'E', 16), (b'F', 45)]
                .into_iter()
                .collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        assert_eq!(tree.serialize(), b"*F**CD**ABE".to_vec());
    }

    #[test]
    fn test_serialize_escapes_markers() {
        let table: FrequencyTable = [(b'*', 1), (b'x', 2)].into_iter().collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        assert_eq!(tree.serialize(), b"*\\*x".to_vec());

        let table: FrequencyTable = [(b'\\', 1), (b'*', 1)].into_iter().collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        assert_eq!(tree.serialize(), b"*\\*\\\\".to_vec());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let tree = HuffmanTree::from_bytes(b"a*b\\c** \\\\ zzz").unwrap();
        let bytes = tree.serialize();
        let rebuilt = HuffmanTree::deserialize(&bytes).unwrap();
        assert_eq!(rebuilt.serialize(), bytes);
        assert_eq!(rebuilt.tree_size(), tree.tree_size());
    }

    #[test]
    fn test_deserialize_single_symbol() {
        let tree = HuffmanTree::from_bytes(b"***").unwrap();
        let bytes = tree.serialize();
        assert_eq!(bytes, b"*\\*\\*".to_vec());
        assert_eq!(HuffmanTree::deserialize(&bytes).unwrap().tree_size(), 3);
    }

    #[test]
    fn test_deserialize_escaped_last_leaf() {
        let tables: [&[(u8, u64)]; 3] = [
            &[(b'*', 1)],
            &[(b'a', 1), (b'\\', 2)],
            &[(b'a', 1), (b'*', 1)],
        ];
        for pairs in tables {
            let table: FrequencyTable = pairs.iter().copied().collect();
            let tree = HuffmanTree::from_frequencies(&table).unwrap();
            let bytes = tree.serialize();
            let rebuilt = HuffmanTree::deserialize(&bytes).unwrap();
            assert_eq!(rebuilt.serialize(), bytes);
            assert_eq!(rebuilt.bytes_dictionary(), tree.bytes_dictionary());
        }

        assert_eq!(HuffmanTree::deserialize(b"*a\\\\").unwrap().tree_size(), 3);
        assert_eq!(HuffmanTree::deserialize(b"*\\*\\*").unwrap().tree_size(), 3);
    }

    #[test]
    fn test_deserialize_trailing_after_escaped_leaf() {
        let err = HuffmanTree::deserialize(b"*a\\\\b").unwrap_err();
        assert_eq!(err.to_string(), "invalid data: 1 trailing bytes after tree");
    }

    #[test]
    fn test_deserialize_empty() {
        assert!(HuffmanTree::deserialize(b"").unwrap().is_empty());
        assert!(HuffmanTree::empty().serialize().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        for bad in [&b"*a"[..], b"**ab", b"*a\\", b"*a\\b", b"*abc", b"ab"] {
            let err = HuffmanTree::deserialize(bad).unwrap_err();
            assert!(
                matches!(err, HuffmanError::InvalidData { .. }),
                "{:?} gave {:?}",
                bad,
                err
            );
        }
    }
}
