use bitvec::prelude::*;

use crate::config::CodecConfig;
use crate::dictionary::BytesDictionary;
use crate::error::{HuffmanError, Result};
use crate::hufftree::HuffmanTree;

/// Bit-packed output of [`HuffmanCodec::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedData {
    pub bits: BitVec<u8, Msb0>,
    pub original_length: usize,
}

impl EncodedData {
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Packed bytes, first bit in the most significant position. The last
    /// byte is zero-padded.
    pub fn as_raw_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn from_raw_bytes(bytes: Vec<u8>, bit_len: usize, original_length: usize) -> Result<Self> {
        let available = bytes.len().saturating_mul(8);
        if bit_len > available {
            return Err(HuffmanError::invalid_data(format!(
                "bit length {} exceeds the {} bits supplied",
                bit_len, available
            )));
        }
        let mut bits = BitVec::from_vec(bytes);
        bits.truncate(bit_len);
        Ok(EncodedData {
            bits,
            original_length,
        })
    }
}

pub struct HuffmanCodec {
    tree: HuffmanTree,
    dictionary: BytesDictionary,
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Result<Self> {
        Self::with_config(tree, CodecConfig::default())
    }

    pub fn with_config(tree: HuffmanTree, config: CodecConfig) -> Result<Self> {
        let dictionary = tree.bytes_dictionary();
        if let Some(limit) = config.max_code_length {
            if let Some((symbol, code)) = dictionary.iter().find(|(_, code)| code.len() > limit) {
                return Err(HuffmanError::CodeTooLong {
                    symbol,
                    length: code.len(),
                    limit,
                });
            }
        }
        Ok(HuffmanCodec {
            tree,
            dictionary,
            config,
        })
    }

    /// Build a codec whose tree is fitted to `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::new(HuffmanTree::from_bytes(data)?)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn dictionary(&self) -> &BytesDictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn encode(&self, data: &[u8]) -> Result<EncodedData> {
        let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(data.len());
        for &byte in data {
            let code = self
                .dictionary
                .get(byte)
                .ok_or(HuffmanError::UnknownSymbol(byte))?;
            bits.extend_from_bitslice(code);
        }
        tracing::debug!(bytes = data.len(), bits = bits.len(), "encoded");

        Ok(EncodedData {
            bits,
            original_length: data.len(),
        })
    }

    /// Walk the tree from the root one bit at a time, emitting a byte at each leaf.
    pub fn decode(&self, encoded: &EncodedData) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        result.try_reserve(encoded.original_length)?;

        let Some(root) = self.tree.root() else {
            if !encoded.bits.is_empty() {
                return Err(HuffmanError::invalid_data("bits supplied for an empty tree"));
            }
            return self.check_length(result, encoded.original_length);
        };

        let mut current_node = root;
        for bit in encoded.bits.iter().by_vals() {
            let next = match current_node.children() {
                Some((left, right)) => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
                // a bare leaf root decodes every bit to itself
                None => current_node,
            };

            match next.symbol() {
                Some(symbol) => {
                    result.push(symbol);
                    current_node = root;
                }
                None => current_node = next,
            }
        }

        if !std::ptr::eq(current_node, root) {
            return Err(HuffmanError::invalid_data("ran out of bits while decoding"));
        }
        tracing::debug!(bits = encoded.bit_len(), bytes = result.len(), "decoded");

        self.check_length(result, encoded.original_length)
    }

    fn check_length(&self, result: Vec<u8>, original_length: usize) -> Result<Vec<u8>> {
        if self.config.verify_length && result.len() != original_length {
            return Err(HuffmanError::invalid_data(format!(
                "expected {} bytes, got {}",
                original_length,
                result.len()
            )));
        }
        Ok(result)
    }
}
