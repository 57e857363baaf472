//! # huffman_core
//!
//! Huffman tree construction, per-byte code dictionaries and bit-packed
//! coding of byte streams.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_core::{FrequencyTable, HuffmanCodec, HuffmanTree};
//!
//! let data = b"abracadabra";
//!
//! // build a tree from byte counts and derive every code from it
//! let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data))?;
//! let dictionary = tree.bytes_dictionary();
//! assert_eq!(dictionary.get(b'a').map(|code| code.len()), Some(1));
//!
//! // pack and unpack
//! let codec = HuffmanCodec::new(tree)?;
//! let encoded = codec.encode(data)?;
//! assert_eq!(codec.decode(&encoded)?, data.to_vec());
//!
//! // the tree shape travels as escaped pre-order bytes
//! let shape = codec.tree().serialize();
//! let rebuilt = HuffmanTree::deserialize(&shape)?;
//! assert_eq!(rebuilt.bytes_dictionary(), *codec.dictionary());
//! # Ok::<(), huffman_core::HuffmanError>(())
//! ```
//!
//! Equal frequencies are broken by insertion order, leaves first in ascending
//! byte order, so the same input always yields the same tree and codes.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod escape;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod priority_queue;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use config::CodecConfig;
pub use dictionary::{build_bytes_dictionary, BytesDictionary, Code, Path};
pub use error::{HuffmanError, Result};
pub use escape::{is_reserved, ESCAPE_MARKER, INTERNAL_MARKER, RESERVED_MARKERS};
pub use frequency::{FrequencyTable, SYMBOL_COUNT};
pub use huffman_codec::{EncodedData, HuffmanCodec};
pub use hufftree::{build_frequency_queue, build_huffman_tree, HuffNode, HuffmanTree, PreOrder};
pub use priority_queue::PriorityQueue;
