//! Error handling for the huffman-core library

use std::collections::TryReserveError;
use thiserror::Error;

/// Main error type for tree construction and coding
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Extraction attempted on an empty priority queue
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Node, queue entry or buffer storage could not be reserved
    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// Summed frequency of two subtrees does not fit in a u64
    #[error("frequency overflow merging {left} and {right}")]
    FrequencyOverflow {
        /// Frequency of the first extracted subtree
        left: u64,
        /// Frequency of the second extracted subtree
        right: u64,
    },

    /// Byte has no code in the dictionary
    #[error("symbol {0:#04x} has no code")]
    UnknownSymbol(u8),

    /// Malformed serialized tree or bitstream
    #[error("invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// A code is longer than the configured limit
    #[error("code for symbol {symbol:#04x} is {length} bits, limit is {limit}")]
    CodeTooLong {
        /// Symbol owning the code
        symbol: u8,
        /// Code length in bits
        length: usize,
        /// Configured limit
        limit: usize,
    },
}

impl HuffmanError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

/// Result type alias for huffman-core operations
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(HuffmanError::EmptyQueue.to_string(), "priority queue is empty");
        assert_eq!(
            HuffmanError::UnknownSymbol(b'a').to_string(),
            "symbol 0x61 has no code"
        );
        assert_eq!(
            HuffmanError::invalid_data("truncated tree").to_string(),
            "invalid data: truncated tree"
        );
        let err = HuffmanError::CodeTooLong {
            symbol: 0,
            length: 40,
            limit: 32,
        };
        assert_eq!(err.to_string(), "code for symbol 0x00 is 40 bits, limit is 32");
    }

    #[test]
    fn test_allocation_failure_from_try_reserve() {
        let mut v: Vec<u64> = Vec::new();
        let err: HuffmanError = v.try_reserve(usize::MAX).unwrap_err().into();
        assert!(matches!(err, HuffmanError::AllocationFailure(_)));
    }
}
