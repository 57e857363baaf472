/// Settings for [`HuffmanCodec`](crate::HuffmanCodec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Fail decoding when the decoded byte count differs from the recorded
    /// original length.
    pub verify_length: bool,
    /// Reject trees with any code longer than this many bits.
    pub max_code_length: Option<usize>,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verify_length(mut self, verify_length: bool) -> Self {
        self.verify_length = verify_length;
        self
    }

    pub fn with_max_code_length(mut self, max_code_length: usize) -> Self {
        self.max_code_length = Some(max_code_length);
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            verify_length: true,
            max_code_length: None,
        }
    }
}
