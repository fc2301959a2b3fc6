use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RopeError {
    #[error("index {index} is out of range for rope of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid range {start}..{end}: start is past end")]
    InvalidRange { start: usize, end: usize },

    #[error("malformed node: cached length {cached} but subtree holds {actual} chars")]
    MalformedNode { cached: usize, actual: usize },

    #[error("chunk size must be at least 1, got {0}")]
    InvalidChunkSize(usize),

    #[error("invalid chunk size {value:?}: {source}")]
    ParseChunkSize {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
