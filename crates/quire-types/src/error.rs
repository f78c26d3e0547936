use thiserror::Error;

/// Errors produced when parsing foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid content hash: {0}")]
    InvalidHex(String),

    #[error("invalid content hash length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
