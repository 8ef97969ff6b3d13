//! Errors returned by column operations.

use thiserror::Error;

use crate::Type;

/// Errors that can occur when reading, writing, or reshaping a column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementsError {
    #[error("invalid index {index} (out of bounds for {len}-element container)")]
    InvalidIndex { index: usize, len: usize },
    #[error("index size {requested} exceeds elements size {available}")]
    SizeMismatch { requested: usize, available: usize },
    #[error("{expected} elements can't append {found}")]
    TypeMismatch { expected: Type, found: Type },
    #[error("invalid bit bool value {0}")]
    InvalidState(u8),
    #[error("byte length {len} is not a multiple of word width {width}")]
    ByteLength { len: usize, width: usize },
    #[error("byte slices exhausted before column was read")]
    BytesExhausted,
    /// An error raised inside a column, tagged with the public operation it surfaced from.
    #[error("{op} error: {source}")]
    Context { op: &'static str, source: Box<ElementsError> },
}

impl ElementsError {
    /// Wraps `self` with the name of the operation that observed it.
    pub fn context(self, op: &'static str) -> Self {
        log::debug!("{op} failed: {self}");
        ElementsError::Context { op, source: Box::new(self) }
    }

    /// The originating error, beneath any operation context.
    pub fn cause(&self) -> &ElementsError {
        match self {
            ElementsError::Context { source, .. } => source.cause(),
            other => other,
        }
    }
}

/// Result type used by all column operations.
pub type Result<T> = std::result::Result<T, ElementsError>;
