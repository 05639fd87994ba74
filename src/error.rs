//! Error types shared by every index operation.

use thiserror::Error;

/// Errors returned by index construction, mutation, search, and
/// persistence. Every failing operation reports its error to the caller
/// synchronously and leaves the index unchanged.
#[derive(Debug, Error)]
pub enum IndexError {
    /// An input vector's length differs from the index dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A vector identifier beyond the current index size.
    #[error("identifier {id} out of range for index of size {size}")]
    OutOfRange { id: usize, size: usize },

    /// A parameter rejected before any work happens.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A persisted blob inconsistent with its own declared layout.
    #[error("corrupt index data: {0}")]
    CorruptData(String),

    /// An underlying file read or write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
