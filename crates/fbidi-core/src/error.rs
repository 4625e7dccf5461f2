#![forbid(unsafe_code)]

//! Error type shared by the reordering and shaping crates.

use thiserror::Error;

/// Failure modes of reordering, index mapping, writing, and shaping.
///
/// Validation errors are reported before any output is produced. Callers
/// that pre-flight a fixed buffer match on [`BidiError::BufferOverflow`] and
/// retry with `required` capacity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidiError {
    /// An index, range, or option combination is out of bounds or invalid.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    /// The destination slice is too small; `required` is the full length.
    #[error("buffer overflow: {required} code points required")]
    BufferOverflow { required: usize },
    /// A working allocation could not be reserved.
    #[error("memory allocation failed")]
    MemoryAllocation,
    /// A LamAlef could not be expanded because no adjacent space was free.
    #[error("no space available to expand a composite character")]
    NoSpaceAvailable,
    /// An internal consistency check failed.
    #[error("invalid internal state: {0}")]
    InvalidState(&'static str),
}

impl BidiError {
    /// Shorthand for [`BidiError::IllegalArgument`].
    pub fn illegal(msg: impl Into<String>) -> Self {
        Self::IllegalArgument(msg.into())
    }
}

impl From<std::collections::TryReserveError> for BidiError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::MemoryAllocation
    }
}

pub type Result<T> = std::result::Result<T, BidiError>;
