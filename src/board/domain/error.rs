//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The column identifier is outside the `SERIAL` range.
    #[error("invalid column id {0}, expected a positive 32-bit integer")]
    InvalidColumnId(i64),

    /// The task identifier is outside the `SERIAL` range.
    #[error("invalid task id {0}, expected a positive 32-bit integer")]
    InvalidTaskId(i64),

    /// Appending after the given position would overflow the `INT` column.
    #[error("position {0} has no successor")]
    PositionOverflow(i32),
}
