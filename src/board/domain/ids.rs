//! Identifier types for the board domain.
//!
//! Both tables use `SERIAL` keys, so identifiers are positive `i32` values
//! assigned by the store.

use super::BoardDomainError;
use serde::Serialize;
use std::fmt;

/// Identifier of a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ColumnId(i32);

impl ColumnId {
    /// Creates a validated column identifier from a raw client value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColumnId`] when the value is not in
    /// `1..=i32::MAX`.
    pub fn new(value: i64) -> Result<Self, BoardDomainError> {
        match i32::try_from(value) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(BoardDomainError::InvalidColumnId(value)),
        }
    }

    /// Wraps an identifier read back from persistence.
    #[must_use]
    pub const fn from_persisted(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(i32);

impl TaskId {
    /// Creates a validated task identifier from a raw client value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidTaskId`] when the value is not in
    /// `1..=i32::MAX`.
    pub fn new(value: i64) -> Result<Self, BoardDomainError> {
        match i32::try_from(value) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(BoardDomainError::InvalidTaskId(value)),
        }
    }

    /// Wraps an identifier read back from persistence.
    #[must_use]
    pub const fn from_persisted(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
