//! Ordering positions for columns and tasks.
//!
//! Positions are not dense. New entries are appended after the current
//! maximum and deletions leave gaps, so readers sort by position and break
//! ties by identifier.

use super::BoardDomainError;
use serde::Serialize;
use std::fmt;

/// Sort key stored in the `"order"` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Position(i32);

impl Position {
    /// Position given to the first column of an empty board.
    pub const FIRST_COLUMN: Self = Self(1);

    /// Position given to the first task of an empty column.
    pub const FIRST_TASK: Self = Self(0);

    /// Wraps a position read back from persistence.
    #[must_use]
    pub const fn from_persisted(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Tail position for a new column given the current maximum.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::PositionOverflow`] when the maximum is
    /// already `i32::MAX`.
    pub fn next_column(current_max: Option<Self>) -> Result<Self, BoardDomainError> {
        current_max.map_or(Ok(Self::FIRST_COLUMN), Self::successor)
    }

    /// Tail position for a task appended to a column given that column's
    /// current maximum.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::PositionOverflow`] when the maximum is
    /// already `i32::MAX`.
    pub fn next_task(current_max: Option<Self>) -> Result<Self, BoardDomainError> {
        current_max.map_or(Ok(Self::FIRST_TASK), Self::successor)
    }

    fn successor(self) -> Result<Self, BoardDomainError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(BoardDomainError::PositionOverflow(self.0))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
