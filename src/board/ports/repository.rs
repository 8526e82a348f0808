//! Repository port for columns, tasks and their ordering.
//!
//! Implementations own position assignment: new columns and tasks, and moved
//! tasks, are appended after the current maximum of their scope. The
//! read-max-then-write sequence is not required to be atomic, so concurrent
//! appends may produce equal positions. Readers order ties by identifier.

use crate::board::domain::{
    BoardDomainError, Column, ColumnChanges, ColumnId, NewColumn, NewTask, Task, TaskChanges,
    TaskId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Returns every column ordered by position, ties broken by id.
    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>>;

    /// Returns every task ordered by position, then column id, then id.
    async fn list_tasks(&self) -> BoardRepositoryResult<Vec<Task>>;

    /// Finds a column by identifier.
    ///
    /// Returns `None` when the column does not exist.
    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Appends a new column after the current last one, or at position 1 on
    /// an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Domain`] when the tail position
    /// overflows.
    async fn create_column(&self, column: &NewColumn) -> BoardRepositoryResult<Column>;

    /// Updates the title of an existing column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when no column has
    /// the given id.
    async fn update_column(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
    ) -> BoardRepositoryResult<Column>;

    /// Deletes a column together with all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when nothing was
    /// deleted.
    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<()>;

    /// Appends a new task to the tail of its column, or at position 0 when
    /// the column is empty.
    ///
    /// Column existence is enforced by the foreign key, not pre-checked.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the target
    /// column does not exist.
    async fn create_task(&self, task: &NewTask) -> BoardRepositoryResult<Task>;

    /// Overwrites title, description and column of an existing task without
    /// touching its position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist, leaving storage untouched, or
    /// [`BoardRepositoryError::ColumnNotFound`] when the new column does not
    /// exist.
    async fn update_task(&self, id: TaskId, changes: &TaskChanges)
    -> BoardRepositoryResult<Task>;

    /// Deletes a task. Sibling positions are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when nothing was
    /// deleted.
    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()>;

    /// Moves a task to the tail of `target`.
    ///
    /// Positions in the source column are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist or [`BoardRepositoryError::ColumnNotFound`] when the target
    /// column does not exist.
    async fn move_task(
        &self,
        id: TaskId,
        target: ColumnId,
        moved_at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A domain invariant rejected the write.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
