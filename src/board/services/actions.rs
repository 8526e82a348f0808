//! Action façade over the board repository.

use super::result::{ActionErrorKind, ActionFailure, ActionResult, FailureDetails};
use super::view::BoardViewCache;
use crate::board::{
    domain::{Board, Column, ColumnChanges, NewColumn, NewTask, Task, TaskChanges},
    ports::{BoardRepository, BoardRepositoryError},
    validation::{
        FieldErrors, validate_both, validate_column_id, validate_column_payload,
        validate_move_payload, validate_task_id, validate_task_payload,
    },
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors raised before they are folded into an
/// [`ActionResult`].
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The payload failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}

impl BoardServiceError {
    /// Returns the failure category reported to callers.
    #[must_use]
    pub const fn kind(&self) -> ActionErrorKind {
        match self {
            Self::Validation(_) => ActionErrorKind::Validation,
            Self::Repository(
                BoardRepositoryError::ColumnNotFound(_) | BoardRepositoryError::TaskNotFound(_),
            ) => ActionErrorKind::NotFound,
            Self::Repository(_) => ActionErrorKind::Persistence,
        }
    }
}

/// Result type for board service internals.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

#[derive(Debug, Clone, Copy)]
struct Action {
    name: &'static str,
    verb: &'static str,
    subject: &'static str,
    mutates: bool,
}

impl Action {
    const fn mutation(name: &'static str, verb: &'static str, subject: &'static str) -> Self {
        Self {
            name,
            verb,
            subject,
            mutates: true,
        }
    }

    const fn read(name: &'static str, subject: &'static str) -> Self {
        Self {
            name,
            verb: "load",
            subject,
            mutates: false,
        }
    }
}

const CREATE_COLUMN: Action = Action::mutation("create_column", "create", "column");
const UPDATE_COLUMN: Action = Action::mutation("update_column", "update", "column");
const DELETE_COLUMN: Action = Action::mutation("delete_column", "delete", "column");
const CREATE_TASK: Action = Action::mutation("create_task", "create", "task");
const UPDATE_TASK: Action = Action::mutation("update_task", "update", "task");
const DELETE_TASK: Action = Action::mutation("delete_task", "delete", "task");
const MOVE_TASK: Action = Action::mutation("move_task", "move", "task");
const LOAD_BOARD: Action = Action::read("board", "board");
const LIST_COLUMNS: Action = Action::read("list_columns", "columns");
const LIST_TASKS: Action = Action::read("list_tasks", "tasks");

/// Board action façade.
///
/// Each mutation validates its input, calls the repository once, and on
/// success invalidates the cached board. Failures come back as
/// [`ActionResult::Error`] values; nothing here panics or returns `Err`.
/// Consecutive actions are independent and never share a transaction.
pub struct BoardService<R, C>
where
    R: BoardRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    cache: BoardViewCache,
    read_delay: Duration,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new board service with an empty view cache.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            cache: BoardViewCache::new(),
            read_delay: Duration::ZERO,
        }
    }

    /// Adds simulated latency to board reads that miss the cache.
    #[must_use]
    pub const fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    /// Returns the board view cache.
    #[must_use]
    pub const fn view_cache(&self) -> &BoardViewCache {
        &self.cache
    }

    /// Creates a column at the end of the board.
    pub async fn create_column(&self, body: &Value) -> ActionResult<()> {
        let outcome = self.try_create_column(body).await;
        self.finish(CREATE_COLUMN, outcome)
    }

    /// Renames column `id`.
    pub async fn update_column(&self, id: i64, body: &Value) -> ActionResult<()> {
        let outcome = self.try_update_column(id, body).await;
        self.finish(UPDATE_COLUMN, outcome)
    }

    /// Deletes column `id` and every task in it.
    pub async fn delete_column(&self, id: i64) -> ActionResult<()> {
        let outcome = self.try_delete_column(id).await;
        self.finish(DELETE_COLUMN, outcome)
    }

    /// Creates a task at the tail of its column and returns it.
    pub async fn create_task(&self, body: &Value) -> ActionResult<Task> {
        let outcome = self.try_create_task(body).await;
        self.finish(CREATE_TASK, outcome)
    }

    /// Edits task `id` in place. Its position is kept even when the column
    /// changes.
    pub async fn update_task(&self, id: i64, body: &Value) -> ActionResult<()> {
        let outcome = self.try_update_task(id, body).await;
        self.finish(UPDATE_TASK, outcome)
    }

    /// Deletes task `id`.
    pub async fn delete_task(&self, id: i64) -> ActionResult<()> {
        let outcome = self.try_delete_task(id).await;
        self.finish(DELETE_TASK, outcome)
    }

    /// Moves task `id` to the tail of the column named in `body`.
    pub async fn move_task(&self, id: i64, body: &Value) -> ActionResult<()> {
        let outcome = self.try_move_task(id, body).await;
        self.finish(MOVE_TASK, outcome)
    }

    /// Returns the whole board, served from the view cache when possible.
    pub async fn board(&self) -> ActionResult<Board> {
        let outcome = self.load_board().await;
        self.finish(LOAD_BOARD, outcome)
    }

    /// Lists every column in board order.
    pub async fn list_columns(&self) -> ActionResult<Vec<Column>> {
        let outcome = self.repository.list_columns().await.map_err(Into::into);
        self.finish(LIST_COLUMNS, outcome)
    }

    /// Lists every task by position, then column, then id.
    pub async fn list_tasks(&self) -> ActionResult<Vec<Task>> {
        let outcome = self.repository.list_tasks().await.map_err(Into::into);
        self.finish(LIST_TASKS, outcome)
    }

    async fn try_create_column(&self, body: &Value) -> BoardServiceResult<()> {
        let valid = validate_column_payload(body)?;
        let column = self
            .repository
            .create_column(&NewColumn::new(valid.title, &*self.clock))
            .await?;
        debug!(
            column_id = %column.id(),
            position = %column.position(),
            "column appended"
        );
        Ok(())
    }

    async fn try_update_column(&self, id: i64, body: &Value) -> BoardServiceResult<()> {
        let (column_id, valid) =
            validate_both(validate_column_id(id, "id"), validate_column_payload(body))?;
        self.repository
            .update_column(column_id, &ColumnChanges::new(valid.title, &*self.clock))
            .await?;
        Ok(())
    }

    async fn try_delete_column(&self, id: i64) -> BoardServiceResult<()> {
        let column_id = validate_column_id(id, "id")?;
        self.repository.delete_column(column_id).await?;
        Ok(())
    }

    async fn try_create_task(&self, body: &Value) -> BoardServiceResult<Task> {
        let valid = validate_task_payload(body)?;
        if let Some(assignee) = valid.assignee {
            debug!(assignee = assignee.id, "assignee accepted but not stored");
        }
        let task = self
            .repository
            .create_task(&NewTask::new(
                valid.title,
                valid.description,
                valid.column_id,
                &*self.clock,
            ))
            .await?;
        debug!(
            task_id = %task.id(),
            column_id = %task.column_id(),
            position = %task.position(),
            "task appended"
        );
        Ok(task)
    }

    async fn try_update_task(&self, id: i64, body: &Value) -> BoardServiceResult<()> {
        let (task_id, valid) =
            validate_both(validate_task_id(id, "id"), validate_task_payload(body))?;
        let changes = TaskChanges::new(
            valid.title,
            valid.description,
            valid.column_id,
            &*self.clock,
        );
        self.repository.update_task(task_id, &changes).await?;
        Ok(())
    }

    async fn try_delete_task(&self, id: i64) -> BoardServiceResult<()> {
        let task_id = validate_task_id(id, "id")?;
        self.repository.delete_task(task_id).await?;
        Ok(())
    }

    async fn try_move_task(&self, id: i64, body: &Value) -> BoardServiceResult<()> {
        let (task_id, target) =
            validate_both(validate_task_id(id, "id"), validate_move_payload(body))?;
        let task = self
            .repository
            .move_task(task_id, target, self.clock.utc())
            .await?;
        debug!(
            task_id = %task.id(),
            column_id = %task.column_id(),
            position = %task.position(),
            "task moved to column tail"
        );
        Ok(())
    }

    async fn load_board(&self) -> BoardServiceResult<Board> {
        if let Some(cached) = self.cache.get() {
            debug!("board served from cache");
            return Ok(Board::clone(&cached));
        }

        let generation = self.cache.generation();
        let columns = self.repository.list_columns().await?;
        let tasks = self.repository.list_tasks().await?;
        let board = Arc::new(Board::assemble(columns, tasks));

        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }
        if !self.cache.store(Arc::clone(&board), generation) {
            debug!("board changed during read; result not cached");
        }
        Ok(Board::clone(&board))
    }

    fn finish<T>(&self, action: Action, outcome: BoardServiceResult<T>) -> ActionResult<T> {
        match outcome {
            Ok(data) => {
                if action.mutates {
                    self.cache.invalidate();
                    info!(action = action.name, "board action succeeded");
                } else {
                    debug!(action = action.name, "board read succeeded");
                }
                ActionResult::success(data)
            }
            Err(err) => {
                let failure = into_failure(action, err);
                warn!(
                    action = action.name,
                    kind = %failure.kind,
                    details = ?failure.details,
                    "{}",
                    failure.error
                );
                ActionResult::Error(failure)
            }
        }
    }
}

fn into_failure(action: Action, err: BoardServiceError) -> ActionFailure {
    let kind = err.kind();
    match err {
        BoardServiceError::Validation(fields) => ActionFailure {
            kind,
            error: format!("Invalid {} data", action.subject),
            details: FailureDetails::Fields(fields),
        },
        BoardServiceError::Repository(source) => ActionFailure {
            kind,
            error: format!("Failed to {} {}", action.verb, action.subject),
            details: FailureDetails::Message(source.to_string()),
        },
    }
}
