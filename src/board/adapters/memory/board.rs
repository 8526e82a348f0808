//! In-memory board repository for tests and storage-less development runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::board::{
    domain::{
        Column, ColumnChanges, ColumnId, NewColumn, NewTask, PersistedColumnData,
        PersistedTaskData, Position, Task, TaskChanges, TaskId,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
///
/// Every operation holds the state lock for its whole duration, so appends
/// never race here even though the port allows it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    columns: BTreeMap<ColumnId, Column>,
    tasks: BTreeMap<TaskId, Task>,
    column_sequence: i32,
    task_sequence: i32,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: &PoisonError<T>) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Advances a `SERIAL`-like sequence.
fn next_serial(sequence: &mut i32) -> BoardRepositoryResult<i32> {
    let next = sequence.checked_add(1).ok_or_else(|| {
        BoardRepositoryError::persistence(std::io::Error::other("identifier sequence exhausted"))
    })?;
    *sequence = next;
    Ok(next)
}

fn max_column_position(state: &InMemoryBoardState) -> Option<Position> {
    state.columns.values().map(Column::position).max()
}

fn max_task_position(state: &InMemoryBoardState, column_id: ColumnId) -> Option<Position> {
    state
        .tasks
        .values()
        .filter(|task| task.column_id() == column_id)
        .map(Task::position)
        .max()
}

/// Emulates the `tasks.column_id` foreign key.
fn ensure_column_exists(
    state: &InMemoryBoardState,
    column_id: ColumnId,
) -> BoardRepositoryResult<()> {
    if state.columns.contains_key(&column_id) {
        Ok(())
    } else {
        Err(BoardRepositoryError::ColumnNotFound(column_id))
    }
}

fn relocated(task: &Task, column_id: ColumnId, position: Position, at: DateTime<Utc>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        title: task.title().clone(),
        description: task.description().cloned(),
        column_id,
        position,
        created_at: task.created_at(),
        updated_at: at,
    })
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut columns: Vec<Column> = state.columns.values().cloned().collect();
        columns.sort_by_key(|column| (column.position(), column.id()));
        Ok(columns)
    }

    async fn list_tasks(&self) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| (task.position(), task.column_id(), task.id()));
        Ok(tasks)
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.columns.get(&id).cloned())
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn create_column(&self, column: &NewColumn) -> BoardRepositoryResult<Column> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let position = Position::next_column(max_column_position(&state))?;
        let id = ColumnId::from_persisted(next_serial(&mut state.column_sequence)?);

        let created = Column::from_persisted(PersistedColumnData {
            id,
            title: column.title().clone(),
            position,
            created_at: column.created_at(),
            updated_at: column.created_at(),
        });
        state.columns.insert(id, created.clone());
        Ok(created)
    }

    async fn update_column(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
    ) -> BoardRepositoryResult<Column> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let existing = state
            .columns
            .get(&id)
            .ok_or(BoardRepositoryError::ColumnNotFound(id))?;

        let updated = Column::from_persisted(PersistedColumnData {
            id,
            title: changes.title().clone(),
            position: existing.position(),
            created_at: existing.created_at(),
            updated_at: changes.updated_at(),
        });
        state.columns.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.columns.remove(&id).is_none() {
            return Err(BoardRepositoryError::ColumnNotFound(id));
        }
        // No foreign key here to cascade for us.
        state.tasks.retain(|_, task| task.column_id() != id);
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> BoardRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        ensure_column_exists(&state, task.column_id())?;
        let position = Position::next_task(max_task_position(&state, task.column_id()))?;
        let id = TaskId::from_persisted(next_serial(&mut state.task_sequence)?);

        let created = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().clone(),
            description: task.description().cloned(),
            column_id: task.column_id(),
            position,
            created_at: task.created_at(),
            updated_at: task.created_at(),
        });
        state.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, changes: &TaskChanges) -> BoardRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let existing = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(BoardRepositoryError::TaskNotFound(id))?;
        ensure_column_exists(&state, changes.column_id())?;

        let updated = Task::from_persisted(PersistedTaskData {
            id,
            title: changes.title().clone(),
            description: changes.description().cloned(),
            column_id: changes.column_id(),
            position: existing.position(),
            created_at: existing.created_at(),
            updated_at: changes.updated_at(),
        });
        state.tasks.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(BoardRepositoryError::TaskNotFound(id))
    }

    async fn move_task(
        &self,
        id: TaskId,
        target: ColumnId,
        moved_at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let existing = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(BoardRepositoryError::TaskNotFound(id))?;
        ensure_column_exists(&state, target)?;

        let position = Position::next_task(max_task_position(&state, target))?;
        let moved = relocated(&existing, target, position, moved_at);
        state.tasks.insert(id, moved.clone());
        Ok(moved)
    }
}
