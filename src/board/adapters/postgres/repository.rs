//! `PostgreSQL` repository implementation for board storage.

use super::{
    gateway::BoardPgPool,
    models::{ColumnRow, NewColumnRow, NewTaskRow, TaskEditRow, TaskRow},
    schema::{columns, tasks},
};
use crate::board::{
    domain::{
        Column, ColumnChanges, ColumnId, Description, NewColumn, NewTask, PersistedColumnData,
        PersistedTaskData, Position, Task, TaskChanges, TaskId, Title,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn list_columns(&self) -> BoardRepositoryResult<Vec<Column>> {
        self.run_blocking(|connection| {
            let rows = columns::table
                .order((columns::position.asc(), columns::id.asc()))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_column).collect())
        })
        .await
    }

    async fn list_tasks(&self) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((
                    tasks::position.asc(),
                    tasks::column_id.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = columns::table
                .find(id.value())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_column))
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn create_column(&self, column: &NewColumn) -> BoardRepositoryResult<Column> {
        let title = column.title().as_str().to_owned();
        let created_at = column.created_at();

        self.run_blocking(move |connection| {
            let current_max = columns::table
                .select(max(columns::position))
                .get_result::<Option<i32>>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            let position = Position::next_column(current_max.map(Position::from_persisted))?;

            let row = diesel::insert_into(columns::table)
                .values(&NewColumnRow {
                    title: &title,
                    position: position.value(),
                    created_at,
                    updated_at: created_at,
                })
                .returning(ColumnRow::as_returning())
                .get_result::<ColumnRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            Ok(row_to_column(row))
        })
        .await
    }

    async fn update_column(
        &self,
        id: ColumnId,
        changes: &ColumnChanges,
    ) -> BoardRepositoryResult<Column> {
        let title = changes.title().as_str().to_owned();
        let updated_at = changes.updated_at();

        self.run_blocking(move |connection| {
            let row = diesel::update(columns::table.find(id.value()))
                .set((
                    columns::title.eq(&title),
                    columns::updated_at.eq(updated_at),
                ))
                .returning(ColumnRow::as_returning())
                .get_result::<ColumnRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_column)
                .ok_or(BoardRepositoryError::ColumnNotFound(id))
        })
        .await
    }

    async fn delete_column(&self, id: ColumnId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Tasks go with it through `ON DELETE CASCADE`.
            let deleted = diesel::delete(columns::table.find(id.value()))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(BoardRepositoryError::ColumnNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn create_task(&self, task: &NewTask) -> BoardRepositoryResult<Task> {
        let title = task.title().as_str().to_owned();
        let description = task.description().map(|text| text.as_str().to_owned());
        let column_id = task.column_id();
        let created_at = task.created_at();

        self.run_blocking(move |connection| {
            let position = next_task_position(connection, column_id)?;
            let row = diesel::insert_into(tasks::table)
                .values(&NewTaskRow {
                    title: &title,
                    description: description.as_deref(),
                    column_id: column_id.value(),
                    position: position.value(),
                    created_at,
                    updated_at: created_at,
                })
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| map_column_reference_error(err, column_id))?;
            Ok(row_to_task(row))
        })
        .await
    }

    async fn update_task(&self, id: TaskId, changes: &TaskChanges) -> BoardRepositoryResult<Task> {
        let title = changes.title().as_str().to_owned();
        let description = changes.description().map(|text| text.as_str().to_owned());
        let column_id = changes.column_id();
        let updated_at = changes.updated_at();

        self.run_blocking(move |connection| {
            ensure_task_exists(connection, id)?;
            let row = diesel::update(tasks::table.find(id.value()))
                .set(&TaskEditRow {
                    title: &title,
                    description: description.as_deref(),
                    column_id: column_id.value(),
                    updated_at,
                })
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(|err| map_column_reference_error(err, column_id))?;
            row.map(row_to_task)
                .ok_or(BoardRepositoryError::TaskNotFound(id))
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(BoardRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn move_task(
        &self,
        id: TaskId,
        target: ColumnId,
        moved_at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            ensure_task_exists(connection, id)?;
            let position = next_task_position(connection, target)?;
            let row = diesel::update(tasks::table.find(id.value()))
                .set((
                    tasks::column_id.eq(target.value()),
                    tasks::position.eq(position.value()),
                    tasks::updated_at.eq(moved_at),
                ))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(|err| map_column_reference_error(err, target))?;
            row.map(row_to_task)
                .ok_or(BoardRepositoryError::TaskNotFound(id))
        })
        .await
    }
}

fn ensure_task_exists(connection: &mut PgConnection, id: TaskId) -> BoardRepositoryResult<()> {
    let found = tasks::table
        .find(id.value())
        .select(tasks::id)
        .first::<i32>(connection)
        .optional()
        .map_err(BoardRepositoryError::persistence)?;
    found
        .map(|_| ())
        .ok_or(BoardRepositoryError::TaskNotFound(id))
}

/// Reads the tail position of `column_id` and returns the slot after it.
///
/// The read and the following write are separate statements; two concurrent
/// appends to the same column can observe the same maximum.
fn next_task_position(
    connection: &mut PgConnection,
    column_id: ColumnId,
) -> BoardRepositoryResult<Position> {
    let current_max = tasks::table
        .filter(tasks::column_id.eq(column_id.value()))
        .select(max(tasks::position))
        .get_result::<Option<i32>>(connection)
        .map_err(BoardRepositoryError::persistence)?;
    Ok(Position::next_task(
        current_max.map(Position::from_persisted),
    )?)
}

fn map_column_reference_error(err: DieselError, column_id: ColumnId) -> BoardRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            BoardRepositoryError::ColumnNotFound(column_id)
        }
        _ => BoardRepositoryError::persistence(err),
    }
}

fn row_to_column(row: ColumnRow) -> Column {
    let ColumnRow {
        id,
        title,
        position,
        created_at,
        updated_at,
    } = row;

    Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_persisted(id),
        title: Title::from_persisted(title),
        position: Position::from_persisted(position),
        created_at,
        updated_at,
    })
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        title,
        description,
        column_id,
        position,
        created_at,
        updated_at,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_persisted(id),
        title: Title::from_persisted(title),
        description: description.and_then(Description::new),
        column_id: ColumnId::from_persisted(column_id),
        position: Position::from_persisted(position),
        created_at,
        updated_at,
    })
}
