//! Shared helpers for `PostgreSQL` board integration tests.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Error as PoolError, Pool};
use diesel::{Connection, RunQueryDsl};
use kanban::board::adapters::postgres::{BoardPgPool, PersistenceGateway, PostgresBoardRepository};
use kanban::board::domain::{ColumnId, NewColumn, NewTask, Title};
use kanban::board::ports::BoardRepository;
use mockable::DefaultClock;
use std::sync::OnceLock;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL: &str = "KANBAN_TEST_DATABASE_URL";

static SCHEMA_READY: OnceLock<Result<(), String>> = OnceLock::new();

/// Opens every pooled connection inside a test transaction that is never
/// committed.
#[derive(Debug, Clone, Copy)]
struct TestTransaction;

impl CustomizeConnection<PgConnection, PoolError> for TestTransaction {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), PoolError> {
        connection
            .begin_test_transaction()
            .map_err(PoolError::QueryError)
    }
}

fn ensure_schema(url: &str) -> Result<(), eyre::Report> {
    let outcome = SCHEMA_READY.get_or_init(|| {
        let manager = ConnectionManager::<PgConnection>::new(url);
        Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|err| err.to_string())
            .and_then(|pool| {
                PersistenceGateway::from_pool(pool)
                    .ensure_schema()
                    .map_err(|err| err.to_string())
            })
    });
    outcome
        .clone()
        .map_err(|message| eyre::eyre!("schema bootstrap failed: {message}"))
}

fn open_pool(url: &str) -> Result<BoardPgPool, eyre::Report> {
    ensure_schema(url)?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    // A single connection keeps every call inside the same test transaction.
    Ok(Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(TestTransaction))
        .build(manager)?)
}

/// Returns a single-connection pool bound to a private test transaction.
///
/// # Errors
///
/// Returns an error if `KANBAN_TEST_DATABASE_URL` is unset, the schema cannot
/// be applied, or the pool cannot be built.
pub async fn test_pool() -> Result<BoardPgPool, eyre::Report> {
    let url = std::env::var(TEST_DATABASE_URL)
        .map_err(|_| eyre::eyre!("{TEST_DATABASE_URL} must name a PostgreSQL test database"))?;
    tokio::task::spawn_blocking(move || open_pool(&url)).await?
}

/// Returns a repository bound to a private test transaction.
///
/// # Errors
///
/// Returns an error under the same conditions as [`test_pool`].
pub async fn test_repository() -> Result<PostgresBoardRepository, eyre::Report> {
    Ok(PersistenceGateway::from_pool(test_pool().await?).repository())
}

/// Runs raw SQL on the pool's test connection.
///
/// # Errors
///
/// Returns an error if no connection is available or the statement fails.
pub async fn execute_sql(pool: &BoardPgPool, sql: &'static str) -> Result<usize, eyre::Report> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get()?;
        let affected = diesel::sql_query(sql).execute(&mut *connection)?;
        Ok::<_, eyre::Report>(affected)
    })
    .await?
}

/// Creates a column and returns its identifier.
///
/// # Errors
///
/// Returns an error if the title is invalid or the insert fails.
pub async fn add_column(
    repository: &PostgresBoardRepository,
    title: &str,
) -> Result<ColumnId, eyre::Report> {
    let column = repository
        .create_column(&NewColumn::new(Title::new(title)?, &DefaultClock))
        .await?;
    Ok(column.id())
}

/// Creates a task and returns it.
///
/// # Errors
///
/// Returns an error if the title is invalid or the insert fails.
pub async fn add_task(
    repository: &PostgresBoardRepository,
    title: &str,
    column_id: ColumnId,
) -> Result<kanban::board::domain::Task, eyre::Report> {
    Ok(repository
        .create_task(&NewTask::new(
            Title::new(title)?,
            None,
            column_id,
            &DefaultClock,
        ))
        .await?)
}
