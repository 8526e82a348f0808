//! Connection pool bootstrap and schema application.
//!
//! The gateway is built once per process. Repositories share its pool by
//! cloning the handle, which is reference counted by `r2d2`.

use super::repository::PostgresBoardRepository;
use crate::config::DatabaseSettings;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::{debug, info};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema DDL applied at startup. Every statement is idempotent.
pub const BOARD_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// Errors raised while opening the store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The pool could not be built or could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The schema could not be applied.
    #[error("schema application failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Owner of the process-wide connection pool.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    pool: BoardPgPool,
}

impl PersistenceGateway {
    /// Builds the connection pool described by `settings`.
    ///
    /// This blocks until the pool has established its initial connections,
    /// so async callers should run it on a blocking thread.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Pool`] when the store cannot be reached within
    /// the pool's connection timeout.
    pub fn connect(settings: &DatabaseSettings) -> Result<Self, GatewayError> {
        let manager = ConnectionManager::<PgConnection>::new(settings.conninfo());
        let pool = Pool::builder()
            .max_size(settings.pool_size)
            .build(manager)?;
        info!(
            host = %settings.host,
            port = settings.port,
            database = %settings.name,
            pool_size = settings.pool_size,
            "postgres connection pool ready"
        );
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub const fn from_pool(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Creates the board tables when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when no connection is available or the DDL
    /// fails.
    pub fn ensure_schema(&self) -> Result<(), GatewayError> {
        let mut connection = self.pool.get()?;
        connection.batch_execute(BOARD_SCHEMA_SQL)?;
        debug!("board schema applied");
        Ok(())
    }

    /// Creates a repository backed by the shared pool.
    #[must_use]
    pub fn repository(&self) -> PostgresBoardRepository {
        PostgresBoardRepository::new(self.pool.clone())
    }
}
