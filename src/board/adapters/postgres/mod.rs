//! `PostgreSQL` adapters for board persistence.

mod gateway;
mod models;
mod repository;
mod schema;

pub use gateway::{BOARD_SCHEMA_SQL, BoardPgPool, GatewayError, PersistenceGateway};
pub use repository::PostgresBoardRepository;
