//! Kanban: a board of ordered columns holding ordered tasks.
//!
//! The crate exposes the board domain together with its storage adapters,
//! a validating action façade, and a small JSON-over-HTTP surface.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board types and ordering arithmetic
//! - **Ports**: The repository contract every store implements
//! - **Adapters**: `PostgreSQL` via Diesel, plus an in-memory store
//! - **Services**: Validation and the action façade
//!
//! # Modules
//!
//! - [`board`]: Board domain, storage and actions
//! - [`config`]: Environment-driven settings
//! - [`http`]: Axum router over the action façade
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod http;
pub mod telemetry;
