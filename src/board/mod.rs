//! Kanban board: columns holding ordered tasks.
//!
//! Columns and tasks are appended at the tail of their scope and never
//! renumbered; deletes leave gaps and readers order by position then id.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Input validation in [`validation`]
//! - The action façade in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
