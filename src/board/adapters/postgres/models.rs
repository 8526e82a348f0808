//! Diesel row models for board persistence.

use super::schema::{columns, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: i32,
    /// Column title.
    pub title: String,
    /// Board position.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for column records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = columns)]
pub struct NewColumnRow<'a> {
    /// Column title.
    pub title: &'a str,
    /// Board position.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i32,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning column.
    pub column_id: i32,
    /// Position within the owning column.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow<'a> {
    /// Task title.
    pub title: &'a str,
    /// Optional description.
    pub description: Option<&'a str>,
    /// Owning column.
    pub column_id: i32,
    /// Position within the owning column.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for plain task edits. Position is never part of an edit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskEditRow<'a> {
    /// Task title.
    pub title: &'a str,
    /// Optional description; `None` clears the stored value.
    pub description: Option<&'a str>,
    /// Owning column.
    pub column_id: i32,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
