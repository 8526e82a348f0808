//! Task aggregate and its write models.

use super::{ColumnId, Description, Position, TaskId, Title};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// A task card placed in exactly one column.
///
/// `position` is scoped to `column_id`; two tasks in different columns may
/// share a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: Title,
    description: Option<Description>,
    column_id: ColumnId,
    #[serde(rename = "order")]
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description, if any.
    pub description: Option<Description>,
    /// Owning column.
    pub column_id: ColumnId,
    /// Position within the owning column.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            column_id: data.column_id,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the position within the owning column.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Task insert request; the repository assigns the id and tail position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: Title,
    description: Option<Description>,
    column_id: ColumnId,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates an insert request stamped with the current clock time.
    #[must_use]
    pub fn new(
        title: Title,
        description: Option<Description>,
        column_id: ColumnId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            title,
            description,
            column_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the requested title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the requested description.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the target column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the creation timestamp, also used as the first update time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Editable task fields.
///
/// Changing `column_id` through a plain edit keeps the stored position;
/// use a move to append at the tail of another column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    title: Title,
    description: Option<Description>,
    column_id: ColumnId,
    updated_at: DateTime<Utc>,
}

impl TaskChanges {
    /// Creates an edit stamped with the current clock time.
    #[must_use]
    pub fn new(
        title: Title,
        description: Option<Description>,
        column_id: ColumnId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            title,
            description,
            column_id,
            updated_at: clock.utc(),
        }
    }

    /// Returns the new title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the new description.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the new owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
