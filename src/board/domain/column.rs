//! Column aggregate and its write models.

use super::{ColumnId, Position, Title};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// A board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    id: ColumnId,
    title: Title,
    #[serde(rename = "order")]
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Persisted title.
    pub title: Title,
    /// Persisted board position.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the board position.
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

/// Column insert request; the repository assigns the id and tail position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColumn {
    title: Title,
    created_at: DateTime<Utc>,
}

impl NewColumn {
    /// Creates an insert request stamped with the current clock time.
    #[must_use]
    pub fn new(title: Title, clock: &impl Clock) -> Self {
        Self {
            title,
            created_at: clock.utc(),
        }
    }

    /// Returns the requested title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the creation timestamp, also used as the first update time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Editable column fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChanges {
    title: Title,
    updated_at: DateTime<Utc>,
}

impl ColumnChanges {
    /// Creates a title change stamped with the current clock time.
    #[must_use]
    pub fn new(title: Title, clock: &impl Clock) -> Self {
        Self {
            title,
            updated_at: clock.utc(),
        }
    }

    /// Returns the new title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
