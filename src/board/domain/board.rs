//! Read model grouping tasks under their columns.

use super::{Column, ColumnId, Task};
use serde::Serialize;
use std::collections::HashMap;

/// A column together with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    /// The column itself.
    #[serde(flatten)]
    pub column: Column,
    /// Tasks owned by the column, ascending by position then id.
    pub tasks: Vec<Task>,
}

/// The whole board as rendered by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    /// Columns ascending by position then id.
    pub columns: Vec<BoardColumn>,
}

impl Board {
    /// Groups tasks under their columns.
    ///
    /// Input order is not trusted: columns and tasks are re-sorted by
    /// `(position, id)` so ties from concurrent appends render stably. Tasks
    /// referencing an unknown column are dropped.
    #[must_use]
    pub fn assemble(mut columns: Vec<Column>, mut tasks: Vec<Task>) -> Self {
        columns.sort_by_key(|column| (column.position(), column.id()));
        tasks.sort_by_key(|task| (task.position(), task.id()));

        let mut by_column: HashMap<ColumnId, Vec<Task>> = HashMap::new();
        for task in tasks {
            by_column.entry(task.column_id()).or_default().push(task);
        }

        let grouped = columns
            .into_iter()
            .map(|column| {
                let owned = by_column.remove(&column.id()).unwrap_or_default();
                BoardColumn { column, tasks: owned }
            })
            .collect();

        Self { columns: grouped }
    }

    /// Finds a column of the board by identifier.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&BoardColumn> {
        self.columns.iter().find(|entry| entry.column.id() == id)
    }

    /// Total number of tasks on the board.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|entry| entry.tasks.len()).sum()
    }
}
