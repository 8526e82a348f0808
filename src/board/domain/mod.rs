//! Domain model for the kanban board.
//!
//! Columns and tasks are plain aggregates with validated scalar fields. All
//! ordering arithmetic lives in [`Position`] so every adapter assigns tail
//! positions the same way.

mod assignee;
mod board;
mod column;
mod error;
mod ids;
mod position;
mod task;
mod text;

pub use assignee::{Assignee, assignees, find_assignee};
pub use board::{Board, BoardColumn};
pub use column::{Column, ColumnChanges, NewColumn, PersistedColumnData};
pub use error::BoardDomainError;
pub use ids::{ColumnId, TaskId};
pub use position::Position;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
pub use text::{Description, Title};
