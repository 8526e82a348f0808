//! Input validation for board mutations.
//!
//! Everything here is pure: no function touches storage or the clock. Each
//! validator collects every failing field rather than stopping at the first
//! one, and returns the collected [`FieldErrors`] on failure. The
//! `validate_*_payload` functions run the JSON type checks and the field
//! rules together, so a mistyped field never hides a rule failure elsewhere.

mod errors;
mod forms;

pub use errors::{FieldErrors, ROOT_FIELD};
pub use forms::{ColumnForm, MoveTaskForm, TaskForm};

use crate::board::domain::{Assignee, ColumnId, Description, TaskId, Title, find_assignee};
use serde_json::Value;

const TITLE_REQUIRED: &str = "Title is required";
const COLUMN_REQUIRED: &str = "Column is required";
const INVALID_IDENTIFIER: &str = "Must be a positive 32-bit integer";
const UNKNOWN_ASSIGNEE: &str = "Unknown assignee";

/// A column payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidColumn {
    /// Trimmed, non-empty title.
    pub title: Title,
}

/// A task payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask {
    /// Trimmed, non-empty title.
    pub title: Title,
    /// Description, absent when blank.
    pub description: Option<Description>,
    /// Target column.
    pub column_id: ColumnId,
    /// Directory entry named by `assigneeId`, if any.
    pub assignee: Option<&'static Assignee>,
}

/// Validates a column form.
///
/// # Errors
///
/// Returns [`FieldErrors`] with a `title` entry when the title is missing or
/// blank.
pub fn validate_column_form(form: &ColumnForm) -> Result<ValidColumn, FieldErrors> {
    let mut errors = FieldErrors::new();
    match required_title(form.title.as_deref(), &mut errors) {
        Some(title) if errors.is_empty() => Ok(ValidColumn { title }),
        _ => Err(errors),
    }
}

/// Validates a task form, including the optional assignee reference.
///
/// # Errors
///
/// Returns [`FieldErrors`] naming every failing field among `title`,
/// `columnId` and `assigneeId`.
pub fn validate_task_form(form: &TaskForm) -> Result<ValidTask, FieldErrors> {
    let mut errors = FieldErrors::new();
    let checked_title = required_title(form.title.as_deref(), &mut errors);
    let checked_column = required_column(form.column_id, &mut errors);

    let assignee = form.assignee_id.as_deref().and_then(|id| {
        let found = find_assignee(id);
        if found.is_none() {
            errors.add("assigneeId", UNKNOWN_ASSIGNEE);
        }
        found
    });

    match (checked_title, checked_column) {
        (Some(title), Some(column_id)) if errors.is_empty() => Ok(ValidTask {
            title,
            description: form.description.clone().and_then(Description::new),
            column_id,
            assignee,
        }),
        _ => Err(errors),
    }
}

/// Validates a move form and returns the target column.
///
/// # Errors
///
/// Returns [`FieldErrors`] with a `columnId` entry when the target is
/// missing or out of range.
pub fn validate_move_form(form: &MoveTaskForm) -> Result<ColumnId, FieldErrors> {
    let mut errors = FieldErrors::new();
    required_column(form.column_id, &mut errors).ok_or(errors)
}

/// Reads and validates a column body in one pass.
///
/// # Errors
///
/// Returns every type and rule failure together, or only `_root` when the
/// body is not an object.
pub fn validate_column_payload(body: &Value) -> Result<ValidColumn, FieldErrors> {
    checked_with(ColumnForm::read(body)?, validate_column_form)
}

/// Reads and validates a task body in one pass.
///
/// # Errors
///
/// Returns every type and rule failure together, or only `_root` when the
/// body is not an object.
pub fn validate_task_payload(body: &Value) -> Result<ValidTask, FieldErrors> {
    checked_with(TaskForm::read(body)?, validate_task_form)
}

/// Reads and validates a move body in one pass.
///
/// # Errors
///
/// Returns every type and rule failure together, or only `_root` when the
/// body is not an object.
pub fn validate_move_payload(body: &Value) -> Result<ColumnId, FieldErrors> {
    checked_with(MoveTaskForm::read(body)?, validate_move_form)
}

/// Joins two independent validations, keeping the errors of both.
///
/// # Errors
///
/// Returns the union of both error sets when either side failed.
pub fn validate_both<A, B>(
    first: Result<A, FieldErrors>,
    second: Result<B, FieldErrors>,
) -> Result<(A, B), FieldErrors> {
    match (first, second) {
        (Ok(left), Ok(right)) => Ok((left, right)),
        (Err(mut errors), Err(more)) => {
            errors.merge(more);
            Err(errors)
        }
        (Err(errors), Ok(_)) | (Ok(_), Err(errors)) => Err(errors),
    }
}

fn checked_with<F, V>(
    (form, mut errors): (F, FieldErrors),
    rules: impl FnOnce(&F) -> Result<V, FieldErrors>,
) -> Result<V, FieldErrors> {
    match rules(&form) {
        Ok(valid) if errors.is_empty() => Ok(valid),
        Ok(_) => Err(errors),
        Err(violations) => {
            errors.merge(violations);
            Err(errors)
        }
    }
}

/// Checks that `raw` is a usable column identifier.
///
/// # Errors
///
/// Returns [`FieldErrors`] against `field` when `raw` is not in
/// `1..=i32::MAX`.
pub fn validate_column_id(raw: i64, field: &str) -> Result<ColumnId, FieldErrors> {
    ColumnId::new(raw).map_err(|_| FieldErrors::single(field, INVALID_IDENTIFIER))
}

/// Checks that `raw` is a usable task identifier.
///
/// # Errors
///
/// Returns [`FieldErrors`] against `field` when `raw` is not in
/// `1..=i32::MAX`.
pub fn validate_task_id(raw: i64, field: &str) -> Result<TaskId, FieldErrors> {
    TaskId::new(raw).map_err(|_| FieldErrors::single(field, INVALID_IDENTIFIER))
}

fn required_title(raw: Option<&str>, errors: &mut FieldErrors) -> Option<Title> {
    let title = raw.and_then(|text| Title::new(text).ok());
    if title.is_none() {
        errors.add("title", TITLE_REQUIRED);
    }
    title
}

fn required_column(raw: Option<i64>, errors: &mut FieldErrors) -> Option<ColumnId> {
    let Some(value) = raw else {
        errors.add("columnId", COLUMN_REQUIRED);
        return None;
    };
    let column_id = ColumnId::new(value).ok();
    if column_id.is_none() {
        errors.add("columnId", INVALID_IDENTIFIER);
    }
    column_id
}
