//! Loosely typed request payloads.
//!
//! Forms only check JSON shapes. Semantic rules live in the `validate_*`
//! functions so a form can be built once and validated independently.

use super::errors::{FieldErrors, ROOT_FIELD};
use serde_json::{Map, Value};

const EXPECTED_OBJECT: &str = "Expected object";
const EXPECTED_STRING: &str = "Expected string";
const EXPECTED_NUMBER: &str = "Expected number";
const EXPECTED_INTEGER: &str = "Expected integer";

/// Column create/update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnForm {
    /// Raw title, not yet trimmed.
    pub title: Option<String>,
}

/// Task create/update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Raw title, not yet trimmed.
    pub title: Option<String>,
    /// Raw description. `null` and absence are the same.
    pub description: Option<String>,
    /// Raw target column identifier.
    pub column_id: Option<i64>,
    /// Optional assignee identifier.
    pub assignee_id: Option<String>,
}

/// Move payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveTaskForm {
    /// Raw target column identifier.
    pub column_id: Option<i64>,
}

impl ColumnForm {
    /// Reads a column form from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] naming every field whose JSON type is wrong,
    /// or `_root` when the body is not an object.
    pub fn from_json(body: &Value) -> Result<Self, FieldErrors> {
        into_checked(Self::read(body)?)
    }

    /// Reads whatever is well typed, returning type errors alongside the form.
    /// Mistyped fields are left empty.
    pub(super) fn read(body: &Value) -> Result<(Self, FieldErrors), FieldErrors> {
        let object = as_object(body)?;
        let mut errors = FieldErrors::new();
        let title = read_string(object, "title", &mut errors);
        Ok((Self { title }, errors))
    }
}

impl TaskForm {
    /// Reads a task form from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] naming every field whose JSON type is wrong,
    /// or `_root` when the body is not an object.
    pub fn from_json(body: &Value) -> Result<Self, FieldErrors> {
        into_checked(Self::read(body)?)
    }

    pub(super) fn read(body: &Value) -> Result<(Self, FieldErrors), FieldErrors> {
        let object = as_object(body)?;
        let mut errors = FieldErrors::new();
        let form = Self {
            title: read_string(object, "title", &mut errors),
            description: read_string(object, "description", &mut errors),
            column_id: read_integer(object, "columnId", &mut errors),
            assignee_id: read_string(object, "assigneeId", &mut errors),
        };
        Ok((form, errors))
    }
}

impl MoveTaskForm {
    /// Reads a move form from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] when `columnId` is not a number, or `_root`
    /// when the body is not an object.
    pub fn from_json(body: &Value) -> Result<Self, FieldErrors> {
        into_checked(Self::read(body)?)
    }

    pub(super) fn read(body: &Value) -> Result<(Self, FieldErrors), FieldErrors> {
        let object = as_object(body)?;
        let mut errors = FieldErrors::new();
        let column_id = read_integer(object, "columnId", &mut errors);
        Ok((Self { column_id }, errors))
    }
}

fn into_checked<T>((form, errors): (T, FieldErrors)) -> Result<T, FieldErrors> {
    if errors.is_empty() {
        Ok(form)
    } else {
        Err(errors)
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    body.as_object()
        .ok_or_else(|| FieldErrors::single(ROOT_FIELD, EXPECTED_OBJECT))
}

fn read_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.add(field, EXPECTED_STRING);
            None
        }
    }
}

fn read_integer(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Number(number)) => {
            let integer = number.as_i64();
            if integer.is_none() {
                errors.add(field, EXPECTED_INTEGER);
            }
            integer
        }
        Some(_) => {
            errors.add(field, EXPECTED_NUMBER);
            None
        }
    }
}
