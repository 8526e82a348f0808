//! Tagged outcome returned by every board action.

use crate::board::validation::FieldErrors;
use serde::Serialize;
use std::fmt;

/// Outcome of a board action.
///
/// Serializes as `{"status":"success","data":…}` or as
/// `{"status":"error","kind":…,"error":…,"details":…}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionResult<T> {
    /// The action completed.
    Success {
        /// Action payload; `null` for plain mutations.
        data: T,
    },
    /// The action failed. Nothing was retried.
    Error(ActionFailure),
}

impl<T> ActionResult<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Returns `true` for the success variant.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the failure of an unsuccessful action.
    #[must_use]
    pub const fn failure(&self) -> Option<&ActionFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Error(failure) => Some(failure),
        }
    }

    /// Converts into a standard [`Result`].
    ///
    /// # Errors
    ///
    /// Returns the [`ActionFailure`] of an unsuccessful action.
    pub fn into_result(self) -> Result<T, ActionFailure> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Error(failure) => Err(failure),
        }
    }
}

/// Failure category, used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionErrorKind {
    /// The input was rejected before touching storage.
    Validation,
    /// The referenced column or task does not exist.
    NotFound,
    /// Storage failed or refused the write.
    Persistence,
}

impl ActionErrorKind {
    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ActionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error payload of a failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionFailure {
    /// Failure category.
    pub kind: ActionErrorKind,
    /// Short summary such as `"Invalid task data"`.
    pub error: String,
    /// Field errors for validation failures, the cause otherwise.
    pub details: FailureDetails,
}

/// Supporting detail attached to an [`ActionFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FailureDetails {
    /// Per-field validation messages.
    Fields(FieldErrors),
    /// Underlying error message.
    Message(String),
}

impl FailureDetails {
    /// Returns the field errors, if any.
    #[must_use]
    pub const fn fields(&self) -> Option<&FieldErrors> {
        match self {
            Self::Fields(fields) => Some(fields),
            Self::Message(_) => None,
        }
    }
}
