//! Typed field access errors

use crate::model::Value;

/// Raised by the typed getters on [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("field '{field}' is not present")]
    Missing { field: String },

    #[error("field '{field}' holds {actual}, not {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::Missing {
            field: field.to_string(),
        }
    }

    pub(crate) fn unexpected(field: &str, expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected,
            actual: found.type_name(),
        }
    }

    /// The field the error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}
