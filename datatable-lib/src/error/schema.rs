//! Schema error types
//!
//! These indicate a programming defect in how a table was declared or fed,
//! not a runtime condition, and are reported as early as possible.

use crate::model::ValueKind;

/// Error raised when a table schema or record set violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A schema entry was declared with an empty key.
    #[error("{what} key must not be empty")]
    EmptyKey { what: &'static str },

    /// Two columns share a key.
    #[error("duplicate column key '{0}'")]
    DuplicateColumn(String),

    /// Two filter fields share a key.
    #[error("duplicate filter field key '{0}'")]
    DuplicateFilterField(String),

    /// Two tabs share a key.
    #[error("duplicate tab key '{0}'")]
    DuplicateTab(String),

    /// Two actions share a key.
    #[error("duplicate action key '{0}'")]
    DuplicateAction(String),

    /// The initial sort references a column that does not exist.
    #[error("sort column '{0}' is not part of the schema")]
    UnknownSortColumn(String),

    /// The initial sort references a column that is not sortable.
    #[error("column '{0}' is not sortable")]
    NotSortable(String),

    /// A column yielded values of different kinds across the record set.
    #[error("column '{column}' yields both {expected} and {found} values")]
    InconsistentColumnType {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Two records in one record set share an identity.
    #[error("duplicate record key '{0}'")]
    DuplicateRecordKey(String),
}
