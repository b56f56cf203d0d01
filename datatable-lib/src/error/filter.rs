//! Filter value parsing errors

/// Error raised when text cannot be turned into a filter value for a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterValueError {
    /// The text is not a recognised date.
    #[error("'{input}' is not a date (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate { input: String },

    /// A date range must be written as `from..to`, either side optional.
    #[error("'{input}' is not a date range (expected FROM..TO)")]
    InvalidDateRange { input: String },

    /// The text is not a boolean.
    #[error("'{input}' is not a boolean (expected true/false)")]
    InvalidBool { input: String },

    /// The value is not one of the field's options.
    #[error("'{input}' is not an option of '{field}'")]
    UnknownOption { field: String, input: String },
}
