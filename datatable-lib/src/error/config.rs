//! Configuration error types

/// Error raised while building or loading a [`TableConfig`](crate::TableConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Page size must be a positive integer.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    /// The config document could not be parsed.
    #[error("invalid table config: {0}")]
    Parse(#[from] serde_json::Error),
}
