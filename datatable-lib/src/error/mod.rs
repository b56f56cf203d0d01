//! Error types

mod config;
mod field;
mod filter;
mod schema;

pub use config::*;
pub use field::*;
pub use filter::*;
pub use schema::*;

/// Any error the table engine can report.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    FilterValue(#[from] FilterValueError),
}
