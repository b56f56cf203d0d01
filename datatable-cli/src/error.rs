//! CLI error type

use std::path::PathBuf;

use datatable_lib::TableError;
use datatable_lib::error::ConfigError;
use datatable_lib::error::FilterValueError;
use datatable_lib::error::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot create log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("input is not a JSON array of objects: {0}")]
    Input(#[from] serde_json::Error),

    #[error("expected KEY=VALUE, got '{0}'")]
    InvalidPair(String),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    FilterValue(#[from] FilterValueError),

    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
}
