//! Generic tabular data engine
//!
//! Takes an arbitrary collection of records, a column schema and user-driven
//! view state (search, per-field filters, tabs, sort, selection, pagination)
//! and derives a deterministic visible slice plus selection bookkeeping.
//!
//! The pipeline is `filter -> sort -> paginate`, recomputed synchronously by
//! [`TableController`] on every view-state change. Each stage is also usable
//! on its own through the [`engine`] module.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod model;
pub mod schema;
pub mod view;

pub use config::TableConfig;
pub use controller::*;
pub use error::TableError;
pub use model::{Record, Value};
pub use schema::{Action, ActionPlacement, Column, FilterField, FilterKind, Tab, TableSchema};
pub use view::{Direction, FilterSet, FilterValue, SortState, ViewState};
