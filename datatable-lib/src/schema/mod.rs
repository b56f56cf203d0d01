//! Table schema: columns, filter fields, tabs and actions.
//!
//! A [`TableSchema`] is declared once by the owning page and validated when
//! it is built. Duplicate or empty keys are programming errors and surface as
//! [`SchemaError`] from [`TableSchemaBuilder::build`].
//!
//! # Example
//!
//! ```
//! use datatable_lib::model::Record;
//! use datatable_lib::schema::{Column, FilterField, FilterKind, Tab, TableSchema};
//!
//! let schema = TableSchema::<Record>::keyed_by_field("id")
//!     .column(Column::field("name", "Name").sortable())
//!     .column(Column::field("status", "Status"))
//!     .filter_field(FilterField::on_field(
//!         "status",
//!         "Status",
//!         FilterKind::select([("Active", "Active"), ("Inactive", "Inactive")]),
//!         "status",
//!     ))
//!     .tab(Tab::all("all", "All"))
//!     .tab(Tab::new("active", "Active", |r: &Record| {
//!         r.get_string("status").ok().flatten() == Some("Active")
//!     }))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.default_tab_key(), Some("all"));
//! ```

mod action;
mod column;
mod filter_field;
mod tab;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

pub use action::*;
pub use column::*;
pub use filter_field::*;
pub use tab::*;

use crate::error::SchemaError;
use crate::model::Record;
use crate::model::Value;
use crate::model::ValueKind;

/// Reads a value from a record.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Orders two records (ascending).
pub type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Decides whether a record belongs to a tab.
pub type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Extracts a record's stable identity.
pub type KeyAccessor<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// The validated schema of one table.
pub struct TableSchema<R> {
    key: KeyAccessor<R>,
    columns: Vec<Column<R>>,
    filter_fields: Vec<FilterField<R>>,
    tabs: Vec<Tab<R>>,
    actions: Vec<Action>,
}

impl<R> TableSchema<R> {
    /// Start a schema whose record identity is produced by `key`.
    pub fn builder(key: impl Fn(&R) -> String + Send + Sync + 'static) -> TableSchemaBuilder<R> {
        TableSchemaBuilder {
            key: Arc::new(key),
            columns: Vec::new(),
            filter_fields: Vec::new(),
            tabs: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// The identity of a record.
    pub fn key_of(&self, record: &R) -> String {
        (self.key)(record)
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Look up a column by key.
    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn filter_fields(&self) -> &[FilterField<R>] {
        &self.filter_fields
    }

    /// Look up a filter field by key.
    pub fn filter_field(&self, key: &str) -> Option<&FilterField<R>> {
        self.filter_fields.iter().find(|f| f.key == key)
    }

    pub fn tabs(&self) -> &[Tab<R>] {
        &self.tabs
    }

    /// Look up a tab by key.
    pub fn tab(&self, key: &str) -> Option<&Tab<R>> {
        self.tabs.iter().find(|t| t.key == key)
    }

    /// The tab active when a table mounts: the first declared one.
    pub fn default_tab_key(&self) -> Option<&str> {
        self.tabs.first().map(|t| t.key.as_str())
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Look up an action by key.
    pub fn action(&self, key: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.key == key)
    }

    /// Resolve a column that may become the active sort column.
    pub fn sortable_column(&self, key: &str) -> Result<&Column<R>, SchemaError> {
        let column = self
            .column(key)
            .ok_or_else(|| SchemaError::UnknownSortColumn(key.to_string()))?;
        if column.sortable {
            Ok(column)
        } else {
            Err(SchemaError::NotSortable(key.to_string()))
        }
    }

    /// Check a record set against the schema.
    ///
    /// Every column must yield one value kind across all records (nulls
    /// excepted) and record identities must be unique.
    pub fn check_records(&self, records: &[R]) -> Result<(), SchemaError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            let key = self.key_of(record);
            if !seen.insert(key.clone()) {
                return Err(SchemaError::DuplicateRecordKey(key));
            }
        }

        for column in &self.columns {
            let mut expected: Option<ValueKind> = None;
            for record in records {
                let kind = column.value(record).kind();
                if kind == ValueKind::Null {
                    continue;
                }
                match expected {
                    None => expected = Some(kind),
                    Some(e) if e != kind => {
                        return Err(SchemaError::InconsistentColumnType {
                            column: column.key.clone(),
                            expected: e,
                            found: kind,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

impl TableSchema<Record> {
    /// Start a schema for dynamic records identified by the field `field`.
    pub fn keyed_by_field(field: impl Into<String>) -> TableSchemaBuilder<Record> {
        let field = field.into();
        Self::builder(move |record: &Record| record.value(&field).to_string())
    }
}

impl<R> Clone for TableSchema<R> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            columns: self.columns.clone(),
            filter_fields: self.filter_fields.clone(),
            tabs: self.tabs.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<R> fmt::Debug for TableSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSchema")
            .field("columns", &self.columns)
            .field("filter_fields", &self.filter_fields)
            .field("tabs", &self.tabs)
            .field("actions", &self.actions)
            .finish()
    }
}

/// Builder for [`TableSchema`].
pub struct TableSchemaBuilder<R> {
    key: KeyAccessor<R>,
    columns: Vec<Column<R>>,
    filter_fields: Vec<FilterField<R>>,
    tabs: Vec<Tab<R>>,
    actions: Vec<Action>,
}

impl<R> TableSchemaBuilder<R> {
    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column<R>>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn filter_field(mut self, field: FilterField<R>) -> Self {
        self.filter_fields.push(field);
        self
    }

    pub fn filter_fields(mut self, fields: impl IntoIterator<Item = FilterField<R>>) -> Self {
        self.filter_fields.extend(fields);
        self
    }

    pub fn tab(mut self, tab: Tab<R>) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<TableSchema<R>, SchemaError> {
        check_keys(
            self.columns.iter().map(|c| c.key.as_str()),
            "column",
            SchemaError::DuplicateColumn,
        )?;
        check_keys(
            self.filter_fields.iter().map(|f| f.key.as_str()),
            "filter field",
            SchemaError::DuplicateFilterField,
        )?;
        check_keys(
            self.tabs.iter().map(|t| t.key.as_str()),
            "tab",
            SchemaError::DuplicateTab,
        )?;
        check_keys(
            self.actions.iter().map(|a| a.key.as_str()),
            "action",
            SchemaError::DuplicateAction,
        )?;

        Ok(TableSchema {
            key: self.key,
            columns: self.columns,
            filter_fields: self.filter_fields,
            tabs: self.tabs,
            actions: self.actions,
        })
    }
}

fn check_keys<'a>(
    keys: impl Iterator<Item = &'a str>,
    what: &'static str,
    duplicate: fn(String) -> SchemaError,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.is_empty() {
            return Err(SchemaError::EmptyKey { what });
        }
        if !seen.insert(key) {
            return Err(duplicate(key.to_string()));
        }
    }
    Ok(())
}
