//! Column definitions.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::Accessor;
use super::Comparator;
use crate::model::Record;
use crate::model::Value;

/// Column configuration.
///
/// Columns define how a value is read from a record for default sorting and
/// free-text search, and whether the column takes part in either.
///
/// # Examples
///
/// ```
/// use datatable_lib::model::{Record, Value};
/// use datatable_lib::schema::Column;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::field("id", "ID").not_searchable(),
///     Column::field("name", "Name").sortable(),
///     Column::new("status", "Status", |r: &Record| r.value("status")).sortable(),
/// ];
/// ```
pub struct Column<R> {
    /// Unique key within the schema.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Whether the column can become the active sort column.
    pub sortable: bool,
    /// Whether free-text search scans this column. Defaults to `true`.
    pub searchable: bool,
    accessor: Accessor<R>,
    comparator: Option<Comparator<R>>,
}

impl<R> Column<R> {
    /// Create a column reading its value through `accessor`.
    ///
    /// The accessor must yield a consistent value kind across records;
    /// nulls are always allowed.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            searchable: true,
            accessor: Arc::new(accessor),
            comparator: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Exclude the column from free-text search.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Override the default value ordering with an explicit comparator.
    ///
    /// The comparator defines ascending order; descending is its reverse.
    /// Rows whose column value is null still sort last and never reach it.
    /// Implies [`sortable`](Column::sortable).
    pub fn with_comparator(
        mut self,
        comparator: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self.sortable = true;
        self
    }

    /// Read this column's value from a record.
    pub fn value(&self, record: &R) -> Value {
        (self.accessor)(record)
    }

    /// The explicit comparator, if one was supplied.
    pub fn comparator(&self) -> Option<&Comparator<R>> {
        self.comparator.as_ref()
    }
}

impl Column<Record> {
    /// Create a column that reads the record field named `key`.
    pub fn field(key: impl Into<String>, header: impl Into<String>) -> Self {
        let key = key.into();
        let field = key.clone();
        Self::new(key, header, move |record: &Record| record.value(&field))
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            accessor: Arc::clone(&self.accessor),
            comparator: self.comparator.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}
