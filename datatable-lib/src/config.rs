//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::view::Direction;
use crate::view::SortState;

/// Per-table settings.
///
/// # Example
///
/// ```
/// use datatable_lib::TableConfig;
/// use datatable_lib::view::Direction;
///
/// let config = TableConfig::default()
///     .with_page_size(25)
///     .with_initial_sort("name", Direction::Desc)
///     .with_selectable(true);
/// assert!(config.validate().is_ok());
///
/// let parsed = TableConfig::from_json(r#"{"pageSize": 25, "selectable": true}"#).unwrap();
/// assert_eq!(parsed.page_size, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Column the table is sorted by when it mounts.
    ///
    /// Default: none
    pub initial_sort_column: Option<String>,

    /// Direction for `initial_sort_column`.
    ///
    /// Default: ascending
    pub initial_sort_direction: Direction,

    /// Whether rows can be selected. Selection operations are no-ops otherwise.
    ///
    /// Default: false
    pub selectable: bool,

    /// Commit filter edits immediately instead of staging them until
    /// `apply_filters`.
    ///
    /// Default: false
    pub live_filters: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            initial_sort_column: None,
            initial_sort_direction: Direction::Asc,
            selectable: false,
            live_filters: false,
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config document and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the initial sort.
    pub fn with_initial_sort(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.initial_sort_column = Some(column.into());
        self.initial_sort_direction = direction;
        self
    }

    /// Enables or disables selection.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Switches between live and staged filters.
    pub fn with_live_filters(mut self, live: bool) -> Self {
        self.live_filters = live;
        self
    }

    /// The initial sort as a [`SortState`], if configured.
    pub fn initial_sort(&self) -> Option<SortState> {
        self.initial_sort_column.as_ref().map(|column| SortState {
            column: column.clone(),
            direction: self.initial_sort_direction,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}
