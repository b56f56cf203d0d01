//! Table controller.
//!
//! [`TableController`] owns the raw records, the [`ViewState`] and the
//! derived pipeline. Every mutator re-derives synchronously before it
//! returns, so getters always describe the current state against the current
//! records.
//!
//! # Example
//!
//! ```
//! use datatable_lib::{Column, Record, TableConfig, TableController, TableSchema, Value};
//!
//! let schema = TableSchema::<Record>::keyed_by_field("id")
//!     .column(Column::field("name", "Name").sortable())
//!     .build()
//!     .unwrap();
//! let records = vec![
//!     Record::new().set("id", 1).set("name", "Bo"),
//!     Record::new().set("id", 2).set("name", "Amy"),
//! ];
//!
//! let mut table = TableController::with_records(schema, TableConfig::default(), records).unwrap();
//! table.set_sort("name");
//!
//! let names: Vec<Value> = table.visible().iter().map(|r| r.value("name")).collect();
//! assert_eq!(names, vec![Value::from("Amy"), Value::from("Bo")]);
//! ```

mod observer;
mod refresh;

use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;
use std::ops::Range;
use std::time::Instant;

use log::debug;
use log::trace;
use log::warn;

pub use observer::TableObserver;
pub use refresh::RefreshOutcome;
pub use refresh::RefreshTicket;

use self::observer::SelectionCallback;
use self::refresh::RefreshTracker;
use crate::config::TableConfig;
use crate::engine::filter;
use crate::engine::page::Paginator;
use crate::engine::selection::Selection;
use crate::engine::sort;
use crate::error::SchemaError;
use crate::error::TableError;
use crate::schema::Action;
use crate::schema::ActionPlacement;
use crate::schema::TableSchema;
use crate::view::Direction;
use crate::view::FilterSet;
use crate::view::FilterValue;
use crate::view::SortState;
use crate::view::ViewState;

/// Which empty state, if any, the table is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// The raw record set is empty (nothing loaded, or the source is empty).
    NoRecords,
    /// Records exist but none pass the tab, filters and search.
    NoMatches,
    /// At least one record is visible.
    Ready,
}

#[derive(Debug, Default)]
struct Derived {
    /// Filtered and sorted rows (indices into `records`).
    ordered: Vec<usize>,
    /// The current page within `ordered`.
    page_range: Range<usize>,
    total_pages: usize,
}

/// Orchestrates filter, sort, pagination and selection for one table.
pub struct TableController<R> {
    schema: TableSchema<R>,
    config: TableConfig,
    paginator: Paginator,
    records: Vec<R>,
    keys: Vec<String>,
    key_index: HashMap<String, usize>,
    state: ViewState,
    draft: FilterSet,
    derived: Derived,
    refresh: RefreshTracker,
    loaded: bool,
    observer: Option<Box<dyn TableObserver<R>>>,
}

impl<R> TableController<R> {
    /// Mount a table with no records.
    ///
    /// Fails if the config is invalid or the initial sort names a column that
    /// is unknown or not sortable.
    pub fn new(schema: TableSchema<R>, config: TableConfig) -> Result<Self, TableError> {
        let paginator = Paginator::new(config.page_size)?;
        let initial_sort = config.initial_sort();
        if let Some(sort) = &initial_sort {
            schema.sortable_column(&sort.column)?;
        }
        let state = ViewState::new(schema.default_tab_key().map(str::to_string), initial_sort);

        let mut controller = Self {
            schema,
            config,
            paginator,
            records: Vec::new(),
            keys: Vec::new(),
            key_index: HashMap::new(),
            state,
            draft: FilterSet::new(),
            derived: Derived::default(),
            refresh: RefreshTracker::default(),
            loaded: false,
            observer: None,
        };
        controller.recompute();
        Ok(controller)
    }

    /// Mount a table with an initial record set.
    pub fn with_records(
        schema: TableSchema<R>,
        config: TableConfig,
        records: Vec<R>,
    ) -> Result<Self, TableError> {
        let mut controller = Self::new(schema, config)?;
        controller.replace_records(records)?;
        Ok(controller)
    }

    /// Attach the observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl TableObserver<R> + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Attach a closure as a selection-only observer.
    pub fn on_selection_change(&mut self, callback: impl FnMut(&[&R]) + 'static) {
        self.observer = Some(Box::new(SelectionCallback(callback)));
    }

    // -- records --------------------------------------------------------------

    /// Replace the working set wholesale.
    ///
    /// The set is checked against the schema first; on error nothing changes.
    /// On success selected identities absent from the new set are pruned, the
    /// view is re-derived and the selection is re-emitted.
    pub fn replace_records(&mut self, records: Vec<R>) -> Result<(), SchemaError> {
        self.install(records)?;
        self.refresh.supersede();
        Ok(())
    }

    /// Start a refresh and get the ticket its result must be delivered with.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let ticket = self.refresh.begin();
        debug!("Refresh {} started", ticket.id());
        ticket
    }

    /// Deliver the result of a refresh.
    ///
    /// Results older than the newest applied one are dropped. A failed fetch
    /// keeps the previous records and selection and records the error.
    pub fn finish_refresh<E: Display>(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<R>, E>,
    ) -> Result<RefreshOutcome, SchemaError> {
        if !self.refresh.settle(ticket) {
            debug!("Dropping stale refresh {}", ticket.id());
            return Ok(RefreshOutcome::Stale);
        }
        match result {
            Ok(records) => {
                if let Err(e) = self.install(records) {
                    self.refresh.last_error = Some(e.to_string());
                    return Err(e);
                }
                self.refresh.mark_applied(ticket);
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                warn!("Refresh {} failed: {}", ticket.id(), e);
                self.refresh.last_error = Some(e.to_string());
                Ok(RefreshOutcome::Failed)
            }
        }
    }

    fn install(&mut self, records: Vec<R>) -> Result<(), SchemaError> {
        if let Err(e) = self.schema.check_records(&records) {
            warn!("Rejected record set of {} records: {}", records.len(), e);
            return Err(e);
        }

        let keys: Vec<String> = records.iter().map(|r| self.schema.key_of(r)).collect();
        let key_index: HashMap<String, usize> = keys
            .iter()
            .enumerate()
            .map(|(row, key)| (key.clone(), row))
            .collect();

        let pruned = self.state.selection.prune(|id| key_index.contains_key(id));
        if !pruned.is_empty() {
            debug!("Pruned {} selected keys no longer present", pruned.len());
        }

        self.records = records;
        self.keys = keys;
        self.key_index = key_index;
        self.loaded = true;
        self.recompute();
        if self.config.selectable {
            self.notify_selection();
        }
        Ok(())
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Look up a record by identity.
    pub fn record(&self, key: &str) -> Option<&R> {
        self.key_index.get(key).map(|&row| &self.records[row])
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` while a refresh ticket is outstanding.
    pub fn is_loading(&self) -> bool {
        self.refresh.is_loading()
    }

    /// Returns `true` once any record set has been installed.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// The message of the last failed refresh, cleared by the next success.
    pub fn last_refresh_error(&self) -> Option<&str> {
        self.refresh.last_error.as_deref()
    }

    // -- search / tabs / filters ---------------------------------------------

    /// Set the free-text search. The page resets to 1 when the text changes.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.state.search_text {
            return;
        }
        self.state.search_text = text;
        self.state.page = 1;
        self.recompute();
    }

    /// Activate a tab. Unknown tabs are ignored.
    ///
    /// Returns `true` if the active tab changed.
    pub fn set_tab(&mut self, key: &str) -> bool {
        if self.schema.tab(key).is_none() {
            debug!("Ignoring unknown tab '{}'", key);
            return false;
        }
        if self.state.active_tab.as_deref() == Some(key) {
            return false;
        }
        self.state.active_tab = Some(key.to_string());
        self.state.page = 1;
        self.recompute();
        true
    }

    /// Bind a filter value.
    ///
    /// With staged filters this only edits the draft; with live filters the
    /// draft is committed immediately.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.draft.set(key, value);
        if self.config.live_filters {
            self.apply_filters();
        }
    }

    /// Commit the draft filters.
    pub fn apply_filters(&mut self) {
        self.state.filters = self.draft.clone();
        self.state.page = 1;
        self.recompute();
    }

    /// Clear both draft and committed filters.
    pub fn reset_filters(&mut self) {
        self.draft.clear();
        self.state.filters.clear();
        self.state.page = 1;
        self.recompute();
    }

    /// Drop one filter from both the draft and the committed set.
    ///
    /// Returns `true` if a committed filter was removed.
    pub fn remove_filter(&mut self, key: &str) -> bool {
        self.draft.remove(key);
        if self.state.filters.remove(key).is_none() {
            return false;
        }
        self.state.page = 1;
        self.recompute();
        true
    }

    /// The committed filters.
    pub fn active_filters(&self) -> &FilterSet {
        &self.state.filters
    }

    /// The filters being edited, not yet applied in staged mode.
    pub fn draft_filters(&self) -> &FilterSet {
        &self.draft
    }

    pub fn search_text(&self) -> &str {
        &self.state.search_text
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.state.active_tab.as_deref()
    }

    /// Number of raw records in each tab, in declaration order.
    pub fn tab_counts(&self) -> Vec<(&str, usize)> {
        self.schema
            .tabs()
            .iter()
            .map(|tab| {
                let count = self.records.iter().filter(|r| tab.matches(r)).count();
                (tab.key.as_str(), count)
            })
            .collect()
    }

    // -- sort -----------------------------------------------------------------

    /// Sort by a column: ascending on a new column, toggled on the active one.
    ///
    /// Unknown and non-sortable columns are ignored. Returns `true` if the
    /// sort changed.
    pub fn set_sort(&mut self, column: &str) -> bool {
        let direction = match &self.state.sort {
            Some(current) if current.column == column => current.direction.toggled(),
            _ => Direction::Asc,
        };
        self.sort_by(column, direction)
    }

    /// Sort by a column in an explicit direction.
    pub fn sort_by(&mut self, column: &str, direction: Direction) -> bool {
        if let Err(e) = self.schema.sortable_column(column) {
            debug!("Ignoring sort request: {}", e);
            return false;
        }
        self.state.sort = Some(SortState {
            column: column.to_string(),
            direction,
        });
        self.recompute();
        true
    }

    /// Return to filtered order.
    pub fn clear_sort(&mut self) {
        if self.state.sort.take().is_some() {
            self.recompute();
        }
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.state.sort.as_ref()
    }

    // -- pages ----------------------------------------------------------------

    /// Go to a page, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        let len = self.derived.ordered.len();
        self.state.page = self.paginator.clamp(page, len);
        self.derived.page_range = self.paginator.range(self.state.page, len);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.state.page.saturating_sub(1));
    }

    pub fn current_page(&self) -> usize {
        self.state.page
    }

    pub fn total_pages(&self) -> usize {
        self.derived.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    // -- derived view ---------------------------------------------------------

    /// The records on the current page, in display order.
    pub fn visible(&self) -> Vec<&R> {
        self.visible_rows().iter().map(|&row| &self.records[row]).collect()
    }

    /// Row indices of the current page.
    pub fn visible_rows(&self) -> &[usize] {
        &self.derived.ordered[self.derived.page_range.clone()]
    }

    /// Identities of the current page, in display order.
    pub fn visible_keys(&self) -> Vec<&str> {
        self.visible_rows().iter().map(|&row| self.keys[row].as_str()).collect()
    }

    /// Row indices of every matching record, in display order.
    pub fn ordered_rows(&self) -> &[usize] {
        &self.derived.ordered
    }

    /// Number of records passing tab, filters and search.
    pub fn filtered_count(&self) -> usize {
        self.derived.ordered.len()
    }

    pub fn status(&self) -> TableStatus {
        if self.records.is_empty() {
            TableStatus::NoRecords
        } else if self.derived.ordered.is_empty() {
            TableStatus::NoMatches
        } else {
            TableStatus::Ready
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn schema(&self) -> &TableSchema<R> {
        &self.schema
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    // -- selection ------------------------------------------------------------

    /// Flip the selection of one record. Unknown identities are ignored.
    ///
    /// Returns `true` if the operation was applied.
    pub fn toggle_selection(&mut self, key: &str) -> bool {
        if !self.selection_enabled("toggle") {
            return false;
        }
        if !self.key_index.contains_key(key) {
            debug!("Ignoring selection of unknown key '{}'", key);
            return false;
        }
        self.state.selection.toggle(key);
        self.notify_selection();
        true
    }

    /// Select every record on the current page.
    pub fn select_all_visible(&mut self) -> bool {
        if !self.selection_enabled("select all visible") {
            return false;
        }
        let rows = &self.derived.ordered[self.derived.page_range.clone()];
        let keys: Vec<&str> = rows.iter().map(|&row| self.keys[row].as_str()).collect();
        self.state.selection.select_all(&keys);
        self.notify_selection();
        true
    }

    /// Select every record passing tab, filters and search, on any page.
    pub fn select_all_matching(&mut self) -> bool {
        if !self.selection_enabled("select all matching") {
            return false;
        }
        let keys: Vec<&str> = self
            .derived
            .ordered
            .iter()
            .map(|&row| self.keys[row].as_str())
            .collect();
        self.state.selection.select_all(&keys);
        self.notify_selection();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if !self.selection_enabled("clear") {
            return false;
        }
        self.state.selection.clear();
        self.notify_selection();
        true
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.state.selection.is_selected(key)
    }

    /// Selected identities, sorted.
    pub fn selected_keys(&self) -> Vec<String> {
        self.state.selection.selected()
    }

    pub fn selection_count(&self) -> usize {
        self.state.selection.len()
    }

    /// Selected records in raw-record order, visible or not.
    pub fn selected_records(&self) -> Vec<&R> {
        materialize(&self.records, &self.keys, &self.state.selection)
    }

    /// `true` iff the current page is non-empty and fully selected.
    pub fn is_all_visible_selected(&self) -> bool {
        self.state.selection.is_all_selected(&self.visible_keys())
    }

    /// `true` iff some but not all of the current page is selected.
    pub fn is_partially_selected(&self) -> bool {
        self.state.selection.is_partially_selected(&self.visible_keys())
    }

    fn selection_enabled(&self, op: &str) -> bool {
        if !self.config.selectable {
            debug!("Ignoring {} on a non-selectable table", op);
        }
        self.config.selectable
    }

    fn notify_selection(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            let selected = materialize(&self.records, &self.keys, &self.state.selection);
            observer.selection_changed(&selected);
        }
    }

    // -- commands -------------------------------------------------------------

    /// Forward a row activation to the observer. Unknown identities are ignored.
    pub fn activate_row(&mut self, key: &str) -> bool {
        let Some(&row) = self.key_index.get(key) else {
            debug!("Ignoring activation of unknown key '{}'", key);
            return false;
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.row_activated(&self.records[row]);
        }
        true
    }

    /// Toolbar actions that can currently be invoked.
    pub fn enabled_actions(&self) -> Vec<&Action> {
        self.schema
            .actions()
            .iter()
            .filter(|a| a.placement == ActionPlacement::Toolbar)
            .filter(|a| !a.requires_selection || !self.state.selection.is_empty())
            .collect()
    }

    /// Invoke an action and forward it with its targets to the observer.
    ///
    /// Toolbar actions target the selection; row actions target `row`.
    /// Returns `false` if the action is unknown, disabled, or has no target.
    pub fn invoke_action(&mut self, key: &str, row: Option<&str>) -> bool {
        let Some(action) = self.schema.action(key) else {
            debug!("Ignoring unknown action '{}'", key);
            return false;
        };
        let targets: Vec<&R> = match action.placement {
            ActionPlacement::Toolbar => {
                if action.requires_selection && self.state.selection.is_empty() {
                    debug!("Action '{}' requires a selection", key);
                    return false;
                }
                materialize(&self.records, &self.keys, &self.state.selection)
            }
            ActionPlacement::Row => match row.and_then(|k| self.key_index.get(k)) {
                Some(&row) => vec![&self.records[row]],
                None => {
                    debug!("Row action '{}' invoked without a known row", key);
                    return false;
                }
            },
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.action_invoked(key, &targets);
        }
        true
    }

    // -- pipeline -------------------------------------------------------------

    fn recompute(&mut self) {
        let started = Instant::now();
        let filtered = filter::apply(
            &self.records,
            &self.schema,
            self.state.active_tab.as_deref(),
            &self.state.filters,
            &self.state.search_text,
        );
        let ordered = sort::apply(&self.records, &filtered, &self.schema, self.state.sort.as_ref());

        let len = ordered.len();
        self.state.page = self.paginator.clamp(self.state.page, len);
        self.derived = Derived {
            page_range: self.paginator.range(self.state.page, len),
            total_pages: self.paginator.total_pages(len),
            ordered,
        };

        trace!(
            "Derived view: {} records, {} matching, page {}/{} in {:?}",
            self.records.len(),
            len,
            self.state.page,
            self.derived.total_pages,
            started.elapsed()
        );
    }
}

fn materialize<'a, R>(records: &'a [R], keys: &[String], selection: &Selection) -> Vec<&'a R> {
    if selection.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .zip(keys)
        .filter(|(_, key)| selection.is_selected(key))
        .map(|(record, _)| record)
        .collect()
}

impl<R> fmt::Debug for TableController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("records", &self.records.len())
            .field("filtered", &self.derived.ordered.len())
            .field("total_pages", &self.derived.total_pages)
            .finish_non_exhaustive()
    }
}
