//! ViewState snapshot.

use super::FilterSet;
use super::SortState;
use crate::engine::selection::Selection;

/// Snapshot of every user-driven view parameter of one table.
///
/// Owned by the controller; callers get read-only access. `page` is 1-based
/// and is kept within `1..=total_pages` by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub(crate) search_text: String,
    pub(crate) filters: FilterSet,
    pub(crate) active_tab: Option<String>,
    pub(crate) sort: Option<SortState>,
    pub(crate) page: usize,
    pub(crate) selection: Selection,
}

impl ViewState {
    /// Mount-time defaults: empty search and filters, page 1, no selection.
    pub fn new(active_tab: Option<String>, sort: Option<SortState>) -> Self {
        Self {
            search_text: String::new(),
            filters: FilterSet::new(),
            active_tab,
            sort,
            page: 1,
            selection: Selection::new(),
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// The committed filters.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// The current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(None, None)
    }
}
