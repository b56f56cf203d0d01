//! Selection tracking by record identity.
//!
//! A [`Selection`] holds identities, never positions, so it is unaffected by
//! filtering, sorting or paging. Only explicit selection operations and
//! [`Selection::prune`] change it.

use std::collections::HashSet;

/// A set of selected record identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected record keys in ascending key order.
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Deselect every record, returning the keys that were dropped.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    /// Select `id` if it is unselected, otherwise deselect it. The pair is
    /// `(added, removed)`; exactly one side holds `id`.
    pub fn toggle(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        if self.selected.remove(id) {
            (vec![], vec![id.to_string()])
        } else {
            self.selected.insert(id.to_string());
            (vec![id.to_string()], vec![])
        }
    }

    /// Extend the selection with `ids` and report which of them were new.
    /// Keys outside `ids` keep their state.
    pub fn select_all<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<String> {
        let mut added = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if !self.selected.contains(id) {
                self.selected.insert(id.to_string());
                added.push(id.to_string());
            }
        }
        added
    }

    /// Whether `ids` covers only selected keys; an empty `ids` never counts.
    pub fn is_all_selected<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.is_selected(id.as_ref()))
    }

    /// Whether `ids` mixes selected and unselected keys.
    pub fn is_partially_selected<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        let hits = ids.iter().filter(|id| self.is_selected(id.as_ref())).count();
        hits > 0 && hits < ids.len()
    }

    /// Keep only the keys `present` still recognises; used after the record
    /// set is replaced. Returns the keys that went away.
    pub fn prune(&mut self, present: impl Fn(&str) -> bool) -> Vec<String> {
        let removed: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !present(id))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert_eq!(selection.toggle("2"), (ids(&["2"]), vec![]));
        assert!(selection.is_selected("2"));
        assert_eq!(selection.toggle("2"), (vec![], ids(&["2"])));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_only_adds() {
        let mut selection = Selection::new();
        selection.toggle("9");
        let added = selection.select_all(&["1", "9", "2"]);
        assert_eq!(added, ids(&["1", "2"]));
        assert_eq!(selection.selected(), ids(&["1", "2", "9"]));
    }

    #[test]
    fn test_all_selected_false_for_empty_slice() {
        let mut selection = Selection::new();
        selection.toggle("1");
        let empty: [&str; 0] = [];
        assert!(!selection.is_all_selected(&empty));
        assert!(!selection.is_partially_selected(&empty));
    }

    #[test]
    fn test_partial_and_full() {
        let mut selection = Selection::new();
        selection.toggle("1");
        assert!(selection.is_partially_selected(&["1", "2"]));
        assert!(!selection.is_all_selected(&["1", "2"]));
        selection.toggle("2");
        assert!(!selection.is_partially_selected(&["1", "2"]));
        assert!(selection.is_all_selected(&["1", "2"]));
    }

    #[test]
    fn test_prune() {
        let mut selection = Selection::new();
        selection.select_all(&["1", "2", "3"]);
        let removed = selection.prune(|id| id != "2");
        assert_eq!(removed, ids(&["2"]));
        assert_eq!(selection.selected(), ids(&["1", "3"]));
    }

    #[test]
    fn test_clear_returns_removed() {
        let mut selection = Selection::new();
        selection.select_all(&["a", "b"]);
        let mut removed = selection.clear();
        removed.sort();
        assert_eq!(removed, ids(&["a", "b"]));
        assert!(selection.is_empty());
    }
}
