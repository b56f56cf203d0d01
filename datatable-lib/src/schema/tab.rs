//! Tab segmentation.

use std::fmt;
use std::sync::Arc;

use super::Predicate;

/// A named predicate shortcut shown as a tab above the table.
///
/// At most one tab is active. A tab without a predicate is the universal
/// "all" tab and constrains nothing.
pub struct Tab<R> {
    pub key: String,
    pub label: String,
    predicate: Option<Predicate<R>>,
}

impl<R> Tab<R> {
    /// The universal tab.
    pub fn all(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            predicate: None,
        }
    }

    /// A tab keeping only records that satisfy `predicate`.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        predicate: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            predicate: Some(Arc::new(predicate)),
        }
    }

    /// Returns `true` for the universal tab.
    pub fn is_universal(&self) -> bool {
        self.predicate.is_none()
    }

    /// Returns `true` if the record belongs to this tab.
    pub fn matches(&self, record: &R) -> bool {
        self.predicate.as_ref().is_none_or(|p| p(record))
    }
}

impl<R> Clone for Tab<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<R> fmt::Debug for Tab<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("universal", &self.is_universal())
            .finish()
    }
}
