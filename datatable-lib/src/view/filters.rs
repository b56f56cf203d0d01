//! Filter values bound to filter fields.

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;

use crate::model::Value;

/// A value bound to a filter field.
///
/// Empty values (blank text, empty set, open range) do not constrain.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Exact text.
    Text(String),
    /// A single value; matches by equality.
    One(Value),
    /// A set of values; matches by membership.
    Many(Vec<Value>),
    /// A single date bound; its side comes from the field's kind.
    Date(DateTime<Utc>),
    /// An inclusive date range.
    DateRange {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    /// A boolean.
    Bool(bool),
}

impl FilterValue {
    /// Returns `true` if this value does not constrain anything.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::One(v) => v.is_blank(),
            FilterValue::Many(vs) => vs.is_empty(),
            FilterValue::Date(_) | FilterValue::Bool(_) => false,
            FilterValue::DateRange { from, to } => from.is_none() && to.is_none(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<Value> for FilterValue {
    fn from(v: Value) -> Self {
        FilterValue::One(v)
    }
}

impl From<Vec<Value>> for FilterValue {
    fn from(v: Vec<Value>) -> Self {
        FilterValue::Many(v)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        FilterValue::Date(v)
    }
}

/// Filter values keyed by filter field key.
///
/// Only constraining values are stored: binding an empty value removes the
/// key. Keys without a matching filter field are kept but ignored by the
/// filter stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    values: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value; an empty value unbinds the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    /// Builder-style [`set`](FilterSet::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Unbind a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    /// Iterate bound values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
