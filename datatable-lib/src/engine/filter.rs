//! Filter stage.
//!
//! Narrowing happens in three conjunctive steps, each only looking at rows
//! the previous step kept:
//!
//! 1. the active tab's predicate (the universal tab keeps everything);
//! 2. every bound, non-empty filter value whose key names a filter field;
//! 3. the free-text search over searchable columns.
//!
//! Filter keys with no matching field are ignored, as is an unknown tab.

use log::debug;

use super::sort::values_equal;
use crate::model::Value;
use crate::schema::DateBound;
use crate::schema::FilterField;
use crate::schema::FilterKind;
use crate::schema::TableSchema;
use crate::view::FilterSet;
use crate::view::FilterValue;

/// Return the indices of `records` that pass the tab, filters and search,
/// in input order.
pub fn apply<R>(
    records: &[R],
    schema: &TableSchema<R>,
    tab: Option<&str>,
    filters: &FilterSet,
    search_text: &str,
) -> Vec<usize> {
    let tab = tab.and_then(|key| {
        let found = schema.tab(key);
        if found.is_none() {
            debug!("Ignoring unknown tab '{}'", key);
        }
        found
    });

    let bound: Vec<(&FilterField<R>, &FilterValue)> = filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(key, value)| schema.filter_field(key).map(|field| (field, value)))
        .collect();

    let needle = search_text.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| tab.is_none_or(|t| t.matches(record)))
        .filter(|(_, record)| {
            bound
                .iter()
                .all(|(field, value)| matches_filter(&field.kind, value, &field.value(record)))
        })
        .filter(|(_, record)| needle.is_empty() || matches_search(schema, *record, &needle))
        .map(|(row, _)| row)
        .collect()
}

/// Returns `true` if any searchable column's text contains `needle`.
///
/// `needle` must already be lower-cased.
pub fn matches_search<R>(schema: &TableSchema<R>, record: &R, needle: &str) -> bool {
    schema
        .columns()
        .iter()
        .filter(|c| c.searchable)
        .any(|column| {
            let value = column.value(record);
            !value.is_null() && value.to_string().to_lowercase().contains(needle)
        })
}

/// Apply one filter field's match rule.
///
/// List-valued record fields pass when any element passes.
pub fn matches_filter(kind: &FilterKind, bound: &FilterValue, value: &Value) -> bool {
    if let Value::List(items) = value {
        return items.iter().any(|item| matches_filter(kind, bound, item));
    }
    if value.is_null() {
        return false;
    }
    match bound {
        FilterValue::Text(text) => match value {
            Value::String(s) => s == text,
            other => other.to_string() == *text,
        },
        FilterValue::One(expected) => values_equal(value, expected),
        FilterValue::Many(allowed) => allowed.iter().any(|a| values_equal(value, a)),
        FilterValue::Date(bound_date) => {
            let Some(date) = value.as_datetime() else {
                return false;
            };
            match kind {
                FilterKind::Date(DateBound::OnOrAfter) => date >= *bound_date,
                FilterKind::Date(DateBound::OnOrBefore) => date <= *bound_date,
                _ => date == *bound_date,
            }
        }
        FilterValue::DateRange { from, to } => {
            let Some(date) = value.as_datetime() else {
                return false;
            };
            from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
        }
        FilterValue::Bool(expected) => matches!(value, Value::Bool(b) if b == expected),
    }
}
