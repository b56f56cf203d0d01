//! Filter field definitions.

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use super::Accessor;
use crate::error::FilterValueError;
use crate::model::Record;
use crate::model::Value;
use crate::view::FilterValue;

/// Which side of a single-date filter the bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Records pass when `date >= bound` (e.g. "created after").
    OnOrAfter,
    /// Records pass when `date <= bound` (e.g. "created before").
    OnOrBefore,
}

/// One entry of a select filter's option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The kind of a filter field, which decides its match rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Exact, case-sensitive equality.
    Text,
    /// Membership in a bound set, or equality with a single bound value.
    Select { options: Vec<SelectOption> },
    /// One-sided date bound.
    Date(DateBound),
    /// Inclusive date range, either end optional.
    DateRange,
    /// Exact boolean equality.
    Boolean,
}

impl FilterKind {
    /// Select kind with options given as `(value, label)` pairs.
    pub fn select<V, L>(options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        FilterKind::Select {
            options: options
                .into_iter()
                .map(|(v, l)| SelectOption::new(v, l))
                .collect(),
        }
    }

    /// Parse user-entered text into a filter value for this kind.
    ///
    /// - `Text`: taken verbatim.
    /// - `Select`: comma separated; one entry gives a single value, several
    ///   give a set. Entries are checked against the options when any exist.
    /// - `Date`: `YYYY-MM-DD` (midnight UTC) or RFC 3339.
    /// - `DateRange`: `FROM..TO`, either side may be empty.
    /// - `Boolean`: `true`/`false`, `yes`/`no`, `1`/`0`.
    ///
    /// `field` only labels errors.
    pub fn parse_value(&self, field: &str, input: &str) -> Result<FilterValue, FilterValueError> {
        match self {
            FilterKind::Text => Ok(FilterValue::Text(input.to_string())),
            FilterKind::Select { options } => {
                let entries: Vec<&str> = input
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                if !options.is_empty()
                    && let Some(bad) = entries
                        .iter()
                        .find(|e| !options.iter().any(|o| o.value == **e))
                {
                    return Err(FilterValueError::UnknownOption {
                        field: field.to_string(),
                        input: bad.to_string(),
                    });
                }
                Ok(match entries.as_slice() {
                    [single] => FilterValue::One(Value::from(*single)),
                    many => FilterValue::Many(many.iter().map(|s| Value::from(*s)).collect()),
                })
            }
            FilterKind::Date(_) => parse_date(input).map(FilterValue::Date),
            FilterKind::DateRange => {
                let (from, to) =
                    input
                        .split_once("..")
                        .ok_or_else(|| FilterValueError::InvalidDateRange {
                            input: input.to_string(),
                        })?;
                let from = optional_date(from)?;
                let to = optional_date(to)?;
                Ok(FilterValue::DateRange { from, to })
            }
            FilterKind::Boolean => match input.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(FilterValue::Bool(true)),
                "false" | "no" | "0" => Ok(FilterValue::Bool(false)),
                _ => Err(FilterValueError::InvalidBool {
                    input: input.to_string(),
                }),
            },
        }
    }
}

fn optional_date(input: &str) -> Result<Option<DateTime<Utc>>, FilterValueError> {
    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        parse_date(input).map(Some)
    }
}

fn parse_date(input: &str) -> Result<DateTime<Utc>, FilterValueError> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| FilterValueError::InvalidDate {
            input: input.to_string(),
        })
}

/// An advanced filter the user can bind a value to.
///
/// A bound value lives in the view state's filter set under the same `key`;
/// the field's accessor supplies the record value it is matched against.
pub struct FilterField<R> {
    /// Unique key within the schema; also the key of the bound value.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Match rule.
    pub kind: FilterKind,
    accessor: Accessor<R>,
}

impl<R> FilterField<R> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: FilterKind,
        accessor: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            accessor: Arc::new(accessor),
        }
    }

    /// Read the value this filter matches against.
    pub fn value(&self, record: &R) -> Value {
        (self.accessor)(record)
    }
}

impl FilterField<Record> {
    /// A filter on the record field named `field`.
    ///
    /// `key` and `field` differ for date bounds, e.g. `createdAfter` and
    /// `createdBefore` both read `createdAt`.
    pub fn on_field(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: FilterKind,
        field: impl Into<String>,
    ) -> Self {
        let field = field.into();
        Self::new(key, label, kind, move |record: &Record| record.value(&field))
    }
}

impl<R> Clone for FilterField<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            kind: self.kind.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<R> fmt::Debug for FilterField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterField")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_select_single_and_many() {
        let kind = FilterKind::select([("Active", "Active"), ("Inactive", "Inactive")]);
        assert_eq!(
            kind.parse_value("status", "Active").unwrap(),
            FilterValue::One(Value::from("Active"))
        );
        assert_eq!(
            kind.parse_value("status", "Active, Inactive").unwrap(),
            FilterValue::Many(vec![Value::from("Active"), Value::from("Inactive")])
        );
    }

    #[test]
    fn test_parse_select_rejects_unknown_option() {
        let kind = FilterKind::select([("Active", "Active")]);
        let err = kind.parse_value("status", "Archived").unwrap_err();
        assert_eq!(
            err,
            FilterValueError::UnknownOption {
                field: "status".to_string(),
                input: "Archived".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_select_without_options_accepts_anything() {
        let kind = FilterKind::Select { options: vec![] };
        assert!(kind.parse_value("dept", "Finance").is_ok());
    }

    #[test]
    fn test_parse_date_formats() {
        let kind = FilterKind::Date(DateBound::OnOrAfter);
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(
            kind.parse_value("createdAfter", "2024-01-15").unwrap(),
            FilterValue::Date(expected)
        );
        assert_eq!(
            kind.parse_value("createdAfter", "2024-01-15T00:00:00Z").unwrap(),
            FilterValue::Date(expected)
        );
        assert!(kind.parse_value("createdAfter", "15/01/2024").is_err());
    }

    #[test]
    fn test_parse_open_date_range() {
        let value = FilterKind::DateRange.parse_value("onboard", "2024-01-01..").unwrap();
        match value {
            FilterValue::DateRange { from, to } => {
                assert!(from.is_some());
                assert!(to.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(FilterKind::DateRange.parse_value("onboard", "2024-01-01").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(
            FilterKind::Boolean.parse_value("remote", "Yes").unwrap(),
            FilterValue::Bool(true)
        );
        assert!(FilterKind::Boolean.parse_value("remote", "maybe").is_err());
    }
}
