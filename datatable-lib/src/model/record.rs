//! Dynamic record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use super::Value;
use crate::error::FieldError;

/// A schema-less row: field name to [`Value`].
///
/// The engine is generic over its record type; `Record` is the ready-made
/// choice when rows arrive as JSON objects. Columns built with
/// [`Column::field`](crate::schema::Column::field) read straight from it.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Record;
///
/// let person = Record::new()
///     .set("name", "Amy")
///     .set("headcount", 120i64);
///
/// assert_eq!(person.get_string("name").unwrap(), Some("Amy"));
/// assert_eq!(person.get_number("headcount").unwrap(), Some(120.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The value of a field; absent fields read as [`Value::Null`].
    pub fn value(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Builder-style [`insert`](Record::insert).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // -- typed access ---------------------------------------------------------
    //
    // Missing fields and wrong variants are errors; an explicit null is
    // `Ok(None)`.

    fn typed<'a, T>(
        &'a self,
        field: &str,
        expected: &'static str,
        pick: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, FieldError> {
        let value = self.fields.get(field).ok_or_else(|| FieldError::missing(field))?;
        if value.is_null() {
            return Ok(None);
        }
        match pick(value) {
            Some(v) => Ok(Some(v)),
            None => Err(FieldError::unexpected(field, expected, value)),
        }
    }

    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        self.typed(field, "string", Value::as_str)
    }

    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        self.typed(field, "bool", |v| match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// An integer field; `Int` widens to `i64`.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        self.typed(field, "long", |v| match v {
            Value::Int(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        })
    }

    /// Any numeric field as `f64`.
    pub fn get_number(&self, field: &str) -> Result<Option<f64>, FieldError> {
        self.typed(field, "number", |v| match v {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        })
    }

    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        self.typed(field, "decimal", |v| match v {
            Value::Decimal(d) => Some(*d),
            _ => None,
        })
    }

    pub fn get_guid(&self, field: &str) -> Result<Option<Uuid>, FieldError> {
        self.typed(field, "guid", |v| match v {
            Value::Guid(g) => Some(*g),
            _ => None,
        })
    }

    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        self.typed(field, "datetime", Value::as_datetime)
    }

    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, FieldError> {
        self.typed(field, "list", Value::as_list)
    }
}
