//! JSON encoding of [`Record`].
//!
//! A record is a flat object with its fields in name order and nulls left
//! out. On the way in, UUID and RFC 3339 strings are recognised and typed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::Record;
use super::Value;

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: BTreeMap<&str, &Value> = self
            .fields
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| (name.as_str(), value))
            .collect();

        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (name, value) in present {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of field values")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Record, M::Error> {
        let mut record = Record::new();
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            record.fields.insert(key, decode(value));
        }
        Ok(record)
    }
}

/// Maps one JSON value onto the narrowest matching [`Value`] variant.
fn decode(json: serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(whole), _) => i32::try_from(whole).map_or(Value::Long(whole), Value::Int),
            (None, Some(float)) => Value::Float(float),
            (None, None) => Value::Json(Json::Number(n)),
        },
        Json::String(s) => decode_text(s),
        Json::Array(items) => Value::List(items.into_iter().map(decode).collect()),
        object @ Json::Object(_) => Value::Json(object),
    }
}

fn decode_text(text: String) -> Value {
    if let Ok(id) = Uuid::parse_str(&text) {
        return Value::Guid(id);
    }
    match DateTime::parse_from_rfc3339(&text) {
        Ok(stamp) => Value::DateTime(stamp.with_timezone(&Utc)),
        Err(_) => Value::String(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_skips_nulls() {
        let record = Record::new()
            .set("title", "Audit")
            .set("budget", 1_000_000i64)
            .set("notes", Value::Null);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"budget":1000000,"title":"Audit"}"#);
    }

    #[test]
    fn test_deserialize_numbers_narrow() {
        let json = r#"{"title": "Audit", "hours": 12, "budget": 10000000000, "ratio": 0.5}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get_string("title").unwrap(), Some("Audit"));
        assert_eq!(record.get("hours"), Some(&Value::Int(12)));
        assert_eq!(record.get_long("budget").unwrap(), Some(10_000_000_000));
        assert_eq!(record.get("ratio"), Some(&Value::Float(0.5)));
    }

    #[test]
    fn test_deserialize_dates_and_guids() {
        let json = r#"{
            "id": "12345678-1234-1234-1234-123456789012",
            "createdAt": "2024-05-01T08:30:00Z"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert!(record.get_guid("id").unwrap().is_some());
        assert!(record.get_datetime("createdAt").unwrap().is_some());
    }

    #[test]
    fn test_deserialize_array_as_list() {
        let json = r#"{"tags": ["urgent", "finance"]}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        let tags = record.get_list("tags").unwrap().unwrap();
        assert_eq!(tags, &[Value::from("urgent"), Value::from("finance")]);
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        let result: Result<Record, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }
}
