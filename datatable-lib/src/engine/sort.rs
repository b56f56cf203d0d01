//! Sort stage.
//!
//! Ordering policy:
//!
//! - nulls sort last in both directions, also for columns with a comparator;
//! - strings use [`collate::compare`];
//! - numbers compare exactly across integer, float and decimal variants;
//! - values of different kinds order by kind, so the comparison stays total
//!   even on data that violates the one-kind-per-column rule.
//!
//! The sort is stable in both directions: descending is the exact reverse of
//! ascending except that tied rows keep their input order.

use std::cmp::Ordering;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::collate;
use crate::model::Value;
use crate::model::ValueKind;
use crate::schema::TableSchema;
use crate::view::Direction;
use crate::view::SortState;

/// Order `rows` (indices into `records`) by the active sort.
///
/// Without a sort, or when the sort names an unknown or non-sortable column,
/// rows pass through in their given order.
pub fn apply<R>(
    records: &[R],
    rows: &[usize],
    schema: &TableSchema<R>,
    sort: Option<&SortState>,
) -> Vec<usize> {
    let Some(sort) = sort else {
        return rows.to_vec();
    };
    let column = match schema.sortable_column(&sort.column) {
        Ok(column) => column,
        Err(e) => {
            debug!("Ignoring sort: {}", e);
            return rows.to_vec();
        }
    };

    if let Some(comparator) = column.comparator() {
        // The comparator only ever sees rows whose column value is non-null.
        let mut flagged: Vec<(usize, bool)> = rows
            .iter()
            .map(|&row| (row, column.value(&records[row]).is_null()))
            .collect();
        flagged.sort_by(|&(a, a_null), &(b, b_null)| match (a_null, b_null) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => directed(comparator(&records[a], &records[b]), sort.direction),
        });
        return flagged.into_iter().map(|(row, _)| row).collect();
    }

    // Resolve each value once rather than on every comparison.
    let mut keyed: Vec<(usize, Value)> = rows
        .iter()
        .map(|&row| (row, column.value(&records[row])))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_nulls_last(a, b, sort.direction));
    keyed.into_iter().map(|(row, _)| row).collect()
}

/// Compare two values with nulls last regardless of direction.
pub fn compare_nulls_last(a: &Value, b: &Value, direction: Direction) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => directed(compare_values(a, b), direction),
    }
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Ascending comparison of two values.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => collate::compare(x, y),
        (Value::Guid(x), Value::Guid(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::List(x), Value::List(y)) => {
            for (l, r) in x.iter().zip(y) {
                let ordering = compare_values(l, r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Json(x), Value::Json(y)) => x.to_string().cmp(&y.to_string()),
        _ if a.kind() == ValueKind::Number && b.kind() == ValueKind::Number => {
            compare_numbers(a, b)
        }
        _ => a.kind().cmp(&b.kind()),
    }
}

/// A numeric value split by how exactly it can be compared.
enum Number {
    Exact(Decimal),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(Number::Exact(Decimal::from(*n))),
            Value::Long(n) => Some(Number::Exact(Decimal::from(*n))),
            Value::Decimal(d) => Some(Number::Exact(*d)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    let (Some(x), Some(y)) = (Number::of(a), Number::of(b)) else {
        return a.kind().cmp(&b.kind());
    };
    match (x, y) {
        (Number::Exact(l), Number::Exact(r)) => l.cmp(&r),
        (Number::Exact(l), Number::Float(r)) => exact_against_float(l, r),
        (Number::Float(l), Number::Exact(r)) => exact_against_float(r, l).reverse(),
        (Number::Float(l), Number::Float(r)) => compare_floats(l, r),
    }
}

/// Floats compare numerically, so `-0.0 == 0.0`. NaNs sit at the ends by sign.
fn compare_floats(l: f64, r: f64) -> Ordering {
    if l.is_nan() || r.is_nan() {
        return l.total_cmp(&r);
    }
    l.partial_cmp(&r).unwrap_or(Ordering::Equal)
}

/// Exact comparison of a decimal (or widened integer) against a float.
///
/// Neither side is rounded to the other's precision: whole parts compare as
/// `i128`, and only then do the fractional parts.
fn exact_against_float(exact: Decimal, float: f64) -> Ordering {
    // Larger than any decimal; also catches the infinities.
    const OUT_OF_RANGE: f64 = 1e30;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= OUT_OF_RANGE {
        return Ordering::Less;
    }
    if float <= -OUT_OF_RANGE {
        return Ordering::Greater;
    }

    let float_whole = float.trunc();
    let Some(exact_whole) = exact.trunc().to_i128() else {
        return compare_floats(exact.to_f64().unwrap_or(0.0), float);
    };
    match exact_whole.cmp(&(float_whole as i128)) {
        Ordering::Equal => {}
        unequal => return unequal,
    }

    let exact_fract = exact.fract();
    let float_fract = float - float_whole;
    match Decimal::from_f64_retain(float_fract) {
        Some(fract) => exact_fract.cmp(&fract),
        None => compare_floats(exact_fract.to_f64().unwrap_or(0.0), float_fract),
    }
}

/// Value equality as the filter stage sees it: numbers compare across
/// variants, and a text value equals any value that renders to the same text.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if a.kind() == b.kind() {
        return compare_values(a, b) == Ordering::Equal;
    }
    if a.kind() == ValueKind::Text || b.kind() == ValueKind::Text {
        return a.to_string() == b.to_string();
    }
    false
}
