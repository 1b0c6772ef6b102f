//! Mapped Values
//!
//! The engine produces a dynamic [`Value`] tree. [`FromValue`] and
//! [`FromRecord`] bind that tree to caller-declared Rust types.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{MapError, Result};
use crate::schema::Schema;

/// A mapped value
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Value {
    /// Absent or empty source
    Null,
    String(String),
    Integer(i64),
    Date(DateTime<Utc>),
    /// A nested object
    Record(Record),
    /// An array, in document order
    Array(Vec<Value>),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// One mapped object: schema field name to value, in schema order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder form of [`Record::insert`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Remove `field` and convert it. A missing field converts like null.
    pub fn take<T: FromValue>(&mut self, field: &str) -> Result<T> {
        let value = self.fields.shift_remove(field).unwrap_or(Value::Null);
        T::from_value(field, value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Conversion from a mapped value into a Rust type
pub trait FromValue: Sized {
    /// `field` names the value in errors
    fn from_value(field: &str, value: Value) -> Result<Self>;
}

fn shape_error(field: &str, expected: &'static str) -> MapError {
    MapError::RecordShape {
        field: field.to_string(),
        expected,
    }
}

impl FromValue for Value {
    fn from_value(_field: &str, value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(shape_error(field, "a string")),
        }
    }
}

impl FromValue for i64 {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::Integer(n) => Ok(n),
            _ => Err(shape_error(field, "an integer")),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::Date(d) => Ok(d),
            _ => Err(shape_error(field, "a date")),
        }
    }
}

impl FromValue for Record {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::Record(r) => Ok(r),
            _ => Err(shape_error(field, "an object")),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(field, other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| T::from_value(field, item))
                .collect(),
            _ => Err(shape_error(field, "an array")),
        }
    }
}

/// A Rust type bound to the schema it is mapped with
///
/// ```ignore
/// struct Item { id: i64, name: Option<String> }
///
/// impl FromRecord for Item {
///     fn schema() -> Schema {
///         Schema::new()
///             .field("id", FieldSpec::new(root_attr_integer_value(Some("id"))).required())
///             .field("name", FieldSpec::new(string_value()))
///     }
///
///     fn from_record(mut record: Record) -> Result<Self> {
///         Ok(Item { id: record.take("id")?, name: record.take("name")? })
///     }
/// }
/// ```
pub trait FromRecord: Sized {
    fn schema() -> Schema;

    fn from_record(record: Record) -> Result<Self>;
}

/// Records nest: a `FromRecord` field converts from `Value::Record`
#[derive(Debug, Clone, PartialEq)]
pub struct Nested<T>(pub T);

impl<T: FromRecord> FromValue for Nested<T> {
    fn from_value(field: &str, value: Value) -> Result<Self> {
        let record = Record::from_value(field, value)?;
        T::from_record(record).map(Nested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let record = Record::new()
            .with("b", 1i64)
            .with("a", "x")
            .with("c", Value::Null);
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_take_converts() {
        let mut record = Record::new()
            .with("id", 5i64)
            .with("name", Value::Null)
            .with("tags", vec!["a", "b"]);

        assert_eq!(record.take::<i64>("id").unwrap(), 5);
        assert_eq!(record.take::<Option<String>>("name").unwrap(), None);
        assert_eq!(
            record.take::<Vec<String>>("tags").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(record.is_empty());
    }

    #[test]
    fn test_take_shape_mismatch() {
        let mut record = Record::new().with("id", "five");
        let err = record.take::<i64>("id").unwrap_err();
        assert_eq!(err.to_string(), "field id does not hold an integer");
    }
}
