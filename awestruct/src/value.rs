//! Decoded values and records
//!
//! A [`Value`] is whatever a single field decodes to. A [`Record`] is the
//! ordered field-name → value mapping a struct decodes to; field order is
//! the declaration order of the struct that produced it.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{Result, StructError};

/// A decoded field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value (skipped bytes, untaken conditional, missing field)
    #[default]
    Absent,
    Bool(bool),
    /// Every integer primitive widens to `i64`
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Truthiness used for conditions.
    ///
    /// `false`, `0`, `NaN`, empty text and [`Value::Absent`] are false,
    /// everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Bytes(_) | Value::Array(_) | Value::Record(_) => true,
        }
    }

    /// Integer view. Booleans count as 0/1, floats must be whole.
    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(*f as i64),
            other => Err(mismatch("int", other)),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(n) => Ok(*n as f64),
            other => Err(mismatch("float", other)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(mismatch("text", other)),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(mismatch("bytes", other)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(mismatch("array", other)),
        }
    }

    pub fn as_record(&self) -> Result<&Record> {
        match self {
            Value::Record(r) => Ok(r),
            other => Err(mismatch("record", other)),
        }
    }

    /// Interpret this value as a byte/element count.
    pub fn as_len(&self) -> Result<usize> {
        match self {
            Value::Int(n) => usize::try_from(*n).map_err(|_| StructError::InvalidLength(n.to_string())),
            Value::Float(f) if f.fract() == 0.0 && *f >= 0.0 && f.is_finite() => Ok(*f as usize),
            Value::Float(f) => Err(StructError::InvalidLength(f.to_string())),
            Value::Bool(b) => Ok(usize::from(*b)),
            other => Err(mismatch("length", other)),
        }
    }

    /// Look up a single path segment: a field of a record or an index into
    /// an array.
    pub(crate) fn child(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(r) => r.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

pub(crate) fn mismatch(expected: &'static str, found: &Value) -> StructError {
    StructError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(i64::from(n))
                }
            }
        )*
    };
}

value_from_int!(i8, u8, i16, u16, i32, u32, i64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

/// Insertion-ordered field-name → value mapping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builder-style insert, handy for assembling records to encode.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for b in bytes {
                    seq.serialize_element(b)?;
                }
                seq.end()
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(r) => r.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut record = Record::new().with("b", 2).with("a", 1);
        assert_eq!(record.keys().collect::<Vec<_>>(), ["b", "a"]);

        // Replacing keeps the slot
        assert_eq!(record.insert("b", 5), Some(Value::Int(2)));
        assert_eq!(record.keys().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(record.get("b"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Absent.is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(!Value::Float(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Array(vec![]).is_truthy());
    }

    #[test]
    fn test_as_len() {
        assert_eq!(Value::Int(3).as_len(), Ok(3));
        assert_eq!(Value::Float(4.0).as_len(), Ok(4));
        assert!(matches!(
            Value::Int(-1).as_len(),
            Err(StructError::InvalidLength(_))
        ));
        assert!(matches!(
            Value::Float(1.5).as_len(),
            Err(StructError::InvalidLength(_))
        ));
        assert!(matches!(
            Value::from("3").as_len(),
            Err(StructError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_child_lookup() {
        let inner = Record::new().with("x", 7);
        let value = Value::Record(Record::new().with("inner", inner).with(
            "list",
            vec![Value::Int(1), Value::Int(2)],
        ));

        assert_eq!(
            value.child("inner").and_then(|v| v.child("x")),
            Some(&Value::Int(7))
        );
        assert_eq!(
            value.child("list").and_then(|v| v.child("1")),
            Some(&Value::Int(2))
        );
        assert_eq!(value.child("missing"), None);
    }
}
