//! SQLite values as read from a snapshot.
//!
//! A [`Value`] is one of the five SQLite storage classes. Values are compared,
//! hashed and ordered without any affinity conversions: `1` and `1.0` are
//! different values, exactly as they are different bytes on disk.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use rusqlite::types::ValueRef;

mod display;
mod encode;

pub(crate) use encode::encode_tuple;

/// One full row, or a projection of it, in column order.
pub type Row = Vec<Value>;

/// A value stored in an SQLite column.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// SQL NULL
    #[default]
    Null,
    /// 64-bit signed integer (also how SQLite stores booleans)
    Integer(i64),
    /// IEEE 754 floating point
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// TEXT whose stored bytes are not valid UTF-8, kept verbatim
    RawText(Vec<u8>),
    /// Binary blob
    Blob(Vec<u8>),
}

impl Value {
    /// Check if the value is Null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if the value is TEXT, valid UTF-8 or not.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_) | Value::RawText(_))
    }

    /// Rank of the storage class in SQLite's cross-type ordering.
    fn class_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Integer(_) | Value::Real(_) => 1,
            Value::Text(_) | Value::RawText(_) => 2,
            Value::Blob(_) => 3,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::RawText(a), Value::RawText(b)) | (Value::Blob(a), Value::Blob(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash must be consistent with PartialEq: reals hash by bit pattern.
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Integer(v) => v.hash(state),
            Value::Real(v) => v.to_bits().hash(state),
            Value::Text(v) => v.hash(state),
            Value::RawText(v) | Value::Blob(v) => v.hash(state),
        }
    }
}

/// Compare an integer with a real numerically.
///
/// On a numeric tie the integer sorts first so that the ordering stays
/// consistent with equality, under which `1` and `1.0` differ.
#[allow(clippy::cast_precision_loss)]
fn cmp_integer_real(integer: i64, real: f64) -> Ordering {
    (integer as f64).total_cmp(&real).then(Ordering::Less)
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Real(a), Value::Real(b)) => a.total_cmp(b),
            (Value::Integer(a), Value::Real(b)) => cmp_integer_real(*a, *b),
            (Value::Real(a), Value::Integer(b)) => cmp_integer_real(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::RawText(a), Value::RawText(b)) | (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            // Byte order, with valid text first on a tie to stay consistent
            // with equality.
            (Value::Text(a), Value::RawText(b)) => {
                a.as_bytes().cmp(b.as_slice()).then(Ordering::Less)
            }
            (Value::RawText(a), Value::Text(b)) => {
                a.as_slice().cmp(b.as_bytes()).then(Ordering::Greater)
            }
            _ => self.class_rank().cmp(&other.class_rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(bytes) => match core::str::from_utf8(bytes) {
                Ok(text) => Value::Text(text.to_string()),
                Err(_) => Value::RawText(bytes.to_vec()),
            },
            ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
        }
    }
}

// From implementations for common types
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_real_are_distinct() {
        assert_ne!(Value::Integer(1), Value::Real(1.0));
        assert_eq!(Value::Integer(1).cmp(&Value::Real(1.0)), Ordering::Less);
        assert_eq!(Value::Real(1.0).cmp(&Value::Integer(1)), Ordering::Greater);
    }

    #[test]
    fn test_cross_class_ordering() {
        let mut values = vec![
            Value::Blob(vec![0]),
            Value::Text("a".into()),
            Value::Real(2.5),
            Value::Null,
            Value::Integer(3),
            Value::Integer(-7),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Integer(-7),
                Value::Real(2.5),
                Value::Integer(3),
                Value::Text("a".into()),
                Value::Blob(vec![0]),
            ]
        );
    }

    #[test]
    fn test_from_value_ref() {
        assert_eq!(Value::from(ValueRef::Null), Value::Null);
        assert_eq!(Value::from(ValueRef::Integer(4)), Value::Integer(4));
        assert_eq!(
            Value::from(ValueRef::Text(b"hi")),
            Value::Text("hi".to_string())
        );
        assert_eq!(Value::from(ValueRef::Blob(&[1, 2])), Value::Blob(vec![1, 2]));
    }

    #[test]
    fn test_invalid_utf8_text_keeps_its_bytes() {
        let ff = Value::from(ValueRef::Text(&[0xFF]));
        let fe = Value::from(ValueRef::Text(&[0xFE]));
        assert_eq!(ff, Value::RawText(vec![0xFF]));
        assert_ne!(ff, fe);
        assert!(ff.is_text());
        assert_ne!(ff, Value::Blob(vec![0xFF]));

        let mut values = vec![Value::Blob(vec![0]), ff.clone(), Value::from("z"), fe.clone()];
        values.sort();
        assert_eq!(values, vec![Value::from("z"), fe, ff, Value::Blob(vec![0])]);
    }

    #[test]
    fn test_option_and_bool_conversions() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
        assert_eq!(Value::from(true), Value::Integer(1));
    }
}
