//! Runtime scalar values read from record fields.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// A scalar value produced by a field or a typed key accessor.
///
/// This enum maps to the scalar types defined in the catalog. Collections
/// and nested records are not values; they surface as [`crate::Field`]
/// variants instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit floating point.
    Float32(f32),
    /// 64-bit floating point.
    Float64(f64),
    /// Fixed-precision decimal.
    Decimal(Decimal),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Timestamp as microseconds since Unix epoch.
    Timestamp(i64),
    /// Calendar date.
    Date(NaiveDate),
    /// UUID as 16 bytes.
    Uuid([u8; 16]),
}

impl Value {
    /// Short name of the value's variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Timestamp(_) => "Timestamp",
            Value::Date(_) => "Date",
            Value::Uuid(_) => "Uuid",
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            Value::Int32(i) => Some(*i as i64),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(f) => Some(*f),
            Value::Float32(f) => Some(*f as f64),
            _ => None,
        }
    }

    /// Try to get as timestamp microseconds. Dates map to midnight UTC.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            Value::Timestamp(t) => Some(*t),
            Value::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_micros()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int32(v as i32)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int32(v as i32)
    }
}

/// Values above `i64::MAX` become decimals.
impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int64(i),
            Err(_) => Value::Decimal(Decimal::from(v)),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<[u8; 16]> for Value {
    fn from(v: [u8; 16]) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v.timestamp_micros())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int64(100).as_i64(), Some(100));
        assert_eq!(Value::Int32(42).as_i64(), Some(42));
        assert_eq!(Value::Float32(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn test_value_conversions() {
        let v: Value = "hello".into();
        assert_eq!(v, Value::String("hello".into()));

        let v: Value = None::<i32>.into();
        assert_eq!(v, Value::Null);

        let v: Value = Some(42i32).into();
        assert_eq!(v, Value::Int32(42));

        let v: Value = Decimal::new(10001, 0).into();
        assert_eq!(v.type_name(), "Decimal");
    }

    #[test]
    fn test_unsigned_and_char_conversions() {
        assert_eq!(Value::from(7u8), Value::Int32(7));
        assert_eq!(Value::from(-3i16), Value::Int32(-3));
        assert_eq!(Value::from(42usize), Value::Int64(42));
        assert_eq!(Value::from(i64::MAX as u64), Value::Int64(i64::MAX));
        assert_eq!(Value::from(u64::MAX), Value::Decimal(Decimal::from(u64::MAX)));
        assert_eq!(Value::from('x'), Value::String("x".into()));
    }

    #[test]
    fn test_temporal_values() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ts: Value = at.into();
        assert_eq!(ts, Value::Timestamp(1_704_067_200_000_000));

        let date: Value = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().into();
        assert_eq!(date.as_timestamp(), ts.as_timestamp());
    }
}
