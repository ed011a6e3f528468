//! Comparable keys and the comparison strategies applied to them.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::catalog::{FieldType, ScalarType};
use crate::config::NullOrdering;
use crate::error::{Error, Result};
use crate::value::Value;

/// A key extracted from one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// The field, or a record on the way to it, was absent.
    Null,
    /// A scalar key.
    Scalar(Value),
    /// A value with no natural ordering (a nested record or a collection).
    Opaque(String),
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Key::Null,
            v => Key::Scalar(v),
        }
    }
}

/// Comparison strategy, chosen once per key from the terminal field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyKind {
    /// `false < true`.
    Boolean,
    /// Integers, floats and decimals, compared by numeric value.
    Numeric,
    /// Strings, compared by code point.
    Textual,
    /// Timestamps and dates on a common time line.
    Temporal,
    /// Byte strings, compared lexicographically.
    Binary,
    /// UUIDs, compared by their bytes.
    Identifier,
    /// Not known until values are seen (typed accessors).
    Dynamic,
    /// No natural ordering; any comparison fails.
    Unsupported(String),
}

impl KeyKind {
    /// Select the strategy for a declared field type.
    pub fn for_field_type(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Scalar(s) | FieldType::OptionalScalar(s) => Self::for_scalar(s),
            other => KeyKind::Unsupported(other.type_name()),
        }
    }

    /// Select the strategy for a scalar type.
    pub fn for_scalar(scalar: &ScalarType) -> Self {
        match scalar {
            ScalarType::Bool => KeyKind::Boolean,
            s if s.is_numeric() => KeyKind::Numeric,
            ScalarType::String => KeyKind::Textual,
            ScalarType::Bytes => KeyKind::Binary,
            s if s.is_temporal() => KeyKind::Temporal,
            ScalarType::Uuid => KeyKind::Identifier,
            other => KeyKind::Unsupported(other.type_name()),
        }
    }

    /// Class of a concrete value.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Null => KeyKind::Dynamic,
            Value::Bool(_) => KeyKind::Boolean,
            Value::Int32(_)
            | Value::Int64(_)
            | Value::Float32(_)
            | Value::Float64(_)
            | Value::Decimal(_) => KeyKind::Numeric,
            Value::String(_) => KeyKind::Textual,
            Value::Bytes(_) => KeyKind::Binary,
            Value::Timestamp(_) | Value::Date(_) => KeyKind::Temporal,
            Value::Uuid(_) => KeyKind::Identifier,
        }
    }

    /// Compare two keys in ascending order.
    ///
    /// Absent keys are placed according to `nulls`. Errors are reported for
    /// unsupported kinds, opaque keys and values of different classes.
    pub fn compare(&self, a: &Key, b: &Key, nulls: NullOrdering) -> Result<Ordering> {
        if let KeyKind::Unsupported(type_name) = self {
            return Err(Error::unsupported(type_name.clone()));
        }

        match (a, b) {
            (Key::Opaque(t), _) | (_, Key::Opaque(t)) => Err(Error::unsupported(t.clone())),
            (Key::Null, Key::Null) => Ok(Ordering::Equal),
            (Key::Null, Key::Scalar(_)) => Ok(null_placement(nulls)),
            (Key::Scalar(_), Key::Null) => Ok(null_placement(nulls).reverse()),
            (Key::Scalar(x), Key::Scalar(y)) => compare_values(x, y),
        }
    }

    fn label(&self) -> String {
        match self {
            KeyKind::Unsupported(t) => t.clone(),
            other => format!("{:?}", other).to_lowercase(),
        }
    }
}

fn null_placement(nulls: NullOrdering) -> Ordering {
    match nulls {
        NullOrdering::First => Ordering::Less,
        NullOrdering::Last => Ordering::Greater,
    }
}

/// Compare two non-null values of the same class.
pub fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    let ordering = match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bytes(x), Value::Bytes(y)) => x.cmp(y),
        (Value::Uuid(x), Value::Uuid(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        _ => match (KeyKind::of_value(a), KeyKind::of_value(b)) {
            (KeyKind::Numeric, KeyKind::Numeric) => compare_numeric(a, b),
            (KeyKind::Temporal, KeyKind::Temporal) => a.as_timestamp().cmp(&b.as_timestamp()),
            (left, right) => {
                return Err(Error::MismatchedKeys {
                    left: left.label(),
                    right: right.label(),
                })
            }
        },
    };
    Ok(ordering)
}

/// Numbers compare by exact mathematical value across variants.
///
/// `-0.0` equals `0`, and NaN sorts above every number, including infinity.
fn compare_numeric(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    match (as_decimal(a), as_decimal(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(x), None) => compare_decimal_float(x, as_float(b)),
        (None, Some(y)) => compare_decimal_float(y, as_float(a)).reverse(),
        (None, None) => compare_floats(as_float(a), as_float(b)),
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Decimal(d) => Some(*d),
        Value::Int32(i) => Some(Decimal::from(*i)),
        Value::Int64(i) => Some(Decimal::from(*i)),
        _ => None,
    }
}

fn as_float(value: &Value) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn sign_of_float(f: f64) -> i8 {
    if f > 0.0 {
        1
    } else if f < 0.0 {
        -1
    } else {
        0
    }
}

fn sign_of_decimal(d: &Decimal) -> i8 {
    if d.is_zero() {
        0
    } else if d.is_sign_negative() {
        -1
    } else {
        1
    }
}

/// Compare a decimal with a float without rounding either side.
fn compare_decimal_float(d: Decimal, f: f64) -> Ordering {
    if f.is_nan() {
        return Ordering::Less;
    }
    if f.is_infinite() {
        return if f > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let (ds, fs) = (sign_of_decimal(&d), sign_of_float(f));
    if ds != fs || ds == 0 {
        return ds.cmp(&fs);
    }

    let magnitude = compare_magnitudes(d.mantissa().unsigned_abs(), d.scale(), f.abs());
    if ds < 0 {
        magnitude.reverse()
    } else {
        magnitude
    }
}

/// Compare `mantissa * 10^-scale` with a positive finite float.
///
/// The float is `m * 2^e` exactly. Writing `10^s` as `5^s * 2^s` and
/// cancelling the shared powers of two leaves integers that fit in `u128`
/// unless one side is far larger than the other.
fn compare_magnitudes(mantissa: u128, scale: u32, f: f64) -> Ordering {
    let (m, e) = decompose(f);
    // m < 2^53 and 5^28 < 2^66, so the product fits.
    let rhs = m as u128 * 5u128.pow(scale);

    if e >= 0 {
        match shl_checked(rhs, e as u32 + scale) {
            Some(rhs) => mantissa.cmp(&rhs),
            None => Ordering::Less,
        }
    } else {
        let k = e.unsigned_abs();
        if k >= scale {
            match shl_checked(mantissa, k - scale) {
                Some(lhs) => lhs.cmp(&rhs),
                None => Ordering::Greater,
            }
        } else {
            match shl_checked(rhs, scale - k) {
                Some(rhs) => mantissa.cmp(&rhs),
                None => Ordering::Less,
            }
        }
    }
}

/// Split a positive finite float into `(m, e)` with `f == m * 2^e`.
fn decompose(f: f64) -> (u64, i32) {
    let bits = f.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    if exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent - 1075)
    }
}

fn shl_checked(value: u128, shift: u32) -> Option<u128> {
    if value == 0 {
        Some(0)
    } else if shift >= 128 || value.leading_zeros() < shift {
        None
    } else {
        Some(value << shift)
    }
}
