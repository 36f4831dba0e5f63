//! Runtime value types read from fields during evaluation.
//!
//! A [`Value`] borrows from the element being tested. [`ValueKind`] is the
//! static shape of a field and decides which comparisons it accepts.

use std::cmp::Ordering;
use std::fmt;

/// Borrowed view of a field value, produced by a field accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text value.
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Absent or null value.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the kind of this value, or `None` for an absent value.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::String(_) => Some(ValueKind::String),
            Value::Number(_) => Some(ValueKind::Number),
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Timestamp(_) => Some(ValueKind::Timestamp),
            Value::None => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// The static shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Bool,
    Timestamp,
}

impl ValueKind {
    /// Returns `true` if values of this kind have a total or partial order
    /// usable by the relational comparisons.
    pub fn supports_ordering(self) -> bool {
        matches!(
            self,
            ValueKind::String | ValueKind::Number | ValueKind::Timestamp
        )
    }

    /// Returns `true` if values of this kind can test containment of another
    /// value of the same kind.
    pub fn supports_contains(self) -> bool {
        matches!(self, ValueKind::String)
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric value covering signed, unsigned, and floating point fields.
///
/// Comparisons are exact across variants, including integers beyond the
/// 2^53 range an `f64` represents without loss. Any comparison involving
/// NaN is unordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Converts the number to f64, rounding integers past 2^53.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed variants.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),
            (Number::I64(a), Number::F64(b)) => compare_int_float(a.into(), b),
            (Number::U64(a), Number::F64(b)) => compare_int_float(a.into(), b),
            (Number::F64(a), Number::I64(b)) => {
                compare_int_float(b.into(), a).map(Ordering::reverse)
            }
            (Number::F64(a), Number::U64(b)) => {
                compare_int_float(b.into(), a).map(Ordering::reverse)
            }
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
        }
    }
}

// 2^127, the first float past i128, which holds every i64 and u64.
const I128_BOUND: f64 = i128::MAX as f64;

// Compares the float's integral part as an integer, then its fraction.
fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I128_BOUND {
        return Some(Ordering::Less);
    }
    if float < -I128_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        unequal => Some(unequal),
    }
}

// Exact for the whole i64/u64 range, unlike an f64 round trip.
fn compare_signed_unsigned(signed: i64, unsigned: u64) -> Ordering {
    match u64::try_from(signed) {
        Ok(s) => s.cmp(&unsigned),
        Err(_) => Ordering::Less,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// ```
/// use sift::Timestamp;
///
/// assert!(Timestamp::from_secs(1) < Timestamp::from_millis(1500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}ms", self.0)
    }
}
