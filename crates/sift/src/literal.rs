//! Owned constants carried by filter descriptors.
//!
//! Unlike [`Value`], which borrows from the element under test, a
//! [`Literal`] owns its data so descriptors and expressions can outlive the
//! values they were built from.

use std::fmt;

use crate::value::{Number, Timestamp, Value, ValueKind};

/// Constant operand of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(Number),
    Bool(bool),
    Timestamp(Timestamp),
    Null,
}

impl Literal {
    /// Returns the kind of this literal, or `None` for `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Literal::String(_) => Some(ValueKind::String),
            Literal::Number(_) => Some(ValueKind::Number),
            Literal::Bool(_) => Some(ValueKind::Bool),
            Literal::Timestamp(_) => Some(ValueKind::Timestamp),
            Literal::Null => None,
        }
    }

    /// Returns the display name of this literal's kind.
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("null", ValueKind::as_str)
    }

    /// Returns `true` for the `Null` literal.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Borrows this literal as a runtime [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Literal::String(s) => Value::String(s),
            Literal::Number(n) => Value::Number(*n),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Timestamp(t) => Value::Timestamp(*t),
            Literal::Null => Value::None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Timestamp(t) => write!(f, "{t}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

impl From<Timestamp> for Literal {
    fn from(t: Timestamp) -> Self {
        Literal::Timestamp(t)
    }
}

impl<V: Into<Literal>> From<Option<V>> for Literal {
    fn from(v: Option<V>) -> Self {
        v.map_or(Literal::Null, Into::into)
    }
}

macro_rules! literal_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(n: $t) -> Self {
                    Literal::Number(Number::from(n))
                }
            }
        )*
    };
}

literal_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Literal::from("x").kind(), Some(ValueKind::String));
        assert_eq!(Literal::from(3i64).kind(), Some(ValueKind::Number));
        assert_eq!(Literal::from(false).kind(), Some(ValueKind::Bool));
        assert_eq!(Literal::from(None::<i32>), Literal::Null);
        assert_eq!(Literal::Null.kind_name(), "null");
    }

    #[test]
    fn display() {
        assert_eq!(Literal::from("an").to_string(), "\"an\"");
        assert_eq!(Literal::from(18i32).to_string(), "18");
        assert_eq!(Literal::Null.to_string(), "null");
    }
}
