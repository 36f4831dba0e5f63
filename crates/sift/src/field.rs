//! Field selectors and the traits that read field values.
//!
//! A [`Field`] names one member of an element type and carries a plain
//! function pointer that borrows it. Because the value type is part of the
//! selector's type, a descriptor built from a `Field<T, V>` always carries a
//! value the field can be compared with.
//!
//! # Manual Implementation
//!
//! ```
//! use sift::{Accessor, Field, Filterable};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Person {
//!     const NAME: Field<Person, String> = Field::new("name", |p| &p.name);
//!     const AGE: Field<Person, i32> = Field::new("age", |p| &p.age);
//! }
//!
//! impl Filterable for Person {
//!     fn field(name: &str) -> Option<Accessor<Self>> {
//!         match name {
//!             "name" => Some(Self::NAME.accessor()),
//!             "age" => Some(Self::AGE.accessor()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn field_names() -> &'static [&'static str] {
//!         &["name", "age"]
//!     }
//! }
//!
//! assert!(Person::field("age").is_some());
//! assert!(Person::field("height").is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::literal::Literal;
use crate::value::{Number, Timestamp, Value, ValueKind};

/// A type whose values can be read by the evaluator and compared against
/// descriptor literals.
pub trait FieldValue: 'static {
    /// The kind shared by every value of this type.
    fn kind() -> ValueKind;

    /// Borrows this value for evaluation.
    fn value(&self) -> Value<'_>;

    /// Copies this value into an owned literal.
    fn literal(&self) -> Literal;
}

impl FieldValue for String {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn value(&self) -> Value<'_> {
        Value::String(self)
    }

    fn literal(&self) -> Literal {
        Literal::String(self.clone())
    }
}

impl FieldValue for &'static str {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn value(&self) -> Value<'_> {
        Value::String(self)
    }

    fn literal(&self) -> Literal {
        Literal::String((*self).to_string())
    }
}

impl FieldValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn value(&self) -> Value<'_> {
        Value::Bool(*self)
    }

    fn literal(&self) -> Literal {
        Literal::Bool(*self)
    }
}

impl FieldValue for Timestamp {
    fn kind() -> ValueKind {
        ValueKind::Timestamp
    }

    fn value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }

    fn literal(&self) -> Literal {
        Literal::Timestamp(*self)
    }
}

impl<V: FieldValue> FieldValue for Option<V> {
    fn kind() -> ValueKind {
        V::kind()
    }

    fn value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::None, FieldValue::value)
    }

    fn literal(&self) -> Literal {
        self.as_ref().map_or(Literal::Null, FieldValue::literal)
    }
}

macro_rules! numeric_field_value {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                fn kind() -> ValueKind {
                    ValueKind::Number
                }

                fn value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }

                fn literal(&self) -> Literal {
                    Literal::Number(Number::from(*self))
                }
            }
        )*
    };
}

numeric_field_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Typed selector for one field of `T` holding a `V`.
///
/// Selectors are `const`-constructible, so they are usually declared as
/// associated constants (which is what `#[derive(Filterable)]` generates).
pub struct Field<T, V> {
    name: &'static str,
    read: fn(&T) -> &V,
}

impl<T, V> Field<T, V> {
    /// Creates a selector from a field name and a borrowing function.
    pub const fn new(name: &'static str, read: fn(&T) -> &V) -> Self {
        Field { name, read }
    }

    /// Returns the field name used in diagnostics and push-down translation.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Borrows the field from an element.
    pub fn get<'a>(&self, item: &'a T) -> &'a V {
        (self.read)(item)
    }
}

impl<T: 'static, V: FieldValue> Field<T, V> {
    /// Erases the value type, producing a shareable accessor.
    pub fn accessor(self) -> Accessor<T> {
        Arc::new(self)
    }
}

impl<T, V> Clone for Field<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Field<T, V> {}

impl<T, V> fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<V>())
            .finish()
    }
}

/// Object-safe view of a field selector with its value type erased.
pub trait FieldAccess<T>: Send + Sync {
    /// The field name.
    fn name(&self) -> &str;

    /// The kind of value this field holds.
    fn kind(&self) -> ValueKind;

    /// The Rust type name of the field, for error messages.
    fn type_name(&self) -> &'static str;

    /// Reads the field from an element.
    fn read<'a>(&self, item: &'a T) -> Value<'a>;
}

impl<T: 'static, V: FieldValue> FieldAccess<T> for Field<T, V> {
    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> ValueKind {
        V::kind()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<V>()
    }

    fn read<'a>(&self, item: &'a T) -> Value<'a> {
        (self.read)(item).value()
    }
}

/// Shared, type-erased field accessor.
pub type Accessor<T> = Arc<dyn FieldAccess<T>>;

/// Types whose fields can be resolved by name.
///
/// This is what lets descriptors name fields as strings. It is usually
/// implemented by `#[derive(Filterable)]` from the `sift-macros` crate.
pub trait Filterable: Sized + 'static {
    /// Resolves a field by name, or `None` if the type has no such field.
    fn field(name: &str) -> Option<Accessor<Self>>;

    /// Names of all resolvable fields, in declaration order.
    fn field_names() -> &'static [&'static str];
}
