//! Filter descriptors: one condition described as data.
//!
//! A [`FilterDescriptor`] names a field, a [`Comparison`], a [`Connector`],
//! and a [`Literal`] value. Descriptors are inert; nothing is resolved or
//! checked until the expression builder consumes them.
//!
//! # Example
//!
//! ```
//! use sift::{Comparison, Field, FilterDescriptor};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! const AGE: Field<Person, i32> = Field::new("age", |p| &p.age);
//! const NAME: Field<Person, String> = Field::new("name", |p| &p.name);
//!
//! let filters = [
//!     FilterDescriptor::new(AGE, Comparison::GreaterThan, 18),
//!     NAME.contains("an".to_string()).or(),
//! ];
//! assert_eq!(filters[1].field_name(), "name");
//! ```

use std::fmt;

use crate::error::{Result, SiftError};
use crate::field::{Accessor, Field, FieldValue, Filterable};
use crate::literal::Literal;
use crate::op::{Comparison, Connector};

/// How a descriptor refers to its field.
pub enum FieldSelector<T> {
    /// A typed selector, already resolved.
    Resolved(Accessor<T>),
    /// A field name, resolved against `T` when the predicate is built.
    Named {
        name: String,
        type_name: &'static str,
        resolve: fn(&str) -> Option<Accessor<T>>,
    },
}

impl<T> FieldSelector<T> {
    /// Returns the field name.
    pub fn name(&self) -> &str {
        match self {
            FieldSelector::Resolved(accessor) => accessor.name(),
            FieldSelector::Named { name, .. } => name,
        }
    }

    /// Resolves the selector to an accessor.
    pub fn resolve(&self) -> Result<Accessor<T>> {
        match self {
            FieldSelector::Resolved(accessor) => Ok(accessor.clone()),
            FieldSelector::Named {
                name,
                type_name,
                resolve,
            } => resolve(name).ok_or_else(|| SiftError::FieldResolution {
                field: name.clone(),
                type_name: *type_name,
            }),
        }
    }
}

impl<T> Clone for FieldSelector<T> {
    fn clone(&self) -> Self {
        match self {
            FieldSelector::Resolved(accessor) => FieldSelector::Resolved(accessor.clone()),
            FieldSelector::Named {
                name,
                type_name,
                resolve,
            } => FieldSelector::Named {
                name: name.clone(),
                type_name: *type_name,
                resolve: *resolve,
            },
        }
    }
}

/// One filter condition against elements of `T`.
pub struct FilterDescriptor<T> {
    field: FieldSelector<T>,
    comparison: Comparison,
    connector: Connector,
    value: Literal,
}

impl<T: 'static> FilterDescriptor<T> {
    /// Creates a descriptor from a typed field selector.
    ///
    /// The connector defaults to [`Connector::And`].
    pub fn new<V: FieldValue>(field: Field<T, V>, comparison: Comparison, value: V) -> Self {
        FilterDescriptor {
            field: FieldSelector::Resolved(field.accessor()),
            comparison,
            connector: Connector::default(),
            value: value.literal(),
        }
    }

    /// Creates a descriptor from an erased accessor and an untyped value.
    ///
    /// The value's kind is checked against the field when the predicate is
    /// built.
    pub fn from_accessor(
        accessor: Accessor<T>,
        comparison: Comparison,
        value: impl Into<Literal>,
    ) -> Self {
        FilterDescriptor {
            field: FieldSelector::Resolved(accessor),
            comparison,
            connector: Connector::default(),
            value: value.into(),
        }
    }
}

impl<T: Filterable> FilterDescriptor<T> {
    /// Creates a descriptor that names its field.
    ///
    /// Resolution happens when the predicate is built; an unknown name fails
    /// with [`SiftError::FieldResolution`].
    pub fn named(
        field: impl Into<String>,
        comparison: Comparison,
        value: impl Into<Literal>,
    ) -> Self {
        FilterDescriptor {
            field: FieldSelector::Named {
                name: field.into(),
                type_name: std::any::type_name::<T>(),
                resolve: T::field,
            },
            comparison,
            connector: Connector::default(),
            value: value.into(),
        }
    }
}

impl<T> FilterDescriptor<T> {
    /// Sets the connector joining this descriptor to the ones before it.
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    /// Joins this descriptor with `Or`.
    pub fn or(self) -> Self {
        self.with_connector(Connector::Or)
    }

    /// Joins this descriptor with `And`.
    pub fn and(self) -> Self {
        self.with_connector(Connector::And)
    }

    /// Returns the field selector.
    pub fn field(&self) -> &FieldSelector<T> {
        &self.field
    }

    /// Returns the field name.
    pub fn field_name(&self) -> &str {
        self.field.name()
    }

    /// Returns the comparison.
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Returns the connector.
    pub fn connector(&self) -> Connector {
        self.connector
    }

    /// Returns the value compared against.
    pub fn value(&self) -> &Literal {
        &self.value
    }
}

impl<T> Clone for FilterDescriptor<T> {
    fn clone(&self) -> Self {
        FilterDescriptor {
            field: self.field.clone(),
            comparison: self.comparison,
            connector: self.connector,
            value: self.value.clone(),
        }
    }
}

impl<T> fmt::Debug for FilterDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDescriptor")
            .field("field", &self.field_name())
            .field("comparison", &self.comparison)
            .field("connector", &self.connector)
            .field("value", &self.value)
            .finish()
    }
}

// Shorthand constructors, one per comparison.
impl<T: 'static, V: FieldValue> Field<T, V> {
    /// `field == value`
    pub fn eq(self, value: V) -> FilterDescriptor<T> {
        FilterDescriptor::new(self, Comparison::Equal, value)
    }

    /// `field != value`
    pub fn ne(self, value: V) -> FilterDescriptor<T> {
        FilterDescriptor::new(self, Comparison::NotEqual, value)
    }

    /// `field > value`
    pub fn gt(self, value: V) -> FilterDescriptor<T> {
        FilterDescriptor::new(self, Comparison::GreaterThan, value)
    }

    /// `field < value`
    pub fn lt(self, value: V) -> FilterDescriptor<T> {
        FilterDescriptor::new(self, Comparison::LessThan, value)
    }

    /// `field >= value`
    pub fn gte(self, value: V) -> FilterDescriptor<T> {
        FilterDescriptor::new(self, Comparison::GreaterThanOrEqual, value)
    }

    /// `field <= value`
    pub fn lte(self, value: V) -> FilterDescriptor<T> {
        FilterDescriptor::new(self, Comparison::LessThanOrEqual, value)
    }

    /// `field` contains `value`.
    ///
    /// Only text fields support containment; other kinds fail when the
    /// predicate is built.
    pub fn contains(self, value: V) -> FilterDescriptor<T> {
        FilterDescriptor::new(self, Comparison::Contains, value)
    }
}
