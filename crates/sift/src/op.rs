//! Comparison kinds and logical connectors for filter descriptors.
//!
//! Both enums parse leniently from text so descriptors can come from
//! untyped input: unknown comparisons fall back to [`Comparison::Equal`] and
//! unknown connectors fall back to [`Connector::And`].

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How a field is compared with a descriptor's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparison {
    #[default]
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    /// Containment of the value within the field (substring for text).
    Contains,
}

impl Comparison {
    /// Parses a comparison name, falling back to `Equal` for anything
    /// unrecognised.
    pub fn parse_lenient(s: &str) -> Comparison {
        match s.trim().to_ascii_lowercase().as_str() {
            "ne" | "neq" | "!=" | "<>" | "notequal" | "not_equal" => Comparison::NotEqual,
            "gt" | ">" | "greaterthan" | "greater_than" => Comparison::GreaterThan,
            "lt" | "<" | "lessthan" | "less_than" => Comparison::LessThan,
            "gte" | "ge" | ">=" | "greaterthanorequal" | "greater_than_or_equal" => {
                Comparison::GreaterThanOrEqual
            }
            "lte" | "le" | "<=" | "lessthanorequal" | "less_than_or_equal" => {
                Comparison::LessThanOrEqual
            }
            "contains" | "like" => Comparison::Contains,
            _ => Comparison::Equal,
        }
    }

    /// Returns the relational kind for ordering comparisons.
    pub fn relation(self) -> Option<Relation> {
        match self {
            Comparison::GreaterThan => Some(Relation::GreaterThan),
            Comparison::LessThan => Some(Relation::LessThan),
            Comparison::GreaterThanOrEqual => Some(Relation::GreaterThanOrEqual),
            Comparison::LessThanOrEqual => Some(Relation::LessThanOrEqual),
            _ => None,
        }
    }

    /// Returns the display name of this comparison.
    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::Equal => "eq",
            Comparison::NotEqual => "ne",
            Comparison::GreaterThan => "gt",
            Comparison::LessThan => "lt",
            Comparison::GreaterThanOrEqual => "gte",
            Comparison::LessThanOrEqual => "lte",
            Comparison::Contains => "contains",
        }
    }
}

impl FromStr for Comparison {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Comparison::parse_lenient(s))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering comparisons, the `Relational` node kinds of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Relation {
    /// Evaluates this relation given the ordering of field against literal.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Relation::GreaterThan => ordering == Ordering::Greater,
            Relation::LessThan => ordering == Ordering::Less,
            Relation::GreaterThanOrEqual => ordering != Ordering::Less,
            Relation::LessThanOrEqual => ordering != Ordering::Greater,
        }
    }

    /// Returns the operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::GreaterThan => ">",
            Relation::LessThan => "<",
            Relation::GreaterThanOrEqual => ">=",
            Relation::LessThanOrEqual => "<=",
        }
    }
}

/// How a descriptor joins the condition accumulated from the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    /// Parses a connector name, falling back to `And` for anything
    /// unrecognised.
    pub fn parse_lenient(s: &str) -> Connector {
        match s.trim().to_ascii_lowercase().as_str() {
            "or" | "||" | "|" => Connector::Or,
            _ => Connector::And,
        }
    }

    /// Returns the display name of this connector.
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::And => "and",
            Connector::Or => "or",
        }
    }
}

impl FromStr for Connector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Connector::parse_lenient(s))
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_parsing() {
        assert_eq!(Comparison::parse_lenient("eq"), Comparison::Equal);
        assert_eq!(Comparison::parse_lenient("!="), Comparison::NotEqual);
        assert_eq!(Comparison::parse_lenient("GreaterThan"), Comparison::GreaterThan);
        assert_eq!(Comparison::parse_lenient(" <= "), Comparison::LessThanOrEqual);
        assert_eq!(Comparison::parse_lenient("Contains"), Comparison::Contains);
    }

    #[test]
    fn unknown_comparison_falls_back_to_equal() {
        assert_eq!(Comparison::parse_lenient("between"), Comparison::Equal);
        assert_eq!("".parse::<Comparison>(), Ok(Comparison::Equal));
    }

    #[test]
    fn connector_parsing() {
        assert_eq!(Connector::parse_lenient("OR"), Connector::Or);
        assert_eq!(Connector::parse_lenient("||"), Connector::Or);
        assert_eq!(Connector::parse_lenient("and"), Connector::And);
        assert_eq!(Connector::parse_lenient("xor"), Connector::And);
        assert_eq!(Connector::default(), Connector::And);
    }

    #[test]
    fn relation_holds() {
        assert!(Relation::GreaterThan.holds(Ordering::Greater));
        assert!(!Relation::GreaterThan.holds(Ordering::Equal));
        assert!(Relation::GreaterThanOrEqual.holds(Ordering::Equal));
        assert!(!Relation::GreaterThanOrEqual.holds(Ordering::Less));
        assert!(Relation::LessThan.holds(Ordering::Less));
        assert!(Relation::LessThanOrEqual.holds(Ordering::Equal));
        assert!(!Relation::LessThanOrEqual.holds(Ordering::Greater));
    }

    #[test]
    fn only_ordering_comparisons_have_relations() {
        assert_eq!(Comparison::Equal.relation(), None);
        assert_eq!(Comparison::Contains.relation(), None);
        assert_eq!(Comparison::LessThan.relation(), Some(Relation::LessThan));
    }
}
