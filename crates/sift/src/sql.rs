//! Push-down into parameterised SQL.
//!
//! [`SqlSelect`] is a [`Queryable`] that never touches data: pushed filters
//! and windows are folded into a `SELECT` statement that the caller runs on
//! their own connection. Values never appear in the SQL text; each one is
//! bound to a `$n` placeholder in order.
//!
//! ```
//! use sift::{Field, PageRequest, Queryable, SqlSelect};
//!
//! struct User {
//!     name: String,
//!     age: u8,
//! }
//!
//! const NAME: Field<User, String> = Field::new("name", |u| &u.name);
//! const AGE: Field<User, u8> = Field::new("age", |u| &u.age);
//!
//! let select = sift::filter_queryable(
//!     SqlSelect::<User>::from_table("users"),
//!     &[AGE.gte(18), NAME.contains("ann".to_string())],
//! )
//! .unwrap();
//! let select = sift::page_queryable(select, PageRequest::new(2, 25)).unwrap();
//!
//! let query = select.to_sql();
//! assert_eq!(
//!     query.sql,
//!     r#"SELECT * FROM "users" WHERE ("age" >= $1 AND LOWER("name") LIKE LOWER($2) ESCAPE '\') LIMIT 25 OFFSET 25"#
//! );
//! assert_eq!(query.params.len(), 2);
//! ```

use std::fmt;

use tracing::debug;

use crate::expr::FieldRef;
use crate::literal::Literal;
use crate::op::Relation;
use crate::options::CaseSensitivity;
use crate::predicate::Predicate;
use crate::queryable::Queryable;
use crate::translate::{translate, Translator};

/// Renders expressions as SQL conditions, collecting bound values.
#[derive(Debug, Default)]
pub struct SqlTranslator {
    params: Vec<Literal>,
}

impl SqlTranslator {
    pub fn new() -> Self {
        SqlTranslator::default()
    }

    /// The values bound so far, in placeholder order.
    pub fn params(&self) -> &[Literal] {
        &self.params
    }

    /// Consumes the translator, returning the bound values.
    pub fn into_params(self) -> Vec<Literal> {
        self.params
    }

    fn bind(&mut self, value: Literal) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }
}

impl<T> Translator<T> for SqlTranslator {
    type Output = SqlCondition;

    fn constant(&mut self, value: bool) -> SqlCondition {
        SqlCondition::from(if value { "TRUE" } else { "FALSE" })
    }

    fn equal(&mut self, field: &FieldRef<T>, value: &Literal) -> SqlCondition {
        let column = quote_ident(field.name());
        if value.is_null() {
            return format!("{column} IS NULL").into();
        }
        format!("{column} = {}", self.bind(value.clone())).into()
    }

    // An absent column differs from every non-null value.
    fn not_equal(&mut self, field: &FieldRef<T>, value: &Literal) -> SqlCondition {
        let column = quote_ident(field.name());
        if value.is_null() {
            return format!("{column} IS NOT NULL").into();
        }
        format!("{column} IS DISTINCT FROM {}", self.bind(value.clone())).into()
    }

    fn relational(
        &mut self,
        relation: Relation,
        field: &FieldRef<T>,
        value: &Literal,
    ) -> SqlCondition {
        let column = quote_ident(field.name());
        format!("{column} {} {}", relation.symbol(), self.bind(value.clone())).into()
    }

    fn contains(
        &mut self,
        field: &FieldRef<T>,
        needle: &str,
        case: CaseSensitivity,
    ) -> SqlCondition {
        let column = quote_ident(field.name());
        let pattern = self.bind(Literal::String(format!("%{}%", escape_like(needle))));
        let sql = match case {
            CaseSensitivity::Sensitive => format!("{column} LIKE {pattern} ESCAPE '\\'"),
            CaseSensitivity::Insensitive => {
                format!("LOWER({column}) LIKE LOWER({pattern}) ESCAPE '\\'")
            }
        };
        sql.into()
    }

    fn and(&mut self, left: SqlCondition, right: SqlCondition) -> SqlCondition {
        left.join(" AND ", right)
    }

    fn or(&mut self, left: SqlCondition, right: SqlCondition) -> SqlCondition {
        left.join(" OR ", right)
    }
}

/// A rendered SQL condition.
///
/// Opening parentheses of nested groups are counted rather than prepended,
/// so extending a left-deep chain appends to one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlCondition {
    open: usize,
    text: String,
}

impl SqlCondition {
    fn join(mut self, keyword: &str, right: SqlCondition) -> SqlCondition {
        self.open += 1;
        self.text.push_str(keyword);
        right.write_to(&mut self.text);
        self.text.push(')');
        self
    }

    fn write_to(&self, out: &mut String) {
        out.reserve(self.open + self.text.len());
        out.extend(std::iter::repeat('(').take(self.open));
        out.push_str(&self.text);
    }

    /// Returns the condition text.
    pub fn into_string(self) -> String {
        if self.open == 0 {
            return self.text;
        }
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

impl From<String> for SqlCondition {
    fn from(text: String) -> Self {
        SqlCondition { open: 0, text }
    }
}

impl From<&str> for SqlCondition {
    fn from(text: &str) -> Self {
        SqlCondition::from(text.to_string())
    }
}

impl fmt::Display for SqlCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.open {
            f.write_str("(")?;
        }
        f.write_str(&self.text)
    }
}

/// Quotes an identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escapes `LIKE` wildcards so `needle` matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A rendered statement and its bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Literal>,
}

enum Source<T> {
    Table(String),
    Subquery(Box<SqlSelect<T>>),
}

/// A `SELECT` statement built by pushing filters and windows.
///
/// Filters pushed before any window share one `WHERE` clause. A filter
/// pushed after a window applies to the windowed rows, so the statement so
/// far becomes a subquery.
pub struct SqlSelect<T> {
    source: Source<T>,
    filters: Vec<Predicate<T>>,
    offset: usize,
    limit: Option<usize>,
}

impl<T> SqlSelect<T> {
    /// Selects every row of `table`.
    pub fn from_table(table: impl Into<String>) -> Self {
        SqlSelect {
            source: Source::Table(table.into()),
            filters: Vec::new(),
            offset: 0,
            limit: None,
        }
    }

    /// Rows skipped at this level.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Row limit at this level, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn is_windowed(&self) -> bool {
        self.offset > 0 || self.limit.is_some()
    }

    /// Renders the statement.
    pub fn to_sql(&self) -> SqlQuery {
        let mut translator = SqlTranslator::new();
        let sql = self.render(&mut translator, 0);
        let query = SqlQuery {
            sql,
            params: translator.into_params(),
        };
        debug!(sql = %query.sql, params = query.params.len(), "rendered select");
        query
    }

    fn render(&self, translator: &mut SqlTranslator, depth: usize) -> String {
        let mut sql = String::from("SELECT * FROM ");
        match &self.source {
            Source::Table(table) => sql.push_str(&quote_ident(table)),
            Source::Subquery(inner) => {
                let inner = inner.render(translator, depth + 1);
                sql.push_str(&format!("({inner}) AS q{depth}"));
            }
        }

        if !self.filters.is_empty() {
            let conditions: Vec<String> = self
                .filters
                .iter()
                .map(|predicate| translate(predicate.body(), translator).into_string())
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if self.offset > 0 {
            sql.push_str(&format!(" OFFSET {}", self.offset));
        }
        sql
    }
}

impl<T> Queryable<T> for SqlSelect<T> {
    fn push_filter(self, predicate: Predicate<T>) -> Self {
        if self.is_windowed() {
            return SqlSelect {
                source: Source::Subquery(Box::new(self)),
                filters: vec![predicate],
                offset: 0,
                limit: None,
            };
        }
        let mut select = self;
        select.filters.push(predicate);
        select
    }

    fn push_skip(mut self, n: usize) -> Self {
        self.offset = self.offset.saturating_add(n);
        self.limit = self.limit.map(|limit| limit.saturating_sub(n));
        self
    }

    fn push_take(mut self, n: usize) -> Self {
        self.limit = Some(self.limit.map_or(n, |limit| limit.min(n)));
        self
    }
}

impl<T> fmt::Display for SqlSelect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&mut SqlTranslator::new(), 0))
    }
}

impl<T> fmt::Debug for SqlSelect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SqlSelect({self})")
    }
}
