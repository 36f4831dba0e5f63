//! Backend-neutral walks over expression trees.
//!
//! A [`Translator`] receives one callback per node kind and builds whatever
//! its backend needs: query text, a filter document, a cost estimate. The
//! walk is post-order, so logical nodes receive their children's output.

use crate::expr::{Expr, FieldRef};
use crate::literal::Literal;
use crate::op::{Connector, Relation};
use crate::options::CaseSensitivity;

/// A visitor that renders an [`Expr`] into a backend representation.
pub trait Translator<T> {
    /// The rendered form of one node.
    type Output;

    fn constant(&mut self, value: bool) -> Self::Output;

    fn equal(&mut self, field: &FieldRef<T>, value: &Literal) -> Self::Output;

    fn not_equal(&mut self, field: &FieldRef<T>, value: &Literal) -> Self::Output;

    fn relational(
        &mut self,
        relation: Relation,
        field: &FieldRef<T>,
        value: &Literal,
    ) -> Self::Output;

    fn contains(
        &mut self,
        field: &FieldRef<T>,
        needle: &str,
        case: CaseSensitivity,
    ) -> Self::Output;

    fn and(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;

    fn or(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;
}

/// Walks `expr` left to right, feeding every node to `translator`.
///
/// The walk keeps its own stack, so tree depth is bounded by memory rather
/// than by the thread's call stack.
pub fn translate<T, X>(expr: &Expr<T>, translator: &mut X) -> X::Output
where
    X: Translator<T> + ?Sized,
{
    let mut frames: Vec<Frame<'_, T, X::Output>> = Vec::new();
    let mut node = expr;
    loop {
        let mut output = loop {
            match node {
                Expr::And(left, right) => {
                    frames.push(Frame::Left(Connector::And, right));
                    node = left;
                }
                Expr::Or(left, right) => {
                    frames.push(Frame::Left(Connector::Or, right));
                    node = left;
                }
                Expr::Constant(value) => break translator.constant(*value),
                Expr::Equal(field, value) => break translator.equal(field, value),
                Expr::NotEqual(field, value) => break translator.not_equal(field, value),
                Expr::Relational(relation, field, value) => {
                    break translator.relational(*relation, field, value)
                }
                Expr::Contains {
                    field,
                    needle,
                    case,
                } => break translator.contains(field, needle, *case),
            }
        };

        loop {
            match frames.pop() {
                None => return output,
                Some(Frame::Left(connector, right)) => {
                    frames.push(Frame::Right(connector, output));
                    node = right;
                    break;
                }
                Some(Frame::Right(Connector::And, left)) => output = translator.and(left, output),
                Some(Frame::Right(Connector::Or, left)) => output = translator.or(left, output),
            }
        }
    }
}

// A logical node waiting on its left or its right operand.
enum Frame<'e, T, O> {
    Left(Connector, &'e Expr<T>),
    Right(Connector, O),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    struct Doc {
        title: String,
        pages: u32,
    }

    const TITLE: Field<Doc, String> = Field::new("title", |d| &d.title);
    const PAGES: Field<Doc, u32> = Field::new("pages", |d| &d.pages);

    /// Renders a prefix notation and records visit order.
    #[derive(Default)]
    struct Prefix {
        visited: Vec<&'static str>,
    }

    impl Translator<Doc> for Prefix {
        type Output = String;

        fn constant(&mut self, value: bool) -> String {
            self.visited.push("const");
            value.to_string()
        }

        fn equal(&mut self, field: &FieldRef<Doc>, value: &Literal) -> String {
            self.visited.push("eq");
            format!("(= {} {value})", field.name())
        }

        fn not_equal(&mut self, field: &FieldRef<Doc>, value: &Literal) -> String {
            self.visited.push("ne");
            format!("(!= {} {value})", field.name())
        }

        fn relational(
            &mut self,
            relation: Relation,
            field: &FieldRef<Doc>,
            value: &Literal,
        ) -> String {
            self.visited.push("rel");
            format!("({} {} {value})", relation.symbol(), field.name())
        }

        fn contains(
            &mut self,
            field: &FieldRef<Doc>,
            needle: &str,
            _case: CaseSensitivity,
        ) -> String {
            self.visited.push("contains");
            format!("(contains {} {needle:?})", field.name())
        }

        fn and(&mut self, left: String, right: String) -> String {
            self.visited.push("and");
            format!("(and {left} {right})")
        }

        fn or(&mut self, left: String, right: String) -> String {
            self.visited.push("or");
            format!("(or {left} {right})")
        }
    }

    #[test]
    fn walks_post_order() {
        let predicate = crate::compose(&[
            PAGES.gte(100),
            TITLE.contains("rust".to_string()).or(),
            PAGES.ne(0),
        ])
        .unwrap();

        let mut prefix = Prefix::default();
        let out = translate(predicate.body(), &mut prefix);

        assert_eq!(
            out,
            "(and (or (>= pages 100) (contains title \"rust\")) (!= pages 0))"
        );
        assert_eq!(prefix.visited, ["rel", "contains", "or", "ne", "and"]);
    }

    #[test]
    fn constants_translate_directly() {
        let mut prefix = Prefix::default();
        assert_eq!(translate(&Expr::<Doc>::Constant(true), &mut prefix), "true");
    }

    #[test]
    fn right_nested_trees_keep_order() {
        let p = crate::expr::Param::fresh("d");
        let leaf = |v: u32| {
            Expr::Equal(FieldRef::new(p.clone(), PAGES.accessor()), Literal::from(v))
        };
        let expr = Expr::and(leaf(1), Expr::or(leaf(2), Expr::and(leaf(3), leaf(4))));

        let mut prefix = Prefix::default();
        assert_eq!(
            translate(&expr, &mut prefix),
            "(and (= pages 1) (or (= pages 2) (and (= pages 3) (= pages 4))))"
        );
        assert_eq!(prefix.visited, ["eq", "eq", "eq", "eq", "and", "or", "and"]);
    }
}
