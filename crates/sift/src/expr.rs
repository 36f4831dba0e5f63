//! Boolean expression trees over one element type.
//!
//! Every comparison node holds a [`FieldRef`]: a field accessor applied to a
//! [`Param`], the bind site standing for "the current element". The tree is
//! only data. Evaluation lives in [`crate::eval`] and push-down translation
//! in [`crate::translate`], so either strategy can be used with any tree.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::field::Accessor;
use crate::literal::Literal;
use crate::op::Relation;
use crate::options::CaseSensitivity;
use crate::rebind::ParamRebinder;
use crate::value::Value;

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(1);

/// A parameter identity that expression nodes are bound to.
///
/// Identity is the numeric id; the name is only for display. Every call to
/// [`Param::fresh`] yields a parameter unequal to all others.
#[derive(Debug, Clone)]
pub struct Param {
    id: u64,
    name: Cow<'static, str>,
}

impl Param {
    /// Mints a new, unique parameter.
    pub fn fresh(name: impl Into<Cow<'static, str>>) -> Self {
        Param {
            id: NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
        }
    }

    /// Returns the parameter's identity.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Param {}

impl Hash for Param {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A field accessor applied to a parameter.
pub struct FieldRef<T> {
    param: Param,
    accessor: Accessor<T>,
}

impl<T> FieldRef<T> {
    /// Binds an accessor to a parameter.
    pub fn new(param: Param, accessor: Accessor<T>) -> Self {
        FieldRef { param, accessor }
    }

    /// Returns the bound parameter.
    pub fn param(&self) -> &Param {
        &self.param
    }

    /// Returns the accessor.
    pub fn accessor(&self) -> &Accessor<T> {
        &self.accessor
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        self.accessor.name()
    }

    /// Reads the field from the element bound to the parameter.
    pub fn read<'a>(&self, item: &'a T) -> Value<'a> {
        self.accessor.read(item)
    }

    /// Returns the same field bound to a different parameter.
    pub fn rebound(&self, param: Param) -> Self {
        FieldRef {
            param,
            accessor: self.accessor.clone(),
        }
    }
}

impl<T> Clone for FieldRef<T> {
    fn clone(&self) -> Self {
        FieldRef {
            param: self.param.clone(),
            accessor: self.accessor.clone(),
        }
    }
}

impl<T> fmt::Display for FieldRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.param, self.name())
    }
}

/// A boolean-valued expression node.
pub enum Expr<T> {
    Constant(bool),
    Equal(FieldRef<T>, Literal),
    NotEqual(FieldRef<T>, Literal),
    Relational(Relation, FieldRef<T>, Literal),
    Contains {
        field: FieldRef<T>,
        needle: String,
        case: CaseSensitivity,
    },
    And(Box<Expr<T>>, Box<Expr<T>>),
    Or(Box<Expr<T>>, Box<Expr<T>>),
}

impl<T> Expr<T> {
    /// Joins two expressions with a logical AND.
    pub fn and(left: Expr<T>, right: Expr<T>) -> Expr<T> {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Joins two expressions with a logical OR.
    pub fn or(left: Expr<T>, right: Expr<T>) -> Expr<T> {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Returns the field reference of a comparison node.
    pub fn field_ref(&self) -> Option<&FieldRef<T>> {
        match self {
            Expr::Equal(field, _)
            | Expr::NotEqual(field, _)
            | Expr::Relational(_, field, _)
            | Expr::Contains { field, .. } => Some(field),
            Expr::Constant(_) | Expr::And(..) | Expr::Or(..) => None,
        }
    }

    /// Returns the distinct parameters referenced anywhere in the tree, in
    /// order of first appearance.
    pub fn params(&self) -> Vec<Param> {
        let mut found: Vec<Param> = Vec::new();
        for node in self.leaves() {
            if let Some(field) = node.field_ref() {
                if !found.contains(field.param()) {
                    found.push(field.param().clone());
                }
            }
        }
        found
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        let leaves = self.leaves().count();
        // A binary tree has one logical node fewer than it has leaves.
        2 * leaves - 1
    }

    /// Leaf nodes from left to right.
    fn leaves(&self) -> impl Iterator<Item = &Expr<T>> {
        let mut stack: Vec<&Expr<T>> = vec![self];
        std::iter::from_fn(move || loop {
            match stack.pop()? {
                Expr::And(left, right) | Expr::Or(left, right) => {
                    stack.push(right);
                    stack.push(left);
                }
                leaf => return Some(leaf),
            }
        })
    }

    // Moves both operands of a logical node onto `into`, leaving constants.
    fn detach_operands(&mut self, into: &mut Vec<Expr<T>>) {
        if let Expr::And(left, right) | Expr::Or(left, right) = self {
            into.push(mem::replace(&mut **left, Expr::Constant(false)));
            into.push(mem::replace(&mut **right, Expr::Constant(false)));
        }
    }
}

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        ParamRebinder::default().rebind(self)
    }
}

// Tears long chains down without recursing once per level.
impl<T> Drop for Expr<T> {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_operands(&mut detached);
        while let Some(mut node) = detached.pop() {
            node.detach_operands(&mut detached);
        }
    }
}

enum Piece<'e, T> {
    Node(&'e Expr<T>),
    Text(&'static str),
}

impl<T> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            match node {
                Expr::Constant(b) => write!(f, "{b}")?,
                Expr::Equal(field, value) => write!(f, "{field} == {value}")?,
                Expr::NotEqual(field, value) => write!(f, "{field} != {value}")?,
                Expr::Relational(rel, field, value) => {
                    write!(f, "{field} {} {value}", rel.symbol())?
                }
                Expr::Contains {
                    field,
                    needle,
                    case,
                } => {
                    let func = match case {
                        CaseSensitivity::Sensitive => "contains",
                        CaseSensitivity::Insensitive => "icontains",
                    };
                    write!(f, "{field}.{func}({needle:?})")?
                }
                Expr::And(left, right) => {
                    f.write_str("(")?;
                    pieces.extend([
                        Piece::Text(")"),
                        Piece::Node(&**right),
                        Piece::Text(" && "),
                        Piece::Node(&**left),
                    ]);
                }
                Expr::Or(left, right) => {
                    f.write_str("(")?;
                    pieces.extend([
                        Piece::Text(")"),
                        Piece::Node(&**right),
                        Piece::Text(" || "),
                        Piece::Node(&**left),
                    ]);
                }
            }
        }
        Ok(())
    }
}

impl<T> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({self})")
    }
}
