//! Expression tree
//!
//! Expressions are immutable values compared structurally. Operators are
//! referenced by name (`add`, `eq`, `not`, ...); how a name is spelled and
//! typed is up to the [`Dialect`](crate::Dialect) that consumes the tree.

use crate::attribute::AttributeReference;
use crate::error::ExpressionError;

/// A scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `NULL` literal
    Null,
    /// Integer literal
    Integer(i64),
    /// String literal
    String(String),
    /// Boolean literal
    Bool(bool),
    /// Binary operator application
    Binary {
        /// Operator name
        op: String,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },
    /// Unary operator application
    Unary {
        /// Operator name
        op: String,
        /// Operand
        arg: Box<Expression>,
    },
    /// Function call
    Function {
        /// Function name
        name: String,
        /// Arguments in order
        args: Vec<Expression>,
    },
    /// Bind parameter
    Parameter(String),
    /// Named expression (`expr AS name`)
    Alias {
        /// Aliased expression
        expr: Box<Expression>,
        /// Alias
        name: String,
    },
    /// Reference to an attribute of a relation
    Attribute(AttributeReference),
    /// An expression that could not be formed
    Error(ExpressionError),
}

impl Expression {
    /// `NULL`
    pub fn null() -> Self {
        Expression::Null
    }

    /// Apply binary operator `op`
    pub fn binary(op: impl Into<String>, left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Expression::Binary {
            op: op.into(),
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// Apply unary operator `op`
    pub fn unary(op: impl Into<String>, arg: impl Into<Expression>) -> Self {
        Expression::Unary {
            op: op.into(),
            arg: Box::new(arg.into()),
        }
    }

    /// Call function `name`
    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function {
            name: name.into(),
            args,
        }
    }

    /// Bind parameter `name`
    pub fn parameter(name: impl Into<String>) -> Self {
        Expression::Parameter(name.into())
    }

    /// Give the expression a name
    pub fn alias(self, name: impl Into<String>) -> Self {
        Expression::Alias {
            expr: Box::new(self),
            name: name.into(),
        }
    }

    /// Whether this node is an error node
    pub fn is_error(&self) -> bool {
        matches!(self, Expression::Error(_))
    }

    /// Name the expression is known by: its alias, or the name of the
    /// attribute it refers to
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Expression::Alias { name, .. } => Some(name),
            Expression::Attribute(reference) => reference.name.as_deref(),
            _ => None,
        }
    }

    /// Immediate sub-expressions. Does not descend into relations.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Binary { left, right, .. } => vec![left, right],
            Expression::Unary { arg, .. } => vec![arg],
            Expression::Function { args, .. } => args.iter().collect(),
            Expression::Alias { expr, .. } => vec![expr],
            Expression::Null
            | Expression::Integer(_)
            | Expression::String(_)
            | Expression::Bool(_)
            | Expression::Parameter(_)
            | Expression::Attribute(_)
            | Expression::Error(_) => vec![],
        }
    }

    /// Every error node in the subtree, in traversal order
    pub fn all_errors(&self) -> Vec<ExpressionError> {
        match self {
            Expression::Error(error) => vec![error.clone()],
            _ => self.children().into_iter().flat_map(Expression::all_errors).collect(),
        }
    }

    /// Every attribute reference in the subtree, in traversal order
    pub fn attribute_references(&self) -> Vec<&AttributeReference> {
        match self {
            Expression::Attribute(reference) => vec![reference],
            _ => self
                .children()
                .into_iter()
                .flat_map(Expression::attribute_references)
                .collect(),
        }
    }

    /// `self = other`
    pub fn equals(self, other: impl Into<Expression>) -> Self {
        Self::binary("eq", self, other)
    }

    /// `self != other`
    pub fn not_equals(self, other: impl Into<Expression>) -> Self {
        Self::binary("ne", self, other)
    }

    /// `self < other`
    pub fn lt(self, other: impl Into<Expression>) -> Self {
        Self::binary("lt", self, other)
    }

    /// `self <= other`
    pub fn le(self, other: impl Into<Expression>) -> Self {
        Self::binary("le", self, other)
    }

    /// `self > other`
    pub fn gt(self, other: impl Into<Expression>) -> Self {
        Self::binary("gt", self, other)
    }

    /// `self >= other`
    pub fn ge(self, other: impl Into<Expression>) -> Self {
        Self::binary("ge", self, other)
    }

    /// `self AND other`
    pub fn and(self, other: impl Into<Expression>) -> Self {
        Self::binary("and", self, other)
    }

    /// `self OR other`
    pub fn or(self, other: impl Into<Expression>) -> Self {
        Self::binary("or", self, other)
    }

    /// `self || other`
    pub fn concat(self, other: impl Into<Expression>) -> Self {
        Self::binary("concat", self, other)
    }

    /// `self LIKE pattern`
    pub fn like(self, pattern: impl Into<Expression>) -> Self {
        Self::binary("like", self, pattern)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::Integer(value)
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::Integer(value.into())
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::String(value.to_string())
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Expression::String(value)
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Bool(value)
    }
}

impl<T: Into<Expression>> From<Option<T>> for Expression {
    fn from(value: Option<T>) -> Self {
        value.map_or(Expression::Null, Into::into)
    }
}

impl From<AttributeReference> for Expression {
    fn from(reference: AttributeReference) -> Self {
        Expression::Attribute(reference)
    }
}

impl From<ExpressionError> for Expression {
    fn from(error: ExpressionError) -> Self {
        Expression::Error(error)
    }
}

macro_rules! binary_operator_impl {
    ($trait:ident, $method:ident, $name:literal) => {
        impl<T: Into<Expression>> std::ops::$trait<T> for Expression {
            type Output = Expression;

            fn $method(self, rhs: T) -> Expression {
                Expression::binary($name, self, rhs)
            }
        }
    };
}

binary_operator_impl!(Add, add, "add");
binary_operator_impl!(Sub, sub, "sub");
binary_operator_impl!(Mul, mul, "mul");
binary_operator_impl!(Div, div, "div");
binary_operator_impl!(Rem, rem, "mod");
binary_operator_impl!(BitAnd, bitand, "bitand");
binary_operator_impl!(BitOr, bitor, "bitor");

impl std::ops::Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::unary("neg", self)
    }
}

impl std::ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::unary("not", self)
    }
}

#[cfg(test)]
#[path = "expr_test.rs"]
mod tests;
