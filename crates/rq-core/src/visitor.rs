//! Visitor traits over expressions and relations
//!
//! Implementors provide one method per node kind; the provided
//! `visit_expression` / `visit_relation` methods do the dispatch.

use crate::attribute::AttributeReference;
use crate::error::ExpressionError;
use crate::expr::Expression;
use crate::relation::{GroupingElement, JoinType, Relation, RelationKind};
use crate::schema::Table;

/// Visits expression nodes and produces an `Output` per node
pub trait ExpressionVisitor {
    /// Result of visiting a node
    type Output;

    /// Dispatch on the node kind
    fn visit_expression(&self, expr: &Expression) -> Self::Output {
        match expr {
            Expression::Null => self.visit_null(),
            Expression::Integer(value) => self.visit_integer(*value),
            Expression::String(value) => self.visit_string(value),
            Expression::Bool(value) => self.visit_bool(*value),
            Expression::Binary { op, left, right } => self.visit_binary(op, left, right),
            Expression::Unary { op, arg } => self.visit_unary(op, arg),
            Expression::Function { name, args } => self.visit_function(name, args),
            Expression::Parameter(name) => self.visit_parameter(name),
            Expression::Alias { expr, name } => self.visit_alias(expr, name),
            Expression::Attribute(reference) => self.visit_attribute(reference),
            Expression::Error(error) => self.visit_error(error),
        }
    }

    fn visit_null(&self) -> Self::Output;
    fn visit_integer(&self, value: i64) -> Self::Output;
    fn visit_string(&self, value: &str) -> Self::Output;
    fn visit_bool(&self, value: bool) -> Self::Output;
    fn visit_binary(&self, op: &str, left: &Expression, right: &Expression) -> Self::Output;
    fn visit_unary(&self, op: &str, arg: &Expression) -> Self::Output;
    fn visit_function(&self, name: &str, args: &[Expression]) -> Self::Output;
    fn visit_parameter(&self, name: &str) -> Self::Output;
    fn visit_attribute(&self, reference: &AttributeReference) -> Self::Output;
    fn visit_error(&self, error: &ExpressionError) -> Self::Output;

    /// An alias is transparent unless overridden
    fn visit_alias(&self, expr: &Expression, _name: &str) -> Self::Output {
        self.visit_expression(expr)
    }
}

/// Visits relation nodes and produces an `Output` per node
pub trait RelationVisitor {
    /// Result of visiting a node
    type Output;

    /// Dispatch on the node kind
    fn visit_relation(&self, relation: &Relation) -> Self::Output {
        match relation.kind() {
            RelationKind::None => self.visit_none(),
            RelationKind::Table(table) => self.visit_table(table),
            RelationKind::Projection { columns, input } => self.visit_projection(columns, input),
            RelationKind::Selection { predicate, input } => self.visit_selection(predicate, input),
            RelationKind::Rename { name, input } => self.visit_rename(name, input),
            RelationKind::Join {
                join_type,
                left,
                right,
                condition,
            } => self.visit_join(*join_type, left, right, condition.as_ref()),
            RelationKind::Group {
                grouping,
                aggregates,
                input,
            } => self.visit_group(grouping, aggregates, input),
            RelationKind::Error { input, error } => self.visit_relation_error(input, error),
        }
    }

    fn visit_none(&self) -> Self::Output;
    fn visit_table(&self, table: &Table) -> Self::Output;
    fn visit_projection(&self, columns: &[Expression], input: &Relation) -> Self::Output;
    fn visit_selection(&self, predicate: &Expression, input: &Relation) -> Self::Output;
    fn visit_rename(&self, name: &str, input: &Relation) -> Self::Output;
    fn visit_join(
        &self,
        join_type: JoinType,
        left: &Relation,
        right: &Relation,
        condition: Option<&Expression>,
    ) -> Self::Output;
    fn visit_group(&self, grouping: &[GroupingElement], aggregates: &[Expression], input: &Relation) -> Self::Output;
    fn visit_relation_error(&self, input: &Relation, error: &ExpressionError) -> Self::Output;
}
