//! SQL renderer
//!
//! Walks expression and relation trees and produces SQL text in the spelling
//! of a [`Dialect`]. Rendering never stops at the first problem; every error
//! found in the tree ends up in the returned [`CompileResult`].

use crate::error::CompilerError;
use crate::result::CompileResult;
use rq_core::{
    group_expressions, AttributeReference, DefaultDialect, Dialect, Expression, ExpressionError,
    ExpressionVisitor, GroupingElement, JoinType, Relation, RelationKind, RelationVisitor, Table,
};
use std::sync::Arc;

/// A node the compiler can render
pub trait Render {
    /// Render `self` with `compiler`
    fn render_with(&self, compiler: &Compiler) -> CompileResult;
}

impl Render for Expression {
    fn render_with(&self, compiler: &Compiler) -> CompileResult {
        compiler.visit_expression(self)
    }
}

impl Render for Relation {
    fn render_with(&self, compiler: &Compiler) -> CompileResult {
        compiler.visit_relation(self)
    }
}

/// Renders expressions and relations to SQL
#[derive(Clone)]
pub struct Compiler {
    dialect: Arc<dyn Dialect>,
}

impl Compiler {
    /// Create a compiler for the default dialect
    pub fn new() -> Self {
        Self::with_dialect(Arc::new(DefaultDialect::new()))
    }

    /// Create a compiler for `dialect`
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self { dialect }
    }

    /// Dialect used for operator lookup
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Render any node
    pub fn render<T: Render + ?Sized>(&self, node: &T) -> CompileResult {
        let result = node.render_with(self);
        if result.is_failure() {
            log::debug!(
                "Rendering with dialect '{}' failed with {} error(s)",
                self.dialect.name(),
                result.errors().len()
            );
        }
        result
    }

    /// Render an expression
    pub fn render_expression(&self, expr: &Expression) -> CompileResult {
        self.render(expr)
    }

    /// Render a relation
    pub fn render_relation(&self, relation: &Relation) -> CompileResult {
        self.render(relation)
    }

    fn render_list(&self, exprs: &[Expression]) -> CompileResult {
        CompileResult::join(exprs.iter().map(|e| self.visit_expression(e)), ", ")
    }

    /// ` FROM input`, or nothing when there is no input
    fn from_clause(&self, input: &Relation) -> CompileResult {
        match input.kind() {
            RelationKind::None => CompileResult::default(),
            _ => CompileResult::from(" FROM ") + self.visit_relation(input),
        }
    }

    /// Grouping expressions are emitted without their alias
    fn render_grouping_expression(&self, expr: &Expression) -> CompileResult {
        match expr {
            Expression::Alias { expr, .. } => self.visit_expression(expr),
            _ => self.visit_expression(expr),
        }
    }

    fn render_grouping_list(&self, exprs: &[Expression]) -> CompileResult {
        CompileResult::join(exprs.iter().map(|e| self.render_grouping_expression(e)), ", ")
    }

    fn render_grouping_element(&self, element: &GroupingElement) -> CompileResult {
        match element {
            GroupingElement::Expression(expr) => self.render_grouping_expression(expr),
            GroupingElement::GroupingSets(sets) => {
                let sets = sets
                    .iter()
                    .map(|set| self.render_grouping_list(set).wrap("(", ")", true));
                CompileResult::from("GROUPING SETS (") + CompileResult::join(sets, ", ") + ")"
            }
            GroupingElement::Cube(exprs) => CompileResult::from("CUBE (") + self.render_grouping_list(exprs) + ")",
            GroupingElement::Rollup(exprs) => {
                CompileResult::from("ROLLUP (") + self.render_grouping_list(exprs) + ")"
            }
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

fn join_keyword(join_type: JoinType) -> &'static str {
    match join_type {
        JoinType::Inner => "JOIN",
        JoinType::LeftOuter => "LEFT OUTER JOIN",
        JoinType::RightOuter => "RIGHT OUTER JOIN",
        JoinType::FullOuter => "FULL OUTER JOIN",
    }
}

impl ExpressionVisitor for Compiler {
    type Output = CompileResult;

    fn visit_null(&self) -> CompileResult {
        CompileResult::from("NULL")
    }

    fn visit_integer(&self, value: i64) -> CompileResult {
        CompileResult::from(value.to_string())
    }

    fn visit_string(&self, value: &str) -> CompileResult {
        CompileResult::from(format!("'{}'", value.replace('\'', "''")))
    }

    fn visit_bool(&self, value: bool) -> CompileResult {
        CompileResult::from(if value { "true" } else { "false" })
    }

    fn visit_binary(&self, op: &str, left: &Expression, right: &Expression) -> CompileResult {
        let Some(operator) = self.dialect.binary_operator(op) else {
            return CompileResult::failure(CompilerError::UnknownBinaryOperator(op.to_string()))
                + self.visit_expression(left)
                + self.visit_expression(right);
        };

        // Only the left operand is checked; `a - (b - c)` is rendered as
        // `a - b - c`.
        let parenthesize = match left {
            Expression::Binary { op: inner, .. } => self
                .dialect
                .binary_operator(inner)
                .is_some_and(|inner_op| inner_op.precedence < operator.precedence),
            _ => false,
        };

        self.visit_expression(left).wrap("(", ")", parenthesize)
            + " "
            + operator.symbol.as_str()
            + " "
            + self.visit_expression(right)
    }

    fn visit_unary(&self, op: &str, arg: &Expression) -> CompileResult {
        match self.dialect.unary_operator(op) {
            Some(operator) => CompileResult::from(format!("{} ", operator.symbol)) + self.visit_expression(arg),
            None => {
                CompileResult::failure(CompilerError::UnknownUnaryOperator(op.to_string()))
                    + self.visit_expression(arg)
            }
        }
    }

    fn visit_function(&self, name: &str, args: &[Expression]) -> CompileResult {
        CompileResult::from(format!("{name}(")) + self.render_list(args) + ")"
    }

    fn visit_parameter(&self, name: &str) -> CompileResult {
        CompileResult::failure(CompilerError::UnsupportedParameter(name.to_string()))
    }

    fn visit_attribute(&self, reference: &AttributeReference) -> CompileResult {
        if let Some(error) = reference.error() {
            return CompileResult::failure(error.into());
        }
        let Some(name) = &reference.name else {
            return CompileResult::failure(CompilerError::InternalError(format!(
                "attribute {reference} resolved without a name"
            )));
        };
        match reference.relation.qualified_name() {
            Some(qualifier) => CompileResult::from(format!("{}.{}", qualifier.name, name)),
            None => CompileResult::from(name.as_str()),
        }
    }

    fn visit_error(&self, error: &ExpressionError) -> CompileResult {
        CompileResult::failure(error.clone().into())
    }

    fn visit_alias(&self, expr: &Expression, name: &str) -> CompileResult {
        self.visit_expression(expr) + " AS " + name
    }
}

impl RelationVisitor for Compiler {
    type Output = CompileResult;

    fn visit_none(&self) -> CompileResult {
        CompileResult::default()
    }

    fn visit_table(&self, table: &Table) -> CompileResult {
        CompileResult::from(table.name.as_str())
    }

    fn visit_projection(&self, columns: &[Expression], input: &Relation) -> CompileResult {
        CompileResult::from("SELECT ") + self.render_list(columns) + self.from_clause(input)
    }

    fn visit_selection(&self, predicate: &Expression, input: &Relation) -> CompileResult {
        // Stacked selections share one WHERE/HAVING clause
        let mut predicates = vec![predicate];
        let mut base = input;
        while let RelationKind::Selection { predicate, input } = base.kind() {
            predicates.push(predicate);
            base = input;
        }
        predicates.reverse();

        let keyword = match base.kind() {
            RelationKind::Group { .. } => " HAVING ",
            _ => " WHERE ",
        };
        let and = self.dialect.binary_operator("and");
        let conjunction = format!(" {} ", and.map_or("AND", |op| op.symbol.as_str()));
        let conditions = predicates.iter().map(|p| {
            let parenthesize = predicates.len() > 1
                && match p {
                    Expression::Binary { op, .. } if op != "and" => self
                        .dialect
                        .binary_operator(op)
                        .zip(and)
                        .is_some_and(|(inner, conj)| inner.precedence <= conj.precedence),
                    _ => false,
                };
            self.visit_expression(p).wrap("(", ")", parenthesize)
        });
        self.visit_relation(base) + keyword + CompileResult::join(conditions, &conjunction)
    }

    fn visit_rename(&self, name: &str, input: &Relation) -> CompileResult {
        self.visit_relation(input) + " AS " + name
    }

    fn visit_join(
        &self,
        join_type: JoinType,
        left: &Relation,
        right: &Relation,
        condition: Option<&Expression>,
    ) -> CompileResult {
        let mut out = self.visit_relation(left) + " " + join_keyword(join_type) + " " + self.visit_relation(right);
        if let Some(condition) = condition {
            out += " ON ";
            out += self.visit_expression(condition);
        }
        out
    }

    fn visit_group(&self, grouping: &[GroupingElement], aggregates: &[Expression], input: &Relation) -> CompileResult {
        let mut out = CompileResult::from("SELECT ")
            + self.render_list(&group_expressions(grouping, aggregates))
            + self.from_clause(input);
        if !grouping.is_empty() {
            out += " GROUP BY ";
            out += CompileResult::join(grouping.iter().map(|g| self.render_grouping_element(g)), ", ");
        }
        out
    }

    fn visit_relation_error(&self, _input: &Relation, error: &ExpressionError) -> CompileResult {
        CompileResult::failure(error.clone().into())
    }
}

#[cfg(test)]
#[path = "compiler_test.rs"]
mod tests;
