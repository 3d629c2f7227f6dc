//! Relational algebra
//!
//! A [`Relation`] is an immutable node over an `Arc`, so combinators such as
//! [`Relation::project`] or [`Relation::join`] share their inputs instead of
//! copying them. Everything derived from a relation (attributes, underlying
//! relations, errors) is recomputed from the tree shape on every call.

use crate::attribute::{AttributeIndex, AttributeReference};
use crate::error::ExpressionError;
use crate::expr::Expression;
use crate::schema::Table;
use std::sync::Arc;

/// Join type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// Inner join
    #[default]
    Inner,
    /// Left outer join
    LeftOuter,
    /// Right outer join
    RightOuter,
    /// Full outer join
    FullOuter,
}

/// Element of a GROUP BY clause
#[derive(Debug, Clone, PartialEq)]
pub enum GroupingElement {
    /// Plain grouping expression
    Expression(Expression),
    /// `GROUPING SETS ((a, b), (c))`
    GroupingSets(Vec<Vec<Expression>>),
    /// `CUBE (a, b)`
    Cube(Vec<Expression>),
    /// `ROLLUP (a, b)`
    Rollup(Vec<Expression>),
}

impl GroupingElement {
    /// Expressions in the element in order of appearance. Grouping sets are
    /// flattened and repeated expressions dropped.
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            GroupingElement::Expression(expr) => vec![expr],
            GroupingElement::GroupingSets(sets) => distinct(sets.iter().flatten()),
            GroupingElement::Cube(exprs) | GroupingElement::Rollup(exprs) => exprs.iter().collect(),
        }
    }
}

impl From<Expression> for GroupingElement {
    fn from(expr: Expression) -> Self {
        GroupingElement::Expression(expr)
    }
}

fn distinct<'a>(exprs: impl Iterator<Item = &'a Expression>) -> Vec<&'a Expression> {
    let mut seen: Vec<&Expression> = Vec::new();
    for expr in exprs {
        if !seen.contains(&expr) {
            seen.push(expr);
        }
    }
    seen
}

/// Output expressions of a group: the distinct grouping expressions in
/// first-seen order, then the aggregates
pub fn group_expressions(grouping: &[GroupingElement], aggregates: &[Expression]) -> Vec<Expression> {
    distinct(grouping.iter().flat_map(GroupingElement::expressions))
        .into_iter()
        .chain(aggregates)
        .cloned()
        .collect()
}

/// Relation name with optional schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Relation name
    pub name: String,
    /// Optional schema
    pub schema: Option<String>,
}

impl QualifiedName {
    /// Create a name without a schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Relation node
#[derive(Debug, Clone, PartialEq)]
pub enum RelationKind {
    /// No relation; a projection over it computes expressions only
    None,
    /// Physical table
    Table(Table),
    /// Projection of attributes or computed expressions
    Projection {
        /// Projected expressions
        columns: Vec<Expression>,
        /// Input relation
        input: Relation,
    },
    /// Rows of the input satisfying a predicate
    Selection {
        /// Filter predicate
        predicate: Expression,
        /// Input relation
        input: Relation,
    },
    /// Input referred to by a new name, like an aliased subquery
    Rename {
        /// New name
        name: String,
        /// Input relation
        input: Relation,
    },
    /// Join of two relations
    Join {
        /// Join type
        join_type: JoinType,
        /// Left side
        left: Relation,
        /// Right side
        right: Relation,
        /// Optional join predicate
        condition: Option<Expression>,
    },
    /// Aggregation over groups of the input
    Group {
        /// GROUP BY elements
        grouping: Vec<GroupingElement>,
        /// Aggregate expressions
        aggregates: Vec<Expression>,
        /// Input relation
        input: Relation,
    },
    /// Result of an erroneous composition
    Error {
        /// Relation the composition started from
        input: Relation,
        /// What went wrong
        error: ExpressionError,
    },
}

/// Immutable, shareable relation
#[derive(Debug, Clone, PartialEq)]
pub struct Relation(Arc<RelationKind>);

impl Relation {
    /// Wrap a node
    pub fn new(kind: RelationKind) -> Self {
        Relation(Arc::new(kind))
    }

    /// The empty relation
    pub fn none() -> Self {
        Self::new(RelationKind::None)
    }

    /// Relation backed by a table
    pub fn table(table: Table) -> Self {
        Self::new(RelationKind::Table(table))
    }

    /// Error relation wrapping `input`
    pub fn error(input: &Relation, error: ExpressionError) -> Self {
        Self::new(RelationKind::Error {
            input: input.clone(),
            error,
        })
    }

    /// The node
    pub fn kind(&self) -> &RelationKind {
        &self.0
    }

    /// Name the relation can be referred to by. Only tables and renames have
    /// one.
    pub fn qualified_name(&self) -> Option<QualifiedName> {
        match self.kind() {
            RelationKind::Table(table) => Some(QualifiedName {
                name: table.name.clone(),
                schema: table.schema.clone(),
            }),
            RelationKind::Rename { name, .. } => Some(QualifiedName::new(name.clone())),
            _ => None,
        }
    }

    /// Human readable name used in error messages
    pub fn description(&self) -> String {
        self.qualified_name()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "(anonymous)".to_string())
    }

    /// References to the attributes of this relation, in order
    pub fn attributes(&self) -> Vec<AttributeReference> {
        match self.kind() {
            RelationKind::None | RelationKind::Error { .. } => vec![],
            RelationKind::Table(table) => table
                .columns()
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    AttributeReference::new(AttributeIndex::Concrete(i), Some(column.name.clone()), self.clone())
                })
                .collect(),
            RelationKind::Projection { columns, .. } => AttributeReference::collect(columns, self),
            RelationKind::Selection { input, .. } => input.attributes(),
            RelationKind::Rename { input, .. } => input
                .attributes()
                .iter()
                .map(|reference| reference.with_relation(self))
                .collect(),
            RelationKind::Join { left, right, .. } => {
                let mut refs = left.attributes();
                refs.extend(right.attributes());
                refs
            }
            RelationKind::Group { .. } => AttributeReference::collect(&self.projected_expressions(), self),
        }
    }

    /// Attributes wrapped as expressions, suitable for deriving new relations
    pub fn attribute_expressions(&self) -> Vec<Expression> {
        self.attributes().into_iter().map(Expression::Attribute).collect()
    }

    /// Expressions that compute each attribute
    pub fn projected_expressions(&self) -> Vec<Expression> {
        match self.kind() {
            RelationKind::None | RelationKind::Error { .. } => vec![],
            RelationKind::Table(_) => self.attribute_expressions(),
            RelationKind::Projection { columns, .. } => columns.clone(),
            RelationKind::Selection { input, .. } | RelationKind::Rename { input, .. } => {
                input.projected_expressions()
            }
            RelationKind::Join { left, right, .. } => {
                let mut exprs = left.projected_expressions();
                exprs.extend(right.projected_expressions());
                exprs
            }
            RelationKind::Group {
                grouping, aggregates, ..
            } => group_expressions(grouping, aggregates),
        }
    }

    /// Relations this one is directly derived from. Tables and renames are
    /// terminal.
    pub fn immediate_relations(&self) -> Vec<Relation> {
        match self.kind() {
            RelationKind::None | RelationKind::Error { .. } => vec![],
            RelationKind::Table(_) | RelationKind::Rename { .. } => vec![self.clone()],
            RelationKind::Projection { input, .. }
            | RelationKind::Selection { input, .. }
            | RelationKind::Group { input, .. } => input.immediate_relations(),
            RelationKind::Join { left, right, .. } => {
                let mut relations = left.immediate_relations();
                relations.extend(right.immediate_relations());
                relations
            }
        }
    }

    /// Tables this relation is ultimately derived from
    pub fn base_relations(&self) -> Vec<Relation> {
        match self.kind() {
            RelationKind::None | RelationKind::Error { .. } => vec![],
            RelationKind::Table(_) => vec![self.clone()],
            RelationKind::Projection { input, .. }
            | RelationKind::Selection { input, .. }
            | RelationKind::Rename { input, .. }
            | RelationKind::Group { input, .. } => input.base_relations(),
            RelationKind::Join { left, right, .. } => {
                let mut relations = left.base_relations();
                relations.extend(right.base_relations());
                relations
            }
        }
    }

    /// First attribute named `name`, or an unknown reference owned by this
    /// relation
    pub fn attribute(&self, name: &str) -> AttributeReference {
        self.attributes()
            .into_iter()
            .find(|reference| reference.name.as_deref() == Some(name))
            .unwrap_or_else(|| {
                log::debug!("No attribute '{}' in {}", name, self.description());
                AttributeReference::new(AttributeIndex::Unknown, Some(name.to_string()), self.clone())
            })
    }

    /// Attribute `name` as an expression
    pub fn column(&self, name: &str) -> Expression {
        Expression::Attribute(self.attribute(name))
    }

    /// Project every attribute (`SELECT *`)
    pub fn project(&self) -> Relation {
        self.project_list(self.attribute_expressions())
    }

    /// Project `columns`
    pub fn project_list(&self, columns: Vec<Expression>) -> Relation {
        Self::new(RelationKind::Projection {
            columns,
            input: self.clone(),
        })
    }

    /// Refer to this relation as `name`
    pub fn alias(&self, name: impl Into<String>) -> Relation {
        Self::new(RelationKind::Rename {
            name: name.into(),
            input: self.clone(),
        })
    }

    /// Keep rows satisfying `predicate`
    pub fn select(&self, predicate: Expression) -> Relation {
        Self::new(RelationKind::Selection {
            predicate,
            input: self.clone(),
        })
    }

    /// Inner join without a condition
    pub fn join(&self, other: &Relation) -> Relation {
        self.join_with(other, JoinType::Inner, None)
    }

    /// Inner join on `predicate`
    pub fn join_on(&self, other: &Relation, predicate: Expression) -> Relation {
        self.join_with(other, JoinType::Inner, Some(predicate))
    }

    /// Join of any type
    pub fn join_with(&self, other: &Relation, join_type: JoinType, condition: Option<Expression>) -> Relation {
        Self::new(RelationKind::Join {
            join_type,
            left: self.clone(),
            right: other.clone(),
            condition,
        })
    }

    /// Group by `grouping` computing `aggregates`
    pub fn group_by(&self, grouping: Vec<GroupingElement>, aggregates: Vec<Expression>) -> Relation {
        Self::new(RelationKind::Group {
            grouping,
            aggregates,
            input: self.clone(),
        })
    }

    /// Every error in the tree, innermost first
    pub fn errors(&self) -> Vec<ExpressionError> {
        match self.kind() {
            RelationKind::None | RelationKind::Table(_) => vec![],
            RelationKind::Projection { columns, input } => {
                let mut errors = input.errors();
                errors.extend(columns.iter().flat_map(expression_errors));
                errors
            }
            RelationKind::Selection { predicate, input } => {
                let mut errors = input.errors();
                errors.extend(expression_errors(predicate));
                errors
            }
            RelationKind::Rename { input, .. } => input.errors(),
            RelationKind::Join {
                left, right, condition, ..
            } => {
                let mut errors = left.errors();
                errors.extend(right.errors());
                errors.extend(condition.iter().flat_map(expression_errors));
                errors
            }
            RelationKind::Group {
                grouping,
                aggregates,
                input,
            } => {
                let mut errors = input.errors();
                for element in grouping {
                    errors.extend(element.expressions().into_iter().flat_map(expression_errors));
                }
                errors.extend(aggregates.iter().flat_map(expression_errors));
                errors
            }
            RelationKind::Error { input, error } => {
                let mut errors = input.errors();
                errors.push(error.clone());
                errors
            }
        }
    }
}

impl From<Table> for Relation {
    fn from(table: Table) -> Self {
        Relation::table(table)
    }
}

/// Error nodes and unresolvable attribute references in `expr`
fn expression_errors(expr: &Expression) -> Vec<ExpressionError> {
    match expr {
        Expression::Error(error) => vec![error.clone()],
        Expression::Attribute(reference) => reference.error().into_iter().collect(),
        _ => expr.children().into_iter().flat_map(expression_errors).collect(),
    }
}

#[cfg(test)]
#[path = "relation_test.rs"]
mod tests;
