//! Attribute references and their resolution state

use crate::error::ExpressionError;
use crate::expr::Expression;
use crate::lookup::LookupList;
use crate::relation::Relation;

/// Where an attribute sits in its owning relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeIndex {
    /// Resolved to a position
    Concrete(usize),
    /// More than one sibling shares the name
    Ambiguous,
    /// No attribute with the name exists
    Unknown,
}

impl AttributeIndex {
    /// Position, when resolved
    pub fn value(&self) -> Option<usize> {
        match self {
            AttributeIndex::Concrete(index) => Some(*index),
            AttributeIndex::Ambiguous | AttributeIndex::Unknown => None,
        }
    }
}

/// Handle binding an attribute name and position to the relation that owns it
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeReference {
    /// Position in the owner's attribute list
    pub index: AttributeIndex,
    /// Attribute name; `None` for anonymous attributes
    pub name: Option<String>,
    /// Owning relation
    pub relation: Relation,
}

impl AttributeReference {
    /// Create a reference
    pub fn new(index: AttributeIndex, name: Option<String>, relation: Relation) -> Self {
        Self {
            index,
            name,
            relation,
        }
    }

    /// Build references for a list of attribute-computing expressions owned
    /// by `relation`.
    ///
    /// Every expression whose display name collides with a sibling becomes
    /// ambiguous; unnamed expressions become anonymous references.
    pub fn collect(expressions: &[Expression], relation: &Relation) -> Vec<AttributeReference> {
        let names = LookupList::new(
            expressions.iter().map(Expression::display_name).collect(),
            |name: &Option<&str>| *name,
        );

        names
            .entries()
            .enumerate()
            .map(|(i, (key, _))| {
                let index = match key {
                    Some(name) if names.is_ambiguous(*name) => AttributeIndex::Ambiguous,
                    _ => AttributeIndex::Concrete(i),
                };
                AttributeReference::new(index, key.map(|name| name.to_string()), relation.clone())
            })
            .collect()
    }

    /// Resolution error, if the reference cannot be used as-is
    pub fn error(&self) -> Option<ExpressionError> {
        let relation = self.relation.description();
        let name = || self.name.clone().unwrap_or_else(|| "(unnamed)".to_string());
        match (self.index, &self.name) {
            (AttributeIndex::Concrete(_), Some(_)) => None,
            (AttributeIndex::Concrete(index), None) => {
                Some(ExpressionError::AnonymousAttribute { index, relation })
            }
            (AttributeIndex::Ambiguous, _) => Some(ExpressionError::AmbiguousAttribute {
                name: name(),
                relation,
            }),
            (AttributeIndex::Unknown, _) => Some(ExpressionError::UnknownAttribute {
                name: name(),
                relation,
            }),
        }
    }

    /// Same reference owned by `relation`
    pub fn with_relation(&self, relation: &Relation) -> Self {
        Self::new(self.index, self.name.clone(), relation.clone())
    }

    /// The reference wrapped as an expression
    pub fn to_expression(&self) -> Expression {
        Expression::Attribute(self.clone())
    }
}

impl std::fmt::Display for AttributeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let owner = self.relation.description();
        match (self.index, &self.name) {
            (AttributeIndex::Concrete(_), Some(name)) => write!(f, "{owner}.{name}"),
            (AttributeIndex::Concrete(i), None) => write!(f, "{owner}.[{i}]"),
            (AttributeIndex::Ambiguous, Some(name)) => write!(f, "{owner}.[ambiguous `{name}`]"),
            (AttributeIndex::Ambiguous, None) => write!(f, "{owner}.[ambiguous]"),
            (AttributeIndex::Unknown, Some(name)) => write!(f, "{owner}.[unknown `{name}`]"),
            (AttributeIndex::Unknown, None) => write!(f, "{owner}.[unknown]"),
        }
    }
}
