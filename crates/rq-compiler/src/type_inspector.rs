//! Type inference over expressions
//!
//! Operators and functions are typed by the first dialect signature that
//! accepts the argument types. Anything that cannot be typed yields an error
//! [`DataType`]; check it with [`DataType::is_error`].

use rq_core::types::{BOOLEAN, INTEGER, NULL, TEXT};
use rq_core::{
    AttributeReference, DataType, DefaultDialect, Dialect, Expression, ExpressionError,
    ExpressionVisitor, FunctionSignature, RelationKind,
};
use std::sync::Arc;

/// Infers the data type of expressions
#[derive(Clone)]
pub struct TypeInspector {
    dialect: Arc<dyn Dialect>,
}

impl TypeInspector {
    /// Create an inspector for the default dialect
    pub fn new() -> Self {
        Self::with_dialect(Arc::new(DefaultDialect::new()))
    }

    /// Create an inspector for `dialect`
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self { dialect }
    }

    /// Type of `expr`
    pub fn infer(&self, expr: &Expression) -> DataType {
        self.visit_expression(expr)
    }

    fn resolve(&self, kind: &str, name: &str, signatures: &[FunctionSignature], arguments: &[DataType]) -> DataType {
        match signatures.iter().find(|sig| sig.matches(arguments)) {
            Some(signature) => signature.return_type.clone(),
            None => {
                let arguments: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                log::debug!("No signature of {} '{}' accepts [{}]", kind, name, arguments.join(", "));
                DataType::error(format!(
                    "No signature of {kind} '{name}' accepts [{}]",
                    arguments.join(", ")
                ))
            }
        }
    }

    /// Type of a resolved attribute, looked up through its owner
    fn attribute_type(&self, reference: &AttributeReference) -> Option<DataType> {
        let index = reference.index.value()?;
        match reference.relation.kind() {
            RelationKind::Table(table) => table.columns().at(index).map(|c| c.data_type.clone()),
            RelationKind::Projection { .. } | RelationKind::Group { .. } => reference
                .relation
                .projected_expressions()
                .get(index)
                .map(|expr| self.visit_expression(expr)),
            RelationKind::Rename { input, .. } => {
                let attributes = input.attributes();
                let mut matching = attributes
                    .iter()
                    .filter(|a| a.index == reference.index && a.name == reference.name);
                let first = matching.next()?;
                // Join sides can share (index, name); the rename loses which side it was
                if matching.next().is_some() {
                    log::debug!("Attribute {reference} matches several inputs of its rename");
                    return Some(DataType::error(format!(
                        "Attribute {reference} is ambiguous through rename"
                    )));
                }
                Some(self.visit_attribute(first))
            }
            _ => None,
        }
    }
}

impl Default for TypeInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInspector")
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

impl ExpressionVisitor for TypeInspector {
    type Output = DataType;

    fn visit_null(&self) -> DataType {
        NULL
    }

    fn visit_integer(&self, _value: i64) -> DataType {
        INTEGER
    }

    fn visit_string(&self, _value: &str) -> DataType {
        TEXT
    }

    fn visit_bool(&self, _value: bool) -> DataType {
        BOOLEAN
    }

    fn visit_binary(&self, op: &str, left: &Expression, right: &Expression) -> DataType {
        let Some(operator) = self.dialect.binary_operator(op) else {
            return DataType::error(format!("Unknown binary operator '{op}'"));
        };
        let arguments = [self.visit_expression(left), self.visit_expression(right)];
        self.resolve("binary operator", op, &operator.signatures, &arguments)
    }

    fn visit_unary(&self, op: &str, arg: &Expression) -> DataType {
        let Some(operator) = self.dialect.unary_operator(op) else {
            return DataType::error(format!("Unknown unary operator '{op}'"));
        };
        let arguments = [self.visit_expression(arg)];
        self.resolve("unary operator", op, &operator.signatures, &arguments)
    }

    fn visit_function(&self, name: &str, args: &[Expression]) -> DataType {
        let arguments: Vec<DataType> = args.iter().map(|a| self.visit_expression(a)).collect();
        self.resolve("function", name, self.dialect.function_signatures(name), &arguments)
    }

    fn visit_parameter(&self, name: &str) -> DataType {
        DataType::error(format!("Bind parameter '{name}' has no type"))
    }

    fn visit_attribute(&self, reference: &AttributeReference) -> DataType {
        if let Some(error) = reference.error() {
            return DataType::error(error.to_string());
        }
        self.attribute_type(reference)
            .unwrap_or_else(|| DataType::error(format!("Cannot resolve attribute {reference}")))
    }

    fn visit_error(&self, error: &ExpressionError) -> DataType {
        DataType::error(error.to_string())
    }
}

#[cfg(test)]
#[path = "type_inspector_test.rs"]
mod tests;
