//! Operator metadata and the default operator table

use crate::types::{DataType, FunctionSignature, BOOLEAN, DOUBLE, INTEGER, TEXT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Exponent and shift operators
pub const PRECEDENCE_EXPONENT: i32 = 160;
/// Multiplicative operators and bitwise AND
pub const PRECEDENCE_MULTIPLICATIVE: i32 = 150;
/// Additive operators, bitwise OR/XOR and concatenation
pub const PRECEDENCE_ADDITIVE: i32 = 140;
/// Comparison operators and LIKE
pub const PRECEDENCE_COMPARISON: i32 = 130;
/// AND / OR
pub const PRECEDENCE_LOGICAL: i32 = 110;

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Associativity {
    /// `a op b op c` groups as `(a op b) op c`
    #[default]
    Left,
    /// `a op b op c` groups as `a op (b op c)`
    Right,
}

/// An operator as known to a dialect
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    /// String emitted when rendering the operator
    pub symbol: String,
    /// Accepted signatures, in resolution order
    pub signatures: Vec<FunctionSignature>,
    /// Binding strength; higher binds tighter
    pub precedence: i32,
    /// Grouping of chained uses
    pub associativity: Associativity,
}

impl Operator {
    /// Create a left-associative operator
    pub fn new(symbol: impl Into<String>, signatures: Vec<FunctionSignature>, precedence: i32) -> Self {
        Self {
            symbol: symbol.into(),
            signatures,
            precedence,
            associativity: Associativity::Left,
        }
    }

    /// Return the operator with a different associativity
    pub fn with_associativity(mut self, associativity: Associativity) -> Self {
        self.associativity = associativity;
        self
    }

    /// Return type of the first signature accepting `arguments`
    pub fn resolve(&self, arguments: &[DataType]) -> Option<&DataType> {
        self.signatures
            .iter()
            .find(|sig| sig.matches(arguments))
            .map(|sig| &sig.return_type)
    }
}

fn arithmetic_signatures() -> Vec<FunctionSignature> {
    vec![
        FunctionSignature::binary(INTEGER, INTEGER, INTEGER),
        FunctionSignature::binary(DOUBLE, DOUBLE, DOUBLE),
        FunctionSignature::binary(INTEGER, DOUBLE, DOUBLE),
        FunctionSignature::binary(DOUBLE, INTEGER, DOUBLE),
    ]
}

fn bitwise_signatures() -> Vec<FunctionSignature> {
    vec![FunctionSignature::binary(INTEGER, INTEGER, INTEGER)]
}

fn boolean_signatures() -> Vec<FunctionSignature> {
    vec![FunctionSignature::binary(BOOLEAN, BOOLEAN, BOOLEAN)]
}

fn text_signatures() -> Vec<FunctionSignature> {
    vec![FunctionSignature::binary(TEXT, TEXT, TEXT)]
}

/// The default binary operator table, keyed by operator name
pub fn default_binary_operators() -> HashMap<String, Operator> {
    let table = [
        ("exp", Operator::new("^", arithmetic_signatures(), PRECEDENCE_EXPONENT)),
        ("shl", Operator::new("<<", bitwise_signatures(), PRECEDENCE_EXPONENT)),
        ("shr", Operator::new(">>", bitwise_signatures(), PRECEDENCE_EXPONENT)),
        ("mul", Operator::new("*", arithmetic_signatures(), PRECEDENCE_MULTIPLICATIVE)),
        ("div", Operator::new("/", arithmetic_signatures(), PRECEDENCE_MULTIPLICATIVE)),
        ("mod", Operator::new("%", arithmetic_signatures(), PRECEDENCE_MULTIPLICATIVE)),
        ("bitand", Operator::new("&", bitwise_signatures(), PRECEDENCE_MULTIPLICATIVE)),
        ("add", Operator::new("+", arithmetic_signatures(), PRECEDENCE_ADDITIVE)),
        ("sub", Operator::new("-", arithmetic_signatures(), PRECEDENCE_ADDITIVE)),
        ("bitor", Operator::new("|", bitwise_signatures(), PRECEDENCE_ADDITIVE)),
        ("bitxor", Operator::new("#", bitwise_signatures(), PRECEDENCE_ADDITIVE)),
        ("concat", Operator::new("||", text_signatures(), PRECEDENCE_ADDITIVE)),
        ("eq", Operator::new("=", boolean_signatures(), PRECEDENCE_COMPARISON)),
        ("ne", Operator::new("!=", boolean_signatures(), PRECEDENCE_COMPARISON)),
        ("lt", Operator::new("<", boolean_signatures(), PRECEDENCE_COMPARISON)),
        ("le", Operator::new("<=", boolean_signatures(), PRECEDENCE_COMPARISON)),
        ("gt", Operator::new(">", boolean_signatures(), PRECEDENCE_COMPARISON)),
        ("ge", Operator::new(">=", boolean_signatures(), PRECEDENCE_COMPARISON)),
        ("like", Operator::new("LIKE", text_signatures(), PRECEDENCE_COMPARISON)),
        ("and", Operator::new("AND", boolean_signatures(), PRECEDENCE_LOGICAL)),
        (
            "or",
            Operator::new("OR", boolean_signatures(), PRECEDENCE_LOGICAL)
                .with_associativity(Associativity::Right),
        ),
    ];
    table
        .into_iter()
        .map(|(name, op)| (name.to_string(), op))
        .collect()
}

/// The default unary operator table, keyed by operator name
pub fn default_unary_operators() -> HashMap<String, Operator> {
    let table = [
        (
            "neg",
            Operator::new(
                "-",
                vec![
                    FunctionSignature::unary(INTEGER, INTEGER),
                    FunctionSignature::unary(DOUBLE, DOUBLE),
                ],
                0,
            ),
        ),
        (
            "not",
            Operator::new("NOT", vec![FunctionSignature::unary(BOOLEAN, BOOLEAN)], 0),
        ),
        (
            "bitnot",
            Operator::new("~", vec![FunctionSignature::unary(INTEGER, INTEGER)], 0),
        ),
    ];
    table
        .into_iter()
        .map(|(name, op)| (name.to_string(), op))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ANY;

    #[test]
    fn test_precedence_tiers() {
        let ops = default_binary_operators();
        assert!(ops["exp"].precedence > ops["mul"].precedence);
        assert!(ops["mul"].precedence > ops["add"].precedence);
        assert!(ops["add"].precedence > ops["eq"].precedence);
        assert!(ops["eq"].precedence > ops["and"].precedence);
        assert_eq!(ops["concat"].precedence, ops["bitor"].precedence);
        assert_eq!(ops["bitand"].precedence, ops["mul"].precedence);
    }

    #[test]
    fn test_comparison_symbols() {
        let ops = default_binary_operators();
        assert_eq!(ops["gt"].symbol, ">");
        assert_eq!(ops["ge"].symbol, ">=");
        assert_eq!(ops["ne"].symbol, "!=");
    }

    #[test]
    fn test_or_is_right_associative() {
        let ops = default_binary_operators();
        assert_eq!(ops["or"].associativity, Associativity::Right);
        assert_eq!(ops["and"].associativity, Associativity::Left);
    }

    #[test]
    fn test_resolve_picks_first_match() {
        let op = Operator::new(
            "?",
            vec![
                FunctionSignature::binary(ANY, INTEGER, TEXT),
                FunctionSignature::binary(INTEGER, INTEGER, INTEGER),
            ],
            0,
        );
        assert_eq!(op.resolve(&[INTEGER, INTEGER]), Some(&TEXT));
        assert_eq!(op.resolve(&[INTEGER, TEXT]), None);
    }

    #[test]
    fn test_unary_table() {
        let ops = default_unary_operators();
        assert_eq!(ops["neg"].resolve(&[DOUBLE]), Some(&DOUBLE));
        assert_eq!(ops["not"].resolve(&[BOOLEAN]), Some(&BOOLEAN));
        assert!(ops["bitnot"].resolve(&[TEXT]).is_none());
    }
}
