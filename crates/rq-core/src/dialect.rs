//! SQL dialect abstraction
//!
//! A dialect decides how operators are spelled, how tightly they bind and
//! which argument types they accept. Renderers and type inspectors only ever
//! look operators up through this trait.

use crate::operator::{default_binary_operators, default_unary_operators, Operator};
use crate::types::FunctionSignature;
use std::collections::HashMap;

/// Trait for SQL dialect implementations
pub trait Dialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &str;

    /// Look up a binary operator by name (e.g. `add`, `eq`)
    fn binary_operator(&self, name: &str) -> Option<&Operator>;

    /// Look up a unary operator by name (e.g. `neg`, `not`)
    fn unary_operator(&self, name: &str) -> Option<&Operator>;

    /// Signatures of a named function, in resolution order
    fn function_signatures(&self, _name: &str) -> &[FunctionSignature] {
        &[]
    }
}

/// The dialect used when none is given
#[derive(Debug, Clone)]
pub struct DefaultDialect {
    binary: HashMap<String, Operator>,
    unary: HashMap<String, Operator>,
}

impl DefaultDialect {
    /// Create the default dialect
    pub fn new() -> Self {
        Self {
            binary: default_binary_operators(),
            unary: default_unary_operators(),
        }
    }
}

impl Default for DefaultDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for DefaultDialect {
    fn name(&self) -> &str {
        crate::types::DEFAULT_DIALECT
    }

    fn binary_operator(&self, name: &str) -> Option<&Operator> {
        self.binary.get(name)
    }

    fn unary_operator(&self, name: &str) -> Option<&Operator> {
        self.unary.get(name)
    }
}

/// A dialect built from a [`DialectConfig`](crate::config::DialectConfig)
#[derive(Debug, Clone)]
pub struct ConfiguredDialect {
    pub(crate) name: String,
    pub(crate) binary: HashMap<String, Operator>,
    pub(crate) unary: HashMap<String, Operator>,
    pub(crate) functions: HashMap<String, Vec<FunctionSignature>>,
}

impl Dialect for ConfiguredDialect {
    fn name(&self) -> &str {
        &self.name
    }

    fn binary_operator(&self, name: &str) -> Option<&Operator> {
        self.binary.get(name)
    }

    fn unary_operator(&self, name: &str) -> Option<&Operator> {
        self.unary.get(name)
    }

    fn function_signatures(&self, name: &str) -> &[FunctionSignature] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
