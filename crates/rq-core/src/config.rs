//! Dialect configuration loaded from YAML
//!
//! A config describes a dialect as a set of overrides on top of the default
//! operator table. Fields left out keep their default values.

use crate::dialect::ConfiguredDialect;
use crate::error::{CoreError, CoreResult};
use crate::operator::{default_binary_operators, default_unary_operators, Associativity, Operator};
use crate::types::{parse_data_type, FunctionSignature};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Dialect configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DialectConfig {
    /// Dialect name
    pub name: String,

    /// Binary operator overrides and additions, keyed by operator name
    #[serde(default)]
    pub binary_operators: BTreeMap<String, OperatorConfig>,

    /// Unary operator overrides and additions, keyed by operator name
    #[serde(default)]
    pub unary_operators: BTreeMap<String, OperatorConfig>,

    /// Function signatures, keyed by function name
    #[serde(default)]
    pub functions: BTreeMap<String, Vec<SignatureConfig>>,
}

/// Override for a single operator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorConfig {
    /// Rendered spelling; required for operators not in the default table
    #[serde(default)]
    pub symbol: Option<String>,

    /// Binding strength
    #[serde(default)]
    pub precedence: Option<i32>,

    /// Associativity
    #[serde(default)]
    pub associativity: Option<Associativity>,

    /// Replacement signature list
    #[serde(default)]
    pub signatures: Option<Vec<SignatureConfig>>,
}

/// A signature written with type names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureConfig {
    /// Argument type names
    pub arguments: Vec<String>,
    /// Return type name
    pub returns: String,
}

impl SignatureConfig {
    fn to_signature(&self) -> FunctionSignature {
        FunctionSignature::new(
            self.arguments.iter().map(|a| parse_data_type(a)).collect(),
            parse_data_type(&self.returns),
        )
    }
}

impl DialectConfig {
    /// Parse a dialect config from a YAML string
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| CoreError::DialectParseError {
            message: e.to_string(),
        })
    }

    /// Load a dialect config from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Loading dialect config from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Build the dialect described by this config
    pub fn build(&self) -> CoreResult<ConfiguredDialect> {
        if self.name.trim().is_empty() {
            return Err(CoreError::DialectConfigInvalid {
                message: "dialect name must not be empty".to_string(),
            });
        }

        let mut binary = default_binary_operators();
        for (name, cfg) in &self.binary_operators {
            apply_override(&mut binary, name, cfg, 2)?;
        }

        let mut unary = default_unary_operators();
        for (name, cfg) in &self.unary_operators {
            apply_override(&mut unary, name, cfg, 1)?;
        }

        let functions = self
            .functions
            .iter()
            .map(|(name, sigs)| {
                let sigs = sigs.iter().map(SignatureConfig::to_signature).collect();
                (name.clone(), sigs)
            })
            .collect();

        Ok(ConfiguredDialect {
            name: self.name.clone(),
            binary,
            unary,
            functions,
        })
    }
}

/// Merge one operator override into `table`, checking signature arity
fn apply_override(
    table: &mut HashMap<String, Operator>,
    name: &str,
    cfg: &OperatorConfig,
    arity: usize,
) -> CoreResult<()> {
    let signatures = match &cfg.signatures {
        Some(sigs) => {
            if let Some(bad) = sigs.iter().find(|s| s.arguments.len() != arity) {
                return Err(CoreError::DialectConfigInvalid {
                    message: format!(
                        "operator '{name}' expects {arity} argument(s), signature has {}",
                        bad.arguments.len()
                    ),
                });
            }
            Some(sigs.iter().map(SignatureConfig::to_signature).collect())
        }
        None => None,
    };

    match table.get_mut(name) {
        Some(op) => {
            log::debug!("Overriding operator '{name}'");
            if let Some(symbol) = &cfg.symbol {
                op.symbol = symbol.clone();
            }
            if let Some(precedence) = cfg.precedence {
                op.precedence = precedence;
            }
            if let Some(associativity) = cfg.associativity {
                op.associativity = associativity;
            }
            if let Some(signatures) = signatures {
                op.signatures = signatures;
            }
        }
        None => {
            let Some(symbol) = &cfg.symbol else {
                return Err(CoreError::DialectConfigInvalid {
                    message: format!("new operator '{name}' must define a symbol"),
                });
            };
            let op = Operator::new(
                symbol.clone(),
                signatures.unwrap_or_default(),
                cfg.precedence.unwrap_or(0),
            )
            .with_associativity(cfg.associativity.unwrap_or_default());
            table.insert(name.to_string(), op);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
