//! Data types and function signatures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

/// Name of the dialect that owns the built-in types
pub const DEFAULT_DIALECT: &str = "default";

/// A data type as known to a dialect.
///
/// Types are identified by their qualified name `dialect.name`; two types with
/// the same qualified name are equal regardless of how they were built. Error
/// types additionally carry a message describing why no real type could be
/// determined, and never equal a named type, not even one called `ERROR`.
#[derive(Debug, Clone)]
pub struct DataType {
    name: Cow<'static, str>,
    dialect: Cow<'static, str>,
    message: Option<String>,
}

/// Special type of the `NULL` literal
pub const NULL: DataType = DataType::builtin("NULL");
/// Wildcard parameter type for function signatures
pub const ANY: DataType = DataType::builtin("ANY");
/// BOOLEAN
pub const BOOLEAN: DataType = DataType::builtin("BOOLEAN");
/// INTEGER
pub const INTEGER: DataType = DataType::builtin("INTEGER");
/// DOUBLE
pub const DOUBLE: DataType = DataType::builtin("DOUBLE");
/// TEXT
pub const TEXT: DataType = DataType::builtin("TEXT");

impl DataType {
    const fn builtin(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            dialect: Cow::Borrowed(DEFAULT_DIALECT),
            message: None,
        }
    }

    /// Create a type `name` belonging to the default dialect
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_dialect(name, DEFAULT_DIALECT)
    }

    /// Create a type `name` belonging to `dialect`
    pub fn with_dialect(name: impl Into<String>, dialect: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            dialect: Cow::Owned(dialect.into()),
            message: None,
        }
    }

    /// Create an error type carrying `message`
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: Cow::Borrowed("ERROR"),
            dialect: Cow::Borrowed(DEFAULT_DIALECT),
            message: Some(message.into()),
        }
    }

    /// Type name as used in its dialect
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the dialect the type belongs to
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Fully qualified name in the form `dialect.name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.dialect, self.name)
    }

    /// Returns true for the type of the `NULL` literal
    pub fn is_null(&self) -> bool {
        *self == NULL
    }

    /// Returns true for the signature wildcard
    pub fn is_any(&self) -> bool {
        *self == ANY
    }

    /// Returns true if this type describes a failed inference
    pub fn is_error(&self) -> bool {
        self.message.is_some()
    }

    /// Error message of an error type
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        self.dialect == other.dialect && self.name == other.name && self.is_error() == other.is_error()
    }
}

impl Eq for DataType {}

impl Hash for DataType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dialect.hash(state);
        self.name.hash(state);
        self.is_error().hash(state);
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}({message})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parse a catalog type string into a default-dialect DataType.
///
/// Common spellings of the built-in types are normalized; anything else is
/// kept as a named type of the default dialect, uppercased.
pub fn parse_data_type(s: &str) -> DataType {
    let upper = s.trim().to_uppercase();
    let upper = upper.as_str();

    match upper {
        "BOOL" | "BOOLEAN" => BOOLEAN,
        "INT" | "INTEGER" | "INT4" | "BIGINT" | "INT8" | "SMALLINT" | "TINYINT" => INTEGER,
        "DOUBLE" | "DOUBLE PRECISION" | "FLOAT" | "FLOAT8" | "REAL" => DOUBLE,
        "TEXT" | "VARCHAR" | "STRING" | "CHAR" | "CHARACTER VARYING" => TEXT,
        _ => match upper.find('(') {
            // VARCHAR(255), DECIMAL(10,2): parameters do not change the type
            Some(open) if open > 0 && upper.ends_with(')') => parse_data_type(&upper[..open]),
            _ => DataType::new(upper),
        },
    }
}

/// A function or operator signature: argument types and a return type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Parameter types in order
    pub arguments: Vec<DataType>,
    /// Type of the result
    pub return_type: DataType,
}

impl FunctionSignature {
    /// Create a signature from argument types and a return type
    pub fn new(arguments: Vec<DataType>, return_type: DataType) -> Self {
        Self {
            arguments,
            return_type,
        }
    }

    /// Shorthand for a one-argument signature
    pub fn unary(argument: DataType, return_type: DataType) -> Self {
        Self::new(vec![argument], return_type)
    }

    /// Shorthand for a two-argument signature
    pub fn binary(left: DataType, right: DataType, return_type: DataType) -> Self {
        Self::new(vec![left, right], return_type)
    }

    /// Check whether the signature accepts `arguments`.
    ///
    /// Arity must be equal; each parameter must equal the argument type at the
    /// same position unless the parameter is `ANY`.
    pub fn matches(&self, arguments: &[DataType]) -> bool {
        self.arguments.len() == arguments.len()
            && self
                .arguments
                .iter()
                .zip(arguments)
                .all(|(param, arg)| param.is_any() || param == arg)
    }
}

impl std::fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "[{}] -> {}", args.join(", "), self.return_type)
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
