//! Error types for rq-core

use thiserror::Error;

/// Core error type for catalog and dialect loading
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Catalog or dialect file not found
    #[error("[C001] File not found: {path}")]
    FileNotFound { path: String },

    /// C002: Failed to parse a catalog document
    #[error("[C002] Failed to parse catalog: {message}")]
    CatalogParseError { message: String },

    /// C003: Failed to parse a dialect document
    #[error("[C003] Failed to parse dialect config: {message}")]
    DialectParseError { message: String },

    /// C004: Dialect document is well-formed but inconsistent
    #[error("[C004] Invalid dialect config: {message}")]
    DialectConfigInvalid { message: String },

    /// C005: Duplicate table in catalog
    #[error("[C005] Duplicate table '{name}' in catalog")]
    DuplicateTable { name: String },

    /// C006: IO error with the offending path
    #[error("[C006] IO error on {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Attribute resolution errors.
///
/// These are values, not failures: they travel inside
/// [`AttributeReference::error`](crate::AttributeReference::error) and
/// `Expression::Error` until a consumer decides what to do with them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpressionError {
    /// More than one sibling attribute carries this name
    #[error("Ambiguous attribute '{name}' in {relation}")]
    AmbiguousAttribute { name: String, relation: String },

    /// No attribute with this name exists in the relation
    #[error("Unknown attribute '{name}' in {relation}")]
    UnknownAttribute { name: String, relation: String },

    /// The attribute has a position but no name to refer to it by
    #[error("Anonymous attribute #{index} in {relation}")]
    AnonymousAttribute { index: usize, relation: String },
}
