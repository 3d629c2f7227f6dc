//! Error types for rq-compiler

use rq_core::ExpressionError;
use thiserror::Error;

/// Compilation error.
///
/// Errors are collected rather than raised: a failed render carries every
/// error found in the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompilerError {
    /// R001: The dialect has no binary operator with this name
    #[error("[R001] Unknown binary operator '{0}'")]
    UnknownBinaryOperator(String),

    /// R002: The dialect has no unary operator with this name
    #[error("[R002] Unknown unary operator '{0}'")]
    UnknownUnaryOperator(String),

    /// R003: The tree contains an unresolved or erroneous expression
    #[error("[R003] {0}")]
    Expression(#[from] ExpressionError),

    /// R004: Bind parameters cannot be rendered yet
    #[error("[R004] Bind parameter '{0}' is not supported")]
    UnsupportedParameter(String),

    /// R005: Invariant violation inside the compiler
    #[error("[R005] Internal error: {0}")]
    InternalError(String),
}
