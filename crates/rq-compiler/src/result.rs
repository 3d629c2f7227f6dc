//! Accumulating render result
//!
//! A [`CompileResult`] is either rendered text or the errors found while
//! rendering. Concatenation keeps going after a failure so that every error in
//! a tree is reported at once:
//!
//! | left          | right         | left + right          |
//! |---------------|---------------|-----------------------|
//! | `Value(a)`    | `Value(b)`    | `Value(a + b)`        |
//! | `Value(_)`    | `Failure(e)`  | `Failure(e)`          |
//! | `Failure(e)`  | `Value(_)`    | `Failure(e)`          |
//! | `Failure(e1)` | `Failure(e2)` | `Failure(e1 ++ e2)`   |
//!
//! `Value("")` is the identity.

use crate::error::CompilerError;
use std::ops::{Add, AddAssign};

/// Rendered text or the errors that prevented rendering.
///
/// Build failures through [`CompileResult::failure`] or `From<CompilerError>`;
/// neither they nor the combinators ever produce a `Failure` without errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileResult {
    /// Rendered text
    Value(String),
    /// Errors in the order they were found
    Failure(Vec<CompilerError>),
}

impl CompileResult {
    /// A value
    pub fn value(text: impl Into<String>) -> Self {
        CompileResult::Value(text.into())
    }

    /// A failure with a single error
    pub fn failure(error: CompilerError) -> Self {
        CompileResult::Failure(vec![error])
    }

    /// Whether this is a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, CompileResult::Failure(_))
    }

    /// Errors of a failure; empty for a value
    pub fn errors(&self) -> &[CompilerError] {
        match self {
            CompileResult::Value(_) => &[],
            CompileResult::Failure(errors) => errors,
        }
    }

    /// Text of a value; `None` for a failure
    pub fn string_value(&self) -> Option<&str> {
        match self {
            CompileResult::Value(text) => Some(text),
            CompileResult::Failure(_) => None,
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<String, Vec<CompilerError>> {
        match self {
            CompileResult::Value(text) => Ok(text),
            CompileResult::Failure(errors) => Err(errors),
        }
    }

    /// Surround a value with `left` and `right` when `when` holds
    pub fn wrap(self, left: &str, right: &str, when: bool) -> Self {
        match self {
            CompileResult::Value(text) if when => CompileResult::Value(format!("{left}{text}{right}")),
            other => other,
        }
    }

    /// Concatenate two results
    pub fn concat(self, other: CompileResult) -> Self {
        match (self, other) {
            (CompileResult::Value(mut left), CompileResult::Value(right)) => {
                left.push_str(&right);
                CompileResult::Value(left)
            }
            (CompileResult::Value(_), failure @ CompileResult::Failure(_)) => failure,
            (failure @ CompileResult::Failure(_), CompileResult::Value(_)) => failure,
            (CompileResult::Failure(mut left), CompileResult::Failure(right)) => {
                left.extend(right);
                CompileResult::Failure(left)
            }
        }
    }

    /// Join results with `separator`, gathering the errors of all failures
    pub fn join<I>(items: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = CompileResult>,
    {
        let mut out = CompileResult::default();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out += separator;
            }
            out += item;
        }
        out
    }
}

impl Default for CompileResult {
    fn default() -> Self {
        CompileResult::Value(String::new())
    }
}

impl From<&str> for CompileResult {
    fn from(text: &str) -> Self {
        CompileResult::Value(text.to_string())
    }
}

impl From<String> for CompileResult {
    fn from(text: String) -> Self {
        CompileResult::Value(text)
    }
}

impl From<CompilerError> for CompileResult {
    fn from(error: CompilerError) -> Self {
        CompileResult::failure(error)
    }
}

impl Add for CompileResult {
    type Output = CompileResult;

    fn add(self, rhs: CompileResult) -> CompileResult {
        self.concat(rhs)
    }
}

impl Add<&str> for CompileResult {
    type Output = CompileResult;

    fn add(self, rhs: &str) -> CompileResult {
        self.concat(CompileResult::from(rhs))
    }
}

impl AddAssign for CompileResult {
    fn add_assign(&mut self, rhs: CompileResult) {
        let lhs = std::mem::take(self);
        *self = lhs.concat(rhs);
    }
}

impl AddAssign<&str> for CompileResult {
    fn add_assign(&mut self, rhs: &str) {
        *self += CompileResult::from(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown(op: &str) -> CompilerError {
        CompilerError::UnknownBinaryOperator(op.to_string())
    }

    #[test]
    fn test_concatenation_table() {
        let a = CompileResult::from("a");
        let b = CompileResult::from("b");
        let e1 = CompileResult::failure(unknown("x"));
        let e2 = CompileResult::failure(unknown("y"));

        assert_eq!(a.clone() + b.clone(), CompileResult::from("ab"));
        assert_eq!(a.clone() + e1.clone(), e1.clone());
        assert_eq!(e1.clone() + b, e1.clone());
        assert_eq!(
            e1 + e2,
            CompileResult::Failure(vec![unknown("x"), unknown("y")])
        );
        assert_eq!(CompileResult::default() + a.clone(), a);
    }

    #[test]
    fn test_join_gathers_all_errors() {
        let joined = CompileResult::join(
            vec![
                CompileResult::from("a"),
                CompileResult::failure(unknown("x")),
                CompileResult::from("b"),
                CompileResult::failure(unknown("y")),
            ],
            ", ",
        );
        assert_eq!(joined.errors(), &[unknown("x"), unknown("y")]);
        assert_eq!(joined.string_value(), None);

        let ok = CompileResult::join(["a", "b", "c"].into_iter().map(CompileResult::from), ", ");
        assert_eq!(ok.string_value(), Some("a, b, c"));
        assert_eq!(CompileResult::join(Vec::new(), ", "), CompileResult::default());
    }

    #[test]
    fn test_failures_always_carry_errors() {
        let from_error = CompileResult::from(unknown("x"));
        assert_eq!(from_error.errors(), &[unknown("x")]);

        let combined = [
            CompileResult::from("a") + from_error.clone(),
            from_error.clone() + "b",
            CompileResult::join(vec![from_error.clone(), CompileResult::default()], ", "),
            from_error.wrap("(", ")", true),
        ];
        for result in combined {
            assert!(result.is_failure());
            assert!(!result.errors().is_empty());
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(CompileResult::from("x").wrap("(", ")", true), CompileResult::from("(x)"));
        assert_eq!(CompileResult::from("x").wrap("(", ")", false), CompileResult::from("x"));
        let failed = CompileResult::failure(unknown("x"));
        assert_eq!(failed.clone().wrap("(", ")", true), failed);
    }

    #[test]
    fn test_into_result() {
        assert_eq!((CompileResult::from("a") + " b").into_result(), Ok("a b".to_string()));
        let mut failed = CompileResult::failure(unknown("x"));
        failed += "ignored";
        assert!(failed.is_failure());
        assert_eq!(failed.into_result(), Err(vec![unknown("x")]));
    }
}
