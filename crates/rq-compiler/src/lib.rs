//! rq-compiler: SQL rendering and type inference for rq relations
//!
//! [`Compiler`] turns expressions and relations into SQL text for a dialect,
//! collecting every error it meets into a [`CompileResult`].
//! [`TypeInspector`] infers expression types from dialect signatures.

pub mod compiler;
pub mod error;
pub mod result;
pub mod type_inspector;

pub use compiler::{Compiler, Render};
pub use error::CompilerError;
pub use result::CompileResult;
pub use type_inspector::TypeInspector;
