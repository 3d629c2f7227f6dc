//! rq-core: relational algebra model for rq
//!
//! This crate provides data types and dialects, table metadata, the
//! expression tree and the relation algebra with attribute resolution.
//! Rendering and type inference live in `rq-compiler`.

pub mod attribute;
pub mod catalog;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod lookup;
pub mod operator;
pub mod relation;
pub mod schema;
pub mod types;
pub mod visitor;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use attribute::{AttributeIndex, AttributeReference};
pub use catalog::{Catalog, MetadataProvider};
pub use config::DialectConfig;
pub use dialect::{ConfiguredDialect, DefaultDialect, Dialect};
pub use error::{CoreError, CoreResult, ExpressionError};
pub use expr::Expression;
pub use lookup::LookupList;
pub use operator::{Associativity, Operator};
pub use relation::{group_expressions, GroupingElement, JoinType, QualifiedName, Relation, RelationKind};
pub use schema::{Column, Table};
pub use types::{parse_data_type, DataType, FunctionSignature};
pub use visitor::{ExpressionVisitor, RelationVisitor};
