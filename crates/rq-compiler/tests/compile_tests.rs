//! End-to-end tests: catalog and dialect documents through relation building,
//! rendering and type inference

use rq_compiler::{CompileResult, Compiler, CompilerError, TypeInspector};
use rq_core::test_utils::{contacts, data, events};
use rq_core::types::{INTEGER, TEXT};
use rq_core::{
    AttributeIndex, Catalog, DialectConfig, Expression, ExpressionError, JoinType, MetadataProvider, Relation,
};
use std::sync::Arc;

const CATALOG: &str = r#"
tables:
  - name: orders
    columns:
      - { name: id, data_type: INTEGER }
      - { name: customer_id, data_type: INTEGER }
      - { name: amount, data_type: DOUBLE }
      - { name: status, data_type: VARCHAR(16) }
  - name: customers
    columns:
      - { name: id, data_type: INTEGER }
      - { name: name, data_type: TEXT }
"#;

fn sql(result: CompileResult) -> String {
    match result {
        CompileResult::Value(text) => text,
        CompileResult::Failure(errors) => panic!("render failed: {errors:?}"),
    }
}

#[test]
fn test_query_over_catalog_tables() {
    let catalog = Catalog::from_yaml(CATALOG).unwrap();
    let orders = Relation::table(catalog.table("orders", None).unwrap());
    let customers = Relation::table(catalog.table("customers", None).unwrap());

    let joined = orders.join_on(&customers, orders.column("customer_id").equals(customers.column("id")));
    let query = joined
        .select(orders.column("status").like("paid%"))
        .project_list(vec![customers.column("name"), orders.column("amount")]);

    assert_eq!(
        sql(Compiler::new().render(&query)),
        "SELECT customers.name, orders.amount FROM orders JOIN customers \
         ON orders.customer_id = customers.id WHERE orders.status LIKE 'paid%'"
    );
    assert_eq!(query.base_relations(), vec![orders, customers]);
}

#[test]
fn test_subquery_with_alias() {
    let data = data();
    let other = data.alias("other");
    let query = other.project_list(vec![other.column("i"), other.column("b")]);
    assert_eq!(sql(Compiler::new().render(&query)), "SELECT other.i, other.b FROM data AS other");
    assert_eq!(query.immediate_relations(), vec![other]);
    assert_eq!(query.base_relations(), vec![data]);
}

#[test]
fn test_immediate_and_base_relations_of_renamed_join() {
    let a = events();
    let b = contacts();
    let x = a.join(&b).alias("x");
    let projected = x.project();
    assert_eq!(projected.immediate_relations(), vec![x]);
    assert_eq!(projected.base_relations(), vec![a, b]);
}

#[test]
fn test_projection_roundtrips_attribute_names() {
    for relation in [events(), events().join(&contacts()), data().alias("d")] {
        let names = |r: &Relation| -> Vec<Option<String>> { r.attributes().into_iter().map(|a| a.name).collect() };
        assert_eq!(names(&relation.project()), names(&relation));
    }
}

#[test]
fn test_ambiguous_projection_reports_every_use() {
    let events = events();
    let projected = events.project_list(vec![events.column("id"), events.column("id")]);
    let refs = projected.attributes();
    assert!(refs
        .iter()
        .all(|r| r.index == AttributeIndex::Ambiguous && r.name.as_deref() == Some("id")));

    let result = Compiler::new().render(&projected.project_list(vec![projected.column("id")]));
    assert_eq!(
        result.errors(),
        &[CompilerError::Expression(ExpressionError::AmbiguousAttribute {
            name: "id".into(),
            relation: "(anonymous)".into(),
        })]
    );
}

#[test]
fn test_renamed_projection_owns_attributes() {
    let projected = events().project();
    let renamed = projected.alias("renamed");
    let names: Vec<Option<String>> = renamed.attributes().into_iter().map(|a| a.name).collect();
    assert_eq!(
        names,
        vec![Some("id".into()), Some("name".into()), Some("value".into())]
    );
    assert!(renamed.attributes().iter().all(|a| a.relation == renamed));
    assert_eq!(
        sql(Compiler::new().render(&renamed.project())),
        "SELECT renamed.id, renamed.name, renamed.value FROM SELECT events.id, events.name, events.value FROM events AS renamed"
    );
}

#[test]
fn test_join_of_aliased_tables() {
    let l = events().alias("l");
    let r = data().alias("r");
    let query = l
        .join_on(&r, l.column("id").equals(r.column("i")))
        .project_list(vec![l.column("name"), r.column("t")]);
    assert_eq!(
        sql(Compiler::new().render(&query)),
        "SELECT l.name, r.t FROM events AS l JOIN data AS r ON l.id = r.i"
    );
    assert_eq!(TypeInspector::new().infer(&r.column("t")), TEXT);
}

#[test]
fn test_join_types_render() {
    let events = events();
    let contacts = contacts();
    let on = events.column("id").equals(contacts.column("id"));
    let query = events
        .join_with(&contacts, JoinType::LeftOuter, Some(on))
        .project_list(vec![events.column("name"), contacts.column("city")]);
    assert_eq!(
        sql(Compiler::new().render(&query)),
        "SELECT events.name, contacts.city FROM events LEFT OUTER JOIN contacts ON events.id = contacts.id"
    );
}

#[test]
fn test_group_by_with_having() {
    let catalog = Catalog::from_yaml(CATALOG).unwrap();
    let orders = Relation::table(catalog.table("orders", None).unwrap());
    let grouped = orders.group_by(
        vec![orders.column("status").into()],
        vec![Expression::function("count", vec![orders.column("id")]).alias("orders")],
    );
    let query = grouped.select(grouped.column("orders").gt(10));
    assert_eq!(
        sql(Compiler::new().render(&query)),
        "SELECT orders.status, count(orders.id) AS orders FROM orders GROUP BY orders.status HAVING orders > 10"
    );
    assert_eq!(TypeInspector::new().infer(&grouped.column("status")), TEXT);
}

#[test]
fn test_configured_dialect_changes_rendering() {
    let dialect = DialectConfig::from_yaml(
        r#"
name: warehouse
binary_operators:
  concat: { symbol: "+" }
  pow:
    symbol: "**"
    precedence: 170
    associativity: right
    signatures: [ { arguments: [INTEGER, INTEGER], returns: INTEGER } ]
unary_operators:
  not: { symbol: "!" }
"#,
    )
    .unwrap()
    .build()
    .unwrap();
    let dialect = Arc::new(dialect);
    let compiler = Compiler::with_dialect(dialect.clone());
    let inspector = TypeInspector::with_dialect(dialect);

    let data = data();
    let expr = data.column("t").concat("!");
    assert_eq!(sql(compiler.render(&expr)), "data.t + '!'");
    assert_eq!(sql(Compiler::new().render(&expr)), "data.t || '!'");
    assert_eq!(sql(compiler.render(&!data.column("b"))), "! data.b");

    let pow = Expression::binary("mul", Expression::binary("pow", 2, 3), 4);
    assert_eq!(sql(compiler.render(&pow)), "2 ** 3 * 4");
    assert_eq!(inspector.infer(&pow), INTEGER);
    assert!(Compiler::new().render(&pow).is_failure());
}

#[test]
fn test_dialect_file_roundtrip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("dialect.yml");
    std::fs::write(&path, "name: shouty\nbinary_operators:\n  and: { symbol: \"&&\" }\n").unwrap();

    let dialect = DialectConfig::load(&path).unwrap().build().unwrap();
    let compiler = Compiler::with_dialect(Arc::new(dialect));
    let expr = Expression::from(true).and(false);
    assert_eq!(sql(compiler.render(&expr)), "true && false");
}

#[test]
fn test_errors_from_whole_tree() {
    let events = events();
    let query = events
        .select(events.column("missing").gt(Expression::parameter("limit")))
        .project_list(vec![Expression::binary("frobnicate", 1, 2), events.column("id")]);

    let result = Compiler::new().render(&query);
    assert_eq!(
        result.errors(),
        &[
            CompilerError::UnknownBinaryOperator("frobnicate".into()),
            CompilerError::Expression(ExpressionError::UnknownAttribute {
                name: "missing".into(),
                relation: "events".into(),
            }),
            CompilerError::UnsupportedParameter("limit".into()),
        ]
    );
    assert_eq!(query.errors().len(), 1);
}
