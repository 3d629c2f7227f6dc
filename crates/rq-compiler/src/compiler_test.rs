use super::*;
use rq_core::test_utils::{contacts, data, events};

fn render(expr: Expression) -> String {
    Compiler::new()
        .render_expression(&expr)
        .string_value()
        .map(str::to_string)
        .unwrap_or_else(|| panic!("failed to render {expr:?}"))
}

fn render_relation(relation: &Relation) -> String {
    Compiler::new()
        .render_relation(relation)
        .into_result()
        .unwrap()
}

#[test]
fn test_literals() {
    assert_eq!(render(Expression::Null), "NULL");
    assert_eq!(render(Expression::from(-42)), "-42");
    assert_eq!(render(Expression::from("qu'ote")), "'qu''ote'");
    assert_eq!(render(Expression::from(true)), "true");
    assert_eq!(render(Expression::from(false)), "false");
}

#[test]
fn test_precedence_parenthesizes_left_operand() {
    let ten = || Expression::from(10);
    assert_eq!(render(ten() * 20 + 30), "10 * 20 + 30");
    assert_eq!(render((ten() + 20) * 30), "(10 + 20) * 30");
    assert_eq!(render(ten() + 20 + 30), "10 + 20 + 30");
    assert_eq!(render(ten().equals(1).and(Expression::from(true))), "10 = 1 AND true");
    assert_eq!(render(ten().or(false).equals(true)), "(10 OR false) = true");
    // equal precedence keeps the left operand bare
    assert_eq!(render(ten().or(false).and(true)), "10 OR false AND true");
}

#[test]
fn test_right_operand_is_never_parenthesized() {
    let expr = Expression::binary("mul", 10, Expression::from(20) + 30);
    assert_eq!(render(expr), "10 * 20 + 30");
}

#[test]
fn test_unary_and_functions() {
    assert_eq!(render(-Expression::from(1)), "- 1");
    assert_eq!(render(!Expression::from(true)), "NOT true");
    assert_eq!(
        render(Expression::function("coalesce", vec![Expression::Null, 1.into(), "x".into()])),
        "coalesce(NULL, 1, 'x')"
    );
    assert_eq!(render(Expression::function("now", vec![])), "now()");
    assert_eq!(render(Expression::from(1).alias("one")), "1 AS one");
}

#[test]
fn test_unknown_operators() {
    let result = Compiler::new().render(&Expression::binary("frobnicate", 1, 2));
    assert_eq!(
        result.errors(),
        &[CompilerError::UnknownBinaryOperator("frobnicate".into())]
    );

    let result = Compiler::new().render(&Expression::unary("frobnicate", 1));
    assert_eq!(
        result.errors(),
        &[CompilerError::UnknownUnaryOperator("frobnicate".into())]
    );
}

#[test]
fn test_operand_errors_are_kept() {
    let expr = Expression::binary(
        "frobnicate",
        Expression::binary("nope", 1, 2),
        Expression::parameter("p"),
    );
    let result = Compiler::new().render(&expr);
    assert_eq!(
        result.errors(),
        &[
            CompilerError::UnknownBinaryOperator("frobnicate".into()),
            CompilerError::UnknownBinaryOperator("nope".into()),
            CompilerError::UnsupportedParameter("p".into()),
        ]
    );
}

#[test]
fn test_function_gathers_argument_errors() {
    let events = events();
    let expr = Expression::function(
        "f",
        vec![events.column("a"), events.column("id"), events.column("b")],
    );
    let errors = Compiler::new().render(&expr).errors().to_vec();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, CompilerError::Expression(ExpressionError::UnknownAttribute { .. }))));
}

#[test]
fn test_attributes_are_qualified_by_owner() {
    let data = data();
    assert_eq!(render(data.column("i")), "data.i");
    assert_eq!(render(data.alias("other").column("i")), "other.i");
    // projections have no name to qualify with
    assert_eq!(render(data.project().column("i")), "i");
}

#[test]
fn test_tables_and_renames() {
    assert_eq!(render_relation(&events()), "events");
    assert_eq!(render_relation(&events().alias("e")), "events AS e");
}

#[test]
fn test_projection() {
    let data = data();
    assert_eq!(
        render_relation(&data.project_list(vec![data.column("i"), data.column("b")])),
        "SELECT data.i, data.b FROM data"
    );
    assert_eq!(render_relation(&data.project()), "SELECT data.i, data.t, data.b FROM data");
    assert_eq!(
        render_relation(&Relation::none().project_list(vec![Expression::from(1) + 2])),
        "SELECT 1 + 2"
    );
}

#[test]
fn test_selection() {
    let events = events();
    let filtered = events.project().select(events.column("value").gt(10));
    assert_eq!(
        render_relation(&filtered),
        "SELECT events.id, events.name, events.value FROM events WHERE events.value > 10"
    );
}

#[test]
fn test_joins() {
    let events = events();
    let contacts = contacts();
    assert_eq!(render_relation(&events.join(&contacts)), "events JOIN contacts");
    let on = events.column("id").equals(contacts.column("id"));
    assert_eq!(
        render_relation(&events.join_with(&contacts, JoinType::LeftOuter, Some(on.clone()))),
        "events LEFT OUTER JOIN contacts ON events.id = contacts.id"
    );
    assert_eq!(
        render_relation(&events.join_with(&contacts, JoinType::RightOuter, None)),
        "events RIGHT OUTER JOIN contacts"
    );
    assert_eq!(
        render_relation(&events.join_with(&contacts, JoinType::FullOuter, Some(on))),
        "events FULL OUTER JOIN contacts ON events.id = contacts.id"
    );
}

#[test]
fn test_group_by_and_having() {
    let data = data();
    let count = Expression::function("count", vec![data.column("i")]).alias("n");
    let grouped = data.group_by(vec![data.column("t").alias("k").into()], vec![count]);
    assert_eq!(
        render_relation(&grouped),
        "SELECT data.t AS k, count(data.i) AS n FROM data GROUP BY data.t"
    );

    let having = grouped.select(grouped.column("n").gt(1));
    assert_eq!(
        render_relation(&having),
        "SELECT data.t AS k, count(data.i) AS n FROM data GROUP BY data.t HAVING n > 1"
    );

    let bounded = having.select(grouped.column("n").lt(10));
    assert_eq!(
        render_relation(&bounded),
        "SELECT data.t AS k, count(data.i) AS n FROM data GROUP BY data.t HAVING n > 1 AND n < 10"
    );
}

#[test]
fn test_stacked_selections_share_where() {
    let events = events();
    let either = events.column("id").equals(1).or(events.column("id").equals(2));
    let filtered = events.select(events.column("value").gt(10)).select(either.clone());
    assert_eq!(
        render_relation(&filtered),
        "events WHERE events.value > 10 AND (events.id = 1 OR events.id = 2)"
    );
    assert_eq!(
        render_relation(&events.select(either)),
        "events WHERE events.id = 1 OR events.id = 2"
    );
}

#[test]
fn test_grouping_element_forms() {
    let data = data();
    let (i, t, b) = (data.column("i"), data.column("t"), data.column("b"));
    let grouped = data.group_by(
        vec![
            GroupingElement::GroupingSets(vec![vec![i.clone(), t.clone()], vec![b.clone()]]),
            GroupingElement::Cube(vec![i.clone(), t.clone()]),
            GroupingElement::Rollup(vec![b]),
        ],
        vec![],
    );
    assert_eq!(
        render_relation(&grouped),
        "SELECT data.i, data.t, data.b FROM data GROUP BY GROUPING SETS ((data.i, data.t), (data.b)), \
         CUBE (data.i, data.t), ROLLUP (data.b)"
    );
}

#[test]
fn test_error_relation() {
    let error = ExpressionError::AmbiguousAttribute {
        name: "id".into(),
        relation: "events".into(),
    };
    let result = Compiler::new().render(&Relation::error(&events(), error.clone()));
    assert_eq!(result.errors(), &[CompilerError::Expression(error)]);
}

#[test]
fn test_ambiguous_reference_fails() {
    let events = events();
    let projected = events.project_list(vec![events.column("id"), events.column("id")]);
    let result = Compiler::new().render(&projected.project());
    assert_eq!(result.errors().len(), 2);
    assert!(result.errors().iter().all(|e| matches!(
        e,
        CompilerError::Expression(ExpressionError::AmbiguousAttribute { name, .. }) if name == "id"
    )));
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_across_threads() {
    assert_send_sync::<Expression>();
    assert_send_sync::<Relation>();
    assert_send_sync::<Compiler>();
    assert_send_sync::<crate::TypeInspector>();
    assert_send_sync::<rq_core::ConfiguredDialect>();
    assert_send_sync::<CompileResult>();

    let events = events();
    let query = events
        .select(events.column("value").gt(10))
        .project_list(vec![events.column("name")]);
    let compiler = Compiler::new();
    let rendered: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| scope.spawn(|| render_relation_with(&compiler, &query)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(
        rendered,
        vec!["SELECT events.name FROM events WHERE events.value > 10"; 2]
    );
}

fn render_relation_with(compiler: &Compiler, relation: &Relation) -> String {
    compiler.render_relation(relation).into_result().unwrap()
}
