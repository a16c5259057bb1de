//! Tests for hand-built AST nodes: construction checks, rendering and the
//! debug tree.

mod common;
use common::*;

use quill_sql_core::ast::{
    BetweenOperation, BinaryOperation, Direction, Join, JoinType, Operation, OrderBy, Select,
    UnaryOperation,
};
use quill_sql_core::{Node, ParseError, StructuralError};

#[test]
fn binary_operation_arity() {
    assert!(matches!(
        BinaryOperation::new("+", vec![ident("a")]),
        Err(StructuralError::Arity { found: 1, .. })
    ));
    assert!(matches!(
        BinaryOperation::new("+", vec![ident("a"), ident("b"), ident("c")]),
        Err(StructuralError::Arity { found: 3, .. })
    ));
}

#[test]
fn unary_operation_arity() {
    assert!(matches!(
        UnaryOperation::new("-", vec![ident("a"), ident("b")]),
        Err(StructuralError::Arity { found: 2, .. })
    ));
}

#[test]
fn between_and_operation_arity() {
    assert!(BetweenOperation::new(vec![ident("a")]).is_err());
    assert!(Operation::new("f", vec![]).is_err());
    assert_eq!(
        Operation::new("f", vec![ident("a")]).unwrap().to_sql(),
        "f(a)"
    );
}

#[test]
fn generic_operation_joins_arguments_without_spaces() {
    let op = Operation::new("coalesce", vec![ident("a"), ident("b"), Node::constant(0)]).unwrap();
    assert_eq!(Node::new(op).to_string(), "coalesce(a,b,0)");
}

#[test]
fn structural_errors_convert_to_parse_errors() {
    let err: ParseError = BinaryOperation::new("+", vec![]).unwrap_err().into();
    assert!(matches!(err, ParseError::Structural(_)));
    assert_eq!(err.to_string(), "BinaryOperation takes exactly 2 argument(s), got 0");
}

#[test]
fn select_needs_targets() {
    assert_eq!(Select::new(vec![]).unwrap_err(), StructuralError::EmptyTargets);
}

#[test]
fn hand_built_select_renders() {
    let select = Select::new(vec![ident("a"), Node::function("count", vec![ident("*")])])
        .unwrap()
        .with_from(Node::new(
            Join::new(JoinType::Inner, ident("t"), ident("u").with_alias("x"))
                .with_condition(Node::binary("=", ident("t.id"), ident("x.id"))),
        ))
        .with_order_by(vec![Node::new(
            OrderBy::new(ident("a")).with_direction(Direction::Asc),
        )])
        .unwrap();
    let node = Node::new(select);
    assert_eq!(
        node.to_string(),
        "SELECT a, count(*) FROM t INNER JOIN u AS x ON t.id = x.id ORDER BY a ASC"
    );
    assert_eq!(parse(&node.to_string()), node);
}

#[test]
fn printer_does_not_add_parentheses() {
    // Without the flag the rendering re-parses to a different shape
    let node = Node::binary("*", Node::binary("+", ident("a"), ident("b")), ident("c"));
    assert_eq!(node.to_string(), "a + b * c");
    assert_ne!(parse_expr(&node.to_string()), node);

    let flagged = Node::binary(
        "*",
        Node::binary("+", ident("a"), ident("b")).with_parentheses(true),
        ident("c"),
    );
    assert_eq!(parse_expr(&flagged.to_string()), flagged);
}

#[test]
fn debug_tree_of_parsed_query() {
    let tree = parse("SELECT a AS x FROM t WHERE b IS NULL").to_tree();
    assert_eq!(
        tree,
        "Select\n\
         \x20 targets:\n\
         \x20   Identifier value=\"a\" alias=\"x\"\n\
         \x20 from_table:\n\
         \x20   Identifier value=\"t\"\n\
         \x20 where:\n\
         \x20   BinaryOperation op=\"is\"\n\
         \x20     Identifier value=\"b\"\n\
         \x20     NullConstant\n"
    );
}

#[test]
fn debug_tree_shows_parentheses() {
    let tree = parse_expr("(a + b) * c").to_tree();
    assert!(tree.contains("BinaryOperation op=\"+\" parentheses=true"));
}
