#![allow(dead_code)]

use quill_sql_core::ast::Select;
use quill_sql_core::{DialectKind, Node, NodeKind, ParseError};

pub fn parse(sql: &str) -> Node {
    parse_as(sql, DialectKind::Generic)
}

pub fn parse_as(sql: &str, dialect: DialectKind) -> Node {
    quill_sql_core::parse(sql, dialect)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_err_as(sql, DialectKind::Generic)
}

pub fn parse_err_as(sql: &str, dialect: DialectKind) -> ParseError {
    quill_sql_core::parse(sql, dialect).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> Select {
    match parse(sql).into_kind() {
        NodeKind::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// The single target of `SELECT <expr>`.
pub fn parse_expr(expr: &str) -> Node {
    let select = parse_select(&format!("SELECT {expr}"));
    assert_eq!(select.targets().len(), 1, "Expected one target in: {expr}");
    select.targets()[0].clone()
}

pub fn ident(name: &str) -> Node {
    Node::identifier(name)
}

/// Verifies the round-trip law: rendering then re-parsing yields the same
/// debug tree, and rendering is a fixed point.
pub fn round_trip(sql: &str) {
    round_trip_as(sql, DialectKind::Generic);
}

pub fn round_trip_as(sql: &str, dialect: DialectKind) {
    let ast1 = parse_as(sql, dialect);
    let rendered1 = ast1.to_string();
    let ast2 = parse_as(&rendered1, dialect);
    let rendered2 = ast2.to_string();
    assert_eq!(
        ast1.to_tree(),
        ast2.to_tree(),
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
