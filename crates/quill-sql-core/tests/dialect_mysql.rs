//! Tests for the MySQL dialect extension and dialect isolation.

mod common;
use common::*;

use quill_sql_core::ast::Variable;
use quill_sql_core::{DialectKind, Node, NodeKind, ParseError};

fn parse_mysql_select(sql: &str) -> quill_sql_core::ast::Select {
    match parse_as(sql, DialectKind::Mysql).into_kind() {
        NodeKind::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

#[test]
fn user_variable_is_rejected_by_generic() {
    let err = parse_err("SELECT @version");
    assert!(matches!(err, ParseError::Lexical(_) | ParseError::Syntax(_)));
}

#[test]
fn system_variable_is_rejected_by_generic() {
    match parse_err("SELECT @@version") {
        ParseError::Lexical(e) => assert_eq!(e.fragment, "@@version"),
        other => panic!("Expected LexicalError, got {other:?}"),
    }
}

#[test]
fn user_variable() {
    let s = parse_mysql_select("SELECT @version");
    assert_eq!(s.targets(), &[Node::new(Variable::user("version"))]);
    assert_eq!(s.targets()[0].to_string(), "@version");
}

#[test]
fn system_variable() {
    let s = parse_mysql_select("SELECT @@session.auto_increment_increment AS inc");
    let target = &s.targets()[0];
    let NodeKind::Variable(var) = target.kind() else {
        panic!("Expected Variable, got {target:?}");
    };
    assert!(var.is_system_var());
    assert_eq!(var.value(), "session.auto_increment_increment");
    assert_eq!(target.alias(), Some("inc"));
}

#[test]
fn variables_in_expressions() {
    let s = parse_mysql_select("SELECT a FROM t WHERE a = @x + 1");
    assert_eq!(
        s.where_clause(),
        Some(&Node::binary(
            "=",
            ident("a"),
            Node::binary("+", Node::new(Variable::user("x")), Node::constant(1)),
        ))
    );
}

#[test]
fn variable_as_table_source() {
    let s = parse_mysql_select("SELECT * FROM @tbl AS t");
    assert_eq!(
        s.from_table(),
        Some(&Node::new(Variable::user("tbl")).with_alias("t"))
    );
}

#[test]
fn mysql_keeps_the_base_grammar() {
    for sql in [
        "SELECT a + b * c FROM t WHERE x IS NOT NULL",
        "SELECT * FROM a LEFT JOIN b ON a.id = b.id ORDER BY a.id DESC LIMIT 1",
        "SELECT @@version, @v, database()",
    ] {
        round_trip_as(sql, DialectKind::Mysql);
    }
}

#[test]
fn generic_parse_is_unaffected_by_mysql() {
    let _ = parse_as("SELECT @a", DialectKind::Mysql);
    assert!(quill_sql_core::parse("SELECT @a", DialectKind::Generic).is_err());
}
