//! Tests for parser error cases.

mod common;
use common::*;

use quill_sql_core::lexer::{Keyword, Span, TokenKind};
use quill_sql_core::ParseError;

fn syntax(sql: &str) -> quill_sql_core::SyntaxError {
    match parse_err(sql) {
        ParseError::Syntax(e) => e,
        other => panic!("Expected SyntaxError for {sql}, got {other:?}"),
    }
}

#[test]
fn error_empty_input() {
    let e = syntax("");
    assert_eq!(e.found, Some(TokenKind::Eof));
    assert_eq!(e.expected.as_deref(), Some("SELECT"));
}

#[test]
fn error_incomplete_select() {
    let e = syntax("SELECT");
    assert_eq!(e.expected.as_deref(), Some("expression"));
    assert!(e.message.starts_with("Unexpected end of input"));
}

#[test]
fn error_missing_from_table() {
    let e = syntax("SELECT * FROM");
    assert_eq!(e.expected.as_deref(), Some("table name or subquery"));
}

#[test]
fn error_unexpected_keyword() {
    let e = syntax("TRUNCATE users");
    assert_eq!(e.span, Span::new(0, 8));
}

#[test]
fn error_unclosed_paren() {
    let _ = syntax("SELECT (1 + 2");
}

#[test]
fn error_between_without_and() {
    let e = syntax("SELECT a BETWEEN 1 OR 2");
    assert_eq!(e.expected.as_deref(), Some("AND"));
    assert_eq!(e.found, Some(TokenKind::Keyword(Keyword::Or)));
}

#[test]
fn error_case_without_when() {
    let e = syntax("SELECT CASE ELSE 1 END");
    assert_eq!(e.expected.as_deref(), Some("WHEN"));
}

#[test]
fn error_alias_after_as_must_be_identifier() {
    let e = syntax("SELECT a AS 1");
    assert_eq!(e.expected.as_deref(), Some("identifier"));
    assert_eq!(e.found, Some(TokenKind::Integer(1)));
}

#[test]
fn error_trailing_tokens() {
    let e = syntax("SELECT a FROM t WHERE");
    assert_eq!(e.found, Some(TokenKind::Eof));
    let e = syntax("SELECT 1; SELECT 2");
    assert_eq!(e.expected.as_deref(), Some("end of input"));
}

#[test]
fn error_dangling_operator() {
    let e = syntax("SELECT 1 +");
    assert_eq!(e.expected.as_deref(), Some("expression"));
}

#[test]
fn error_unrecognized_character() {
    match parse_err("SELECT a # b") {
        ParseError::Lexical(e) => {
            assert_eq!(e.fragment, "#");
            assert_eq!(e.span, Span::new(9, 10));
        }
        other => panic!("Expected LexicalError, got {other:?}"),
    }
}

#[test]
fn error_unterminated_string() {
    assert!(matches!(parse_err("SELECT 'abc"), ParseError::Lexical(_)));
}

#[test]
fn error_messages_carry_position() {
    let e = parse_err("SELECT a FROM");
    assert_eq!(e.span(), Some(Span::new(13, 13)));
    assert_eq!(
        e.to_string(),
        "Unexpected end of input: expected table name or subquery at position 13..13"
    );
}
