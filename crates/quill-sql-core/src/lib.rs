//! # quill-sql-core
//!
//! A multi-dialect SQL parser with a round-trippable AST.
//!
//! This crate provides:
//! - A data-driven lexer whose token rules are merged per dialect
//! - A parser driven by a grammar artifact (tokens, productions and a
//!   precedence table) with Pratt expression parsing
//! - An AST that renders back to SQL which parses to an equal tree
//!
//! ## Parsing
//!
//! ```rust
//! use quill_sql_core::{parse, DialectKind};
//!
//! let ast = parse("SELECT a + b * c FROM t", DialectKind::Generic).unwrap();
//! assert_eq!(ast.to_string(), "SELECT a + b * c FROM t");
//!
//! // Re-parsing the rendered SQL yields the same tree
//! let again = parse(&ast.to_string(), DialectKind::Generic).unwrap();
//! assert_eq!(again.to_tree(), ast.to_tree());
//! ```
//!
//! ## Dialects
//!
//! Dialects only add to the base grammar. MySQL variables are rejected by
//! the generic dialect:
//!
//! ```rust
//! use quill_sql_core::{parse, DialectKind};
//!
//! assert!(parse("SELECT @@version", DialectKind::Generic).is_err());
//! assert!(parse("SELECT @@version", DialectKind::Mysql).is_ok());
//! ```

pub mod ast;
pub mod dialect;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;

pub use ast::{Node, NodeKind};
pub use dialect::{Dialect, DialectKind, GenericDialect, MySqlDialect};
pub use error::{LexicalError, ParseError, StructuralError, SyntaxError, UnknownDialect};
pub use grammar::Grammar;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

/// Parses one SQL statement under the given dialect.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text cannot be tokenized, does not match
/// the grammar, or builds a malformed node. No partial AST is returned.
pub fn parse(sql: &str, dialect: DialectKind) -> Result<Node, ParseError> {
    tracing::debug!(%dialect, len = sql.len(), "parsing query");
    parse_with(sql, dialect.grammar())
}

/// Parses one SQL statement with an explicit grammar.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with(sql: &str, grammar: &Grammar) -> Result<Node, ParseError> {
    let mut parser = Parser::new(sql, grammar)?;
    let node = parser.parse_statement()?;
    tracing::debug!(
        grammar = grammar.name(),
        tokens = parser.token_count(),
        kind = node.kind_name(),
        "parsed query"
    );
    Ok(node)
}
