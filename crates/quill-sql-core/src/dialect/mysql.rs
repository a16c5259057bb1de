//! MySQL dialect.
//!
//! Adds user variables (`@name`) and system variables (`@@name`,
//! `@@session.name`) as operands and as table sources.

use super::Dialect;
use crate::ast::{Node, Variable};
use crate::error::ParseError;
use crate::grammar::{GrammarBuilder, Nonterminal, Production};
use crate::lexer::{Emit, Pattern, TokenKind, TokenRule, TokenSet};
use crate::parser::Parser;

/// MySQL SQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The variable token rules. `@@` outranks `@` so a system variable is
    /// never read as a user variable named `@name`.
    #[must_use]
    pub fn tokens() -> TokenSet {
        TokenSet::from_rules([
            TokenRule::new(
                "SYSTEM_VARIABLE",
                35,
                Pattern::Scan(scan_system_variable),
                Emit::With(emit_system_variable),
            ),
            TokenRule::new(
                "USER_VARIABLE",
                34,
                Pattern::Scan(scan_user_variable),
                Emit::With(emit_user_variable),
            ),
        ])
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn extend(&self, builder: GrammarBuilder) -> GrammarBuilder {
        builder
            .tokens(Self::tokens())
            .production(Production::new(
                Nonterminal::Expr,
                "variable",
                starts_variable,
                reduce_variable,
            ))
            .production(Production::new(
                Nonterminal::TableOrSubquery,
                "variable",
                starts_variable,
                reduce_variable,
            ))
    }
}

/// Length of a variable name: word characters and dots.
fn scan_name(input: &str) -> usize {
    input
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
        .map(char::len_utf8)
        .sum()
}

fn scan_system_variable(input: &str) -> Option<usize> {
    let name = scan_name(input.strip_prefix("@@")?);
    (name > 0).then_some(2 + name)
}

fn scan_user_variable(input: &str) -> Option<usize> {
    let name = scan_name(input.strip_prefix('@')?);
    (name > 0).then_some(1 + name)
}

fn emit_system_variable(text: &str) -> Option<TokenKind> {
    text.strip_prefix("@@")
        .map(|name| TokenKind::SystemVariable(name.to_owned()))
}

fn emit_user_variable(text: &str) -> Option<TokenKind> {
    text.strip_prefix('@')
        .map(|name| TokenKind::Variable(name.to_owned()))
}

const fn starts_variable(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Variable(_) | TokenKind::SystemVariable(_))
}

fn reduce_variable(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    match parser.current().kind.clone() {
        TokenKind::Variable(name) => {
            parser.advance();
            Ok(Node::new(Variable::user(name)))
        }
        TokenKind::SystemVariable(name) => {
            parser.advance();
            Ok(Node::new(Variable::system(name)))
        }
        _ => Err(parser.unexpected("variable")),
    }
}
