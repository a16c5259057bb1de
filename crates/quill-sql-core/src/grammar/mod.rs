//! Grammar artifacts.
//!
//! A [`Grammar`] is a single value holding everything the parser needs for
//! one dialect: the token set, the production table and the precedence
//! table. Dialects derive their grammar from the base one through a
//! [`GrammarBuilder`], which can only add tokens and append productions.

mod base;
mod precedence;

pub use precedence::{Assoc, Level, OpClass, PrecedenceTable};

use crate::ast::Node;
use crate::error::ParseError;
use crate::lexer::{TokenKind, TokenSet};
use crate::parser::Parser;

/// Grammar symbols that dialects may extend with alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    /// An operand of the expression grammar (an atom).
    Expr,
    /// A table source in FROM or JOIN.
    TableOrSubquery,
}

/// Decides whether a production applies, from the current token.
pub type StartsFn = fn(&TokenKind) -> bool;

/// Consumes the production's tokens and builds its node.
pub type ReduceFn = fn(&mut Parser<'_>) -> Result<Node, ParseError>;

/// One alternative of a nonterminal.
#[derive(Debug, Clone, Copy)]
pub struct Production {
    /// The nonterminal this production derives.
    pub nonterminal: Nonterminal,
    /// Rule name, for debugging.
    pub name: &'static str,
    /// First-token predicate.
    pub starts: StartsFn,
    /// Reduction.
    pub reduce: ReduceFn,
}

impl Production {
    /// Creates a production.
    #[must_use]
    pub const fn new(
        nonterminal: Nonterminal,
        name: &'static str,
        starts: StartsFn,
        reduce: ReduceFn,
    ) -> Self {
        Self {
            nonterminal,
            name,
            starts,
            reduce,
        }
    }
}

/// The grammar of one dialect.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: &'static str,
    tokens: TokenSet,
    productions: Vec<Production>,
    precedence: PrecedenceTable,
}

impl Grammar {
    /// Starts a grammar from the base artifact.
    #[must_use]
    pub fn builder(name: &'static str) -> GrammarBuilder {
        GrammarBuilder {
            name,
            tokens: TokenSet::base(),
            productions: base::productions(),
            precedence: PrecedenceTable::base(),
        }
    }

    /// The base grammar with no dialect extension.
    #[must_use]
    pub fn base() -> Self {
        Self::builder("base").build()
    }

    /// The grammar's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The token set the lexer runs with.
    #[must_use]
    pub const fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// All productions, base ones first.
    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// The alternatives of `nonterminal`, in the order they are tried.
    pub fn alternatives(&self, nonterminal: Nonterminal) -> impl Iterator<Item = &Production> {
        self.productions
            .iter()
            .filter(move |p| p.nonterminal == nonterminal)
    }

    /// The precedence table.
    #[must_use]
    pub const fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }
}

/// Builds a [`Grammar`] on top of the base artifact.
///
/// The builder owns its copy of the base tables, so building a dialect
/// never changes another dialect's grammar.
#[derive(Debug, Clone)]
#[must_use]
pub struct GrammarBuilder {
    name: &'static str,
    tokens: TokenSet,
    productions: Vec<Production>,
    precedence: PrecedenceTable,
}

impl GrammarBuilder {
    /// Unions `tokens` onto the token set.
    pub fn tokens(mut self, tokens: TokenSet) -> Self {
        self.tokens = self.tokens.union(tokens);
        self
    }

    /// Appends a production. It is tried after every production already
    /// registered for the same nonterminal.
    pub fn production(mut self, production: Production) -> Self {
        self.productions.push(production);
        self
    }

    /// Finishes the grammar.
    #[must_use]
    pub fn build(self) -> Grammar {
        Grammar {
            name: self.name,
            tokens: self.tokens,
            productions: self.productions,
            precedence: self.precedence,
        }
    }
}
