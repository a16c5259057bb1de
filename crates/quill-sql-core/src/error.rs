//! Error types.
//!
//! Every failure of [`crate::parse`] is a [`ParseError`]; its three variants
//! say which stage rejected the input. No partial AST is ever returned.

use thiserror::Error;

use crate::lexer::{Span, TokenKind};

/// The input contains text no token rule recognises.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input `{fragment}` at position {span}")]
pub struct LexicalError {
    /// The offending text.
    pub fragment: String,
    /// Where it starts and ends.
    pub span: Span,
}

impl LexicalError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(fragment: impl Into<String>, span: Span) -> Self {
        Self {
            fragment: fragment.into(),
            span,
        }
    }
}

/// The token sequence does not match any grammar production.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at position {span}")]
pub struct SyntaxError {
    /// The error message.
    pub message: String,
    /// What the grammar would have accepted here.
    pub expected: Option<String>,
    /// The token that was found instead.
    pub found: Option<TokenKind>,
    /// Location of the offending token.
    pub span: Span,
}

impl SyntaxError {
    /// Creates a syntax error with a free-form message.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            expected: None,
            found: None,
            span,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        let message = if found == TokenKind::Eof {
            format!("Unexpected end of input: expected {expected}")
        } else {
            format!("Unexpected token: expected {expected}, found {found:?}")
        };
        Self {
            message,
            expected: Some(expected),
            found: Some(found),
            span,
        }
    }
}

/// A node was built with the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Wrong number of operands for the node kind.
    #[error("{node} takes {expected} argument(s), got {found}")]
    Arity {
        /// Node kind being built.
        node: &'static str,
        /// Human readable arity, e.g. "exactly 2".
        expected: &'static str,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A SELECT without any target.
    #[error("Select requires at least one target")]
    EmptyTargets,

    /// A node other than `OrderBy` in an ORDER BY list.
    #[error("ORDER BY list entries must be OrderBy nodes, got {0}")]
    NotAnOrderBy(&'static str),
}

impl StructuralError {
    pub(crate) const fn arity(node: &'static str, expected: &'static str, found: usize) -> Self {
        Self::Arity {
            node,
            expected,
            found,
        }
    }
}

/// Any failure of a parse call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Raised by the lexer.
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    /// Raised by the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Raised while building AST nodes.
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl ParseError {
    /// Returns the source location, when the error has one.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Lexical(e) => Some(e.span),
            Self::Syntax(e) => Some(e.span),
            Self::Structural(_) => None,
        }
    }
}

/// A dialect name that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dialect `{0}` (expected one of: generic, mysql)")]
pub struct UnknownDialect(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_display() {
        let err = LexicalError::new("@x", Span::new(7, 9));
        assert_eq!(err.to_string(), "unrecognized input `@x` at position 7..9");
    }

    #[test]
    fn test_unexpected_eof_message() {
        let err = SyntaxError::unexpected("expression", TokenKind::Eof, Span::new(6, 6));
        assert_eq!(
            err.to_string(),
            "Unexpected end of input: expected expression at position 6..6"
        );
        assert_eq!(err.found, Some(TokenKind::Eof));
    }

    #[test]
    fn test_arity_display() {
        let err = StructuralError::arity("BinaryOperation", "exactly 2", 1);
        assert_eq!(
            err.to_string(),
            "BinaryOperation takes exactly 2 argument(s), got 1"
        );
    }

    #[test]
    fn test_parse_error_from() {
        let err: ParseError = StructuralError::EmptyTargets.into();
        assert!(matches!(err, ParseError::Structural(_)));
        assert_eq!(err.span(), None);
    }
}
