//! Token classification for Pratt expression parsing.
//!
//! Binding powers live in the grammar's precedence table; this module only
//! maps tokens to operator classes.

use crate::grammar::OpClass;
use crate::lexer::{Keyword, TokenKind};

/// Returns the infix operator class starting at `kind`.
///
/// `next` is the token after `kind`; it is needed because `NOT IN`,
/// `NOT LIKE` and `NOT BETWEEN` arrive as two tokens. Returns `None` if the
/// token is not an infix operator.
#[must_use]
pub const fn infix_class(kind: &TokenKind, next: &TokenKind) -> Option<OpClass> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some(OpClass::Or),
        TokenKind::Keyword(Keyword::And) => Some(OpClass::And),
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => Some(OpClass::Comparison),
        TokenKind::Keyword(Keyword::Is) => Some(OpClass::Is),
        TokenKind::Keyword(Keyword::In) => Some(OpClass::In),
        TokenKind::Keyword(Keyword::Like) => Some(OpClass::Like),
        TokenKind::Keyword(Keyword::Between) => Some(OpClass::Between),
        TokenKind::Keyword(Keyword::Not) => match next {
            TokenKind::Keyword(Keyword::In) => Some(OpClass::In),
            TokenKind::Keyword(Keyword::Like) => Some(OpClass::Like),
            TokenKind::Keyword(Keyword::Between) => Some(OpClass::Between),
            _ => None,
        },
        // String concat has the same precedence as addition
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some(OpClass::Additive),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(OpClass::Multiplicative),
        _ => None,
    }
}

/// Returns the prefix operator class of a token.
#[must_use]
pub const fn prefix_class(kind: &TokenKind) -> Option<OpClass> {
    match kind {
        TokenKind::Minus => Some(OpClass::Negate),
        TokenKind::Keyword(Keyword::Not) => Some(OpClass::Not),
        _ => None,
    }
}
