//! SQL Lexer/Tokenizer
//!
//! The lexer is driven by a [`TokenSet`]: an ordered, priority-sorted list
//! of rules. Dialects extend the base set by union instead of subclassing
//! the lexer.

mod rules;
mod span;
mod token;
mod tokenizer;

pub use rules::{Emit, EmitFn, Pattern, ScanFn, TokenRule, TokenSet};
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
