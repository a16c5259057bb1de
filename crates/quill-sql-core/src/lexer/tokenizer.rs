//! SQL Tokenizer implementation.

use super::{Span, Token, TokenKind, TokenSet};
use crate::error::LexicalError;

/// A lexer that tokenizes SQL input against a [`TokenSet`].
///
/// A lexer is single-use: create a fresh one for every query.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The rules, highest priority first.
    rules: &'a TokenSet,
    /// The current byte position.
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str, rules: &'a TokenSet) -> Self {
        Self {
            input,
            rules,
            pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            // Single-line comments (-- ...)
            if trimmed.starts_with("--") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
                continue;
            }

            // Multi-line comments (/* ... */); unterminated ones run to the end
            if let Some(body) = trimmed.strip_prefix("/*") {
                self.pos += 2 + body.find("*/").map_or(body.len(), |end| end + 2);
                continue;
            }

            break;
        }
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexicalError`] when no rule matches at the current
    /// position, or when a rule rejects the text it matched.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        let rest = self.rest();

        if rest.is_empty() {
            return Ok(Token::new(TokenKind::Eof, Span::new(start, start)));
        }

        for rule in self.rules.rules() {
            let Some((len, kind)) = rule.try_match(rest) else {
                continue;
            };
            let span = Span::new(start, start + len);
            let Some(kind) = kind else {
                return Err(LexicalError::new(span.text(self.input), span));
            };
            self.pos = span.end;
            return Ok(Token::new(kind, span));
        }

        let fragment = rest.split_whitespace().next().unwrap_or(rest);
        Err(LexicalError::new(
            fragment,
            Span::new(start, start + fragment.len()),
        ))
    }

    /// Tokenizes the entire input. The last token is always [`TokenKind::Eof`].
    ///
    /// # Errors
    ///
    /// Returns the first [`LexicalError`] encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
