//! Token types for the SQL lexer.

use serde::Serialize;

use super::Span;

/// SQL keywords.
///
/// Multi-word keywords (`GROUP BY`, `LEFT JOIN`, ...) are single variants:
/// the lexer matches them as one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    // Query clauses
    Select,
    Distinct,
    All,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
    As,
    On,

    // Joins
    Join,
    InnerJoin,
    LeftJoin,
    RightJoin,
    FullJoin,
    CrossJoin,

    // Logical and predicate operators
    And,
    Or,
    Not,
    In,
    Is,
    Like,
    Between,

    // Literals
    Null,
    True,
    False,

    // Ordering
    Asc,
    Desc,
    NullsFirst,
    NullsLast,

    // Expressions
    Cast,
    Case,
    When,
    Then,
    Else,
    End,
}

impl Keyword {
    /// Looks up a single-word keyword (case-insensitive).
    ///
    /// Multi-word keywords are never returned here; they only exist as
    /// lexer rules.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "DISTINCT" => Some(Self::Distinct),
            "ALL" => Some(Self::All),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "HAVING" => Some(Self::Having),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "AS" => Some(Self::As),
            "ON" => Some(Self::On),
            "JOIN" => Some(Self::Join),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "IS" => Some(Self::Is),
            "LIKE" => Some(Self::Like),
            "BETWEEN" => Some(Self::Between),
            "NULL" => Some(Self::Null),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "CAST" => Some(Self::Cast),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            _ => None,
        }
    }

    /// Returns the canonical spelling of the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER BY",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::As => "AS",
            Self::On => "ON",
            Self::Join => "JOIN",
            Self::InnerJoin => "INNER JOIN",
            Self::LeftJoin => "LEFT JOIN",
            Self::RightJoin => "RIGHT JOIN",
            Self::FullJoin => "FULL JOIN",
            Self::CrossJoin => "CROSS JOIN",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Like => "LIKE",
            Self::Between => "BETWEEN",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::NullsFirst => "NULLS FIRST",
            Self::NullsLast => "NULLS LAST",
            Self::Cast => "CAST",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14 or 1e10)
    Float(f64),
    /// String literal, single- or double-quoted, quotes stripped.
    String(String),

    // Identifiers and keywords
    /// Possibly dotted identifier (e.g., `db.schema.table`).
    Identifier {
        /// The dotted name without quote characters.
        value: String,
        /// The quote character if any part was quoted.
        quote: Option<char>,
    },
    /// SQL keyword
    Keyword(Keyword),
    /// User variable (`@name`), sigil stripped.
    Variable(String),
    /// System variable (`@@name`), sigils stripped.
    SystemVariable(String),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// ?
    Question,

    /// End of input
    Eof,
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
