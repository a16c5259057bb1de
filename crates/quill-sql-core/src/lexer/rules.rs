//! Token rules: the lexer's half of a grammar artifact.
//!
//! A [`TokenSet`] is plain data. Dialects never touch the base set; they
//! build their own rules and [`TokenSet::union`] them onto a copy.

use super::{Keyword, TokenKind};

/// Hand-written scanner: returns the byte length of the match at the
/// start of the input, if any.
pub type ScanFn = fn(&str) -> Option<usize>;

/// Converts matched text to a token kind. `None` rejects the text.
pub type EmitFn = fn(&str) -> Option<TokenKind>;

/// How a rule recognises its text.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Whitespace-separated words, matched case-insensitively and ending
    /// on a word boundary (`GROUP BY`, `LEFT OUTER JOIN`).
    Words(&'static [&'static str]),
    /// Exact punctuation (`<=`, `(`).
    Literal(&'static str),
    /// Anything else.
    Scan(ScanFn),
}

impl Pattern {
    /// Returns the length of the match at the start of `input`.
    #[must_use]
    pub fn match_len(&self, input: &str) -> Option<usize> {
        match self {
            Self::Words(words) => match_words(input, words),
            Self::Literal(lit) => input.starts_with(lit).then_some(lit.len()),
            Self::Scan(scan) => scan(input).filter(|len| *len > 0),
        }
    }
}

/// What a rule produces once its pattern matched.
#[derive(Debug, Clone)]
pub enum Emit {
    /// Always the same token.
    Fixed(TokenKind),
    /// Computed from the matched text.
    With(EmitFn),
}

impl Emit {
    fn apply(&self, text: &str) -> Option<TokenKind> {
        match self {
            Self::Fixed(kind) => Some(kind.clone()),
            Self::With(emit) => emit(text),
        }
    }
}

/// A single lexer rule.
#[derive(Debug, Clone)]
pub struct TokenRule {
    /// Rule name, unique within a set.
    pub name: &'static str,
    /// Higher priorities are tried first.
    pub priority: u8,
    /// The recogniser.
    pub pattern: Pattern,
    /// The token constructor.
    pub emit: Emit,
}

impl TokenRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(name: &'static str, priority: u8, pattern: Pattern, emit: Emit) -> Self {
        Self {
            name,
            priority,
            pattern,
            emit,
        }
    }

    /// Creates a keyword rule matching `words`.
    #[must_use]
    pub const fn keyword(
        name: &'static str,
        priority: u8,
        words: &'static [&'static str],
        kw: Keyword,
    ) -> Self {
        Self::new(
            name,
            priority,
            Pattern::Words(words),
            Emit::Fixed(TokenKind::Keyword(kw)),
        )
    }

    /// Creates a punctuation rule.
    #[must_use]
    pub const fn symbol(
        name: &'static str,
        priority: u8,
        text: &'static str,
        kind: TokenKind,
    ) -> Self {
        Self::new(name, priority, Pattern::Literal(text), Emit::Fixed(kind))
    }

    /// Tries the rule against the start of `input`.
    ///
    /// Returns the match length and the produced token kind; the kind is
    /// `None` when the text matched but was rejected (e.g. an integer
    /// that overflows).
    #[must_use]
    pub fn try_match(&self, input: &str) -> Option<(usize, Option<TokenKind>)> {
        let len = self.pattern.match_len(input)?;
        Some((len, self.emit.apply(&input[..len])))
    }
}

/// An ordered set of token rules, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    rules: Vec<TokenRule>,
}

impl TokenSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates a set from rules, ordering them by priority.
    #[must_use]
    pub fn from_rules(rules: impl IntoIterator<Item = TokenRule>) -> Self {
        Self::new().union(Self {
            rules: rules.into_iter().collect(),
        })
    }

    /// Merges `other` into this set.
    ///
    /// A rule of `other` replaces a rule of the same name; the result is
    /// re-sorted by priority with insertion order kept on ties.
    #[must_use]
    pub fn union(mut self, other: Self) -> Self {
        for rule in other.rules {
            match self.rules.iter_mut().find(|r| r.name == rule.name) {
                Some(existing) => *existing = rule,
                None => self.rules.push(rule),
            }
        }
        self.rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        self
    }

    /// Returns the rules in matching order.
    #[must_use]
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TokenRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Returns true if `word` opens a multi-word rule, so a bare `word`
    /// followed by the rest of the phrase would lex as that rule.
    #[must_use]
    pub fn starts_phrase(&self, word: &str) -> bool {
        self.rules.iter().any(|rule| match rule.pattern {
            Pattern::Words([first, _, ..]) => first.eq_ignore_ascii_case(word),
            _ => false,
        })
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules shared by every dialect.
    #[must_use]
    pub fn base() -> Self {
        Self::from_rules([
            // Multi-word keywords outrank identifiers so `GROUP BY` is never
            // read as the identifier `GROUP`.
            TokenRule::keyword(
                "LEFT_OUTER_JOIN",
                41,
                &["LEFT", "OUTER", "JOIN"],
                Keyword::LeftJoin,
            ),
            TokenRule::keyword(
                "RIGHT_OUTER_JOIN",
                41,
                &["RIGHT", "OUTER", "JOIN"],
                Keyword::RightJoin,
            ),
            TokenRule::keyword(
                "FULL_OUTER_JOIN",
                41,
                &["FULL", "OUTER", "JOIN"],
                Keyword::FullJoin,
            ),
            TokenRule::keyword("GROUP_BY", 40, &["GROUP", "BY"], Keyword::GroupBy),
            TokenRule::keyword("ORDER_BY", 40, &["ORDER", "BY"], Keyword::OrderBy),
            TokenRule::keyword("NULLS_FIRST", 40, &["NULLS", "FIRST"], Keyword::NullsFirst),
            TokenRule::keyword("NULLS_LAST", 40, &["NULLS", "LAST"], Keyword::NullsLast),
            TokenRule::keyword("INNER_JOIN", 40, &["INNER", "JOIN"], Keyword::InnerJoin),
            TokenRule::keyword("LEFT_JOIN", 40, &["LEFT", "JOIN"], Keyword::LeftJoin),
            TokenRule::keyword("RIGHT_JOIN", 40, &["RIGHT", "JOIN"], Keyword::RightJoin),
            TokenRule::keyword("FULL_JOIN", 40, &["FULL", "JOIN"], Keyword::FullJoin),
            TokenRule::keyword("CROSS_JOIN", 40, &["CROSS", "JOIN"], Keyword::CrossJoin),
            // Literals
            TokenRule::new("NUMBER", 30, Pattern::Scan(scan_number), Emit::With(emit_number)),
            TokenRule::new(
                "STRING_SINGLE",
                30,
                Pattern::Scan(scan_single_quoted),
                Emit::With(emit_string),
            ),
            TokenRule::new(
                "STRING_DOUBLE",
                30,
                Pattern::Scan(scan_double_quoted),
                Emit::With(emit_string),
            ),
            // Identifiers and single-word keywords
            TokenRule::new(
                "IDENTIFIER",
                20,
                Pattern::Scan(scan_identifier),
                Emit::With(emit_identifier),
            ),
            // Two-character operators before their one-character prefixes
            TokenRule::symbol("LT_EQ", 15, "<=", TokenKind::LtEq),
            TokenRule::symbol("GT_EQ", 15, ">=", TokenKind::GtEq),
            TokenRule::symbol("NOT_EQ_ANGLE", 15, "<>", TokenKind::NotEq),
            TokenRule::symbol("NOT_EQ_BANG", 15, "!=", TokenKind::NotEq),
            TokenRule::symbol("CONCAT", 15, "||", TokenKind::Concat),
            TokenRule::symbol("PLUS", 10, "+", TokenKind::Plus),
            TokenRule::symbol("MINUS", 10, "-", TokenKind::Minus),
            TokenRule::symbol("STAR", 10, "*", TokenKind::Star),
            TokenRule::symbol("SLASH", 10, "/", TokenKind::Slash),
            TokenRule::symbol("PERCENT", 10, "%", TokenKind::Percent),
            TokenRule::symbol("EQ", 10, "=", TokenKind::Eq),
            TokenRule::symbol("LT", 10, "<", TokenKind::Lt),
            TokenRule::symbol("GT", 10, ">", TokenKind::Gt),
            TokenRule::symbol("LPAREN", 10, "(", TokenKind::LeftParen),
            TokenRule::symbol("RPAREN", 10, ")", TokenKind::RightParen),
            TokenRule::symbol("COMMA", 10, ",", TokenKind::Comma),
            TokenRule::symbol("SEMICOLON", 10, ";", TokenKind::Semicolon),
            TokenRule::symbol("QUESTION", 10, "?", TokenKind::Question),
        ])
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn match_words(input: &str, words: &[&str]) -> Option<usize> {
    let mut pos = 0;
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            let gap = input[pos..]
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(input.len() - pos);
            if gap == 0 {
                return None;
            }
            pos += gap;
        }
        let candidate = input.get(pos..pos + word.len())?;
        if !candidate.eq_ignore_ascii_case(word) {
            return None;
        }
        pos += word.len();
    }
    match input[pos..].chars().next() {
        Some(c) if is_word_char(c) => None,
        _ => Some(pos),
    }
}

fn count_digits(input: &str) -> usize {
    input.bytes().take_while(u8::is_ascii_digit).count()
}

/// Scans `123`, `1.5`, `2.5e-3`, `1E10`.
pub(crate) fn scan_number(input: &str) -> Option<usize> {
    let mut len = count_digits(input);
    if len == 0 {
        return None;
    }
    let rest = &input[len..];
    if let Some(frac) = rest.strip_prefix('.') {
        let digits = count_digits(frac);
        if digits > 0 {
            len += 1 + digits;
        }
    }
    let rest = &input[len..];
    if let Some(exp) = rest.strip_prefix(['e', 'E']) {
        let sign = usize::from(exp.starts_with(['+', '-']));
        let digits = count_digits(&exp[sign..]);
        if digits > 0 {
            len += 1 + sign + digits;
        }
    }
    Some(len)
}

fn emit_number(text: &str) -> Option<TokenKind> {
    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(TokenKind::Float)
    } else {
        text.parse().ok().map(TokenKind::Integer)
    }
}

fn scan_quoted(input: &str, quote: char) -> Option<usize> {
    let body = input.strip_prefix(quote)?;
    let close = body.find(quote)?;
    Some(close + 2 * quote.len_utf8())
}

fn scan_single_quoted(input: &str) -> Option<usize> {
    scan_quoted(input, '\'')
}

fn scan_double_quoted(input: &str) -> Option<usize> {
    scan_quoted(input, '"')
}

fn emit_string(text: &str) -> Option<TokenKind> {
    let inner = text.get(1..text.len() - 1)?;
    Some(TokenKind::String(inner.to_owned()))
}

/// Length of one identifier part at the start of `input`: a bare word or a
/// backtick-quoted name.
fn scan_identifier_part(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    match chars.next()? {
        '`' => scan_quoted(input, '`').filter(|len| *len > 2),
        c if c.is_alphabetic() || c == '_' => {
            let rest: usize = chars.take_while(|c| is_word_char(*c)).map(char::len_utf8).sum();
            Some(c.len_utf8() + rest)
        }
        _ => None,
    }
}

/// Scans a dotted name such as `db.schema.table`, `` t.`my col` `` or `t.*`.
pub(crate) fn scan_identifier(input: &str) -> Option<usize> {
    let mut len = scan_identifier_part(input)?;
    while let Some(after_dot) = input[len..].strip_prefix('.') {
        if after_dot.starts_with('*') {
            len += 2;
            break;
        }
        match scan_identifier_part(after_dot) {
            Some(part) => len += 1 + part,
            None => break,
        }
    }
    Some(len)
}

fn emit_identifier(text: &str) -> Option<TokenKind> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut rest = text;
    loop {
        let part = if let Some(body) = rest.strip_prefix('`') {
            quoted = true;
            let close = body.find('`')?;
            rest = &body[close + 1..];
            &body[..close]
        } else {
            let end = rest.find('.').unwrap_or(rest.len());
            let part = &rest[..end];
            rest = &rest[end..];
            part
        };
        parts.push(part);
        match rest.strip_prefix('.') {
            Some(next) => rest = next,
            None => break,
        }
    }

    if !quoted && parts.len() == 1 {
        if let Some(kw) = Keyword::from_str(parts[0]) {
            return Some(TokenKind::Keyword(kw));
        }
    }
    Some(TokenKind::Identifier {
        value: parts.join("."),
        quote: quoted.then_some('`'),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_pattern() {
        let group_by = Pattern::Words(&["GROUP", "BY"]);
        assert_eq!(group_by.match_len("group   by x"), Some(10));
        assert_eq!(group_by.match_len("GROUP\nBY"), Some(8));
        assert_eq!(group_by.match_len("groupby"), None);
        assert_eq!(group_by.match_len("group bytes"), None);
        assert_eq!(group_by.match_len("group_id"), None);
    }

    #[test]
    fn test_scan_number() {
        assert_eq!(scan_number("42 "), Some(2));
        assert_eq!(scan_number("3.14)"), Some(4));
        assert_eq!(scan_number("1.x"), Some(1));
        assert_eq!(scan_number("2.5e-3,"), Some(6));
        assert_eq!(scan_number("1e"), Some(1));
        assert_eq!(scan_number("x1"), None);
    }

    #[test]
    fn test_emit_number_chooses_kind() {
        assert_eq!(emit_number("7"), Some(TokenKind::Integer(7)));
        assert_eq!(emit_number("7.5"), Some(TokenKind::Float(7.5)));
        assert_eq!(emit_number("1e3"), Some(TokenKind::Float(1000.0)));
        assert_eq!(emit_number("99999999999999999999"), None);
        assert_eq!(emit_number("1e999"), None);
    }

    #[test]
    fn test_scan_identifier() {
        assert_eq!(scan_identifier("db.schema.tbl x"), Some(13));
        assert_eq!(scan_identifier("t.* "), Some(3));
        assert_eq!(scan_identifier("`my col`.x"), Some(10));
        assert_eq!(scan_identifier("a. b"), Some(1));
        assert_eq!(scan_identifier("1a"), None);
    }

    #[test]
    fn test_emit_identifier() {
        assert_eq!(
            emit_identifier("db.tbl"),
            Some(TokenKind::Identifier {
                value: String::from("db.tbl"),
                quote: None
            })
        );
        assert_eq!(
            emit_identifier("`my col`"),
            Some(TokenKind::Identifier {
                value: String::from("my col"),
                quote: Some('`')
            })
        );
        assert_eq!(emit_identifier("select"), Some(TokenKind::Keyword(Keyword::Select)));
        assert_eq!(
            emit_identifier("`select`"),
            Some(TokenKind::Identifier {
                value: String::from("select"),
                quote: Some('`')
            })
        );
    }

    #[test]
    fn test_base_set_is_priority_ordered() {
        let set = TokenSet::base();
        let priorities: Vec<u8> = set.rules().iter().map(|r| r.priority).collect();
        assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(set.rules()[0].name, "LEFT_OUTER_JOIN");
    }

    #[test]
    fn test_starts_phrase() {
        let set = TokenSet::base();
        for word in ["left", "RIGHT", "full", "inner", "cross", "group", "order", "nulls"] {
            assert!(set.starts_phrase(word), "{word}");
        }
        assert!(!set.starts_phrase("outer"));
        assert!(!set.starts_phrase("users"));
    }

    #[test]
    fn test_union_adds_and_replaces() {
        let extra = TokenSet::from_rules([
            TokenRule::symbol("AT", 50, "@", TokenKind::Question),
            TokenRule::symbol("QUESTION", 10, "?", TokenKind::Star),
        ]);
        let base_len = TokenSet::base().len();
        let merged = TokenSet::base().union(extra);
        assert_eq!(merged.len(), base_len + 1);
        assert_eq!(merged.rules()[0].name, "AT");
        let question = merged.get("QUESTION").unwrap();
        assert_eq!(question.try_match("?"), Some((1, Some(TokenKind::Star))));
    }
}
