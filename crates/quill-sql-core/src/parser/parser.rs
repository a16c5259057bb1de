//! SQL Parser implementation.

use super::pratt::{infix_class, prefix_class};
use crate::ast::{
    BetweenOperation, BinaryOperation, Direction, Join, JoinType, Node, NullsOrder, OrderBy,
    Select, UnaryOperation,
};
use crate::error::{LexicalError, ParseError, SyntaxError};
use crate::grammar::{Grammar, Nonterminal, OpClass};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// SQL Parser.
///
/// Holds the whole token stream of one query; productions of the
/// [`Grammar`] drive it through the public helper methods. A parser is
/// single-use.
pub struct Parser<'a> {
    source: &'a str,
    grammar: &'a Grammar,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Tokenizes `source` with the grammar's token set.
    ///
    /// # Errors
    ///
    /// Returns a [`LexicalError`] if the input cannot be tokenized.
    pub fn new(source: &'a str, grammar: &'a Grammar) -> Result<Self, LexicalError> {
        let tokens = Lexer::new(source, grammar.tokens()).tokenize()?;
        Ok(Self {
            source,
            grammar,
            tokens,
            pos: 0,
        })
    }

    /// The grammar driving this parser.
    #[must_use]
    pub const fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Number of tokens, including the final EOF.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Parses one statement: a SELECT, optionally parenthesized and
    /// optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid statement or has
    /// trailing tokens.
    pub fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_query()?;
        self.eat(&TokenKind::Semicolon);
        if !self.current().is_eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(node)
    }

    fn parse_query(&mut self) -> Result<Node, ParseError> {
        if self.eat(&TokenKind::LeftParen) {
            let inner = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(inner.with_parentheses(true));
        }
        self.parse_select()
    }

    /// Parses a SELECT query starting at the SELECT keyword.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the query is malformed.
    pub fn parse_select(&mut self) -> Result<Node, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = self.eat_keyword(Keyword::Distinct);
        if !distinct {
            self.eat_keyword(Keyword::All);
        }

        let targets = self.parse_comma_separated(Self::parse_select_target)?;
        let mut select = Select::new(targets)?.with_distinct(distinct);

        if self.eat_keyword(Keyword::From) {
            select = select.with_from(self.parse_from()?);
        }
        if self.eat_keyword(Keyword::Where) {
            select = select.with_where(self.parse_expr(0)?);
        }
        if self.eat_keyword(Keyword::GroupBy) {
            select = select.with_group_by(self.parse_comma_separated(|p| p.parse_expr(0))?);
        }
        if self.eat_keyword(Keyword::Having) {
            select = select.with_having(self.parse_expr(0)?);
        }
        if self.eat_keyword(Keyword::OrderBy) {
            let entries = self.parse_comma_separated(Self::parse_order_by_entry)?;
            select = select.with_order_by(entries)?;
        }
        if self.eat_keyword(Keyword::Limit) {
            select = select.with_limit(self.parse_expr(0)?);
        }
        if self.eat_keyword(Keyword::Offset) {
            select = select.with_offset(self.parse_expr(0)?);
        }

        Ok(Node::new(select))
    }

    fn parse_select_target(&mut self) -> Result<Node, ParseError> {
        let expr = self.parse_expr(0)?;
        self.apply_alias(expr)
    }

    fn parse_order_by_entry(&mut self) -> Result<Node, ParseError> {
        let field = self.parse_expr(0)?;
        let direction = if self.eat_keyword(Keyword::Asc) {
            Direction::Asc
        } else if self.eat_keyword(Keyword::Desc) {
            Direction::Desc
        } else {
            Direction::Default
        };
        let nulls = if self.eat_keyword(Keyword::NullsFirst) {
            NullsOrder::First
        } else if self.eat_keyword(Keyword::NullsLast) {
            NullsOrder::Last
        } else {
            NullsOrder::Default
        };
        Ok(Node::new(
            OrderBy::new(field).with_direction(direction).with_nulls(nulls),
        ))
    }

    /// Parses the FROM clause: table sources combined into a left-deep
    /// chain of joins.
    fn parse_from(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_table_or_subquery()?;
        while let Some(join_type) = self.join_type() {
            self.advance();
            let right = self.parse_table_or_subquery()?;
            let mut join = Join::new(join_type, left, right);
            if join_type != JoinType::Implicit && self.eat_keyword(Keyword::On) {
                join = join.with_condition(self.parse_expr(0)?);
            }
            left = Node::new(join);
        }
        Ok(left)
    }

    fn join_type(&self) -> Option<JoinType> {
        match &self.current().kind {
            TokenKind::Comma => Some(JoinType::Implicit),
            TokenKind::Keyword(Keyword::Join) => Some(JoinType::Join),
            TokenKind::Keyword(Keyword::InnerJoin) => Some(JoinType::Inner),
            TokenKind::Keyword(Keyword::LeftJoin) => Some(JoinType::Left),
            TokenKind::Keyword(Keyword::RightJoin) => Some(JoinType::Right),
            TokenKind::Keyword(Keyword::FullJoin) => Some(JoinType::Full),
            TokenKind::Keyword(Keyword::CrossJoin) => Some(JoinType::Cross),
            _ => None,
        }
    }

    /// Parses a table source through the grammar's `TableOrSubquery`
    /// alternatives, then its optional alias.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if no alternative applies or it fails.
    pub fn parse_table_or_subquery(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_nonterminal(Nonterminal::TableOrSubquery, "table name or subquery")?;
        self.apply_alias(node)
    }

    fn apply_alias(&mut self, node: Node) -> Result<Node, ParseError> {
        Ok(match self.parse_optional_alias()? {
            Some(alias) => node.with_alias(alias),
            None => node,
        })
    }

    /// Parses `AS name` or a bare identifier following an expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if AS is not followed by an identifier.
    pub fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.expect_identifier().map(Some);
        }
        if matches!(self.current().kind, TokenKind::Identifier { .. }) {
            return self.expect_identifier().map(Some);
        }
        Ok(None)
    }

    /// Parses an expression using Pratt parsing.
    ///
    /// `min_bp` is the minimum left binding power an infix operator needs
    /// to be absorbed; `0` parses a full expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the expression is malformed.
    pub fn parse_expr(&mut self, min_bp: u8) -> Result<Node, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let Some(class) = infix_class(&self.current().kind, self.peek(1)) else {
                break;
            };
            let Some((l_bp, r_bp)) = self.grammar.precedence().infix_binding_power(class) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            lhs = self.parse_infix(lhs, class, r_bp)?;
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Node, ParseError> {
        let bp = prefix_class(&self.current().kind)
            .and_then(|class| self.grammar.precedence().prefix_binding_power(class));
        if let Some(bp) = bp {
            let op = self.advance();
            let operand = self.parse_expr(bp)?;
            let op = self.token_text(&op);
            return Ok(Node::new(UnaryOperation::new(op, vec![operand])?));
        }
        self.parse_nonterminal(Nonterminal::Expr, "expression")
    }

    fn parse_infix(&mut self, lhs: Node, class: OpClass, r_bp: u8) -> Result<Node, ParseError> {
        let first = self.advance();
        match class {
            OpClass::Is => {
                let op = if self.eat_keyword(Keyword::Not) {
                    "is not"
                } else {
                    "is"
                };
                let rhs = self.parse_expr(r_bp)?;
                Ok(Node::binary(op, lhs, rhs))
            }
            OpClass::In | OpClass::Like | OpClass::Between => {
                // `first` is either the operator or a NOT in front of it
                let negated = first.as_keyword() == Some(Keyword::Not);
                let op = if negated {
                    let second = self.advance();
                    format!("{} {}", self.token_text(&first), self.token_text(&second))
                } else {
                    self.token_text(&first).to_owned()
                };
                match class {
                    OpClass::Between => self.parse_between(lhs, negated, r_bp),
                    OpClass::In => {
                        let rhs = self.parse_in_operand(r_bp)?;
                        Ok(Node::binary(op, lhs, rhs))
                    }
                    _ => {
                        let rhs = self.parse_expr(r_bp)?;
                        Ok(Node::binary(op, lhs, rhs))
                    }
                }
            }
            _ => {
                let rhs = self.parse_expr(r_bp)?;
                let op = self.token_text(&first);
                Ok(Node::new(BinaryOperation::new(op, vec![lhs, rhs])?))
            }
        }
    }

    fn parse_between(
        &mut self,
        subject: Node,
        negated: bool,
        r_bp: u8,
    ) -> Result<Node, ParseError> {
        let low = self.parse_expr(r_bp)?;
        self.expect_keyword(Keyword::And)?;
        let high = self.parse_expr(r_bp)?;
        let between = BetweenOperation::new(vec![subject, low, high])?;
        Ok(Node::new(between.with_negated(negated)))
    }

    /// The right side of IN: a parenthesized list becomes a Tuple, anything
    /// else (including a parenthesized SELECT) is an ordinary operand.
    fn parse_in_operand(&mut self, r_bp: u8) -> Result<Node, ParseError> {
        let is_list = self.check(&TokenKind::LeftParen)
            && !matches!(self.peek(1), TokenKind::Keyword(Keyword::Select));
        if !is_list {
            return self.parse_expr(r_bp);
        }
        self.advance();
        let items = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(|p| p.parse_expr(0))?
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Node::tuple(items))
    }

    /// Reduces `nonterminal` with the first alternative whose start
    /// predicate accepts the current token.
    fn parse_nonterminal(
        &mut self,
        nonterminal: Nonterminal,
        expected: &str,
    ) -> Result<Node, ParseError> {
        let grammar = self.grammar;
        let production = grammar
            .alternatives(nonterminal)
            .find(|p| (p.starts)(&self.current().kind))
            .copied();
        match production {
            Some(production) => (production.reduce)(self),
            None => Err(self.unexpected(expected)),
        }
    }

    /// Parses `item (, item)*`.
    ///
    /// # Errors
    ///
    /// Returns the first error of `item`.
    pub fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.eat(&TokenKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    // --- Helper methods ---

    /// The current token.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len().saturating_sub(1))]
    }

    /// The kind of the token `n` positions ahead; EOF past the end.
    #[must_use]
    pub fn peek(&self, n: usize) -> &TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)].kind
    }

    /// Consumes and returns the current token. EOF is never consumed.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// The source text a token was lexed from, verbatim.
    #[must_use]
    pub fn token_text(&self, token: &Token) -> &'a str {
        token.span.text(self.source)
    }

    /// Checks if the current token matches the given kind.
    #[must_use]
    pub fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    #[must_use]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Consumes the current token if it matches the given kind.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        let found = self.check(kind);
        if found {
            self.advance();
        }
        found
    }

    /// Consumes the current token if it is the given keyword.
    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.check_keyword(keyword);
        if found {
            self.advance();
        }
        found
    }

    /// Expects the current token to be the given kind.
    ///
    /// # Errors
    ///
    /// Returns a `SyntaxError` naming `kind` otherwise.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("{kind:?}")))
        }
    }

    /// Expects the current token to be the given keyword.
    ///
    /// # Errors
    ///
    /// Returns a `SyntaxError` naming `keyword` otherwise.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects and returns an identifier's name.
    ///
    /// # Errors
    ///
    /// Returns a `SyntaxError` if the current token is not an identifier.
    pub fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Identifier { value, .. } => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Builds an "unexpected token" error at the current token.
    #[must_use]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        SyntaxError::unexpected(expected, token.kind.clone(), token.span).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    fn parse(sql: &str) -> Result<Node, ParseError> {
        let grammar = Grammar::base();
        Parser::new(sql, &grammar)?.parse_statement()
    }

    fn parse_expr(sql: &str) -> Node {
        let grammar = Grammar::base();
        let mut parser = Parser::new(sql, &grammar).unwrap();
        parser.parse_expr(0).unwrap()
    }

    #[test]
    fn test_simple_select() {
        let node = parse("SELECT id, name FROM users").unwrap();
        let NodeKind::Select(select) = node.kind() else {
            panic!("Expected Select");
        };
        assert_eq!(select.targets().len(), 2);
        assert_eq!(select.from_table(), Some(&Node::identifier("users")));
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be 1 + (2 * 3)
        assert_eq!(
            parse_expr("1 + 2 * 3"),
            Node::binary(
                "+",
                Node::constant(1),
                Node::binary("*", Node::constant(2), Node::constant(3)),
            )
        );
    }

    #[test]
    fn test_unary_binds_tighter_than_multiplication() {
        assert_eq!(
            parse_expr("-a * b"),
            Node::binary(
                "*",
                Node::unary("-", Node::identifier("a")),
                Node::identifier("b"),
            )
        );
    }

    #[test]
    fn test_operator_text_is_verbatim() {
        assert_eq!(
            parse_expr("a <> b or c"),
            Node::binary(
                "or",
                Node::binary("<>", Node::identifier("a"), Node::identifier("b")),
                Node::identifier("c"),
            )
        );
    }

    #[test]
    fn test_peek_past_end_is_eof() {
        let grammar = Grammar::base();
        let mut parser = Parser::new("a", &grammar).unwrap();
        assert_eq!(parser.peek(5), &TokenKind::Eof);
        parser.advance();
        parser.advance();
        assert!(parser.current().is_eof());
        assert_eq!(parser.token_count(), 2);
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        let err = parse("SELECT a b c").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }
}
