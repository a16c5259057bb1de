//! Productions shared by every dialect.

use super::{Nonterminal, Production};
use crate::ast::{Case, Function, Identifier, Node, TypeCast};
use crate::error::ParseError;
use crate::lexer::{Keyword, TokenKind};
use crate::parser::Parser;

pub(super) fn productions() -> Vec<Production> {
    vec![
        // Expression operands
        Production::new(Nonterminal::Expr, "literal", starts_literal, reduce_literal),
        Production::new(
            Nonterminal::Expr,
            "keyword_literal",
            starts_keyword_literal,
            reduce_keyword_literal,
        ),
        Production::new(Nonterminal::Expr, "parameter", starts_parameter, reduce_parameter),
        Production::new(
            Nonterminal::Expr,
            "column_or_function",
            starts_identifier,
            reduce_column_or_function,
        ),
        Production::new(Nonterminal::Expr, "star", starts_star, reduce_star),
        Production::new(Nonterminal::Expr, "parenthesized", starts_paren, reduce_parenthesized),
        Production::new(Nonterminal::Expr, "cast", starts_cast, reduce_cast),
        Production::new(Nonterminal::Expr, "case", starts_case, reduce_case),
        // Table sources
        Production::new(
            Nonterminal::TableOrSubquery,
            "table_name",
            starts_identifier,
            reduce_table_name,
        ),
        Production::new(Nonterminal::TableOrSubquery, "subquery", starts_paren, reduce_subquery),
    ]
}

const fn starts_literal(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Integer(_) | TokenKind::Float(_) | TokenKind::String(_)
    )
}

const fn starts_keyword_literal(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Keyword(Keyword::Null | Keyword::True | Keyword::False)
    )
}

const fn starts_parameter(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Question)
}

const fn starts_identifier(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Identifier { .. })
}

const fn starts_star(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Star)
}

const fn starts_paren(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::LeftParen)
}

const fn starts_cast(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Keyword(Keyword::Cast))
}

const fn starts_case(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Keyword(Keyword::Case))
}

fn reduce_literal(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    match parser.current().kind.clone() {
        TokenKind::Integer(n) => {
            parser.advance();
            Ok(Node::constant(n))
        }
        TokenKind::Float(f) => {
            parser.advance();
            Ok(Node::constant(f))
        }
        TokenKind::String(s) => {
            parser.advance();
            Ok(Node::constant(s))
        }
        _ => Err(parser.unexpected("literal")),
    }
}

fn reduce_keyword_literal(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    let node = match parser.current().as_keyword() {
        Some(Keyword::Null) => Node::null(),
        Some(Keyword::True) => Node::constant(true),
        Some(Keyword::False) => Node::constant(false),
        _ => return Err(parser.unexpected("NULL, TRUE or FALSE")),
    };
    parser.advance();
    Ok(node)
}

fn reduce_parameter(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    parser.expect(&TokenKind::Question)?;
    Ok(Node::parameter())
}

fn identifier(value: String, quote: Option<char>) -> Node {
    Node::new(match quote {
        Some(q) => Identifier::quoted(value, q),
        None => Identifier::new(value),
    })
}

fn reduce_column_or_function(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    let TokenKind::Identifier { value, quote } = parser.advance().kind else {
        return Err(parser.unexpected("identifier"));
    };
    if quote.is_some() || !parser.eat(&TokenKind::LeftParen) {
        return Ok(identifier(value, quote));
    }

    // Function call
    let distinct = parser.eat_keyword(Keyword::Distinct);
    let args = if parser.check(&TokenKind::RightParen) {
        Vec::new()
    } else {
        parser.parse_comma_separated(|p| p.parse_expr(0))?
    };
    parser.expect(&TokenKind::RightParen)?;
    Ok(Node::new(Function::new(value, args).with_distinct(distinct)))
}

fn reduce_star(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    parser.expect(&TokenKind::Star)?;
    Ok(Node::identifier("*"))
}

/// `( SELECT ... )`, `( a, b )` or `( expr )`.
fn reduce_parenthesized(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    parser.expect(&TokenKind::LeftParen)?;
    if parser.check_keyword(Keyword::Select) {
        let select = parser.parse_select()?;
        parser.expect(&TokenKind::RightParen)?;
        return Ok(select.with_parentheses(true));
    }

    let first = parser.parse_expr(0)?;
    if parser.check(&TokenKind::Comma) {
        let mut items = vec![first];
        while parser.eat(&TokenKind::Comma) {
            items.push(parser.parse_expr(0)?);
        }
        parser.expect(&TokenKind::RightParen)?;
        return Ok(Node::tuple(items));
    }
    parser.expect(&TokenKind::RightParen)?;
    Ok(first.with_parentheses(true))
}

/// `CAST ( expr AS type_name [ ( n [, m] ) ] )`.
fn reduce_cast(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    parser.expect_keyword(Keyword::Cast)?;
    parser.expect(&TokenKind::LeftParen)?;
    let arg = parser.parse_expr(0)?;
    parser.expect_keyword(Keyword::As)?;

    // A quoted type name keeps its quotes so it renders back verbatim
    let mut type_name = match &parser.current().kind {
        TokenKind::Identifier {
            value,
            quote: Some(q),
        } => format!("{q}{value}{q}"),
        TokenKind::Identifier { value, quote: None } => value.clone(),
        _ => return Err(parser.unexpected("type name")),
    };
    parser.advance();

    // Multi-word type names such as `SIGNED INTEGER`
    while let TokenKind::Identifier { value, quote: None } = &parser.current().kind {
        type_name.push(' ');
        type_name.push_str(value);
        parser.advance();
    }

    if parser.eat(&TokenKind::LeftParen) {
        let sizes = parser.parse_comma_separated(|p| {
            let TokenKind::Integer(size) = p.current().kind else {
                return Err(p.unexpected("type size"));
            };
            p.advance();
            Ok(size.to_string())
        })?;
        parser.expect(&TokenKind::RightParen)?;
        type_name = format!("{type_name}({})", sizes.join(", "));
    }

    parser.expect(&TokenKind::RightParen)?;
    Ok(Node::new(TypeCast::new(type_name, arg)))
}

/// `CASE WHEN cond THEN result [...] [ELSE default] END`.
fn reduce_case(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    parser.expect_keyword(Keyword::Case)?;
    if !parser.check_keyword(Keyword::When) {
        return Err(parser.unexpected("WHEN"));
    }

    let mut rules = Vec::new();
    while parser.eat_keyword(Keyword::When) {
        let condition = parser.parse_expr(0)?;
        parser.expect_keyword(Keyword::Then)?;
        let result = parser.parse_expr(0)?;
        rules.push((condition, result));
    }
    let default = if parser.eat_keyword(Keyword::Else) {
        Some(parser.parse_expr(0)?)
    } else {
        None
    };
    parser.expect_keyword(Keyword::End)?;
    Ok(Node::new(Case::new(rules, default)?))
}

fn reduce_table_name(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    match parser.advance().kind {
        TokenKind::Identifier { value, quote } => Ok(identifier(value, quote)),
        _ => Err(parser.unexpected("table name")),
    }
}

fn reduce_subquery(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    parser.expect(&TokenKind::LeftParen)?;
    let select = parser.parse_select()?;
    parser.expect(&TokenKind::RightParen)?;
    Ok(select.with_parentheses(true))
}
