//! The AST node and its closed set of kinds.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use super::expression::{
    BetweenOperation, BinaryOperation, Case, Function, Identifier, Operation, Tuple, TypeCast,
    UnaryOperation, Value, Variable,
};
use super::statement::{Join, OrderBy, Select};
use super::tree;
use crate::lexer::{Keyword, TokenSet};

/// The kind-specific payload of a [`Node`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    /// Column, table or other name.
    Identifier(Identifier),
    /// Literal value.
    Constant(Value),
    /// The NULL literal.
    NullConstant,
    /// `@name` or `@@name`.
    Variable(Variable),
    /// Positional placeholder `?`.
    Parameter,
    /// Generic n-ary operation.
    Operation(Operation),
    /// Infix operation.
    BinaryOperation(BinaryOperation),
    /// Prefix operation.
    UnaryOperation(UnaryOperation),
    /// Function call.
    Function(Function),
    /// `[NOT] BETWEEN`.
    BetweenOperation(BetweenOperation),
    /// Parenthesized list.
    Tuple(Tuple),
    /// SELECT query.
    Select(Box<Select>),
    /// Joined table sources.
    Join(Join),
    /// ORDER BY entry.
    OrderBy(OrderBy),
    /// CAST expression.
    TypeCast(TypeCast),
    /// CASE expression.
    Case(Case),
}

macro_rules! impl_from_kind {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for NodeKind {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )*
    };
}

impl_from_kind!(
    Identifier,
    Variable,
    Operation,
    BinaryOperation,
    UnaryOperation,
    Function,
    BetweenOperation,
    Tuple,
    Join,
    OrderBy,
    TypeCast,
    Case,
);

impl From<Value> for NodeKind {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::NullConstant,
            other => Self::Constant(other),
        }
    }
}

impl From<Select> for NodeKind {
    fn from(value: Select) -> Self {
        Self::Select(Box::new(value))
    }
}

impl NodeKind {
    /// The kind's name as used in errors and the debug tree.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "Identifier",
            Self::Constant(_) => "Constant",
            Self::NullConstant => "NullConstant",
            Self::Variable(_) => "Variable",
            Self::Parameter => "Parameter",
            Self::Operation(_) => "Operation",
            Self::BinaryOperation(_) => "BinaryOperation",
            Self::UnaryOperation(_) => "UnaryOperation",
            Self::Function(_) => "Function",
            Self::BetweenOperation(_) => "BetweenOperation",
            Self::Tuple(_) => "Tuple",
            Self::Select(_) => "Select",
            Self::Join(_) => "Join",
            Self::OrderBy(_) => "OrderBy",
            Self::TypeCast(_) => "TypeCast",
            Self::Case(_) => "Case",
        }
    }

    fn to_sql(&self) -> String {
        match self {
            Self::Identifier(n) => n.to_sql(),
            Self::Constant(v) => v.to_sql(),
            Self::NullConstant => String::from("NULL"),
            Self::Variable(n) => n.to_sql(),
            Self::Parameter => String::from("?"),
            Self::Operation(n) => n.to_sql(),
            Self::BinaryOperation(n) => n.to_sql(),
            Self::UnaryOperation(n) => n.to_sql(),
            Self::Function(n) => n.to_sql(),
            Self::BetweenOperation(n) => n.to_sql(),
            Self::Tuple(n) => n.to_sql(),
            Self::Select(n) => n.to_sql(),
            Self::Join(n) => n.to_sql(),
            Self::OrderBy(n) => n.to_sql(),
            Self::TypeCast(n) => n.to_sql(),
            Self::Case(n) => n.to_sql(),
        }
    }
}

/// An AST node: a kind plus the alias and parentheses decorations every
/// kind shares.
///
/// Equality is structural and order-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    kind: NodeKind,
    alias: Option<String>,
    parentheses: bool,
}

impl Node {
    /// Creates an undecorated node.
    #[must_use]
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            alias: None,
            parentheses: false,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the parentheses flag.
    #[must_use]
    pub const fn with_parentheses(mut self, parentheses: bool) -> Self {
        self.parentheses = parentheses;
        self
    }

    /// The kind-specific payload.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Consumes the node, returning its payload.
    #[must_use]
    pub fn into_kind(self) -> NodeKind {
        self.kind
    }

    /// The kind's name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// The alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Whether the node is wrapped in parentheses.
    #[must_use]
    pub const fn parentheses(&self) -> bool {
        self.parentheses
    }

    /// Renders the indented debug tree.
    #[must_use]
    pub fn to_tree(&self) -> String {
        tree::render(self)
    }

    // Convenience constructors

    /// An unquoted identifier.
    #[must_use]
    pub fn identifier(value: impl Into<String>) -> Self {
        Self::new(Identifier::new(value))
    }

    /// A literal. `Value::Null` becomes a `NullConstant`.
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::new(value.into())
    }

    /// The NULL literal.
    #[must_use]
    pub fn null() -> Self {
        Self::new(NodeKind::NullConstant)
    }

    /// The `?` placeholder.
    #[must_use]
    pub fn parameter() -> Self {
        Self::new(NodeKind::Parameter)
    }

    /// An infix operation.
    #[must_use]
    pub fn binary(op: impl Into<String>, left: Self, right: Self) -> Self {
        Self::new(BinaryOperation::from_operands(op, left, right))
    }

    /// A prefix operation.
    #[must_use]
    pub fn unary(op: impl Into<String>, arg: Self) -> Self {
        Self::new(UnaryOperation::from_operand(op, arg))
    }

    /// A function call.
    #[must_use]
    pub fn function(op: impl Into<String>, args: Vec<Self>) -> Self {
        Self::new(Function::new(op, args))
    }

    /// `subject BETWEEN low AND high`.
    #[must_use]
    pub fn between(subject: Self, low: Self, high: Self) -> Self {
        Self::new(BetweenOperation::from_bounds(subject, low, high))
    }

    /// A parenthesized list.
    #[must_use]
    pub fn tuple(items: Vec<Self>) -> Self {
        Self::new(Tuple::new(items))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&decorate(
            self.kind.to_sql(),
            self.parentheses,
            self.alias.as_deref(),
        ))
    }
}

/// Applies the shared decorations to a kind's own SQL text: parentheses
/// first, then the alias.
fn decorate(body: String, parentheses: bool, alias: Option<&str>) -> String {
    let mut sql = if parentheses { format!("({body})") } else { body };
    if let Some(alias) = alias {
        sql.push_str(" AS ");
        sql.push_str(&quote_alias(alias));
    }
    sql
}

static BASE_TOKENS: LazyLock<TokenSet> = LazyLock::new(TokenSet::base);

/// Backtick-quotes an alias unless it lexes back as a plain identifier.
///
/// Words that open a multi-word keyword (`left` in `LEFT JOIN`) are quoted
/// too, since the next clause may complete the phrase.
fn quote_alias(alias: &str) -> String {
    let mut chars = alias.chars();
    let plain = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && Keyword::from_str(alias).is_none()
        && !BASE_TOKENS.starts_phrase(alias);
    if plain {
        alias.to_owned()
    } else {
        format!("`{alias}`")
    }
}
