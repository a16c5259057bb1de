//! Expression node kinds.

use serde::Serialize;

use super::Node;
use crate::error::StructuralError;

fn join_nodes(nodes: &[Node], separator: &str) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// A column, table or other named reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    value: String,
    wrap: Option<char>,
}

impl Identifier {
    /// Creates an unquoted identifier. `value` may be dotted (`db.tbl`).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            wrap: None,
        }
    }

    /// Creates an identifier rendered between `wrap` characters.
    #[must_use]
    pub fn quoted(value: impl Into<String>, wrap: char) -> Self {
        Self {
            value: value.into(),
            wrap: Some(wrap),
        }
    }

    /// The dotted name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The quote character, if any.
    #[must_use]
    pub const fn wrap(&self) -> Option<char> {
        self.wrap
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self.wrap {
            Some(q) => format!("{q}{}{q}", self.value),
            None => self.value.clone(),
        }
    }
}

/// The value of a `Constant`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// TRUE or FALSE.
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// String literal.
    String(String),
}

impl Value {
    /// Returns the SQL representation.
    ///
    /// Strings are double-quoted unless they contain a double quote, in
    /// which case single quotes are used so the text lexes back unchanged.
    /// There is no escape syntax, so a string holding both quote kinds
    /// cannot round-trip.
    /// Floats always keep a fractional part or exponent so they re-lex as
    /// floats.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(true) => String::from("TRUE"),
            Self::Bool(false) => String::from("FALSE"),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => format!("{f:?}"),
            Self::String(s) if s.contains('"') => format!("'{s}'"),
            Self::String(s) => format!("\"{s}\""),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A session (`@name`) or system (`@@name`) variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    value: String,
    is_system_var: bool,
}

impl Variable {
    /// Creates a user variable.
    #[must_use]
    pub fn user(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_system_var: false,
        }
    }

    /// Creates a system variable.
    #[must_use]
    pub fn system(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_system_var: true,
        }
    }

    /// The variable name without sigils.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for `@@name`.
    #[must_use]
    pub const fn is_system_var(&self) -> bool {
        self.is_system_var
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let sigil = if self.is_system_var { "@@" } else { "@" };
        format!("{sigil}{}", self.value)
    }
}

/// A generic n-ary operation, rendered in call syntax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    op: String,
    args: Vec<Node>,
}

impl Operation {
    /// Creates an operation.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::Arity`] when `args` is empty.
    pub fn new(op: impl Into<String>, args: Vec<Node>) -> Result<Self, StructuralError> {
        if args.is_empty() {
            return Err(StructuralError::arity("Operation", "at least 1", 0));
        }
        Ok(Self {
            op: op.into(),
            args,
        })
    }

    /// The operator text.
    #[must_use]
    pub fn op(&self) -> &str {
        &self.op
    }

    /// The operands.
    #[must_use]
    pub fn args(&self) -> &[Node] {
        &self.args
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{}({})", self.op, join_nodes(&self.args, ","))
    }
}

/// An infix operation with exactly two operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryOperation {
    op: String,
    args: Box<[Node; 2]>,
}

impl BinaryOperation {
    /// Creates a binary operation; the operator text is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::Arity`] unless `args` has two elements.
    pub fn new(op: impl Into<String>, args: Vec<Node>) -> Result<Self, StructuralError> {
        let args: [Node; 2] = args
            .try_into()
            .map_err(|v: Vec<Node>| {
                StructuralError::arity("BinaryOperation", "exactly 2", v.len())
            })?;
        Ok(Self {
            op: op.into(),
            args: Box::new(args),
        })
    }

    /// Creates a binary operation from its two operands.
    #[must_use]
    pub fn from_operands(op: impl Into<String>, left: Node, right: Node) -> Self {
        Self {
            op: op.into(),
            args: Box::new([left, right]),
        }
    }

    /// The operator text.
    #[must_use]
    pub fn op(&self) -> &str {
        &self.op
    }

    /// Both operands, left first.
    #[must_use]
    pub fn args(&self) -> &[Node] {
        self.args.as_slice()
    }

    /// The left operand.
    #[must_use]
    pub fn left(&self) -> &Node {
        &self.args[0]
    }

    /// The right operand.
    #[must_use]
    pub fn right(&self) -> &Node {
        &self.args[1]
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} {} {}", self.args[0], self.op, self.args[1])
    }
}

/// A prefix operation with exactly one operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryOperation {
    op: String,
    arg: Box<Node>,
}

impl UnaryOperation {
    /// Creates a unary operation.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::Arity`] unless `args` has one element.
    pub fn new(op: impl Into<String>, args: Vec<Node>) -> Result<Self, StructuralError> {
        let [arg]: [Node; 1] = args
            .try_into()
            .map_err(|v: Vec<Node>| {
                StructuralError::arity("UnaryOperation", "exactly 1", v.len())
            })?;
        Ok(Self::from_operand(op, arg))
    }

    /// Creates a unary operation from its operand.
    #[must_use]
    pub fn from_operand(op: impl Into<String>, arg: Node) -> Self {
        Self {
            op: op.into(),
            arg: Box::new(arg),
        }
    }

    /// The operator text.
    #[must_use]
    pub fn op(&self) -> &str {
        &self.op
    }

    /// The operand.
    #[must_use]
    pub fn arg(&self) -> &Node {
        &self.arg
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.op, self.arg)
    }
}

/// A function call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    op: String,
    args: Vec<Node>,
    distinct: bool,
}

impl Function {
    /// Creates a function call. Zero arguments are allowed.
    #[must_use]
    pub fn new(op: impl Into<String>, args: Vec<Node>) -> Self {
        Self {
            op: op.into(),
            args,
            distinct: false,
        }
    }

    /// Sets the DISTINCT flag.
    #[must_use]
    pub const fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// The function name.
    #[must_use]
    pub fn op(&self) -> &str {
        &self.op
    }

    /// The arguments.
    #[must_use]
    pub fn args(&self) -> &[Node] {
        &self.args
    }

    /// Whether DISTINCT was specified.
    #[must_use]
    pub const fn distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        format!("{}({distinct}{})", self.op, join_nodes(&self.args, ", "))
    }
}

/// `subject [NOT] BETWEEN low AND high`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetweenOperation {
    args: Box<[Node; 3]>,
    negated: bool,
}

impl BetweenOperation {
    /// Creates a BETWEEN from `(subject, low, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::Arity`] unless `args` has three elements.
    pub fn new(args: Vec<Node>) -> Result<Self, StructuralError> {
        let args: [Node; 3] = args
            .try_into()
            .map_err(|v: Vec<Node>| {
                StructuralError::arity("BetweenOperation", "exactly 3", v.len())
            })?;
        Ok(Self {
            args: Box::new(args),
            negated: false,
        })
    }

    /// Creates a BETWEEN from its subject and bounds.
    #[must_use]
    pub fn from_bounds(subject: Node, low: Node, high: Node) -> Self {
        Self {
            args: Box::new([subject, low, high]),
            negated: false,
        }
    }

    /// Turns this into NOT BETWEEN.
    #[must_use]
    pub const fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    /// Subject, low and high bound, in that order.
    #[must_use]
    pub fn args(&self) -> &[Node] {
        self.args.as_slice()
    }

    /// Whether this is NOT BETWEEN.
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let [subject, low, high] = &*self.args;
        let not = if self.negated { "NOT " } else { "" };
        format!("{subject} {not}BETWEEN {low} AND {high}")
    }
}

/// A parenthesized list such as the right side of `IN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tuple {
    items: Vec<Node>,
}

impl Tuple {
    /// Creates a tuple; it may be empty.
    #[must_use]
    pub const fn new(items: Vec<Node>) -> Self {
        Self { items }
    }

    /// The items in order.
    #[must_use]
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("({})", join_nodes(&self.items, ", "))
    }
}

/// `CAST(arg AS type_name)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCast {
    type_name: String,
    arg: Box<Node>,
}

impl TypeCast {
    /// Creates a cast.
    #[must_use]
    pub fn new(type_name: impl Into<String>, arg: Node) -> Self {
        Self {
            type_name: type_name.into(),
            arg: Box::new(arg),
        }
    }

    /// The target type as written, e.g. `DECIMAL(10, 2)`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The expression being cast.
    #[must_use]
    pub fn arg(&self) -> &Node {
        &self.arg
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("CAST({} AS {})", self.arg, self.type_name)
    }
}

/// A searched CASE expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    rules: Vec<(Node, Node)>,
    default: Option<Box<Node>>,
}

impl Case {
    /// Creates a CASE from `(condition, result)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::Arity`] when `rules` is empty.
    pub fn new(rules: Vec<(Node, Node)>, default: Option<Node>) -> Result<Self, StructuralError> {
        if rules.is_empty() {
            return Err(StructuralError::arity("Case", "at least 1 WHEN", 0));
        }
        Ok(Self {
            rules,
            default: default.map(Box::new),
        })
    }

    /// The WHEN/THEN pairs.
    #[must_use]
    pub fn rules(&self) -> &[(Node, Node)] {
        &self.rules
    }

    /// The ELSE result.
    #[must_use]
    pub fn default(&self) -> Option<&Node> {
        self.default.as_deref()
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("CASE");
        for (condition, result) in &self.rules {
            sql.push_str(&format!(" WHEN {condition} THEN {result}"));
        }
        if let Some(default) = &self.default {
            sql.push_str(&format!(" ELSE {default}"));
        }
        sql.push_str(" END");
        sql
    }
}
