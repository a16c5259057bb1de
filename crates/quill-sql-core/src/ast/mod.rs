//! Abstract Syntax Tree (AST) types for SQL queries.
//!
//! Every node is a [`Node`]: one [`NodeKind`] variant plus the alias and
//! parentheses decorations. `Display` renders canonical SQL that parses
//! back to an equal tree; [`Node::to_tree`] renders a debug tree.

mod expression;
mod node;
mod statement;
mod tree;

pub use expression::{
    BetweenOperation, BinaryOperation, Case, Function, Identifier, Operation, Tuple, TypeCast,
    UnaryOperation, Value, Variable,
};
pub use node::{Node, NodeKind};
pub use statement::{Direction, Join, JoinType, NullsOrder, OrderBy, Select};
