//! SQL Parser
//!
//! A table-driven parser: statement structure is recursive descent,
//! expression operands and table sources are reduced by the grammar's
//! productions, and operators are resolved by Pratt parsing against the
//! grammar's precedence table.

#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use parser::Parser;
