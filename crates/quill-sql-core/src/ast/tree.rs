//! Debug tree rendering.
//!
//! One line per node, two spaces of indentation per level. A line holds
//! the kind name, its scalar attributes and, when set, `parentheses=true`
//! and `alias="..."`. Optional and list-valued SELECT/JOIN/CASE parts are
//! introduced by a `slot:` line so that absent parts cannot be confused
//! with positional children.

use std::fmt::Write;

use super::expression::Value;
use super::{Node, NodeKind};

pub(super) fn render(node: &Node) -> String {
    let mut writer = TreeWriter::default();
    writer.node(node, 0);
    writer.out
}

#[derive(Default)]
struct TreeWriter {
    out: String,
}

impl TreeWriter {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn slot(&mut self, depth: usize, name: &str, nodes: &[&Node]) {
        if nodes.is_empty() {
            return;
        }
        self.line(depth, &format!("{name}:"));
        for node in nodes {
            self.node(node, depth + 1);
        }
    }

    fn children(&mut self, depth: usize, nodes: &[Node]) {
        for node in nodes {
            self.node(node, depth + 1);
        }
    }

    fn node(&mut self, node: &Node, depth: usize) {
        let mut head = String::from(node.kind_name());
        match node.kind() {
            NodeKind::Identifier(ident) => {
                let _ = write!(head, " value={:?}", ident.value());
                if let Some(wrap) = ident.wrap() {
                    let _ = write!(head, " wrap={wrap:?}");
                }
            }
            NodeKind::Constant(value) => {
                let _ = write!(head, " value={}", constant_attr(value));
            }
            NodeKind::Variable(var) => {
                let _ = write!(
                    head,
                    " value={:?} is_system_var={}",
                    var.value(),
                    var.is_system_var()
                );
            }
            NodeKind::Operation(op) => {
                let _ = write!(head, " op={:?}", op.op());
            }
            NodeKind::BinaryOperation(op) => {
                let _ = write!(head, " op={:?}", op.op());
            }
            NodeKind::UnaryOperation(op) => {
                let _ = write!(head, " op={:?}", op.op());
            }
            NodeKind::Function(func) => {
                let _ = write!(head, " op={:?}", func.op());
                if func.distinct() {
                    head.push_str(" distinct=true");
                }
            }
            NodeKind::BetweenOperation(between) if between.negated() => {
                head.push_str(" negated=true");
            }
            NodeKind::Select(select) if select.distinct() => {
                head.push_str(" distinct=true");
            }
            NodeKind::Join(join) => {
                let _ = write!(head, " join_type={:?}", join.join_type());
            }
            NodeKind::OrderBy(order) => {
                let _ = write!(
                    head,
                    " direction={:?} nulls={:?}",
                    order.direction(),
                    order.nulls()
                );
            }
            NodeKind::TypeCast(cast) => {
                let _ = write!(head, " type_name={:?}", cast.type_name());
            }
            _ => {}
        }
        if node.parentheses() {
            head.push_str(" parentheses=true");
        }
        if let Some(alias) = node.alias() {
            let _ = write!(head, " alias={alias:?}");
        }
        self.line(depth, &head);

        match node.kind() {
            NodeKind::Operation(op) => self.children(depth, op.args()),
            NodeKind::BinaryOperation(op) => self.children(depth, op.args()),
            NodeKind::UnaryOperation(op) => self.node(op.arg(), depth + 1),
            NodeKind::Function(func) => self.children(depth, func.args()),
            NodeKind::BetweenOperation(between) => self.children(depth, between.args()),
            NodeKind::Tuple(tuple) => self.children(depth, tuple.items()),
            NodeKind::TypeCast(cast) => self.node(cast.arg(), depth + 1),
            NodeKind::OrderBy(order) => self.node(order.field(), depth + 1),
            NodeKind::Join(join) => {
                self.node(join.left(), depth + 1);
                self.node(join.right(), depth + 1);
                self.slot(depth + 1, "condition", &opt(join.condition()));
            }
            NodeKind::Case(case) => {
                for (condition, result) in case.rules() {
                    self.slot(depth + 1, "when", &[condition]);
                    self.slot(depth + 1, "then", &[result]);
                }
                self.slot(depth + 1, "else", &opt(case.default()));
            }
            NodeKind::Select(select) => {
                let d = depth + 1;
                self.slot(d, "targets", &all(select.targets()));
                self.slot(d, "from_table", &opt(select.from_table()));
                self.slot(d, "where", &opt(select.where_clause()));
                self.slot(d, "group_by", &all(select.group_by()));
                self.slot(d, "having", &opt(select.having()));
                self.slot(d, "order_by", &all(select.order_by()));
                self.slot(d, "limit", &opt(select.limit()));
                self.slot(d, "offset", &opt(select.offset()));
            }
            NodeKind::Identifier(_)
            | NodeKind::Constant(_)
            | NodeKind::NullConstant
            | NodeKind::Variable(_)
            | NodeKind::Parameter => {}
        }
    }
}

fn opt(node: Option<&Node>) -> Vec<&Node> {
    node.into_iter().collect()
}

fn all(nodes: &[Node]) -> Vec<&Node> {
    nodes.iter().collect()
}

fn constant_attr(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format!("{f:?}"),
        Value::String(s) => format!("{s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Select;

    #[test]
    fn test_nested_operations() {
        let node = Node::binary(
            "*",
            Node::binary("+", Node::identifier("a"), Node::identifier("b")).with_parentheses(true),
            Node::constant(2),
        );
        assert_eq!(
            node.to_tree(),
            "BinaryOperation op=\"*\"\n\
             \x20 BinaryOperation op=\"+\" parentheses=true\n\
             \x20   Identifier value=\"a\"\n\
             \x20   Identifier value=\"b\"\n\
             \x20 Constant value=2\n"
        );
    }

    #[test]
    fn test_alias_and_strings() {
        let node = Node::constant("x").with_alias("label");
        assert_eq!(node.to_tree(), "Constant value=\"x\" alias=\"label\"\n");
    }

    #[test]
    fn test_select_slots() {
        let select = Select::new(vec![Node::identifier("a")])
            .unwrap()
            .with_from(Node::identifier("t"))
            .with_where(Node::constant(true));
        assert_eq!(
            Node::new(select).to_tree(),
            "Select\n\
             \x20 targets:\n\
             \x20   Identifier value=\"a\"\n\
             \x20 from_table:\n\
             \x20   Identifier value=\"t\"\n\
             \x20 where:\n\
             \x20   Constant value=true\n"
        );
    }

    #[test]
    fn test_tree_distinguishes_int_and_float() {
        assert_ne!(Node::constant(1).to_tree(), Node::constant(1.0).to_tree());
    }
}
