//! Structural source printer.
//!
//! Renders a parsed tree back to source text. Expressions are fully
//! parenthesized, so the printed form re-parses to a structurally identical
//! tree; blocks and statement keywords print in canonical one-per-line form.

use crate::ast::nodes::{NodeId, NodeKind, SyntaxTree};

/// Prints the program rooted at `program` (the synthetic top-level scope)
/// as re-parseable source text.
pub fn to_source(tree: &SyntaxTree, program: NodeId) -> String {
    let mut out = String::new();
    for &stmt in &tree.node(program).statements {
        write_statement(tree, stmt, &mut out);
        out.push('\n');
    }
    out
}

fn write_statement(tree: &SyntaxTree, id: NodeId, out: &mut String) {
    let node = tree.node(id);
    match node.kind {
        NodeKind::Scope => {
            out.push_str("{ ");
            for &stmt in &node.statements {
                write_statement(tree, stmt, out);
                out.push(' ');
            }
            out.push('}');
        }
        NodeKind::Noop => out.push(';'),
        NodeKind::Break => out.push_str("break;"),
        NodeKind::Continue => out.push_str("continue;"),
        NodeKind::If => {
            out.push_str("if (");
            write_expression(tree, node.left, out);
            out.push_str(") ");
            write_statement_slot(tree, node.middle, out);
            out.push_str(" else ");
            write_statement_slot(tree, node.right, out);
        }
        NodeKind::While => {
            out.push_str("while (");
            write_expression(tree, node.left, out);
            out.push_str(") ");
            write_statement_slot(tree, node.right, out);
        }
        NodeKind::DoWhile => {
            out.push_str("do ");
            write_statement_slot(tree, node.left, out);
            out.push_str(" while (");
            write_expression(tree, node.right, out);
            out.push_str(");");
        }
        NodeKind::For => {
            out.push_str("for (");
            write_optional_expression(tree, node.left, out);
            out.push_str("; ");
            write_optional_expression(tree, node.middle, out);
            out.push_str("; ");
            write_optional_expression(tree, node.right, out);
            out.push_str(") ");
            write_statement_slot(tree, node.extra, out);
        }
        _ => {
            write_expression(tree, Some(id), out);
            out.push(';');
        }
    }
}

fn write_statement_slot(tree: &SyntaxTree, slot: Option<NodeId>, out: &mut String) {
    match slot {
        Some(id) => write_statement(tree, id, out),
        None => out.push(';'),
    }
}

// `for` headers print an empty string for an elided clause.
fn write_optional_expression(tree: &SyntaxTree, slot: Option<NodeId>, out: &mut String) {
    if let Some(id) = slot {
        if tree.node(id).kind != NodeKind::Noop {
            write_expression(tree, Some(id), out);
        }
    }
}

fn write_expression(tree: &SyntaxTree, slot: Option<NodeId>, out: &mut String) {
    let Some(id) = slot else {
        return;
    };
    let node = tree.node(id);
    match node.kind {
        NodeKind::Number => out.push_str(&node.val.to_string()),
        NodeKind::Identifier => out.push_str(&node.name),
        NodeKind::Negate
        | NodeKind::UnaryPlus
        | NodeKind::BitComplement
        | NodeKind::LogicalNot
        | NodeKind::PreIncrement
        | NodeKind::PreDecrement => {
            out.push('(');
            out.push_str(prefix_operator(node.kind));
            write_expression(tree, node.middle, out);
            out.push(')');
        }
        NodeKind::PostIncrement => {
            out.push('(');
            write_expression(tree, node.middle, out);
            out.push_str("++)");
        }
        NodeKind::PostDecrement => {
            out.push('(');
            write_expression(tree, node.middle, out);
            out.push_str("--)");
        }
        NodeKind::Ternary => {
            out.push('(');
            write_expression(tree, node.left, out);
            out.push_str(" ? ");
            write_expression(tree, node.middle, out);
            out.push_str(" : ");
            write_expression(tree, node.right, out);
            out.push(')');
        }
        _ => {
            out.push('(');
            write_expression(tree, node.left, out);
            out.push(' ');
            out.push_str(infix_operator(node.kind));
            out.push(' ');
            write_expression(tree, node.right, out);
            out.push(')');
        }
    }
}

fn prefix_operator(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Negate => "-",
        NodeKind::UnaryPlus => "+",
        NodeKind::BitComplement => "~",
        NodeKind::LogicalNot => "!",
        NodeKind::PreIncrement => "++",
        NodeKind::PreDecrement => "--",
        _ => "?",
    }
}

fn infix_operator(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Multiply => "*",
        NodeKind::Divide => "/",
        NodeKind::Modulo => "%",
        NodeKind::Add => "+",
        NodeKind::Subtract => "-",
        NodeKind::Less => "<",
        NodeKind::Greater => ">",
        NodeKind::LessEqual => "<=",
        NodeKind::GreaterEqual => ">=",
        NodeKind::Equal => "==",
        NodeKind::NotEqual => "!=",
        NodeKind::Assign => "=",
        _ => "?",
    }
}
