//! # Code Generation Context
//!
//! Shared state for the emission phase: the node arena, the scope tree with
//! its traversal cursor, and the label counter. Every generator function
//! appends to a `String` so the caller controls where the assembly goes.
//!
//! The emission discipline is a stack machine over the x86-64 runtime
//! stack. Evaluating any value-producing node pushes exactly one 8-byte
//! word; statement-shaped nodes push nothing. [`places_on_stack`] is the
//! decision procedure, and whoever sequences child statements pops one word
//! after each value-producing child to keep the stack balanced.

use super::expression_generator::ExpressionGenerator;
use super::statement_generator::StatementGenerator;
use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::compiler::error::CompileError;
use crate::compiler::scope::{ScopeId, ScopeTree};

/// Mutable state threaded through the whole emission.
pub struct CodeGenContext<'a> {
    pub ast: &'a mut SyntaxTree,
    pub scopes: &'a mut ScopeTree,
    /// The runtime scope the generator is currently emitting inside of.
    pub current_scope: ScopeId,
    labels_generated: usize,
}

impl<'a> CodeGenContext<'a> {
    /// Creates a fresh context positioned at the root scope. The scope
    /// tree's traversal cursors are rewound so repeated generation from the
    /// same structures produces identical output.
    pub fn new(ast: &'a mut SyntaxTree, scopes: &'a mut ScopeTree) -> Self {
        scopes.reset_traversal();
        Self {
            ast,
            scopes,
            current_scope: ScopeTree::ROOT,
            labels_generated: 0,
        }
    }

    /// Allocates the next label index. The counter is shared by every label
    /// kind and strictly increases over the compilation.
    pub fn next_label(&mut self) -> usize {
        let label = self.labels_generated;
        self.labels_generated += 1;
        label
    }
}

/// Whether evaluating a node of this kind leaves one word on the stack.
///
/// The enumeration is deliberately exhaustive: a new node kind must be
/// placed in one of the two arms, or callers would emit spurious pops.
pub fn places_on_stack(kind: NodeKind) -> bool {
    match kind {
        NodeKind::Scope
        | NodeKind::While
        | NodeKind::If
        | NodeKind::DoWhile
        | NodeKind::For
        | NodeKind::Break
        | NodeKind::Continue
        | NodeKind::Noop => false,
        NodeKind::Number
        | NodeKind::Identifier
        | NodeKind::Negate
        | NodeKind::UnaryPlus
        | NodeKind::BitComplement
        | NodeKind::LogicalNot
        | NodeKind::PreIncrement
        | NodeKind::PreDecrement
        | NodeKind::PostIncrement
        | NodeKind::PostDecrement
        | NodeKind::Multiply
        | NodeKind::Divide
        | NodeKind::Modulo
        | NodeKind::Add
        | NodeKind::Subtract
        | NodeKind::Less
        | NodeKind::Greater
        | NodeKind::LessEqual
        | NodeKind::GreaterEqual
        | NodeKind::Equal
        | NodeKind::NotEqual
        | NodeKind::Assign
        | NodeKind::Ternary => true,
    }
}

/// Frame teardown for one scope.
pub fn scope_epilogue(asm: &mut String) {
    asm.push_str("    mov rsp, rbp\n");
    asm.push_str("    pop rbp\n");
}

/// Unwraps a child slot the parser is supposed to have filled.
pub fn expect_child(slot: Option<NodeId>, what: &str) -> Result<NodeId, CompileError> {
    slot.ok_or_else(|| CompileError::codegen(format!("malformed node: missing {what}")))
}

/// Emits one node, dispatching first on arity and then on kind.
pub fn generate_node(
    context: &mut CodeGenContext,
    id: NodeId,
) -> Result<String, CompileError> {
    let (arity, kind) = {
        let node = context.ast.node(id);
        (node.arity, node.kind)
    };

    match arity {
        4 => match kind {
            NodeKind::For => StatementGenerator::generate_for(context, id),
            _ => Err(CompileError::codegen(format!(
                "unknown quaternary operation: {kind:?}"
            ))),
        },
        3 => match kind {
            NodeKind::If => StatementGenerator::generate_if(context, id),
            NodeKind::Ternary => ExpressionGenerator::generate_conditional(context, id),
            _ => Err(CompileError::codegen(format!(
                "unknown ternary operation: {kind:?}"
            ))),
        },
        2 => match kind {
            NodeKind::While => StatementGenerator::generate_while(context, id),
            NodeKind::DoWhile => StatementGenerator::generate_do_while(context, id),
            NodeKind::Assign => ExpressionGenerator::generate_assignment(context, id),
            _ => ExpressionGenerator::generate_binary(context, id),
        },
        1 => ExpressionGenerator::generate_unary(context, id),
        0 => match kind {
            NodeKind::Scope => StatementGenerator::generate_scope(context, id),
            NodeKind::Break | NodeKind::Continue => {
                StatementGenerator::generate_jump_out(context, kind)
            }
            NodeKind::Noop => Ok(String::new()),
            NodeKind::Number => Ok(ExpressionGenerator::generate_number(context, id)),
            NodeKind::Identifier => ExpressionGenerator::generate_identifier(context, id),
            _ => Err(CompileError::codegen(format!(
                "unexpected arity {arity} for node of kind {kind:?}"
            ))),
        },
        _ => Err(CompileError::codegen(format!(
            "unexpected arity {arity} for node of kind {kind:?}"
        ))),
    }
}
