//! # Expression Code Generator
//!
//! Emits the value-producing nodes. Every function here obeys the stack
//! discipline: the generated instructions leave exactly one 8-byte result
//! word on the runtime stack.
//!
//! Binary operands are evaluated left then right, so `pop rdi; pop rax`
//! yields `rax` = left and `rdi` = right, which lines up with the
//! non-commutative instruction forms (`sub rax, rdi`, `div rdi`).

use super::common::{CodeGenContext, expect_child, generate_node};
use crate::ast::{NodeId, NodeKind};
use crate::compiler::error::CompileError;

/// A static utility struct for emitting expression nodes.
pub struct ExpressionGenerator;

impl ExpressionGenerator {
    /// `push <val>` for a numeric literal.
    pub fn generate_number(context: &CodeGenContext, id: NodeId) -> String {
        format!("    push {}\n", context.ast.node(id).val)
    }

    /// Loads an identifier as an rvalue: address first, then one
    /// dereference.
    pub fn generate_identifier(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let mut asm = Self::generate_lvalue(context, id)?;
        asm.push_str("    pop rax\n");
        asm.push_str("    mov rax, [rax]\n");
        asm.push_str("    push rax\n");
        Ok(asm)
    }

    /// Pushes the address of a storage location. Only identifiers designate
    /// storage; anything else is fatal.
    ///
    /// The address is computed from `rbp` by chasing one saved base pointer
    /// per enclosing frame, then subtracting the slot offset.
    pub fn generate_lvalue(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let node = context.ast.node(id);
        if node.kind != NodeKind::Identifier {
            return Err(CompileError::codegen(format!(
                "expected an lvalue but found {:?}",
                node.kind
            )));
        }
        let address = context
            .scopes
            .variable_location(context.current_scope, &node.name)?;

        let mut asm = String::from("    mov rax, rbp\n");
        for _ in 0..address.scopes_up {
            asm.push_str("    mov rax, [rax]\n");
        }
        asm.push_str(&format!("    sub rax, {}\n", address.offset));
        asm.push_str("    push rax\n");
        Ok(asm)
    }

    pub fn generate_unary(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let kind = context.ast.node(id).kind;
        let child = expect_child(context.ast.node(id).middle, "operand")?;

        let mut asm = String::new();
        match kind {
            NodeKind::Negate => {
                asm.push_str(&generate_node(context, child)?);
                asm.push_str("    pop rax\n");
                asm.push_str("    neg rax\n");
                asm.push_str("    push rax\n");
            }
            // Nearly a no-op, but it coerces an lvalue to an rvalue.
            NodeKind::UnaryPlus => {
                asm.push_str(&generate_node(context, child)?);
            }
            NodeKind::BitComplement => {
                asm.push_str(&generate_node(context, child)?);
                asm.push_str("    pop rax\n");
                asm.push_str("    not rax\n");
                asm.push_str("    push rax\n");
            }
            NodeKind::LogicalNot => {
                asm.push_str(&generate_node(context, child)?);
                asm.push_str("    pop rax\n");
                asm.push_str("    cmp rax, 0\n");
                asm.push_str("    sete al\n");
                asm.push_str("    movzb rax, al\n");
                asm.push_str("    push rax\n");
            }
            NodeKind::PreIncrement | NodeKind::PreDecrement => {
                let step = if kind == NodeKind::PreIncrement { "inc" } else { "dec" };
                asm.push_str(&Self::generate_lvalue(context, child)?);
                asm.push_str("    pop rax\n");
                asm.push_str("    mov rdi, [rax]\n");
                asm.push_str(&format!("    {step} rdi\n"));
                asm.push_str("    mov [rax], rdi\n");
                // The new value is the result.
                asm.push_str("    push rdi\n");
            }
            NodeKind::PostIncrement | NodeKind::PostDecrement => {
                let step = if kind == NodeKind::PostIncrement { "inc" } else { "dec" };
                asm.push_str(&Self::generate_lvalue(context, child)?);
                asm.push_str("    pop rax\n");
                // The old value stays on the stack as the result.
                asm.push_str("    push qword ptr [rax]\n");
                asm.push_str("    mov rdi, [rax]\n");
                asm.push_str(&format!("    {step} rdi\n"));
                asm.push_str("    mov [rax], rdi\n");
            }
            _ => {
                return Err(CompileError::codegen(format!(
                    "unknown unary operation: {kind:?}"
                )));
            }
        }
        Ok(asm)
    }

    /// `lhs = rhs`: the left child's address and the right child's value,
    /// stored through the address. The value is pushed back so assignments
    /// chain.
    pub fn generate_assignment(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let target = expect_child(context.ast.node(id).left, "assignment target")?;
        let value = expect_child(context.ast.node(id).right, "assignment value")?;

        let mut asm = Self::generate_lvalue(context, target)?;
        asm.push_str(&generate_node(context, value)?);
        asm.push_str("    pop rdi\n");
        asm.push_str("    pop rax\n");
        asm.push_str("    mov [rax], rdi\n");
        asm.push_str("    push rdi\n");
        Ok(asm)
    }

    pub fn generate_binary(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let kind = context.ast.node(id).kind;
        let left = expect_child(context.ast.node(id).left, "left operand")?;
        let right = expect_child(context.ast.node(id).right, "right operand")?;

        let mut asm = generate_node(context, left)?;
        asm.push_str(&generate_node(context, right)?);
        asm.push_str("    pop rdi\n");
        asm.push_str("    pop rax\n");

        match kind {
            NodeKind::Multiply => {
                asm.push_str("    mul rdi\n");
            }
            NodeKind::Divide => {
                asm.push_str("    mov rdx, 0\n");
                asm.push_str("    div rdi\n");
            }
            NodeKind::Modulo => {
                asm.push_str("    mov rdx, 0\n");
                asm.push_str("    div rdi\n");
                // Full-width remainder out of rdx.
                asm.push_str("    mov rax, rdx\n");
            }
            NodeKind::Add => {
                asm.push_str("    add rax, rdi\n");
            }
            NodeKind::Subtract => {
                asm.push_str("    sub rax, rdi\n");
            }
            NodeKind::Equal
            | NodeKind::NotEqual
            | NodeKind::Less
            | NodeKind::Greater
            | NodeKind::LessEqual
            | NodeKind::GreaterEqual => {
                let set = match kind {
                    NodeKind::Equal => "sete",
                    NodeKind::NotEqual => "setne",
                    NodeKind::Less => "setl",
                    NodeKind::Greater => "setg",
                    NodeKind::LessEqual => "setle",
                    _ => "setge",
                };
                asm.push_str("    cmp rax, rdi\n");
                asm.push_str(&format!("    {set} al\n"));
                asm.push_str("    movzb rax, al\n");
            }
            _ => {
                return Err(CompileError::codegen(format!(
                    "unknown binary operation: {kind:?}"
                )));
            }
        }
        asm.push_str("    push rax\n");
        Ok(asm)
    }

    /// `cond ? a : b`. Same label shape as an if statement, but both
    /// branches are expressions that leave their value on the stack, so no
    /// pops are issued.
    pub fn generate_conditional(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let condition = expect_child(context.ast.node(id).left, "condition")?;
        let when_true = expect_child(context.ast.node(id).middle, "true branch")?;
        let when_false = expect_child(context.ast.node(id).right, "false branch")?;
        let label = context.next_label();

        let mut asm = generate_node(context, condition)?;
        asm.push_str("    pop rax\n");
        asm.push_str("    test rax, rax\n");
        asm.push_str(&format!("    jz cond_f_{label}\n"));
        asm.push_str(&generate_node(context, when_true)?);
        asm.push_str(&format!("    jmp cond_end_{label}\n"));
        asm.push_str(&format!("cond_f_{label}:\n"));
        asm.push_str(&generate_node(context, when_false)?);
        asm.push_str(&format!("cond_end_{label}:\n"));
        Ok(asm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, SyntaxTree};
    use crate::compiler::scope::ScopeTree;

    #[test]
    fn assigning_through_an_expression_is_fatal() {
        let mut tree = SyntaxTree::new();
        let one = tree.add(Node::number(1));
        let two = tree.add(Node::number(2));
        let sum = tree.add(Node::binary(NodeKind::Add, one, two));
        let three = tree.add(Node::number(3));
        let assign = tree.add(Node::binary(NodeKind::Assign, sum, three));

        let mut scopes = ScopeTree::new();
        let mut context = CodeGenContext::new(&mut tree, &mut scopes);
        let err = ExpressionGenerator::generate_assignment(&mut context, assign).unwrap_err();
        assert!(matches!(err, CompileError::Codegen { .. }));
    }

    #[test]
    fn enclosing_frames_cost_one_hop_each() {
        let mut tree = SyntaxTree::new();
        let ident = tree.add(Node::identifier("x".into()));

        let mut scopes = ScopeTree::new();
        scopes.declare_variable(ScopeTree::ROOT, "x");
        let child = scopes.new_scope(Some(ScopeTree::ROOT));

        let mut context = CodeGenContext::new(&mut tree, &mut scopes);
        context.current_scope = child;
        let asm = ExpressionGenerator::generate_lvalue(&mut context, ident).unwrap();
        assert_eq!(
            asm,
            "    mov rax, rbp\n    mov rax, [rax]\n    sub rax, 8\n    push rax\n"
        );
    }
}
