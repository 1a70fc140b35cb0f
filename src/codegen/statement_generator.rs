//! # Statement Code Generator
//!
//! Emits blocks, conditionals, the three loop forms and the jump
//! statements. This is where the lock-step walk of the scope tree happens:
//! entering a source-level block advances the scope cursor into the next
//! child scope, and leaving it steps back out and bumps the parent's
//! cursor.
//!
//! Loops allocate their break/continue labels here and link their body
//! block back to themselves, so the body's scope inherits the labels that
//! `break` and `continue` unwind to.

use super::common::{
    CodeGenContext, expect_child, generate_node, places_on_stack, scope_epilogue,
};
use crate::ast::{NodeId, NodeKind};
use crate::compiler::error::CompileError;

/// A static utility struct for emitting statement nodes.
pub struct StatementGenerator;

impl StatementGenerator {
    /// Emits a block: frame setup, each statement (popping the value of the
    /// value-producing ones), frame teardown.
    pub fn generate_scope(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let descend = context.ast.node(id).descend;
        if descend {
            context.current_scope = context
                .scopes
                .next_child_scope(context.current_scope)
                .ok_or_else(|| {
                    CompileError::codegen("block structure does not match the scope tree")
                })?;
        }

        // A loop links its body block to itself; the body's scope takes
        // over the loop's jump targets.
        if let Some(parent) = context.ast.node(id).parent {
            let parent_node = context.ast.node(parent);
            if matches!(
                parent_node.kind,
                NodeKind::While | NodeKind::DoWhile | NodeKind::For
            ) {
                let break_label = parent_node.break_label.clone();
                let continue_label = parent_node.continue_label.clone();
                let scope = context.scopes.scope_mut(context.current_scope);
                scope.break_label = break_label;
                scope.continue_label = continue_label;
            }
        }

        let locals = context.scopes.local_count(context.current_scope);
        let mut asm = String::new();
        asm.push_str("    push rbp\n");
        asm.push_str("    mov rbp, rsp\n");
        asm.push_str(&format!("    sub rsp, {}\n", locals * 8));

        let statements = context.ast.node(id).statements.clone();
        for statement in statements {
            asm.push_str(&generate_node(context, statement)?);
            if places_on_stack(context.ast.node(statement).kind) {
                asm.push_str("    pop rax\n");
            }
        }

        scope_epilogue(&mut asm);

        if descend {
            let parent = context
                .scopes
                .scope(context.current_scope)
                .parent
                .ok_or_else(|| {
                    CompileError::codegen("block structure does not match the scope tree")
                })?;
            context.current_scope = parent;
            context.scopes.scope_mut(parent).scopes_traversed += 1;
        }
        Ok(asm)
    }

    /// `if (cond) then else other`, popping each branch's value when the
    /// branch is an expression. The statement itself produces no value.
    pub fn generate_if(context: &mut CodeGenContext, id: NodeId) -> Result<String, CompileError> {
        let condition = expect_child(context.ast.node(id).left, "condition")?;
        let then_branch = expect_child(context.ast.node(id).middle, "then branch")?;
        let else_branch = expect_child(context.ast.node(id).right, "else branch")?;
        let label = context.next_label();

        let mut asm = generate_node(context, condition)?;
        asm.push_str("    pop rax\n");
        asm.push_str("    test rax, rax\n");
        asm.push_str(&format!("    jz cond_f_{label}\n"));
        asm.push_str(&generate_node(context, then_branch)?);
        if places_on_stack(context.ast.node(then_branch).kind) {
            asm.push_str("    pop rax\n");
        }
        asm.push_str(&format!("    jmp cond_end_{label}\n"));
        asm.push_str(&format!("cond_f_{label}:\n"));
        asm.push_str(&generate_node(context, else_branch)?);
        if places_on_stack(context.ast.node(else_branch).kind) {
            asm.push_str("    pop rax\n");
        }
        asm.push_str(&format!("cond_end_{label}:\n"));
        Ok(asm)
    }

    pub fn generate_while(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let condition = expect_child(context.ast.node(id).left, "loop condition")?;
        let body = expect_child(context.ast.node(id).right, "loop body")?;
        let label = context.next_label();
        {
            let node = context.ast.node_mut(id);
            node.break_label = Some(format!("wle_{label}"));
            node.continue_label = Some(format!("wlb_{label}"));
        }

        let mut asm = format!("wlb_{label}:\n");
        asm.push_str(&generate_node(context, condition)?);
        asm.push_str("    pop rax\n");
        asm.push_str("    test rax, rax\n");
        asm.push_str(&format!("    jz wle_{label}\n"));

        context.ast.node_mut(body).parent = Some(id);
        asm.push_str(&generate_node(context, body)?);
        if places_on_stack(context.ast.node(body).kind) {
            asm.push_str("    pop rax\n");
        }
        asm.push_str(&format!("    jmp wlb_{label}\n"));
        asm.push_str(&format!("wle_{label}:\n"));
        Ok(asm)
    }

    /// `do body while (cond);` with the condition evaluated after the body.
    /// `continue` targets the condition, `break` the end.
    pub fn generate_do_while(
        context: &mut CodeGenContext,
        id: NodeId,
    ) -> Result<String, CompileError> {
        let body = expect_child(context.ast.node(id).left, "loop body")?;
        let condition = expect_child(context.ast.node(id).right, "loop condition")?;
        let label = context.next_label();
        {
            let node = context.ast.node_mut(id);
            node.break_label = Some(format!("dwe_{label}"));
            node.continue_label = Some(format!("dwc_{label}"));
        }

        let mut asm = format!("dwb_{label}:\n");
        context.ast.node_mut(body).parent = Some(id);
        asm.push_str(&generate_node(context, body)?);
        if places_on_stack(context.ast.node(body).kind) {
            asm.push_str("    pop rax\n");
        }
        asm.push_str(&format!("dwc_{label}:\n"));
        asm.push_str(&generate_node(context, condition)?);
        asm.push_str("    pop rax\n");
        asm.push_str("    test rax, rax\n");
        asm.push_str(&format!("    jnz dwb_{label}\n"));
        asm.push_str(&format!("dwe_{label}:\n"));
        Ok(asm)
    }

    /// `for (init; cond; post) body`. An elided condition produces an
    /// unconditional loop; `continue` re-enters at the condition.
    pub fn generate_for(context: &mut CodeGenContext, id: NodeId) -> Result<String, CompileError> {
        let init = expect_child(context.ast.node(id).left, "loop initializer")?;
        let condition = expect_child(context.ast.node(id).middle, "loop condition")?;
        let post = expect_child(context.ast.node(id).right, "loop post-expression")?;
        let body = expect_child(context.ast.node(id).extra, "loop body")?;
        let label = context.next_label();
        {
            let node = context.ast.node_mut(id);
            node.break_label = Some(format!("fle_{label}"));
            node.continue_label = Some(format!("flc_{label}"));
        }

        let mut asm = generate_node(context, init)?;
        if places_on_stack(context.ast.node(init).kind) {
            asm.push_str("    pop rax\n");
        }
        asm.push_str(&format!("flc_{label}:\n"));
        asm.push_str(&generate_node(context, condition)?);
        if places_on_stack(context.ast.node(condition).kind) {
            asm.push_str("    pop rax\n");
            asm.push_str("    test rax, rax\n");
            asm.push_str(&format!("    jz fle_{label}\n"));
        }

        context.ast.node_mut(body).parent = Some(id);
        asm.push_str(&generate_node(context, body)?);
        if places_on_stack(context.ast.node(body).kind) {
            asm.push_str("    pop rax\n");
        }
        asm.push_str(&generate_node(context, post)?);
        if places_on_stack(context.ast.node(post).kind) {
            asm.push_str("    pop rax\n");
        }
        asm.push_str(&format!("    jmp flc_{label}\n"));
        asm.push_str(&format!("fle_{label}:\n"));
        Ok(asm)
    }

    /// `break` and `continue`: climb the runtime scope chain to the nearest
    /// scope carrying the matching label, tear down one frame per scope
    /// crossed, and jump. Outside any loop this is a warning, not an error.
    pub fn generate_jump_out(
        context: &mut CodeGenContext,
        kind: NodeKind,
    ) -> Result<String, CompileError> {
        let mut scopes_to_unwind = 1;
        let mut scope = context.current_scope;
        let target = loop {
            let current = context.scopes.scope(scope);
            let label = match kind {
                NodeKind::Break => current.break_label.clone(),
                _ => current.continue_label.clone(),
            };
            if let Some(label) = label {
                break label;
            }
            match current.parent {
                Some(parent) => {
                    scope = parent;
                    scopes_to_unwind += 1;
                }
                None => {
                    let keyword = if kind == NodeKind::Break { "break" } else { "continue" };
                    eprintln!(
                        "warning: could not find a scope to {keyword} from; \
                         treating '{keyword}' as a no-op"
                    );
                    return Ok(String::new());
                }
            }
        };

        let mut asm = String::new();
        for _ in 0..scopes_to_unwind {
            scope_epilogue(&mut asm);
        }
        asm.push_str(&format!("    jmp {target}\n"));
        Ok(asm)
    }
}
