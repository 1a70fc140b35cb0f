//! # Program Code Generator
//!
//! Wraps the tree walk in the fixed program frame: the assembler
//! directives, the `main` entry point, and the final `ret`. The value of
//! the last evaluated top-level expression lands in `rax` through the
//! top-level block's statement pops, so it becomes the process exit
//! status.

use super::common::{self, CodeGenContext};
use crate::ast::{NodeId, SyntaxTree};
use crate::compiler::error::CompileError;
use crate::compiler::scope::ScopeTree;

/// The entry point of the emission phase.
pub struct AssemblyGenerator;

impl AssemblyGenerator {
    /// Emits the whole program as GNU-assembler Intel-syntax text.
    ///
    /// Generation is repeatable: the context rewinds the scope tree's
    /// traversal cursors, so calling this twice on the same structures
    /// produces byte-identical output.
    pub fn generate(
        ast: &mut SyntaxTree,
        scopes: &mut ScopeTree,
        program: NodeId,
    ) -> Result<String, CompileError> {
        let mut context = CodeGenContext::new(ast, scopes);

        let mut asm = String::new();
        asm.push_str(".intel_syntax noprefix\n");
        asm.push_str(".global main\n");
        asm.push_str("main:\n");
        asm.push_str(&common::generate_node(&mut context, program)?);
        asm.push_str("    ret\n");
        Ok(asm)
    }
}
