//! # Code Generation Module
//!
//! Translates the AST into GNU-assembler Intel-syntax x86-64, walking the
//! scope tree in lock-step with the block structure of the program.
//!
//! Key components:
//! - **Common Context**: node arena, scope cursor and the shared label
//!   counter, plus the stack-balance predicate.
//! - **Generators**: specialized emission logic for expression-shaped and
//!   statement-shaped nodes.
//! - **Program Generator**: the outer frame (`main`, prologue, `ret`).

pub mod common;
pub mod expression_generator;
pub mod program_generator;
pub mod statement_generator;

pub use program_generator::AssemblyGenerator;
