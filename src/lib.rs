//! # microcc
//!
//! A single-pass compiler front-end and x86-64 code generator for a small
//! C-like expression language. Source text is lexed into tokens, parsed
//! into an arena-backed AST organized around nested lexical scopes, every
//! identifier is resolved to a stack slot relative to its enclosing frame,
//! and GNU-assembler Intel-syntax x86-64 is emitted for a single `main`
//! entry function. The exit status of the compiled program is the value of
//! the last evaluated top-level expression.

// --- Core Modules ---
/// AST node structures and the structural source printer.
pub mod ast;
/// The code generation phase.
pub mod codegen;
/// The compiler phases and the main [`Compiler`] struct.
pub mod compiler;
/// Conditional logging for pipeline introspection.
pub mod debug;
/// Self-tests behind the `--test` flag.
pub mod selftest;
/// Shared containers.
pub mod util;

// --- Public Re-exports (The Compiler API) ---
pub use ast::{Node, NodeId, NodeKind, SyntaxTree};
pub use codegen::AssemblyGenerator;
pub use compiler::error::CompileError;
pub use compiler::scope::{ScopeTree, VariableAddress};
pub use compiler::{Compiler, compile, parse, tokenize};
pub use util::AssocList;
