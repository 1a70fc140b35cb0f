//! # Compiler Module
//!
//! Orchestrates the phases: tokenize, build the scope tree from the raw
//! token stream, parse, and emit assembly. Data flows strictly forward;
//! the parser and the scope builder consume the same token sequence
//! independently, and the code generator walks the two resulting
//! structures in lock-step.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod scope;

pub use lexer::tokenize;
pub use parser::parse;
pub use scope::ScopeTree;

use crate::codegen::AssemblyGenerator;
use crate::debug::{self, PerfTimer};
use error::CompileError;
use std::path::PathBuf;

/// Compiles source text to GNU-assembler Intel-syntax x86-64.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let timer = PerfTimer::new("compile");

    let tokens = tokenize(source)?;
    debug::log_lexer(&format!("{} tokens", tokens.len()));

    let mut scopes = ScopeTree::from_tokens(&tokens)?;
    let (mut ast, program) = parse(&tokens)?;
    debug::log_parser(&format!("{} nodes", ast.len()));

    let asm = AssemblyGenerator::generate(&mut ast, &mut scopes, program)?;
    debug::log_codegen(&format!("{} lines of assembly", asm.lines().count()));

    timer.finish();
    Ok(asm)
}

/// Manages the compilation of one source file.
pub struct Compiler {
    /// The path to the source file to compile.
    pub source_path: PathBuf,
}

impl Compiler {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
        }
    }

    /// Reads the source file and compiles it, returning the assembly text.
    pub fn build(&self) -> Result<String, CompileError> {
        let source = std::fs::read_to_string(&self.source_path)?;
        compile(&source)
    }
}
