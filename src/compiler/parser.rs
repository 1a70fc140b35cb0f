//! # Parser Module
//!
//! Turns the linear token stream into the arena-backed AST. The grammar is
//! recursive descent over thirteen precedence tiers; statements and
//! expressions live in dedicated sub-modules sharing one token cursor.
//!
//! The parser does not attempt recovery: the first syntactic violation
//! aborts with a diagnostic quoting the offending token kind and its index
//! in the stream.

pub mod common;
pub mod expression_parser;
pub mod statement_parser;

use crate::ast::{NodeId, SyntaxTree};
use crate::compiler::error::CompileError;
use crate::compiler::lexer::Token;
use common::Parser;
use statement_parser::StatementParser;

/// Parses the token stream, returning the node arena and the id of the
/// synthetic top-level block.
pub fn parse(tokens: &[Token]) -> Result<(SyntaxTree, NodeId), CompileError> {
    let mut parser = Parser::new(tokens);
    let program = StatementParser::parse_program(&mut parser)?;
    Ok((parser.tree, program))
}
