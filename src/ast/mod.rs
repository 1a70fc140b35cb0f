//! Abstract syntax tree: node definitions and the structural source printer.

pub mod nodes;
pub mod printer;

pub use nodes::{Node, NodeId, NodeKind, SyntaxTree};
