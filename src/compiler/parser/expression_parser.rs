//! # Expression Parser
//!
//! Recursive descent over the C operator-precedence hierarchy, thirteen
//! tiers from primary expressions down to the conditional operator. The
//! shift, bitwise and logical tiers are not populated yet; they pass the
//! parse through unchanged and hold their precedence slot open.
//!
//! Prefix operators and the conditional are right-associative by recursion
//! at the same tier. The implemented binary tiers recurse on their own tier
//! for the right-hand side as well, so they parse right-associatively.

use super::common::Parser;
use crate::ast::{Node, NodeId, NodeKind};
use crate::compiler::error::CompileError;
use crate::compiler::lexer::Token;

/// A static utility struct dedicated to parsing expressions.
pub struct ExpressionParser;

impl ExpressionParser {
    /// The entry point for any expression. After the conditional tier, a
    /// `=` chains another full expression as the right-hand side, so
    /// `x = y = 1` assigns right to left. Whether the left-hand side is a
    /// valid assignment target is decided by the code generator.
    pub fn parse_expression(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let lhs = Self::parse_conditional(parser)?;
        if parser.check(&Token::Assign) {
            parser.advance();
            let rhs = Self::parse_expression(parser)?;
            return Ok(parser.tree.add(Node::binary(NodeKind::Assign, lhs, rhs)));
        }
        Ok(lhs)
    }

    /// `cond ? then : else`, requiring the literal `:`.
    fn parse_conditional(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let condition = Self::parse_logical_or(parser)?;
        if !parser.check(&Token::Question) {
            return Ok(condition);
        }
        parser.advance();
        let when_true = Self::parse_conditional(parser)?;
        parser.expect(
            &Token::Colon,
            Some("a '?' must be followed by both branches separated by ':'"),
        )?;
        let when_false = Self::parse_conditional(parser)?;
        Ok(parser.tree.add(Node::ternary(
            NodeKind::Ternary,
            condition,
            when_true,
            when_false,
        )))
    }

    // Logical `||`: reserved, passes through.
    fn parse_logical_or(parser: &mut Parser) -> Result<NodeId, CompileError> {
        Self::parse_logical_and(parser)
    }

    // Logical `&&`: reserved, passes through.
    fn parse_logical_and(parser: &mut Parser) -> Result<NodeId, CompileError> {
        Self::parse_bitwise_or(parser)
    }

    // Bitwise `|`: reserved, passes through.
    fn parse_bitwise_or(parser: &mut Parser) -> Result<NodeId, CompileError> {
        Self::parse_bitwise_xor(parser)
    }

    // Bitwise `^`: reserved, passes through.
    fn parse_bitwise_xor(parser: &mut Parser) -> Result<NodeId, CompileError> {
        Self::parse_bitwise_and(parser)
    }

    // Bitwise `&`: reserved, passes through.
    fn parse_bitwise_and(parser: &mut Parser) -> Result<NodeId, CompileError> {
        Self::parse_equality(parser)
    }

    fn parse_equality(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let lhs = Self::parse_relational(parser)?;
        let kind = match parser.peek() {
            Token::Equal => NodeKind::Equal,
            Token::NotEqual => NodeKind::NotEqual,
            _ => return Ok(lhs),
        };
        parser.advance();
        let rhs = Self::parse_equality(parser)?;
        Ok(parser.tree.add(Node::binary(kind, lhs, rhs)))
    }

    fn parse_relational(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let lhs = Self::parse_shift(parser)?;
        let kind = match parser.peek() {
            Token::Less => NodeKind::Less,
            Token::Greater => NodeKind::Greater,
            Token::LessEqual => NodeKind::LessEqual,
            Token::GreaterEqual => NodeKind::GreaterEqual,
            _ => return Ok(lhs),
        };
        parser.advance();
        let rhs = Self::parse_relational(parser)?;
        Ok(parser.tree.add(Node::binary(kind, lhs, rhs)))
    }

    // Shift `<<`/`>>`: reserved, passes through.
    fn parse_shift(parser: &mut Parser) -> Result<NodeId, CompileError> {
        Self::parse_additive(parser)
    }

    fn parse_additive(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let lhs = Self::parse_multiplicative(parser)?;
        let kind = match parser.peek() {
            Token::Plus => NodeKind::Add,
            Token::Minus => NodeKind::Subtract,
            _ => return Ok(lhs),
        };
        parser.advance();
        let rhs = Self::parse_additive(parser)?;
        Ok(parser.tree.add(Node::binary(kind, lhs, rhs)))
    }

    fn parse_multiplicative(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let lhs = Self::parse_unary(parser)?;
        let kind = match parser.peek() {
            Token::Star => NodeKind::Multiply,
            Token::Slash => NodeKind::Divide,
            Token::Percent => NodeKind::Modulo,
            _ => return Ok(lhs),
        };
        parser.advance();
        let rhs = Self::parse_multiplicative(parser)?;
        Ok(parser.tree.add(Node::binary(kind, lhs, rhs)))
    }

    /// Prefix operators recurse on this tier, so they stack right to left.
    /// A primary expression may carry one postfix `++`/`--`.
    fn parse_unary(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let kind = match parser.peek() {
            Token::Minus => Some(NodeKind::Negate),
            Token::Plus => Some(NodeKind::UnaryPlus),
            Token::Tilde => Some(NodeKind::BitComplement),
            Token::Bang => Some(NodeKind::LogicalNot),
            Token::Increment => Some(NodeKind::PreIncrement),
            Token::Decrement => Some(NodeKind::PreDecrement),
            _ => None,
        };
        if let Some(kind) = kind {
            parser.advance();
            let child = Self::parse_unary(parser)?;
            return Ok(parser.tree.add(Node::unary(kind, child)));
        }

        let primary = Self::parse_primary(parser)?;
        let postfix = match parser.peek() {
            Token::Increment => Some(NodeKind::PostIncrement),
            Token::Decrement => Some(NodeKind::PostDecrement),
            _ => None,
        };
        if let Some(kind) = postfix {
            parser.advance();
            return Ok(parser.tree.add(Node::unary(kind, primary)));
        }
        Ok(primary)
    }

    fn parse_primary(parser: &mut Parser) -> Result<NodeId, CompileError> {
        match parser.peek().clone() {
            Token::Num(val) => {
                parser.advance();
                Ok(parser.tree.add(Node::number(val)))
            }
            Token::Ident(name) => {
                parser.advance();
                Ok(parser.tree.add(Node::identifier(name)))
            }
            Token::ParenOpen => {
                parser.advance();
                let inner = Self::parse_expression(parser)?;
                parser.expect(
                    &Token::ParenClose,
                    Some("make sure all parentheses are properly enclosed"),
                )?;
                Ok(inner)
            }
            _ => Err(parser.unexpected(None)),
        }
    }
}
