//! # Statement Parser
//!
//! Parses statement-level constructs: blocks, conditionals, the three loop
//! forms, the jump statements and plain expression statements. Expression
//! parsing is delegated to the [`ExpressionParser`].

use super::common::Parser;
use super::expression_parser::ExpressionParser;
use crate::ast::{Node, NodeId, NodeKind};
use crate::compiler::error::CompileError;
use crate::compiler::lexer::Token;

const SEMICOLON_HINT: &str = "you may be missing a semicolon";

/// A static utility struct dedicated to parsing statements.
pub struct StatementParser;

impl StatementParser {
    /// Builds the synthetic top-level block. It has no `{` in the source,
    /// so the code generator must not descend into a child scope for it.
    pub fn parse_program(parser: &mut Parser) -> Result<NodeId, CompileError> {
        let mut statements = Vec::new();
        while !parser.is_at_end() {
            statements.push(Self::parse_statement(parser)?);
        }
        Ok(parser.tree.add(Node::scope(statements, false)))
    }

    pub fn parse_statement(parser: &mut Parser) -> Result<NodeId, CompileError> {
        match parser.peek() {
            Token::BraceOpen => Self::parse_block(parser),
            Token::Semicolon => {
                parser.advance();
                Ok(parser.tree.add(Node::leaf(NodeKind::Noop)))
            }
            Token::Break => {
                parser.advance();
                parser.expect(&Token::Semicolon, Some(SEMICOLON_HINT))?;
                Ok(parser.tree.add(Node::leaf(NodeKind::Break)))
            }
            Token::Continue => {
                parser.advance();
                parser.expect(&Token::Semicolon, Some(SEMICOLON_HINT))?;
                Ok(parser.tree.add(Node::leaf(NodeKind::Continue)))
            }
            Token::If => Self::parse_if(parser),
            Token::While => Self::parse_while(parser),
            Token::Do => Self::parse_do_while(parser),
            Token::For => Self::parse_for(parser),
            Token::Goto => Err(parser.unexpected(Some("'goto' is not yet implemented"))),
            Token::Label(_) => Err(parser.unexpected(Some("labels are not yet implemented"))),
            _ => {
                let expression = ExpressionParser::parse_expression(parser)?;
                parser.expect(&Token::Semicolon, Some(SEMICOLON_HINT))?;
                Ok(expression)
            }
        }
    }

    /// `{` statements `}` as a block that descends into its own scope.
    fn parse_block(parser: &mut Parser) -> Result<NodeId, CompileError> {
        parser.advance();
        let mut statements = Vec::new();
        while !parser.check(&Token::BraceClose) && !parser.is_at_end() {
            statements.push(Self::parse_statement(parser)?);
        }
        parser.expect(&Token::BraceClose, None)?;
        Ok(parser.tree.add(Node::scope(statements, true)))
    }

    /// `if ( expr ) stmt` with an optional `else stmt`. A missing else
    /// branch becomes a noop so the node always has three children.
    fn parse_if(parser: &mut Parser) -> Result<NodeId, CompileError> {
        parser.advance();
        parser.expect(&Token::ParenOpen, None)?;
        let condition = ExpressionParser::parse_expression(parser)?;
        parser.expect(
            &Token::ParenClose,
            Some("make sure all parentheses are properly enclosed"),
        )?;
        let then_branch = Self::parse_statement(parser)?;
        let else_branch = if parser.check(&Token::Else) {
            parser.advance();
            Self::parse_statement(parser)?
        } else {
            parser.tree.add(Node::leaf(NodeKind::Noop))
        };
        Ok(parser.tree.add(Node::ternary(
            NodeKind::If,
            condition,
            then_branch,
            else_branch,
        )))
    }

    fn parse_while(parser: &mut Parser) -> Result<NodeId, CompileError> {
        parser.advance();
        parser.expect(&Token::ParenOpen, None)?;
        let condition = ExpressionParser::parse_expression(parser)?;
        parser.expect(
            &Token::ParenClose,
            Some("make sure all parentheses are properly enclosed"),
        )?;
        let body = Self::parse_statement(parser)?;
        Ok(parser
            .tree
            .add(Node::binary(NodeKind::While, condition, body)))
    }

    fn parse_do_while(parser: &mut Parser) -> Result<NodeId, CompileError> {
        parser.advance();
        let body = Self::parse_statement(parser)?;
        parser.expect(&Token::While, Some("a 'do' body must be followed by 'while'"))?;
        parser.expect(&Token::ParenOpen, None)?;
        let condition = ExpressionParser::parse_expression(parser)?;
        parser.expect(
            &Token::ParenClose,
            Some("make sure all parentheses are properly enclosed"),
        )?;
        parser.expect(&Token::Semicolon, Some(SEMICOLON_HINT))?;
        Ok(parser
            .tree
            .add(Node::binary(NodeKind::DoWhile, body, condition)))
    }

    /// `for ( init ; cond ; post ) body`. Each header clause may be empty;
    /// an empty condition makes the loop unconditional.
    fn parse_for(parser: &mut Parser) -> Result<NodeId, CompileError> {
        parser.advance();
        parser.expect(&Token::ParenOpen, None)?;

        let init = if parser.check(&Token::Semicolon) {
            parser.tree.add(Node::leaf(NodeKind::Noop))
        } else {
            ExpressionParser::parse_expression(parser)?
        };
        parser.expect(&Token::Semicolon, Some(SEMICOLON_HINT))?;

        let condition = if parser.check(&Token::Semicolon) {
            parser.tree.add(Node::leaf(NodeKind::Noop))
        } else {
            ExpressionParser::parse_expression(parser)?
        };
        parser.expect(&Token::Semicolon, Some(SEMICOLON_HINT))?;

        let post = if parser.check(&Token::ParenClose) {
            parser.tree.add(Node::leaf(NodeKind::Noop))
        } else {
            ExpressionParser::parse_expression(parser)?
        };
        parser.expect(
            &Token::ParenClose,
            Some("make sure all parentheses are properly enclosed"),
        )?;

        let body = Self::parse_statement(parser)?;
        Ok(parser
            .tree
            .add(Node::quaternary(NodeKind::For, init, condition, post, body)))
    }
}
