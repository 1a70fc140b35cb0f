//! Token cursor shared by the statement and expression parsers.

use crate::ast::SyntaxTree;
use crate::compiler::error::CompileError;
use crate::compiler::lexer::Token;

/// Mutable cursor into the token stream, plus the arena the parsers build
/// their nodes into.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    pub tree: SyntaxTree,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            tree: SyntaxTree::new(),
        }
    }

    /// The current token. The stream is `Eof`-terminated, so running off the
    /// end keeps answering `Eof`.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    pub fn check(&self, token: &Token) -> bool {
        self.peek() == token
    }

    pub fn is_at_end(&self) -> bool {
        *self.peek() == Token::Eof
    }

    /// Consumes `token` or fails with an unexpected-token diagnostic.
    pub fn expect(&mut self, token: &Token, hint: Option<&str>) -> Result<(), CompileError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(hint))
        }
    }

    /// A parse error quoting the current token kind and stream index.
    pub fn unexpected(&self, hint: Option<&str>) -> CompileError {
        let message = match hint {
            Some(hint) => format!("unexpected token {:?}. Hint: {hint}", self.peek()),
            None => format!("unexpected token {:?}", self.peek()),
        };
        CompileError::parse(self.pos, message)
    }
}
