//! # Compiler Error Definitions
//!
//! This module centralizes the error taxonomy of the compiler. Every phase
//! reports exactly one of five disjoint error kinds, and each kind maps to a
//! distinct process exit code so the surrounding tooling can tell phases
//! apart without parsing messages.
//!
//! It leverages the `thiserror` crate to keep the reporting terse.

use thiserror::Error;

/// The primary error enumeration for the compiler.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Wrapper for standard I/O errors (e.g., an unreadable source file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors raised while turning the byte stream into tokens.
    #[error("tokenize error: {message}")]
    Tokenize { message: String },

    /// Syntax errors raised by the parser, with the token stream index.
    #[error("parse error at token {position}: {message}")]
    Parse { position: usize, message: String },

    /// Errors in the scope structure: mismatched braces or a variable that
    /// cannot be resolved from its point of use.
    #[error("scope error: {message}")]
    Scope { message: String },

    /// Errors raised while emitting assembly, such as assigning through a
    /// non-identifier.
    #[error("codegen error: {message}")]
    Codegen { message: String },

    /// Bad command-line usage.
    #[error("usage error: {message}")]
    Usage { message: String },
}

impl CompileError {
    /// Constructs a tokenize-phase error.
    pub fn tokenize(message: impl Into<String>) -> Self {
        Self::Tokenize {
            message: message.into(),
        }
    }

    /// Constructs a parse error anchored to a token stream index.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Constructs a scope-structure error.
    pub fn scope(message: impl Into<String>) -> Self {
        Self::Scope {
            message: message.into(),
        }
    }

    /// Constructs a code-generation error.
    pub fn codegen(message: impl Into<String>) -> Self {
        Self::Codegen {
            message: message.into(),
        }
    }

    /// Constructs a command-line usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// The process exit code for this error kind.
    ///
    /// 1 tokenize, 2 parse, 3 codegen, 4 scope, 5 external.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Tokenize { .. } => 1,
            Self::Parse { .. } => 2,
            Self::Codegen { .. } => 3,
            Self::Scope { .. } => 4,
            Self::Io(_) | Self::Usage { .. } => 5,
        }
    }
}
