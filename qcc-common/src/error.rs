//! Error handling for the Quartz C compiler
//!
//! This module defines the error type shared by all compiler phases.
//! The backend only ever produces `Internal` errors: everything else is
//! presumed precluded by the upstream parsing and semantic stages.

use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Semantic error: {message}")]
    SemanticError { message: String },

    #[error("Code generation error: {message}")]
    CodegenError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a codegen error
    pub fn codegen_error(message: impl Into<String>) -> Self {
        CompilerError::CodegenError {
            message: message.into(),
        }
    }

    /// Create an internal-consistency error. These are fatal: they mark a
    /// broken contract between compiler phases, not a user mistake.
    pub fn internal(message: impl Into<String>) -> Self {
        CompilerError::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Convert from String (for simple error cases)
impl From<String> for CompilerError {
    fn from(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}
