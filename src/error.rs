//! Error types for the mordant CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for mordant operations.
///
/// Each variant maps to a specific exit code so that scripts wrapping the
/// CLI can distinguish bad invocations from bad configuration files.
#[derive(Error, Debug)]
pub enum MordantError {
    /// User provided invalid arguments or referenced something that does not exist.
    #[error("{0}")]
    UserError(String),

    /// The configuration file violates the documented grammar.
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// The configuration parsed but failed validation.
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl MordantError {
    /// Build a parse error for a specific input line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        MordantError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MordantError::UserError(_) => exit_codes::USER_ERROR,
            MordantError::ParseError { .. } => exit_codes::PARSE_FAILURE,
            MordantError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
        }
    }
}

/// Result type alias for mordant operations.
pub type Result<T> = std::result::Result<T, MordantError>;
