//! Lexical error types.
//!
//! Every lexical error is fatal to the translation; there is no recovery.

use thiserror::Error;

/// Error type for tokenization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A string literal ran to the end of the input without a closing quote.
    #[error("unterminated string starting on line {line}")]
    UnterminatedString { line: u32 },

    /// A `--` comment reached the end of the input without a newline.
    #[error("comment without trailing newline on line {line}")]
    UnterminatedComment { line: u32 },

    /// The source contains a NUL byte.
    #[error("source contains a NUL byte on line {line}")]
    NulByte { line: u32 },
}

/// Result type alias for lexing operations.
pub type LexResult<T> = std::result::Result<T, LexError>;
