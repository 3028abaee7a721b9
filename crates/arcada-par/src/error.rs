//! Syntactic error types.
//!
//! The translator has no error recovery: the first syntactic surprise
//! aborts the translation. Errors render in the fixed diagnostic shape
//! `unexpected <token> (expected <what>)`.

use arcada_lex::{Keyword, LexError};
use thiserror::Error;

/// Error type for parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A lexical error surfaced while pulling the next token.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token under the cursor does not fit the production being parsed.
    #[error("unexpected {found} (expected {expected})")]
    Unexpected { found: String, expected: String },

    /// A keyword in statement position that no statement production accepts.
    #[error("unknown keyword statement: `{keyword}`")]
    UnknownKeywordStatement { keyword: Keyword },
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
