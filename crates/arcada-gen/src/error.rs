//! Error types for C code generation.

use thiserror::Error;

/// Error type for the generator.
///
/// Structural mistakes the parser cannot see (stray chain markers, text
/// left behind in the expression buffer) surface here; everything is fatal
/// to the translation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenError {
    /// An `elsif` marker outside the body of an `if`.
    #[error("`elsif` without a matching `if`")]
    ElsifOutsideIf,

    /// An `else` marker outside the body of an `if`.
    #[error("`else` without a matching `if`")]
    ElseOutsideIf,

    /// An `elsif` marker after the chain's `else`.
    #[error("`elsif` after `else` in the same chain")]
    ElsifAfterElse,

    /// A second `else` in the same chain.
    #[error("more than one `else` in the same chain")]
    DuplicateElse,

    /// A statement finished emission but left text in the value buffer.
    #[error("unused code in emitter value buffer: {0}")]
    DanglingValue(String),

    /// Finalization found nothing to output.
    #[error("no code generated")]
    NoCode,
}

/// Result type alias for generation operations.
pub type GenResult<T> = std::result::Result<T, GenError>;
