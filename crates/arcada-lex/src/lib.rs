//! arcada-lex - Lexical Analyzer
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! First phase of the translation pipeline: a stream of source bytes becomes
//! a stream of tokens. The lexer is deliberately small and byte-oriented —
//! the surface language is an ASCII subset with six byte classes
//! (whitespace, double quote, identifier-start, digit, NUL, punctuation).
//!
//! TOKEN CATEGORIES:
//! -----------------
//! - Keywords: the reserved-word set of the language (case-sensitive)
//! - Identifiers: `[A-Za-z_][A-Za-z0-9_]*`
//! - Numbers: digit runs with at most one embedded `.`, text kept verbatim
//! - Strings: `"..."` with `""` decoding to one embedded quote
//! - Punctuation: every other byte, one token per byte
//! - Whitespace: runs collapsed into a single token, surfaced to the parser
//!
//! Two properties matter to the rest of the pipeline:
//!
//! 1. The stream is a value type. Cloning it and advancing the clone is the
//!    parser's lookahead mechanism, so `next()` must not mutate anything a
//!    clone could observe.
//! 2. Whitespace is a real token. The lexer never classifies across
//!    whitespace; deciding where whitespace is allowed is the parser's job,
//!    as is folding `:=` and `/=` out of adjacent punctuation tokens.
//!
//! Comments (`--` to end of line) are consumed here and never surface.

pub mod cursor;
pub mod error;
pub mod keyword;
pub mod stream;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use error::{LexError, LexResult};
pub use keyword::{keyword_from_ident, Keyword};
pub use stream::TokenStream;
pub use token::Token;
