//! The token stream.
//!
//! `TokenStream` owns a byte cursor into the immutable source and produces
//! exactly one token per `next()` call. The stream is a value type: cloning
//! it is cheap and the clone advances independently of the original. The
//! parser leans on this as its only lookahead mechanism — copy the stream,
//! attempt a speculative parse against the copy, and commit by assigning the
//! copy back.
//!
//! No multi-byte punctuation is folded here. `:=`, `/=`, `<=` and `>=` reach
//! the parser as successive single-byte `Punct` tokens; the parser decides
//! what they mean.

use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::keyword::keyword_from_ident;
use crate::token::Token;

/// Classification of a source byte, driving token dispatch.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ByteClass {
    /// `\0` — never legal in a source file.
    Nul,
    /// Space, tab or newline.
    Whitespace,
    /// `"`.
    DoubleQuote,
    /// `[A-Za-z_]`.
    IdentStart,
    /// `[0-9]`.
    Digit,
    /// Everything else: a single punctuation byte.
    Punct,
}

fn classify(byte: u8) -> ByteClass {
    match byte {
        0 => ByteClass::Nul,
        b' ' | b'\t' | b'\n' => ByteClass::Whitespace,
        b'"' => ByteClass::DoubleQuote,
        b'a'..=b'z' | b'A'..=b'Z' | b'_' => ByteClass::IdentStart,
        b'0'..=b'9' => ByteClass::Digit,
        _ => ByteClass::Punct,
    }
}

/// A cloneable stream of tokens over a borrowed source.
///
/// # Example
///
/// ```
/// use arcada_lex::{Token, TokenStream};
///
/// let mut stream = TokenStream::new("with Ada;");
/// assert!(matches!(stream.next().unwrap(), Token::Keyword(_)));
/// assert_eq!(stream.next().unwrap(), Token::Whitespace);
/// assert_eq!(stream.next().unwrap(), Token::Ident("Ada"));
/// assert_eq!(stream.next().unwrap(), Token::Punct(b';'));
/// assert_eq!(stream.next().unwrap(), Token::End);
/// ```
#[derive(Clone)]
pub struct TokenStream<'src> {
    cursor: Cursor<'src>,
}

impl<'src> TokenStream<'src> {
    /// Creates a token stream over the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Produces the next token and advances the stream.
    ///
    /// At end of input this returns `Token::End`, and keeps returning it on
    /// every further call.
    pub fn next(&mut self) -> LexResult<Token<'src>> {
        loop {
            let Some(byte) = self.cursor.current() else {
                return Ok(Token::End);
            };

            match classify(byte) {
                ByteClass::Nul => {
                    return Err(LexError::NulByte {
                        line: self.cursor.line(),
                    })
                }

                ByteClass::Whitespace => {
                    while self
                        .cursor
                        .current()
                        .is_some_and(|b| classify(b) == ByteClass::Whitespace)
                    {
                        self.cursor.advance();
                    }
                    return Ok(Token::Whitespace);
                }

                ByteClass::DoubleQuote => return self.lex_string(),

                ByteClass::IdentStart => return Ok(self.lex_ident()),

                ByteClass::Digit => return Ok(self.lex_number()),

                ByteClass::Punct => {
                    if byte == b'-' && self.cursor.peek(1) == Some(b'-') {
                        self.skip_comment()?;
                        continue;
                    }
                    self.cursor.advance();
                    return Ok(Token::Punct(byte));
                }
            }
        }
    }

    /// Skips a `--` comment through its terminating newline, inclusive.
    ///
    /// A comment that runs to end of input without a newline is a lexical
    /// error.
    fn skip_comment(&mut self) -> LexResult<()> {
        let line = self.cursor.line();
        self.cursor.advance();
        self.cursor.advance();
        loop {
            match self.cursor.current() {
                None => return Err(LexError::UnterminatedComment { line }),
                Some(b'\n') => {
                    self.cursor.advance();
                    return Ok(());
                }
                Some(_) => self.cursor.advance(),
            }
        }
    }

    /// Lexes a string literal.
    ///
    /// A doubled quote (`""`) decodes to one embedded `"`. Literals without
    /// an escape borrow from the source; decoding allocates only when a
    /// doubled quote was actually seen.
    fn lex_string(&mut self) -> LexResult<Token<'src>> {
        let line = self.cursor.line();
        self.cursor.advance();
        let start = self.cursor.position();
        let mut has_escape = false;

        loop {
            match self.cursor.current() {
                None => return Err(LexError::UnterminatedString { line }),
                Some(0) => {
                    return Err(LexError::NulByte {
                        line: self.cursor.line(),
                    })
                }
                Some(b'"') => {
                    self.cursor.advance();
                    if self.cursor.current() == Some(b'"') {
                        has_escape = true;
                        self.cursor.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => self.cursor.advance(),
            }
        }

        // Everything up to, but not including, the closing quote.
        let raw = &self.cursor.slice_from(start)[..self.cursor.position() - start - 1];
        let text = if has_escape {
            Cow::Owned(raw.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(raw)
        };
        Ok(Token::String(text))
    }

    /// Lexes an identifier or keyword.
    fn lex_ident(&mut self) -> Token<'src> {
        let start = self.cursor.position();
        while self.cursor.current().is_some_and(|b| {
            matches!(classify(b), ByteClass::IdentStart | ByteClass::Digit)
        }) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        match keyword_from_ident(text) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Ident(text),
        }
    }

    /// Lexes a number literal: a digit run with at most one embedded `.`.
    ///
    /// The text is preserved verbatim; the translator never interprets the
    /// numeric value.
    fn lex_number(&mut self) -> Token<'src> {
        let start = self.cursor.position();
        let mut had_dot = false;
        loop {
            match self.cursor.current() {
                Some(b) if classify(b) == ByteClass::Digit => self.cursor.advance(),
                Some(b'.') if !had_dot => {
                    had_dot = true;
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        Token::Number(self.cursor.slice_from(start))
    }

    /// Returns the current line number, for diagnostics.
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the current byte position, for progress assertions in tests.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}
