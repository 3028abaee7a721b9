//! Edge-case and property tests for the lexer.

use proptest::prelude::*;

use crate::{LexError, Token, TokenStream};

/// Drains a stream, returning the tokens or the first error.
fn drain(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut stream = TokenStream::new(source);
    let mut tokens = Vec::new();
    loop {
        match stream.next()? {
            Token::End => return Ok(tokens),
            token => tokens.push(token),
        }
    }
}

#[test]
fn empty_input_is_just_end() {
    assert_eq!(drain("").unwrap(), Vec::<Token>::new());
}

#[test]
fn whitespace_only_input() {
    assert_eq!(drain(" \t\n \n").unwrap(), vec![Token::Whitespace]);
}

#[test]
fn comment_only_input() {
    assert_eq!(drain("-- nothing here\n").unwrap(), Vec::<Token>::new());
}

#[test]
fn adjacent_comments() {
    let tokens = drain("-- one\n-- two\nX;\n").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Ident("X"), Token::Punct(b';'), Token::Whitespace]
    );
}

#[test]
fn comment_then_eof_without_newline_fails_late() {
    // The first comment terminates fine; the second hits end of input.
    let mut stream = TokenStream::new("-- ok\n-- not ok");
    assert_eq!(stream.next(), Err(LexError::UnterminatedComment { line: 2 }));
}

#[test]
fn string_may_span_punctuation_soup() {
    let tokens = drain("\";:,.()<>=/\"").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::String(s) if &**s == ";:,.()<>=/"));
}

#[test]
fn non_ascii_bytes_become_punct_tokens() {
    // Multi-byte UTF-8 sequences are not identifiers in this language;
    // each byte surfaces as punctuation for the parser to reject.
    let tokens = drain("é").unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| matches!(t, Token::Punct(_))));
}

proptest! {
    /// Lexer totality: for any NUL-free input, repeated `next()` terminates
    /// with `End` or a lexical error, and on success the cursor has consumed
    /// every byte.
    #[test]
    fn lexing_terminates_and_consumes_all_bytes(source in "[^\0]{0,200}") {
        let mut stream = TokenStream::new(&source);
        // One token consumes at least one byte, so `len + 1` iterations
        // must reach `End`; anything more is a stall.
        let mut remaining = source.len() + 1;
        loop {
            match stream.next() {
                Ok(Token::End) => {
                    prop_assert_eq!(stream.position(), source.len());
                    break;
                }
                Ok(_) => {
                    prop_assert!(remaining > 0, "lexer stalled");
                    remaining -= 1;
                }
                Err(_) => break,
            }
        }
    }

    /// String escape round-trip: embedding `s` with every quote doubled
    /// lexes back to exactly `s`.
    #[test]
    fn doubled_quote_round_trip(text in "[a-zA-Z0-9 \"]{0,40}") {
        let literal = format!("\"{}\"", text.replace('"', "\"\""));
        let mut stream = TokenStream::new(&literal);
        let token = stream.next().unwrap();
        match token {
            Token::String(decoded) => prop_assert_eq!(&*decoded, text.as_str()),
            other => prop_assert!(false, "expected string, got {}", other),
        }
    }

    /// Speculative purity: a clone that is never committed leaves the
    /// original stream's output unchanged.
    #[test]
    fn clone_never_disturbs_original(source in "[^\0]{0,80}") {
        let mut original = TokenStream::new(&source);
        let mut clone = original.clone();

        // Drive the clone to exhaustion or error.
        for _ in 0..source.len() + 1 {
            match clone.next() {
                Ok(Token::End) | Err(_) => break,
                Ok(_) => {}
            }
        }

        // The original still produces the same first token as a fresh stream.
        let mut fresh = TokenStream::new(&source);
        prop_assert_eq!(original.next(), fresh.next());
    }
}
