//! Expression parsing - paths, calls, comparisons, literals.

use arcada_lex::Token;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::{unexpected, Parser};

impl<'src> Parser<'src> {
    /// Parses an expression: a suffix expression, optionally compared
    /// against a second one. Comparisons do not chain.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Node<'src>> {
        let lhs = self.parse_suffix_expr()?;

        self.skip_whitespace()?;
        let Some(op) = self.parse_cmp_op()? else {
            return Ok(lhs);
        };

        self.skip_whitespace()?;
        let rhs = self.parse_suffix_expr()?;

        Ok(Node::Cmp(CmpExpr {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }))
    }

    /// Recognizes a comparison operator out of adjacent punctuation tokens.
    ///
    /// The lexer never folds multi-byte punctuation, so `/=`, `<=` and `>=`
    /// arrive as two tokens that must be directly adjacent: `< =` is a `<`
    /// followed by a stray `=`. A lone `/` is not an operator at all, and
    /// commits nothing.
    fn parse_cmp_op(&mut self) -> ParseResult<Option<CmpOp>> {
        let mut probe = self.stream.clone();
        let token = probe.next()?;
        let Token::Punct(byte) = token else {
            return Ok(None);
        };

        match byte {
            b'/' => {
                let mut after = probe.clone();
                if after.next()? == Token::Punct(b'=') {
                    self.stream = after;
                    Ok(Some(CmpOp::NotEqual))
                } else {
                    Ok(None)
                }
            }
            b'=' => {
                self.stream = probe;
                Ok(Some(CmpOp::Equal))
            }
            b'<' => {
                self.stream = probe;
                if self.consume_if_punct(b'=')? {
                    Ok(Some(CmpOp::LessOrEqual))
                } else {
                    Ok(Some(CmpOp::Less))
                }
            }
            b'>' => {
                self.stream = probe;
                if self.consume_if_punct(b'=')? {
                    Ok(Some(CmpOp::GreaterOrEqual))
                } else {
                    Ok(Some(CmpOp::Greater))
                }
            }
            _ => Ok(None),
        }
    }

    /// Parses a value expression and its optional call suffix.
    ///
    /// A bare path not followed by `(` is wrapped in `SuffixExpr`: whether
    /// the name means "the value" or "call it with no arguments" is decided
    /// at run time by the value's kind. Literals are already values and need
    /// no wrapper.
    pub(crate) fn parse_suffix_expr(&mut self) -> ParseResult<Node<'src>> {
        let value = self.parse_value_expr()?;

        let mut probe = self.stream.clone();
        if probe.next()? == Token::Punct(b'(') {
            return self.parse_call_expr(value);
        }

        Ok(match value {
            node @ Node::Path(_) => Node::Suffix(SuffixExpr {
                inner: Box::new(node),
            }),
            other => other,
        })
    }

    /// Parses the parenthesized argument list of a call.
    fn parse_call_expr(&mut self, callee: Node<'src>) -> ParseResult<Node<'src>> {
        self.expect_punct(b'(')?;

        let mut args = Vec::new();
        let mut expect_comma = false;
        while !self.consume_if_punct(b')')? {
            if expect_comma {
                self.expect_punct(b',')?;
                self.skip_whitespace()?;
            }
            expect_comma = true;
            args.push(self.parse_expr()?);
        }

        Ok(Node::Call(CallExpr {
            callee: Box::new(callee),
            args,
        }))
    }

    /// Parses a path, number or string literal.
    fn parse_value_expr(&mut self) -> ParseResult<Node<'src>> {
        let mut probe = self.stream.clone();
        match probe.next()? {
            Token::Ident(_) => self.parse_path().map(Node::Path),
            Token::Number(text) => {
                self.stream = probe;
                Ok(Node::Number(NumberLit { text }))
            }
            Token::String(value) => {
                self.stream = probe;
                Ok(Node::String(StringLit { value }))
            }
            other => Err(unexpected(&other, "start of value expr")),
        }
    }

    /// Parses one or more dot-separated identifiers.
    ///
    /// Components must be directly adjacent to their dots; whitespace ends
    /// the path.
    pub(crate) fn parse_path(&mut self) -> ParseResult<Path<'src>> {
        let mut components = vec![self.expect_ident()?];
        while self.consume_if_punct(b'.')? {
            components.push(self.expect_ident()?);
        }
        Ok(Path { components })
    }

    /// Parses a path and requires it to equal `expected` verbatim.
    ///
    /// Enforces the trailing-name law for `end Some.Package;`.
    pub(crate) fn parse_path_eq(&mut self, expected: &Path<'src>) -> ParseResult<()> {
        let found = self.parse_path()?;
        if found == *expected {
            Ok(())
        } else {
            Err(ParseError::Unexpected {
                found: format!("path `{found}`"),
                expected: format!("path `{expected}`"),
            })
        }
    }
}
