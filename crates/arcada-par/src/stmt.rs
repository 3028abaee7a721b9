//! Statement parsing - with, package, function, procedure, return, if.

use arcada_lex::{Keyword, Token};

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::{unexpected, Parser};

impl<'src> Parser<'src> {
    /// Parses one statement; end of input is a syntax error here.
    ///
    /// A bare identifier starts an assignment or expression statement; a
    /// keyword selects its statement production; anything else cannot start
    /// a statement.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;

        let mut probe = self.stream.clone();
        let token = probe.next()?;
        match token {
            Token::Ident(_) => self.parse_assignment_or_expr_stmt(),
            Token::Keyword(keyword) => {
                self.stream = probe;
                match keyword {
                    Keyword::With => self.parse_with_stmt(),
                    Keyword::Package => self.parse_package_stmt(),
                    Keyword::Function => self.parse_function_stmt(),
                    Keyword::Procedure => self.parse_procedure_stmt(),
                    Keyword::Return => self.parse_return_stmt(),
                    Keyword::If => self.parse_if_stmt(),
                    Keyword::Elsif => self.parse_elsif_stmt(),
                    Keyword::Else => Ok(Node::Else),
                    other => Err(ParseError::UnknownKeywordStatement { keyword: other }),
                }
            }
            other => Err(unexpected(&other, "start of statement")),
        }
    }

    /// `with path;`
    fn parse_with_stmt(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;
        let path = self.parse_path()?;
        self.expect_punct(b';')?;
        Ok(Node::With(WithStmt { path }))
    }

    /// `package body NAME is stmt* end NAME;`
    fn parse_package_stmt(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;
        self.expect_keyword(Keyword::Body)?;

        self.skip_whitespace()?;
        let name = self.parse_path()?;

        self.skip_whitespace()?;
        self.expect_keyword(Keyword::Is)?;

        let mut body = Vec::new();
        while !self.consume_if_keyword(Keyword::End)? {
            body.push(self.parse_statement()?);
            self.skip_whitespace()?;
        }

        self.skip_whitespace()?;
        self.parse_path_eq(&name)?;
        self.expect_punct(b';')?;

        Ok(Node::Package(PackageStmt { name, body }))
    }

    /// `function NAME [(var_decl, ...)] return path is decls begin stmt* end NAME;`
    fn parse_function_stmt(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;
        let name = self.expect_ident()?;

        let mut params = Vec::new();
        self.skip_whitespace()?;
        if !self.consume_if_keyword(Keyword::Return)? {
            self.expect_punct(b'(')?;
            let mut expect_comma = false;
            while !self.consume_if_punct(b')')? {
                if expect_comma {
                    self.expect_punct(b',')?;
                }
                expect_comma = true;
                params.push(self.parse_var_decl()?);
            }
            self.skip_whitespace()?;
            self.expect_keyword(Keyword::Return)?;
        }

        self.skip_whitespace()?;
        let return_type = self.parse_path()?;

        self.skip_whitespace()?;
        self.expect_keyword(Keyword::Is)?;

        let locals = self.parse_declarative_part()?;
        let body = self.parse_body(name)?;

        Ok(Node::Function(FunctionStmt {
            name,
            params,
            return_type,
            locals,
            body,
        }))
    }

    /// `procedure NAME is decls begin stmt* end NAME;`
    fn parse_procedure_stmt(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;
        let name = self.expect_ident()?;

        self.skip_whitespace()?;
        self.expect_keyword(Keyword::Is)?;

        let locals = self.parse_declarative_part()?;
        let body = self.parse_body(name)?;

        Ok(Node::Procedure(ProcedureStmt { name, locals, body }))
    }

    /// Variable declarations between `is` and `begin`, each ended by `;`.
    fn parse_declarative_part(&mut self) -> ParseResult<Vec<VarDecl<'src>>> {
        let mut locals = Vec::new();
        self.skip_whitespace()?;
        while !self.consume_if_keyword(Keyword::Begin)? {
            locals.push(self.parse_var_decl()?);
            self.expect_punct(b';')?;
            self.skip_whitespace()?;
        }
        Ok(locals)
    }

    /// Statements up to `end`, then the matching `NAME ;`.
    fn parse_body(&mut self, name: &'src str) -> ParseResult<Vec<Node<'src>>> {
        let mut body = Vec::new();
        while !self.consume_if_keyword(Keyword::End)? {
            body.push(self.parse_statement()?);
            self.skip_whitespace()?;
        }

        self.skip_whitespace()?;
        self.expect_ident_eq(name)?;
        self.expect_punct(b';')?;
        Ok(body)
    }

    /// `NAME : path`
    pub(crate) fn parse_var_decl(&mut self) -> ParseResult<VarDecl<'src>> {
        self.skip_whitespace()?;
        let name = self.expect_ident()?;

        self.skip_whitespace()?;
        self.expect_punct(b':')?;

        self.skip_whitespace()?;
        let ty = self.parse_path()?;

        Ok(VarDecl { name, ty })
    }

    /// `return expr;`
    fn parse_return_stmt(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;
        let expr = self.parse_expr()?;
        self.expect_punct(b';')?;
        Ok(Node::Return(ReturnStmt {
            expr: Box::new(expr),
        }))
    }

    /// `if expr then stmt* end if;`
    ///
    /// `elsif`/`else` markers inside the body stay peer statements; the
    /// generator stitches the chain.
    fn parse_if_stmt(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;
        let cond = self.parse_expr()?;

        self.skip_whitespace()?;
        self.expect_keyword(Keyword::Then)?;

        let mut body = Vec::new();
        self.skip_whitespace()?;
        while !self.consume_if_keyword(Keyword::End)? {
            body.push(self.parse_statement()?);
            self.skip_whitespace()?;
        }

        self.skip_whitespace()?;
        self.expect_keyword(Keyword::If)?;
        self.expect_punct(b';')?;

        Ok(Node::If(IfStmt {
            cond: Box::new(cond),
            body,
        }))
    }

    /// `elsif expr then` — the branch body is carried by the following
    /// peer statements.
    fn parse_elsif_stmt(&mut self) -> ParseResult<Node<'src>> {
        self.skip_whitespace()?;
        let cond = self.parse_expr()?;

        self.skip_whitespace()?;
        self.expect_keyword(Keyword::Then)?;

        Ok(Node::Elsif(ElsifStmt {
            cond: Box::new(cond),
        }))
    }

    /// Distinguishes `path := expr;` from an expression statement.
    ///
    /// A speculative parse against a cloned parser reads a path and looks
    /// for the two adjacent tokens `:` `=`. Only when both are present is
    /// the clone committed; otherwise the statement re-parses from the
    /// original position as an expression.
    fn parse_assignment_or_expr_stmt(&mut self) -> ParseResult<Node<'src>> {
        let mut probe = self.clone();
        let target = probe.parse_path()?;
        probe.skip_whitespace()?;

        let mut lookahead = probe.stream.clone();
        if lookahead.next()? == Token::Punct(b':') && lookahead.next()? == Token::Punct(b'=') {
            probe.stream = lookahead;
            *self = probe;

            self.skip_whitespace()?;
            let value = self.parse_expr()?;
            self.expect_punct(b';')?;

            return Ok(Node::Assignment(AssignmentStmt {
                target,
                value: Box::new(value),
            }));
        }

        let expr = self.parse_expr()?;
        self.expect_punct(b';')?;
        Ok(Node::Expr(ExprStmt {
            expr: Box::new(expr),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    fn parse(source: &str) -> Vec<Node<'_>> {
        Parser::new(source)
            .parse_program()
            .unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn parse_err(source: &str) -> ParseError {
        Parser::new(source)
            .parse_program()
            .expect_err("parse should fail")
    }

    fn path<'a>(components: &[&'a str]) -> Path<'a> {
        Path {
            components: components.to_vec(),
        }
    }

    // ========================================================================
    // WITH STATEMENTS
    // ========================================================================

    #[test]
    fn test_with_statement() {
        let nodes = parse("with Ada.Text_IO;");
        assert_eq!(
            nodes,
            vec![Node::With(WithStmt {
                path: path(&["Ada", "Text_IO"]),
            })]
        );
    }

    #[test]
    fn test_comment_between_with_statements() {
        let nodes = parse("with X; -- trailing\nwith Y;");
        assert_eq!(
            nodes,
            vec![
                Node::With(WithStmt { path: path(&["X"]) }),
                Node::With(WithStmt { path: path(&["Y"]) }),
            ]
        );
    }

    // ========================================================================
    // ASSIGNMENT VS EXPRESSION STATEMENTS
    // ========================================================================

    #[test]
    fn test_assignment_statement() {
        let nodes = parse("Foo.Bar := 1;");
        assert_eq!(
            nodes,
            vec![Node::Assignment(AssignmentStmt {
                target: path(&["Foo", "Bar"]),
                value: Box::new(Node::Number(NumberLit { text: "1" })),
            })]
        );
    }

    #[test]
    fn test_call_expression_statement() {
        let nodes = parse("Foo.Bar(1);");
        assert_eq!(
            nodes,
            vec![Node::Expr(ExprStmt {
                expr: Box::new(Node::Call(CallExpr {
                    callee: Box::new(Node::Path(path(&["Foo", "Bar"]))),
                    args: vec![Node::Number(NumberLit { text: "1" })],
                })),
            })]
        );
    }

    #[test]
    fn test_bare_path_statement_gets_suffix_wrapper() {
        let nodes = parse("Hello;");
        assert_eq!(
            nodes,
            vec![Node::Expr(ExprStmt {
                expr: Box::new(Node::Suffix(SuffixExpr {
                    inner: Box::new(Node::Path(path(&["Hello"]))),
                })),
            })]
        );
    }

    #[test]
    fn test_assignment_from_bare_path() {
        // The right-hand side is a bare name: runtime coercion applies.
        let nodes = parse("X := F;");
        assert_eq!(
            nodes,
            vec![Node::Assignment(AssignmentStmt {
                target: path(&["X"]),
                value: Box::new(Node::Suffix(SuffixExpr {
                    inner: Box::new(Node::Path(path(&["F"]))),
                })),
            })]
        );
    }

    #[test]
    fn test_colon_without_equals_is_an_error() {
        // `X : = 1;` is neither an assignment nor a valid expression.
        let err = parse_err("X : = 1;");
        assert!(matches!(err, ParseError::Unexpected { .. }));
    }

    // ========================================================================
    // PROCEDURES AND FUNCTIONS
    // ========================================================================

    #[test]
    fn test_procedure_statement() {
        let nodes = parse(concat!(
            "procedure Hello is\n",
            "begin\n",
            "  Ada.Text_IO.Put_Line(\"Hello, world!\");\n",
            "end Hello;\n",
        ));
        match &nodes[0] {
            Node::Procedure(stmt) => {
                assert_eq!(stmt.name, "Hello");
                assert!(stmt.locals.is_empty());
                assert_eq!(stmt.body.len(), 1);
            }
            other => panic!("expected procedure, got {other}"),
        }
    }

    #[test]
    fn test_procedure_with_locals() {
        let nodes = parse(concat!(
            "procedure P is\n",
            "  X : Integer;\n",
            "  S : String;\n",
            "begin\n",
            "  X := 1;\n",
            "end P;\n",
        ));
        match &nodes[0] {
            Node::Procedure(stmt) => {
                assert_eq!(
                    stmt.locals,
                    vec![
                        VarDecl {
                            name: "X",
                            ty: path(&["Integer"]),
                        },
                        VarDecl {
                            name: "S",
                            ty: path(&["String"]),
                        },
                    ]
                );
            }
            other => panic!("expected procedure, got {other}"),
        }
    }

    #[test]
    fn test_end_name_mismatch() {
        let err = parse_err("procedure P is begin X; end Q;");
        assert_eq!(err.to_string(), "unexpected ident `Q` (expected ident `P`)");
    }

    #[test]
    fn test_end_name_match_law() {
        // `end P;` parses only when the opening name was `P`.
        assert!(Parser::new("procedure P is begin X; end P;")
            .parse_program()
            .is_ok());
        assert!(Parser::new("procedure P is begin X; end P2;")
            .parse_program()
            .is_err());
    }

    #[test]
    fn test_function_without_params() {
        let nodes = parse(concat!(
            "function Get return Integer is\n",
            "begin\n",
            "  return 42;\n",
            "end Get;\n",
        ));
        match &nodes[0] {
            Node::Function(stmt) => {
                assert_eq!(stmt.name, "Get");
                assert!(stmt.params.is_empty());
                assert_eq!(stmt.return_type, path(&["Integer"]));
                assert_eq!(
                    stmt.body,
                    vec![Node::Return(ReturnStmt {
                        expr: Box::new(Node::Number(NumberLit { text: "42" })),
                    })]
                );
            }
            other => panic!("expected function, got {other}"),
        }
    }

    #[test]
    fn test_function_with_params_and_locals() {
        let nodes = parse(concat!(
            "function Add(A : Integer, B : Integer) return Integer is\n",
            "  Tmp : Integer;\n",
            "begin\n",
            "  return A;\n",
            "end Add;\n",
        ));
        match &nodes[0] {
            Node::Function(stmt) => {
                assert_eq!(stmt.params.len(), 2);
                assert_eq!(stmt.params[0].name, "A");
                assert_eq!(stmt.params[1].name, "B");
                assert_eq!(stmt.locals.len(), 1);
            }
            other => panic!("expected function, got {other}"),
        }
    }

    #[test]
    fn test_function_missing_return_type() {
        let err = parse_err("function F is begin return 1; end F;");
        assert!(matches!(err, ParseError::Unexpected { .. }));
    }

    // ========================================================================
    // PACKAGES
    // ========================================================================

    #[test]
    fn test_package_statement() {
        let nodes = parse(concat!(
            "package body Greetings is\n",
            "  procedure Hello is\n",
            "  begin\n",
            "    Put(\"hi\");\n",
            "  end Hello;\n",
            "end Greetings;\n",
        ));
        match &nodes[0] {
            Node::Package(stmt) => {
                assert_eq!(stmt.name, path(&["Greetings"]));
                assert_eq!(stmt.body.len(), 1);
                assert!(matches!(stmt.body[0], Node::Procedure(_)));
            }
            other => panic!("expected package, got {other}"),
        }
    }

    #[test]
    fn test_package_with_dotted_name() {
        let nodes = parse(concat!(
            "package body My.Utils is\n",
            "  procedure Noop is\n",
            "  begin\n",
            "    X;\n",
            "  end Noop;\n",
            "end My.Utils;\n",
        ));
        match &nodes[0] {
            Node::Package(stmt) => assert_eq!(stmt.name, path(&["My", "Utils"])),
            other => panic!("expected package, got {other}"),
        }
    }

    #[test]
    fn test_package_end_name_mismatch() {
        let err = parse_err(concat!(
            "package body A.B is\n",
            "  procedure P is begin X; end P;\n",
            "end A.C;\n",
        ));
        assert_eq!(err.to_string(), "unexpected path `A.C` (expected path `A.B`)");
    }

    #[test]
    fn test_package_requires_body_keyword() {
        let err = parse_err("package Greetings is end Greetings;");
        assert_eq!(
            err.to_string(),
            "unexpected ident `Greetings` (expected keyword `body`)"
        );
    }

    // ========================================================================
    // IF / ELSIF / ELSE
    // ========================================================================

    #[test]
    fn test_if_statement() {
        let nodes = parse("if X = 1 then Put(X); end if;");
        match &nodes[0] {
            Node::If(stmt) => {
                assert!(matches!(*stmt.cond, Node::Cmp(_)));
                assert_eq!(stmt.body.len(), 1);
            }
            other => panic!("expected if, got {other}"),
        }
    }

    #[test]
    fn test_if_with_elsif_and_else_peers() {
        let nodes = parse(concat!(
            "if X = 1 then\n",
            "  A;\n",
            "elsif X = 2 then\n",
            "  B;\n",
            "else\n",
            "  C;\n",
            "end if;\n",
        ));
        match &nodes[0] {
            Node::If(stmt) => {
                // The chain markers are peers inside the if body.
                assert_eq!(stmt.body.len(), 5);
                assert!(matches!(stmt.body[0], Node::Expr(_)));
                assert!(matches!(stmt.body[1], Node::Elsif(_)));
                assert!(matches!(stmt.body[2], Node::Expr(_)));
                assert!(matches!(stmt.body[3], Node::Else));
                assert!(matches!(stmt.body[4], Node::Expr(_)));
            }
            other => panic!("expected if, got {other}"),
        }
    }

    #[test]
    fn test_if_requires_end_if() {
        let err = parse_err("if X then Y; end while;");
        assert_eq!(
            err.to_string(),
            "unexpected keyword `while` (expected keyword `if`)"
        );
    }

    #[test]
    fn test_return_statement() {
        let nodes = parse("return X;");
        assert_eq!(
            nodes,
            vec![Node::Return(ReturnStmt {
                expr: Box::new(Node::Suffix(SuffixExpr {
                    inner: Box::new(Node::Path(path(&["X"]))),
                })),
            })]
        );
    }
}
