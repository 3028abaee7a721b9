//! arcada-par - AST Node Definitions
//!
//! Statements and expressions share a single `Node` sum — the language is
//! small enough that one closed enum with exhaustive matching beats a trait
//! hierarchy. Every node implements `Display`, reproducing the surface
//! syntax; diagnostics and tests rely on it.

use std::borrow::Cow;
use std::fmt;

/// A statement or expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
    /// `with Some.Package;` import directive.
    With(WithStmt<'src>),

    /// `package body Name is ... end Name;`
    Package(PackageStmt<'src>),

    /// `function F (A : T, ...) return T is ... begin ... end F;`
    Function(FunctionStmt<'src>),

    /// `procedure P is ... begin ... end P;`
    Procedure(ProcedureStmt<'src>),

    /// `Target := Expr;`
    Assignment(AssignmentStmt<'src>),

    /// An expression in statement position; its result is discarded.
    Expr(ExprStmt<'src>),

    /// `return Expr;`
    Return(ReturnStmt<'src>),

    /// `if Cond then ... end if;` — the body may contain `Elsif`/`Else`
    /// markers, which the generator stitches into an if/else-if chain.
    If(IfStmt<'src>),

    /// `elsif Cond then` marker, a peer statement inside an `If` body.
    Elsif(ElsifStmt<'src>),

    /// `else` marker, a peer statement inside an `If` body.
    Else,

    /// One or more dot-separated names; qualifies both values and types.
    Path(Path<'src>),

    /// `Callee(Arg, ...)`
    Call(CallExpr<'src>),

    /// `Lhs op Rhs` with a comparison operator.
    Cmp(CmpExpr<'src>),

    /// Wrapper deferring "a bare name is a no-arg call if callable" to the
    /// runtime's dereference operation.
    Suffix(SuffixExpr<'src>),

    /// Number literal, text preserved verbatim.
    Number(NumberLit<'src>),

    /// String literal, doubled quotes already decoded.
    String(StringLit<'src>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithStmt<'src> {
    pub path: Path<'src>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageStmt<'src> {
    pub name: Path<'src>,
    pub body: Vec<Node<'src>>,
}

/// A function always has a return type; a procedure never does.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt<'src> {
    pub name: &'src str,
    pub params: Vec<VarDecl<'src>>,
    pub return_type: Path<'src>,
    pub locals: Vec<VarDecl<'src>>,
    pub body: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureStmt<'src> {
    pub name: &'src str,
    pub locals: Vec<VarDecl<'src>>,
    pub body: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt<'src> {
    pub target: Path<'src>,
    pub value: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt<'src> {
    pub expr: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt<'src> {
    pub expr: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt<'src> {
    pub cond: Box<Node<'src>>,
    pub body: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElsifStmt<'src> {
    pub cond: Box<Node<'src>>,
}

/// A variable declaration `Name : Type`, used for parameters and locals.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl<'src> {
    pub name: &'src str,
    pub ty: Path<'src>,
}

/// One or more dot-separated identifiers. Never empty — the parser only
/// constructs a path after reading its first component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'src> {
    pub components: Vec<&'src str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr<'src> {
    pub callee: Box<Node<'src>>,
    pub args: Vec<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CmpExpr<'src> {
    pub lhs: Box<Node<'src>>,
    pub op: CmpOp,
    pub rhs: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuffixExpr<'src> {
    pub inner: Box<Node<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit<'src> {
    pub text: &'src str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLit<'src> {
    pub value: Cow<'src, str>,
}

/// Comparison operators of the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CmpOp {
    /// The source spelling: `=`, `/=`, `<`, `<=`, `>`, `>=`.
    pub fn as_source_str(self) -> &'static str {
        match self {
            CmpOp::Equal => "=",
            CmpOp::NotEqual => "/=",
            CmpOp::Less => "<",
            CmpOp::LessOrEqual => "<=",
            CmpOp::Greater => ">",
            CmpOp::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            f.write_str(component)?;
        }
        Ok(())
    }
}

impl fmt::Display for VarDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.ty)
    }
}

fn write_lines(f: &mut fmt::Formatter<'_>, nodes: &[Node<'_>]) -> fmt::Result {
    for node in nodes {
        writeln!(f, "{node}")?;
    }
    Ok(())
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::With(stmt) => write!(f, "with {};", stmt.path),

            Node::Package(stmt) => {
                writeln!(f, "package body {} is", stmt.name)?;
                write_lines(f, &stmt.body)?;
                write!(f, "end {};", stmt.name)
            }

            Node::Function(stmt) => {
                write!(f, "function {} ", stmt.name)?;
                if !stmt.params.is_empty() {
                    f.write_str("(")?;
                    for (i, param) in stmt.params.iter().enumerate() {
                        if i != 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{param}")?;
                    }
                    f.write_str(") ")?;
                }
                writeln!(f, "return {} is", stmt.return_type)?;
                for local in &stmt.locals {
                    writeln!(f, "{local};")?;
                }
                writeln!(f, "begin")?;
                write_lines(f, &stmt.body)?;
                write!(f, "end {};", stmt.name)
            }

            Node::Procedure(stmt) => {
                writeln!(f, "procedure {} is", stmt.name)?;
                for local in &stmt.locals {
                    writeln!(f, "{local};")?;
                }
                writeln!(f, "begin")?;
                write_lines(f, &stmt.body)?;
                write!(f, "end {};", stmt.name)
            }

            Node::Assignment(stmt) => write!(f, "{} := {};", stmt.target, stmt.value),

            Node::Expr(stmt) => write!(f, "{};", stmt.expr),

            Node::Return(stmt) => write!(f, "return {};", stmt.expr),

            Node::If(stmt) => {
                writeln!(f, "if {} then", stmt.cond)?;
                write_lines(f, &stmt.body)?;
                write!(f, "end if;")
            }

            Node::Elsif(stmt) => write!(f, "elsif {} then", stmt.cond),

            Node::Else => write!(f, "else"),

            Node::Path(path) => write!(f, "{path}"),

            Node::Call(expr) => {
                write!(f, "{}(", expr.callee)?;
                for (i, arg) in expr.args.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }

            Node::Cmp(expr) => {
                write!(f, "{} {} {}", expr.lhs, expr.op.as_source_str(), expr.rhs)
            }

            Node::Suffix(expr) => write!(f, "{}", expr.inner),

            Node::Number(lit) => f.write_str(lit.text),

            Node::String(lit) => write!(f, "\"{}\"", lit.value.replace('"', "\"\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path<'a>(components: &[&'a str]) -> Path<'a> {
        Path {
            components: components.to_vec(),
        }
    }

    #[test]
    fn test_path_display() {
        assert_eq!(path(&["Ada"]).to_string(), "Ada");
        assert_eq!(path(&["Ada", "Text_IO"]).to_string(), "Ada.Text_IO");
    }

    #[test]
    fn test_with_display() {
        let node = Node::With(WithStmt {
            path: path(&["Ada", "Text_IO"]),
        });
        assert_eq!(node.to_string(), "with Ada.Text_IO;");
    }

    #[test]
    fn test_assignment_display() {
        let node = Node::Assignment(AssignmentStmt {
            target: path(&["Foo", "Bar"]),
            value: Box::new(Node::Number(NumberLit { text: "1" })),
        });
        assert_eq!(node.to_string(), "Foo.Bar := 1;");
    }

    #[test]
    fn test_call_display() {
        let node = Node::Call(CallExpr {
            callee: Box::new(Node::Path(path(&["Put_Line"]))),
            args: vec![Node::String(StringLit {
                value: "hi".into(),
            })],
        });
        assert_eq!(node.to_string(), "Put_Line(\"hi\")");
    }

    #[test]
    fn test_string_display_redoubles_quotes() {
        let node = Node::String(StringLit {
            value: "say \"hi\"".into(),
        });
        assert_eq!(node.to_string(), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_cmp_display() {
        let node = Node::Cmp(CmpExpr {
            lhs: Box::new(Node::Path(path(&["A"]))),
            op: CmpOp::NotEqual,
            rhs: Box::new(Node::Path(path(&["B"]))),
        });
        assert_eq!(node.to_string(), "A /= B");
    }

    #[test]
    fn test_suffix_display_is_transparent() {
        let node = Node::Suffix(SuffixExpr {
            inner: Box::new(Node::Path(path(&["X"]))),
        });
        assert_eq!(node.to_string(), "X");
    }

    #[test]
    fn test_procedure_display() {
        let node = Node::Procedure(ProcedureStmt {
            name: "Hello",
            locals: vec![],
            body: vec![Node::Expr(ExprStmt {
                expr: Box::new(Node::Call(CallExpr {
                    callee: Box::new(Node::Path(path(&["Put_Line"]))),
                    args: vec![],
                })),
            })],
        });
        assert_eq!(
            node.to_string(),
            "procedure Hello is\nbegin\nPut_Line();\nend Hello;"
        );
    }
}
