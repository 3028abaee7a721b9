//! arcada-gen - C Code Generation
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! Last phase of the translation pipeline: each AST node appends C text to
//! the emitter context's three buffers. Emission is purely textual — nothing
//! is evaluated, and the generated code's semantics live entirely in the
//! runtime contract it targets (`arcada-rt`, included as `<arcada-rt.h>`).
//!
//! PER-NODE CONTRACTS:
//! -------------------
//! - `with P.Q`     → `init` gains a `scope_insert_package` of the package's
//!   initializer; `functions` gains its extern declaration.
//! - `package body` → the body is emitted against a fresh `init` buffer,
//!   which is then consumed into `_package_<name>_init`, a lazily-run state
//!   machine guarding against re-entry and cyclic initialization.
//! - `function` / `procedure` → a static C function that opens a child
//!   scope, declares parameters and locals with their types' default values,
//!   runs the body, and funnels `return` through a `return_stmt:` label.
//!   The value registered in the scope always claims zero arguments — the
//!   generator does not forward declared parameters to the runtime, so
//!   calling with arguments is a runtime argument-count error.
//! - statements (`:=`, expression, `return`, `if`-chain) → finished text in
//!   `value`, flushed by the statement list's owner.
//! - expressions → a C expression fragment appended to `value`; paths become
//!   left-associated `scope_get`/`value_get` chains, bare names defer their
//!   call-or-value meaning to `value_to_value`.
//!
//! Package initializer symbols are mangled by joining the dotted components
//! with `__`: `a.b.c` becomes `_package_a__b__c_init`. Emission is
//! deterministic — the same AST always yields byte-identical output.

mod context;
mod error;

pub use context::{Context, RUNTIME_INCLUDE};
pub use error::{GenError, GenResult};

use arcada_par::{CmpOp, FunctionStmt, Node, PackageStmt, Path, ProcedureStmt, VarDecl};

/// Emits one statement-level node into the context.
///
/// Statement-shaped nodes leave their finished text in `ctx.value`; the
/// caller that owns the statement list decides where it flushes (the driver
/// moves it to `init`, package emission to the package's fresh `init`,
/// function emission into the body under construction).
pub fn generate(node: &Node<'_>, ctx: &mut Context) -> GenResult<()> {
    match node {
        Node::With(stmt) => {
            let symbol = package_init_symbol(&stmt.path);
            ctx.init
                .push_str(&format!("scope_insert_package(scope, {symbol}());\n\n"));
            ctx.functions
                .push_str(&format!("extern package_t *{symbol}(void);\n\n"));
            Ok(())
        }

        Node::Package(stmt) => generate_package(stmt, ctx),
        Node::Function(stmt) => generate_function(stmt, ctx),
        Node::Procedure(stmt) => generate_procedure(stmt, ctx),

        Node::Assignment(stmt) => {
            ctx.value.push_str("value_assign(\n");
            emit_path(&stmt.target, ctx);
            ctx.value.push_str(",\n");
            generate(&stmt.value, ctx)?;
            ctx.value.push_str(");\n\n");
            Ok(())
        }

        Node::Expr(stmt) => {
            ctx.value.push_str("value_drop(");
            generate(&stmt.expr, ctx)?;
            ctx.value.push_str(");\n");
            Ok(())
        }

        Node::Return(stmt) => {
            ctx.value.push_str("return_value = ");
            generate(&stmt.expr, ctx)?;
            ctx.value.push_str(";\ngoto return_stmt;\n");
            Ok(())
        }

        Node::If(stmt) => {
            ctx.value.push_str("if (value_to_bool(");
            generate(&stmt.cond, ctx)?;
            ctx.value.push_str(")) {\n");

            // The parser leaves `elsif`/`else` as peer statements in the
            // body; stitching them here relies on their source order.
            let mut seen_else = false;
            for child in &stmt.body {
                match child {
                    Node::Elsif(elsif) => {
                        if seen_else {
                            return Err(GenError::ElsifAfterElse);
                        }
                        ctx.value.push_str("} else if (value_to_bool(");
                        generate(&elsif.cond, ctx)?;
                        ctx.value.push_str(")) {\n");
                    }
                    Node::Else => {
                        if seen_else {
                            return Err(GenError::DuplicateElse);
                        }
                        seen_else = true;
                        ctx.value.push_str("} else {\n");
                    }
                    other => generate(other, ctx)?,
                }
            }

            ctx.value.push_str("}\n");
            Ok(())
        }

        Node::Elsif(_) => Err(GenError::ElsifOutsideIf),
        Node::Else => Err(GenError::ElseOutsideIf),

        Node::Path(path) => {
            emit_path(path, ctx);
            Ok(())
        }

        Node::Call(expr) => {
            ctx.value.push_str("value_call(");
            generate(&expr.callee, ctx)?;
            ctx.value
                .push_str(&format!(", scope, {}, ", expr.args.len()));
            if expr.args.is_empty() {
                ctx.value.push_str("NULL");
            } else {
                ctx.value.push_str("(value_t *[]){");
                for (i, arg) in expr.args.iter().enumerate() {
                    if i != 0 {
                        ctx.value.push_str(", ");
                    }
                    generate(arg, ctx)?;
                }
                ctx.value.push('}');
            }
            ctx.value.push(')');
            Ok(())
        }

        Node::Cmp(expr) => {
            ctx.value.push_str("value_cmp(");
            generate(&expr.lhs, ctx)?;
            ctx.value.push_str(&format!(", {}, ", cmp_op_tag(expr.op)));
            generate(&expr.rhs, ctx)?;
            ctx.value.push(')');
            Ok(())
        }

        Node::Suffix(expr) => {
            ctx.value.push_str("value_to_value(");
            generate(&expr.inner, ctx)?;
            ctx.value.push_str(", scope)");
            Ok(())
        }

        Node::Number(lit) => {
            ctx.value.push_str(&format!("integer_value({})", lit.text));
            Ok(())
        }

        Node::String(lit) => {
            ctx.value
                .push_str(&format!("string_value(\"{}\")", escape_c(&lit.value)));
            Ok(())
        }
    }
}

/// Emits a package body and its lazily-initialized state machine.
fn generate_package(stmt: &PackageStmt<'_>, ctx: &mut Context) -> GenResult<()> {
    // The body emits against a fresh `init`; the outer buffer is restored
    // afterwards.
    let outer_init = std::mem::take(&mut ctx.init);
    let result = generate_package_body(stmt, ctx);
    let child_init = std::mem::replace(&mut ctx.init, outer_init);
    result?;

    let symbol = package_init_symbol(&stmt.name);
    ctx.functions.push_str(&format!(
        "package_t *{symbol}(void) {{\n\
         static package_t package = {{\n\
         \"{name}\",\n\
         }};\n\
         scope_t *scope = &package.scope;\n\
         \n\
         switch (package.state) {{\n\
         case package_state_uninitialized:\n\
         break;\n\
         case package_state_initializing:\n\
         return package_already_initializing(package.name);\n\
         case package_state_initialized:\n\
         return &package;\n\
         }}\n\
         \n\
         package.state = package_state_initializing;\n\
         \n\
         package_scope_init(scope);\n\
         \n\
         {child_init}\
         package.state = package_state_initialized;\n\
         return &package;\n\
         }}\n\
         \n",
        name = stmt.name,
    ));
    Ok(())
}

fn generate_package_body(stmt: &PackageStmt<'_>, ctx: &mut Context) -> GenResult<()> {
    for child in &stmt.body {
        generate(child, ctx)?;
        ctx.flush_statement();
    }
    Ok(())
}

/// Emits a function: a static C function plus its scope registration.
fn generate_function(stmt: &FunctionStmt<'_>, ctx: &mut Context) -> GenResult<()> {
    emit_callable(stmt.name, &stmt.params, &stmt.locals, &stmt.body, ctx)
}

/// Emits a procedure with the same machinery as a function; the language
/// exposes no return slot, but the emitted shape is identical.
fn generate_procedure(stmt: &ProcedureStmt<'_>, ctx: &mut Context) -> GenResult<()> {
    emit_callable(stmt.name, &[], &stmt.locals, &stmt.body, ctx)
}

fn emit_callable(
    name: &str,
    params: &[VarDecl<'_>],
    locals: &[VarDecl<'_>],
    body: &[Node<'_>],
    ctx: &mut Context,
) -> GenResult<()> {
    // Parameters and locals share the var-decl emission; the body follows
    // in a fresh value buffer, consumed wholesale into `functions`.
    let saved_value = std::mem::take(&mut ctx.value);
    let result = (|| -> GenResult<()> {
        for decl in params.iter().chain(locals) {
            emit_var_decl(decl, ctx);
        }
        for child in body {
            generate(child, ctx)?;
        }
        Ok(())
    })();
    let body_text = std::mem::replace(&mut ctx.value, saved_value);
    result?;

    ctx.functions.push_str(&format!(
        "static value_t *__{name}(scope_t *parent_scope, value_t *const *args) {{\n\
         scope_t function_scope = {{parent_scope}};\n\
         scope_t *scope = &function_scope;\n\
         value_t *return_value = 0;\n\
         \n\
         {body_text}\
         \n\
         return_stmt:\n\
         scope_drop(scope);\n\
         return return_value;\n\
         }}\n\
         \n"
    ));

    // Always registered with zero arguments; see the module docs.
    ctx.init.push_str(&format!(
        "scope_insert_value(scope, \"{name}\", function_value(__{name}, 0));\n\n"
    ));
    Ok(())
}

/// Emits `scope_insert_value(scope, "<name>", value_default(<type>));`.
fn emit_var_decl(decl: &VarDecl<'_>, ctx: &mut Context) {
    ctx.value
        .push_str(&format!("scope_insert_value(scope, \"{}\", value_default(", decl.name));
    emit_path(&decl.ty, ctx);
    ctx.value.push_str("));\n");
}

/// Emits the left-associated lookup chain for a dotted path:
/// `value_get( … value_get( scope_get(scope, "c0"), "c1" ) …, "cn")`.
fn emit_path(path: &Path<'_>, ctx: &mut Context) {
    let mut chain = format!("scope_get(scope, \"{}\")", path.components[0]);
    for component in &path.components[1..] {
        chain = format!("value_get({chain}, \"{component}\")");
    }
    ctx.value.push_str(&chain);
}

/// The mangled initializer symbol for a package path: dotted components
/// joined with `__`, wrapped as `_package_<mangled>_init`.
pub fn package_init_symbol(path: &Path<'_>) -> String {
    format!("_package_{}_init", path.components.join("__"))
}

/// The C constant naming a comparison operator.
fn cmp_op_tag(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Equal => "cmp_op_equal",
        CmpOp::NotEqual => "cmp_op_not_equal",
        CmpOp::Less => "cmp_op_less",
        CmpOp::LessOrEqual => "cmp_op_less_or_equal",
        CmpOp::Greater => "cmp_op_greater",
        CmpOp::GreaterOrEqual => "cmp_op_greater_or_equal",
    }
}

/// Re-escapes decoded string text for a C string literal.
fn escape_c(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}
