//! The emitter context: three growable text buffers threaded through the
//! AST walk.
//!
//! - `functions` collects forward declarations and finished C function
//!   bodies, linearly; it is never nested.
//! - `init` collects the initialization statements of the current enclosing
//!   package (or, at top level, of the synthesized `main`). Package emission
//!   nests it: the outer buffer is saved, a fresh one installed, and the
//!   accumulated text consumed into the package's init function.
//! - `value` holds the C fragment of the statement currently being emitted.
//!   Statement emitters start with it empty and leave their finished text in
//!   it; the owner of the statement list moves it into the surrounding
//!   buffer. Only one `value` is ever live.

use std::mem;

use crate::error::{GenError, GenResult};

/// The C fragment prepended ahead of all generated declarations.
pub const RUNTIME_INCLUDE: &str = "#include <arcada-rt.h>\n\n";

/// Three text buffers accumulating the C translation unit.
#[derive(Debug, Default)]
pub struct Context {
    pub(crate) functions: String,
    pub(crate) init: String,
    pub(crate) value: String,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends the fixed runtime header include.
    ///
    /// The driver calls this once, before walking the statement list.
    pub fn emit_prelude(&mut self) {
        self.functions.push_str(RUNTIME_INCLUDE);
    }

    /// Moves the finished statement text from `value` into `init`.
    ///
    /// Called by the owner of a top-level or package-body statement list
    /// after each statement.
    pub fn flush_statement(&mut self) {
        let text = mem::take(&mut self.value);
        self.init.push_str(&text);
    }

    /// Read access to the `functions` buffer, for tests and diagnostics.
    pub fn functions(&self) -> &str {
        &self.functions
    }

    /// Read access to the `init` buffer.
    pub fn init(&self) -> &str {
        &self.init
    }

    /// Read access to the `value` buffer.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the context into the final C translation unit.
    ///
    /// Anything left in `value` means a statement was emitted without being
    /// flushed — a generator bug, reported rather than silently dropped. A
    /// non-empty `init` means top-level statements accumulated outside any
    /// package; they become a `main` that opens a scope, installs the
    /// built-ins, runs the accumulated text, executes the last inserted
    /// value as the program entry, and drops the scope.
    pub fn finalize(mut self) -> GenResult<String> {
        if !self.value.is_empty() {
            return Err(GenError::DanglingValue(self.value));
        }

        if !self.init.is_empty() {
            let init = mem::take(&mut self.init);
            self.functions.push_str(&format!(
                "int main(void) {{\n\
                 scope_t main_scope = {{0}};\n\
                 scope_t *scope = &main_scope;\n\
                 \n\
                 main_scope_init(scope);\n\
                 \n\
                 {init}\
                 scope_exec_main(scope);\n\
                 \n\
                 scope_drop(scope);\n\
                 return 0;\n\
                 }}\n"
            ));
        }

        if self.functions.is_empty() {
            return Err(GenError::NoCode);
        }

        Ok(self.functions)
    }
}
