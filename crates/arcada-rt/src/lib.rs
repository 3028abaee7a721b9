//! arcada-rt - Runtime Library
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! The library that C emitted by the translator links against. It supplies
//! the dynamically-typed value model the generated code computes with:
//!
//! - VALUES: heap objects with an explicit reference count and per-kind
//!   virtual operations (string, integer, bool, range-type, string-type,
//!   function, c-function, package). The kinds implement a trait; generated
//!   code sees only opaque `value_t *` handles.
//! - SCOPES: insertion-ordered name→value maps with one parent link.
//!   `scope_t` is layout-visible so generated functions can stack-allocate
//!   their scopes and packages can live in C statics.
//! - PACKAGES: named scopes behind a three-state lazy initializer, plus the
//!   built-in `Ada.Text_IO`.
//!
//! The crate builds as a `staticlib`/`cdylib`; `include/arcada-rt.h`
//! declares the exact surface, and `ffi` implements it. Internally
//! everything is `Result`-based and unit-tested; errors that reach the C
//! boundary print one line to stderr and exit non-zero, per the
//! no-recovery contract.
//!
//! The runtime is strictly single-threaded: reference counts are plain
//! cells and scopes are unsynchronized.

mod error;
pub mod ffi;
mod kinds;
mod package;
mod scope;
mod text_io;
mod value;

pub use error::{RtError, RtResult};
pub use kinds::c_function::CFunctionCallFn;
pub use kinds::function::FunctionCallFn;
pub use package::{Package, PackageState};
pub use scope::Scope;
pub use text_io::_package_Ada__Text_IO_init;
pub use value::{CmpOp, Value};
