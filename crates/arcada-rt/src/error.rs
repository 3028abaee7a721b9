//! Runtime error types.
//!
//! Inside the crate everything is `Result`-shaped so the behavior is
//! testable; the FFI boundary converts an error into the fatal path the
//! generated code expects — one line on stderr, non-zero exit, no cleanup
//! beyond what the operating system provides.

use thiserror::Error;

/// Error type for runtime operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RtError {
    /// A name was inserted twice into the same scope.
    #[error("item already defined in scope: {0}")]
    DuplicateScopeEntry(String),

    /// A scope lookup failed, including through all parents.
    #[error("failed to get {key} from scope ({entries} entries)")]
    MissingScopeEntry { key: String, entries: usize },

    /// A member lookup on a value failed.
    #[error("failed to get {key} from {container}")]
    MissingMember { container: String, key: String },

    /// A value kind does not support the requested operation.
    #[error("{kind} does not support {operation}")]
    UnsupportedOperation {
        kind: &'static str,
        operation: &'static str,
    },

    /// Assignment between incompatible kinds.
    #[error("{target_kind} assignment with {source_kind} value not supported")]
    AssignKindMismatch {
        target_kind: &'static str,
        source_kind: &'static str,
    },

    /// Comparison between incompatible kinds.
    #[error("{lhs_kind} comparison with {rhs_kind} value not supported")]
    CmpKindMismatch {
        lhs_kind: &'static str,
        rhs_kind: &'static str,
    },

    /// A function was called with the wrong number of arguments.
    #[error("number of arguments does not match {got} != {expected}")]
    ArgumentCountMismatch { expected: usize, got: usize },

    /// A package initializer re-entered itself.
    #[error("circular package initialization detected in: {0}")]
    CircularPackageInit(String),

    /// `scope_insert_package` walked into a non-package value.
    #[error("package insertion reached a {kind} value")]
    NotAPackage { kind: &'static str },

    /// A reference count was decremented below zero.
    #[error("reference count underflow")]
    RefCountUnderflow,

    /// A reference count would exceed its representation.
    #[error("reference count overflow")]
    RefCountOverflow,

    /// The C allocator refused a buffer.
    #[error("out of memory")]
    OutOfMemory,
}

/// Result type alias for runtime operations.
pub type RtResult<T> = std::result::Result<T, RtError>;

/// Aborts the process with a one-line diagnostic.
///
/// This is the only exit path for errors that reach generated code; the
/// runtime makes no cleanup guarantee past this point.
pub(crate) fn fatal(error: RtError) -> ! {
    eprintln!("{error}");
    std::process::exit(1);
}

/// Unwraps a runtime result at the FFI boundary.
pub(crate) fn ok_or_fatal<T>(result: RtResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => fatal(error),
    }
}
