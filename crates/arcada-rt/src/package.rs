//! Packages: named scopes with a lazily-run initialization state machine.
//!
//! `package_t` is layout-visible to C — generated package initializers hold
//! one in a static (`static package_t package = {"A.B"};`) and drive the
//! state transitions themselves. The runtime only supplies the pieces those
//! initializers call into.

use std::ffi::{c_char, CStr};

use crate::error::{RtError, RtResult};
use crate::scope::{self, Scope};
use crate::value::Value;

/// Initialization state of a package. The discriminants are ABI-shared
/// with generated code, which zero-initializes its statics.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageState {
    Uninitialized = 0,
    Initializing = 1,
    Initialized = 2,
}

/// A package, ABI-compatible with the `package_t` of the C header.
#[repr(C)]
pub struct Package {
    /// Dotted package name, NUL-terminated, owned by the embedding code.
    pub name: *const c_char,
    pub state: PackageState,
    pub scope: Scope,
}

impl Package {
    /// The package name as UTF-8 text.
    ///
    /// # Safety
    /// `self.name` must point at a NUL-terminated string.
    pub(crate) unsafe fn name_str(&self) -> std::borrow::Cow<'_, str> {
        CStr::from_ptr(self.name).to_string_lossy()
    }
}

/// The error raised when a package initializer observes itself running.
///
/// # Safety
/// `name` must point at a NUL-terminated string.
pub(crate) unsafe fn already_initializing(name: *const c_char) -> RtError {
    RtError::CircularPackageInit(CStr::from_ptr(name).to_string_lossy().into_owned())
}

/// Inserts an owned value into the package's own scope. Used by built-in
/// and hand-written packages while they initialize.
///
/// # Safety
/// `package` must be live; `value` a live owned handle.
pub(crate) unsafe fn insert(package: *mut Package, key: &str, value: *mut Value) -> RtResult<()> {
    scope::insert(&mut (*package).scope, key, value)
}
