//! The C surface of the runtime — everything generated code links against.
//!
//! Symbol names and signatures mirror `include/arcada-rt.h`. Each wrapper
//! converts C strings at the boundary, forwards to the internal API, and
//! turns any error into the fatal path: one line on stderr, exit non-zero.
//!
//! Reference counts: every `value_t *` passed in is consumed, every
//! `value_t *` returned is owned by the caller. `value_drop(NULL)` is a
//! no-op so built-ins may return NULL for "no value".

use std::ffi::{c_char, c_void, CStr};
use std::slice;

use crate::error::{ok_or_fatal, RtError};
use crate::kinds::boolean;
use crate::kinds::c_function::{self, CFunctionCallFn};
use crate::kinds::function::{self, FunctionCallFn};
use crate::kinds::integer::{self, Integer};
use crate::kinds::range_type;
use crate::kinds::string;
use crate::package::{self, Package};
use crate::scope::{self, Scope};
use crate::value::{self, CmpOp, Value};

unsafe fn key_str<'a>(key: *const c_char) -> std::borrow::Cow<'a, str> {
    CStr::from_ptr(key).to_string_lossy()
}

// ---------------------------------------------------------------------------
// Scopes
// ---------------------------------------------------------------------------

/// # Safety
/// `scope` must be a live, zero-initialized or already-used scope.
#[no_mangle]
pub unsafe extern "C" fn main_scope_init(scope: *mut Scope) {
    ok_or_fatal(scope::init_builtins(scope));
}

/// # Safety
/// As `main_scope_init`.
#[no_mangle]
pub unsafe extern "C" fn package_scope_init(scope: *mut Scope) {
    ok_or_fatal(scope::init_builtins(scope));
}

/// # Safety
/// `scope` and `package` must be live; the package name must outlive the
/// scope.
#[no_mangle]
pub unsafe extern "C" fn scope_insert_package(scope: *mut Scope, package: *mut Package) {
    ok_or_fatal(scope::insert_package(scope, package));
}

/// # Safety
/// `scope` live, `name` NUL-terminated, `value` a live owned handle.
#[no_mangle]
pub unsafe extern "C" fn scope_insert_value(
    scope: *mut Scope,
    name: *const c_char,
    value: *mut Value,
) {
    ok_or_fatal(scope::insert(scope, &key_str(name), value));
}

/// Returns an owned reference to the named value; missing names are fatal.
///
/// # Safety
/// `scope` live, `name` NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn scope_get(scope: *mut Scope, name: *const c_char) -> *mut Value {
    ok_or_fatal(scope::get(scope, &key_str(name)))
}

/// Calls the last inserted value with zero arguments.
///
/// # Safety
/// `scope` must be live.
#[no_mangle]
pub unsafe extern "C" fn scope_exec_main(scope: *mut Scope) {
    ok_or_fatal(scope::exec_main(scope));
}

/// # Safety
/// `scope` must be live; its entries must not be aliased.
#[no_mangle]
pub unsafe extern "C" fn scope_drop(scope: *mut Scope) {
    ok_or_fatal(scope::drop_entries(scope));
}

// ---------------------------------------------------------------------------
// Value operations
// ---------------------------------------------------------------------------

/// # Safety
/// `value` must be NULL or a live owned handle.
#[no_mangle]
pub unsafe extern "C" fn value_drop(value: *mut Value) {
    ok_or_fatal(value::release(value));
}

/// # Safety
/// Both handles must be live and owned by the caller.
#[no_mangle]
pub unsafe extern "C" fn value_assign(target: *mut Value, value: *mut Value) {
    ok_or_fatal(value::assign(target, value));
}

/// # Safety
/// `value` must be a live owned handle.
#[no_mangle]
pub unsafe extern "C" fn value_default(value: *mut Value) -> *mut Value {
    ok_or_fatal(value::default_of(value))
}

/// # Safety
/// `value` must be a live owned handle.
#[no_mangle]
pub unsafe extern "C" fn value_to_bool(value: *mut Value) -> bool {
    ok_or_fatal(value::to_bool(value))
}

/// Returns a malloc'd NUL-terminated copy; the caller frees it.
///
/// # Safety
/// `value` must be a live owned handle.
#[no_mangle]
pub unsafe extern "C" fn value_to_string(value: *mut Value) -> *mut c_char {
    let text = ok_or_fatal(value::to_string(value));
    let buffer = libc::malloc(text.len() + 1) as *mut u8;
    if buffer.is_null() {
        crate::error::fatal(RtError::OutOfMemory);
    }
    std::ptr::copy_nonoverlapping(text.as_ptr(), buffer, text.len());
    *buffer.add(text.len()) = 0;
    buffer as *mut c_char
}

/// # Safety
/// `value` must be a live owned handle; `scope` live.
#[no_mangle]
pub unsafe extern "C" fn value_to_value(value: *mut Value, scope: *mut Scope) -> *mut Value {
    ok_or_fatal(value::to_value(value, scope))
}

/// # Safety
/// `value` must be a live owned handle; `argv` must point at `argc` live
/// owned handles (or be NULL when `argc` is zero).
#[no_mangle]
pub unsafe extern "C" fn value_call(
    value: *mut Value,
    scope: *mut Scope,
    argc: usize,
    argv: *const *mut Value,
) -> *mut Value {
    let args = if argc == 0 {
        &[]
    } else {
        slice::from_raw_parts(argv, argc)
    };
    ok_or_fatal(value::call(value, scope, args))
}

/// # Safety
/// `value` must be a live owned handle; `key` NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn value_get(value: *mut Value, key: *const c_char) -> *mut Value {
    ok_or_fatal(value::get(value, &key_str(key)))
}

/// # Safety
/// Both handles must be live and owned by the caller.
#[no_mangle]
pub unsafe extern "C" fn value_cmp(lhs: *mut Value, op: CmpOp, rhs: *mut Value) -> *mut Value {
    ok_or_fatal(value::cmp(lhs, op, rhs))
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

#[no_mangle]
pub extern "C" fn integer_value(value: Integer) -> *mut Value {
    integer::integer_value(value)
}

/// # Safety
/// `value` must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn string_value(value: *const c_char) -> *mut Value {
    string::string_value_from_str(&CStr::from_ptr(value).to_string_lossy())
}

#[no_mangle]
pub extern "C" fn bool_value(value: bool) -> *mut Value {
    boolean::bool_value(value)
}

#[no_mangle]
pub extern "C" fn range_type_value(min: Integer, max: Integer) -> *mut Value {
    range_type::range_type_value(min, max)
}

#[no_mangle]
pub extern "C" fn function_value(call: FunctionCallFn, argc: usize) -> *mut Value {
    function::function_value(call, argc)
}

#[no_mangle]
pub extern "C" fn c_function_value(call: CFunctionCallFn, data: *mut c_void) -> *mut Value {
    c_function::c_function_value(call, data)
}

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

/// # Safety
/// `package` live, `key` NUL-terminated, `value` a live owned handle.
#[no_mangle]
pub unsafe extern "C" fn package_insert(
    package: *mut Package,
    key: *const c_char,
    value: *mut Value,
) {
    ok_or_fatal(package::insert(package, &key_str(key), value));
}

/// Reports circular package initialization; never returns.
///
/// # Safety
/// `name` must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn package_already_initializing(name: *const c_char) -> *mut Package {
    crate::error::fatal(package::already_initializing(name));
}
