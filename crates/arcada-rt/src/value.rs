//! The runtime value model.
//!
//! A value is a heap allocation with an explicit reference count and one
//! boxed `ValueOps` implementation per kind. Generated code only ever sees
//! `value_t *`; the trait carries the virtual operations, with unsupported
//! ones defaulting to an error that the FFI layer turns fatal.
//!
//! REFERENCE-COUNT DISCIPLINE (one rule, applied everywhere):
//! every dispatch function here CONSUMES the references it is handed and
//! returns OWNED references. `cmp` and `assign` consume both operands;
//! `scope_get` (in `scope`) returns a fresh reference to the stored value.
//! Scope entries own one reference each until the scope is dropped.

use std::any::Any;
use std::cell::Cell;

use crate::error::{RtError, RtResult};
use crate::scope::Scope;

/// Comparison operator tags, ABI-shared with generated C.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CmpOp {
    /// Applies the operator to an ordering.
    pub(crate) fn eval(self, ordering: std::cmp::Ordering) -> bool {
        match self {
            CmpOp::Equal => ordering.is_eq(),
            CmpOp::NotEqual => ordering.is_ne(),
            CmpOp::Less => ordering.is_lt(),
            CmpOp::LessOrEqual => ordering.is_le(),
            CmpOp::Greater => ordering.is_gt(),
            CmpOp::GreaterOrEqual => ordering.is_ge(),
        }
    }
}

/// A reference-counted runtime value.
pub struct Value {
    refs: Cell<usize>,
    ops: Box<dyn ValueOps>,
}

impl Value {
    /// Allocates a value with reference count 1 and returns its raw handle.
    pub(crate) fn new(ops: impl ValueOps) -> *mut Value {
        Box::into_raw(Box::new(Value {
            refs: Cell::new(1),
            ops: Box::new(ops),
        }))
    }

    /// The kind name used in diagnostics.
    pub(crate) fn kind(&self) -> &'static str {
        self.ops.kind()
    }

    /// Downcast access to the concrete kind.
    pub(crate) fn ops_any(&self) -> &dyn Any {
        self.ops.as_any()
    }

    #[cfg(test)]
    pub(crate) fn refs(&self) -> usize {
        self.refs.get()
    }
}

/// The per-kind virtual operations.
///
/// Default methods reject the operation for the kind; each kind overrides
/// exactly what it supports. Payload mutation (`assign`) goes through
/// interior mutability — the runtime is single-threaded by contract.
pub(crate) trait ValueOps: Any {
    fn kind(&self) -> &'static str;

    fn to_string(&self) -> RtResult<String> {
        Err(unsupported(self.kind(), "to_string"))
    }

    fn to_bool(&self) -> RtResult<bool> {
        Err(unsupported(self.kind(), "to_bool"))
    }

    fn assign(&self, other: &Value) -> RtResult<()> {
        let _ = other;
        Err(unsupported(self.kind(), "assignment"))
    }

    fn default_value(&self) -> RtResult<*mut Value> {
        Err(unsupported(self.kind(), "default"))
    }

    fn cmp(&self, op: CmpOp, other: &Value) -> RtResult<bool> {
        let _ = (op, other);
        Err(unsupported(self.kind(), "comparison"))
    }

    fn call(&self, scope: *mut Scope, args: &[*mut Value]) -> RtResult<*mut Value> {
        let _ = (scope, args);
        Err(unsupported(self.kind(), "calling"))
    }

    fn get(&self, key: &str) -> RtResult<*mut Value> {
        let _ = key;
        Err(unsupported(self.kind(), "get by key"))
    }

    /// True for kinds whose bare reference means "call with no arguments".
    fn deref_call(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

fn unsupported(kind: &'static str, operation: &'static str) -> RtError {
    RtError::UnsupportedOperation { kind, operation }
}

// ---------------------------------------------------------------------------
// Reference counting
// ---------------------------------------------------------------------------

/// Adds one reference and passes the handle through. NULL is ignored.
///
/// # Safety
///
/// `value` must be NULL or a live handle from `Value::new`.
pub(crate) unsafe fn add_ref(value: *mut Value) -> *mut Value {
    if let Some(v) = value.as_ref() {
        let refs = v.refs.get();
        if refs == usize::MAX {
            crate::error::fatal(RtError::RefCountOverflow);
        }
        v.refs.set(refs + 1);
    }
    value
}

/// Releases one reference, freeing the value at zero. NULL is ignored.
///
/// # Safety
///
/// `value` must be NULL or a live handle owned by the caller.
pub(crate) unsafe fn release(value: *mut Value) -> RtResult<()> {
    let Some(v) = value.as_ref() else {
        return Ok(());
    };
    let refs = v.refs.get();
    if refs == 0 {
        return Err(RtError::RefCountUnderflow);
    }
    v.refs.set(refs - 1);
    if refs == 1 {
        drop(Box::from_raw(value));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dispatch. Every function consumes its value arguments.
// ---------------------------------------------------------------------------

/// # Safety
/// `value` must be a live owned handle.
pub(crate) unsafe fn to_string(value: *mut Value) -> RtResult<String> {
    let text = (*value).ops.to_string()?;
    release(value)?;
    Ok(text)
}

/// # Safety
/// `value` must be a live owned handle.
pub(crate) unsafe fn to_bool(value: *mut Value) -> RtResult<bool> {
    let result = (*value).ops.to_bool()?;
    release(value)?;
    Ok(result)
}

/// # Safety
/// Both handles must be live and owned by the caller.
pub(crate) unsafe fn assign(target: *mut Value, source: *mut Value) -> RtResult<()> {
    (*target).ops.assign(&*source)?;
    release(target)?;
    release(source)
}

/// # Safety
/// `value` must be a live owned handle.
pub(crate) unsafe fn default_of(value: *mut Value) -> RtResult<*mut Value> {
    let default = (*value).ops.default_value()?;
    release(value)?;
    Ok(default)
}

/// # Safety
/// Both handles must be live and owned by the caller.
pub(crate) unsafe fn cmp(lhs: *mut Value, op: CmpOp, rhs: *mut Value) -> RtResult<*mut Value> {
    let result = (*lhs).ops.cmp(op, &*rhs)?;
    release(lhs)?;
    release(rhs)?;
    Ok(crate::kinds::boolean::bool_value(result))
}

/// Calls a value. The callee reference and every argument reference are
/// consumed (arguments by the callee's implementation).
///
/// # Safety
/// `value` must be a live owned handle; `args` must be live owned handles.
pub(crate) unsafe fn call(
    value: *mut Value,
    scope: *mut Scope,
    args: &[*mut Value],
) -> RtResult<*mut Value> {
    let result = (*value).ops.call(scope, args)?;
    release(value)?;
    Ok(result)
}

/// # Safety
/// `value` must be a live owned handle.
pub(crate) unsafe fn get(value: *mut Value, key: &str) -> RtResult<*mut Value> {
    let member = (*value).ops.get(key)?;
    release(value)?;
    Ok(member)
}

/// Dereferences a bare reference: parameterless functions are invoked,
/// everything else passes through untouched.
///
/// # Safety
/// `value` must be a live owned handle.
pub(crate) unsafe fn to_value(value: *mut Value, scope: *mut Scope) -> RtResult<*mut Value> {
    if (*value).ops.deref_call() {
        call(value, scope, &[])
    } else {
        Ok(value)
    }
}
