//! Function values: translated functions and procedures.
//!
//! A bare reference to a function means "call it with no arguments" — the
//! dereference hook reports that, and the dispatch layer routes
//! `value_to_value` into `call`. The call receives the CALL-SITE scope as
//! the function's parent scope.

use std::any::Any;

use crate::error::{RtError, RtResult};
use crate::scope::Scope;
use crate::value::{Value, ValueOps};

/// ABI of a translated function body: call-site scope plus argument vector.
pub type FunctionCallFn =
    unsafe extern "C" fn(scope: *mut Scope, args: *const *mut Value) -> *mut Value;

struct FunctionValue {
    call_fn: FunctionCallFn,
    /// Declared argument count. The generator currently registers every
    /// function with zero, so calls with arguments fail here.
    argc: usize,
}

impl ValueOps for FunctionValue {
    fn kind(&self) -> &'static str {
        "function"
    }

    fn call(&self, scope: *mut Scope, args: &[*mut Value]) -> RtResult<*mut Value> {
        if args.len() != self.argc {
            return Err(RtError::ArgumentCountMismatch {
                expected: self.argc,
                got: args.len(),
            });
        }
        Ok(unsafe { (self.call_fn)(scope, args.as_ptr()) })
    }

    fn deref_call(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Constructs a function value with reference count 1.
pub(crate) fn function_value(call_fn: FunctionCallFn, argc: usize) -> *mut Value {
    Value::new(FunctionValue { call_fn, argc })
}
