//! C-function values: runtime- or user-provided native functions.
//!
//! Unlike translated functions, a bare reference to a c-function is just
//! the value — only an explicit call invokes it. The callee consumes the
//! argument references.

use std::any::Any;
use std::ffi::c_void;

use crate::error::RtResult;
use crate::scope::Scope;
use crate::value::{Value, ValueOps};

/// ABI of a native function: closure data, argument count, argument vector.
pub type CFunctionCallFn =
    unsafe extern "C" fn(data: *mut c_void, argc: usize, argv: *const *mut Value) -> *mut Value;

struct CFunctionValue {
    call_fn: CFunctionCallFn,
    data: *mut c_void,
}

impl ValueOps for CFunctionValue {
    fn kind(&self) -> &'static str {
        "c_function"
    }

    fn call(&self, _scope: *mut Scope, args: &[*mut Value]) -> RtResult<*mut Value> {
        Ok(unsafe { (self.call_fn)(self.data, args.len(), args.as_ptr()) })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Constructs a c-function value with reference count 1.
pub(crate) fn c_function_value(call_fn: CFunctionCallFn, data: *mut c_void) -> *mut Value {
    Value::new(CFunctionValue { call_fn, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::integer::integer_value;
    use crate::value;
    use std::ptr;

    unsafe extern "C" fn sum_and_drop(
        _data: *mut c_void,
        argc: usize,
        argv: *const *mut Value,
    ) -> *mut Value {
        let mut total = 0;
        for i in 0..argc {
            let arg = *argv.add(i);
            let text = value::to_string(arg).unwrap();
            total += text.parse::<i64>().unwrap();
        }
        integer_value(total)
    }

    #[test]
    fn test_call_receives_the_argument_vector() {
        unsafe {
            let f = c_function_value(sum_and_drop, ptr::null_mut());
            let args = [integer_value(2), integer_value(40)];
            let result = value::call(f, ptr::null_mut(), &args).unwrap();
            assert_eq!(value::to_string(result).unwrap(), "42");
        }
    }

    #[test]
    fn test_deref_is_identity() {
        unsafe {
            let f = c_function_value(sum_and_drop, ptr::null_mut());
            let same = value::to_value(f, ptr::null_mut()).unwrap();
            assert_eq!(same, f);
            value::release(f).unwrap();
        }
    }
}
