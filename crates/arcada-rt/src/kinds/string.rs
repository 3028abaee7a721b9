//! String values.

use std::any::Any;
use std::cell::RefCell;

use crate::error::{RtError, RtResult};
use crate::value::{Value, ValueOps};

struct StringValue {
    value: RefCell<String>,
}

impl ValueOps for StringValue {
    fn kind(&self) -> &'static str {
        "string"
    }

    fn to_string(&self) -> RtResult<String> {
        Ok(self.value.borrow().clone())
    }

    fn assign(&self, other: &Value) -> RtResult<()> {
        let Some(source) = other.ops_any().downcast_ref::<StringValue>() else {
            return Err(RtError::AssignKindMismatch {
                target_kind: self.kind(),
                source_kind: other.kind(),
            });
        };
        *self.value.borrow_mut() = source.value.borrow().clone();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Constructs a string value with reference count 1.
pub(crate) fn string_value_from_str(value: &str) -> *mut Value {
    Value::new(StringValue {
        value: RefCell::new(value.to_string()),
    })
}
