//! Boolean values, produced by comparisons.

use std::any::Any;
use std::cell::Cell;

use crate::error::{RtError, RtResult};
use crate::value::{CmpOp, Value, ValueOps};

struct BoolValue {
    value: Cell<bool>,
}

impl ValueOps for BoolValue {
    fn kind(&self) -> &'static str {
        "bool"
    }

    fn to_string(&self) -> RtResult<String> {
        Ok(if self.value.get() { "true" } else { "false" }.to_string())
    }

    fn to_bool(&self) -> RtResult<bool> {
        Ok(self.value.get())
    }

    fn assign(&self, other: &Value) -> RtResult<()> {
        let Some(source) = other.ops_any().downcast_ref::<BoolValue>() else {
            return Err(RtError::AssignKindMismatch {
                target_kind: self.kind(),
                source_kind: other.kind(),
            });
        };
        self.value.set(source.value.get());
        Ok(())
    }

    fn cmp(&self, op: CmpOp, other: &Value) -> RtResult<bool> {
        let Some(rhs) = other.ops_any().downcast_ref::<BoolValue>() else {
            return Err(RtError::CmpKindMismatch {
                lhs_kind: self.kind(),
                rhs_kind: other.kind(),
            });
        };
        Ok(op.eval(self.value.get().cmp(&rhs.value.get())))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Constructs a boolean value with reference count 1.
pub(crate) fn bool_value(value: bool) -> *mut Value {
    Value::new(BoolValue {
        value: Cell::new(value),
    })
}
