//! Integer values.

use std::any::Any;
use std::cell::Cell;

use crate::error::{RtError, RtResult};
use crate::value::{CmpOp, Value, ValueOps};

/// The integer payload type shared with the C header.
pub(crate) type Integer = i64;

struct IntegerValue {
    value: Cell<Integer>,
}

impl ValueOps for IntegerValue {
    fn kind(&self) -> &'static str {
        "integer"
    }

    fn to_string(&self) -> RtResult<String> {
        Ok(self.value.get().to_string())
    }

    fn to_bool(&self) -> RtResult<bool> {
        Ok(self.value.get() != 0)
    }

    fn assign(&self, other: &Value) -> RtResult<()> {
        let Some(source) = other.ops_any().downcast_ref::<IntegerValue>() else {
            return Err(RtError::AssignKindMismatch {
                target_kind: self.kind(),
                source_kind: other.kind(),
            });
        };
        self.value.set(source.value.get());
        Ok(())
    }

    fn cmp(&self, op: CmpOp, other: &Value) -> RtResult<bool> {
        let Some(rhs) = other.ops_any().downcast_ref::<IntegerValue>() else {
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

/// Constructs an integer value with reference count 1.
pub(crate) fn integer_value(value: Integer) -> *mut Value {
    Value::new(IntegerValue {
        value: Cell::new(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn test_to_string() {
        unsafe {
            assert_eq!(value::to_string(integer_value(42)).unwrap(), "42");
            assert_eq!(value::to_string(integer_value(-7)).unwrap(), "-7");
        }
    }

    #[test]
    fn test_to_bool_is_nonzero() {
        unsafe {
            assert!(value::to_bool(integer_value(1)).unwrap());
            assert!(value::to_bool(integer_value(-1)).unwrap());
            assert!(!value::to_bool(integer_value(0)).unwrap());
        }
    }

    #[test]
    fn test_assign_copies_the_payload() {
        unsafe {
            let target = integer_value(1);
            value::add_ref(target);
            value::assign(target, integer_value(9)).unwrap();
            assert_eq!(value::to_string(target).unwrap(), "9");
        }
    }

    #[test]
    fn test_assign_rejects_other_kinds() {
        unsafe {
            let target = integer_value(1);
            let source = crate::kinds::string::string_value_from_str("x");
            assert_eq!(
                value::assign(target, source),
                Err(RtError::AssignKindMismatch {
                    target_kind: "integer",
                    source_kind: "string",
                })
            );
        }
    }

    #[test]
    fn test_comparisons() {
        unsafe {
            let cases = [
                (1, CmpOp::Equal, 1, true),
                (1, CmpOp::Equal, 2, false),
                (1, CmpOp::NotEqual, 2, true),
                (1, CmpOp::Less, 2, true),
                (2, CmpOp::LessOrEqual, 2, true),
                (3, CmpOp::Greater, 2, true),
                (2, CmpOp::GreaterOrEqual, 3, false),
            ];
            for (lhs, op, rhs, expected) in cases {
                let result = value::cmp(integer_value(lhs), op, integer_value(rhs)).unwrap();
                assert_eq!(
                    value::to_bool(result).unwrap(),
                    expected,
                    "{lhs} {op:?} {rhs}"
                );
            }
        }
    }
}
