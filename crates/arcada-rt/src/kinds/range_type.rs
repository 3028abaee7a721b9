//! Range types: the type-values behind `Integer` and friends.

use std::any::Any;

use crate::error::RtResult;
use crate::kinds::integer::{integer_value, Integer};
use crate::value::{Value, ValueOps};

struct RangeTypeValue {
    min: Integer,
    max: Integer,
}

impl ValueOps for RangeTypeValue {
    fn kind(&self) -> &'static str {
        "range_type"
    }

    fn to_string(&self) -> RtResult<String> {
        Ok(format!("range {} .. {}", self.min, self.max))
    }

    // Declared variables of a range type start at zero, whatever the range.
    fn default_value(&self) -> RtResult<*mut Value> {
        Ok(integer_value(0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Constructs a range-type value with reference count 1.
pub(crate) fn range_type_value(min: Integer, max: Integer) -> *mut Value {
    Value::new(RangeTypeValue { min, max })
}
