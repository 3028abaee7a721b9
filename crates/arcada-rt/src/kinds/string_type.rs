//! The `String` type-value.

use std::any::Any;

use crate::error::RtResult;
use crate::kinds::string::string_value_from_str;
use crate::value::{Value, ValueOps};

struct StringTypeValue;

impl ValueOps for StringTypeValue {
    fn kind(&self) -> &'static str {
        "string_type"
    }

    fn default_value(&self) -> RtResult<*mut Value> {
        Ok(string_value_from_str(""))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Constructs the string type-value with reference count 1.
pub(crate) fn string_type_value() -> *mut Value {
    Value::new(StringTypeValue)
}
