//! The built-in `Ada.Text_IO` package.
//!
//! Generated code reaches it through the mangled initializer symbol, the
//! same way it reaches translated packages. The initializer is the same
//! three-state machine the generator emits, driven from Rust.

use std::ffi::c_void;
use std::ptr::{self, addr_of_mut};

use crate::error::{fatal, ok_or_fatal};
use crate::kinds::c_function::c_function_value;
use crate::package::{self, Package, PackageState};
use crate::scope::Scope;
use crate::value::{self, Value};

static NAME: &[u8] = b"Ada.Text_IO\0";

static mut TEXT_IO: Package = Package {
    name: ptr::null(),
    state: PackageState::Uninitialized,
    scope: Scope::new(ptr::null_mut()),
};

/// Writes each argument's text and a newline to stdout. Returns no value.
unsafe extern "C" fn put_line(
    _data: *mut c_void,
    argc: usize,
    argv: *const *mut Value,
) -> *mut Value {
    for i in 0..argc {
        let text = ok_or_fatal(value::to_string(*argv.add(i)));
        println!("{text}");
    }
    ptr::null_mut()
}

/// Initializer for `Ada.Text_IO`, addressable from generated C.
///
/// # Safety
/// Single-threaded by the runtime contract.
#[no_mangle]
pub unsafe extern "C" fn _package_Ada__Text_IO_init() -> *mut Package {
    let package = addr_of_mut!(TEXT_IO);
    if (*package).name.is_null() {
        (*package).name = NAME.as_ptr().cast();
    }

    match (*package).state {
        PackageState::Uninitialized => {}
        PackageState::Initializing => {
            fatal(package::already_initializing((*package).name));
        }
        PackageState::Initialized => return package,
    }

    (*package).state = PackageState::Initializing;

    ok_or_fatal(package::insert(
        package,
        "Put_Line",
        c_function_value(put_line, ptr::null_mut()),
    ));

    (*package).state = PackageState::Initialized;
    package
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope;

    // One test drives the whole package: the initializer works on a
    // process-wide static, so splitting these checks across parallel test
    // threads would race it.
    #[test]
    fn test_text_io_package() {
        unsafe {
            let first = _package_Ada__Text_IO_init();
            let second = _package_Ada__Text_IO_init();
            assert_eq!(first, second);
            assert_eq!((*first).state, PackageState::Initialized);

            let put_line = scope::get(&mut (*first).scope, "Put_Line").unwrap();
            assert_eq!((*put_line).kind(), "c_function");
            value::release(put_line).unwrap();

            let package = _package_Ada__Text_IO_init();

            let mut main_scope = Scope::new(ptr::null_mut());
            scope::insert_package(&mut main_scope, package).unwrap();

            let ada = scope::get(&mut main_scope, "Ada").unwrap();
            let text_io = value::get(ada, "Text_IO").unwrap();
            let put_line = value::get(text_io, "Put_Line").unwrap();

            // Calling with no arguments prints nothing and returns NULL.
            let result = value::call(put_line, &mut main_scope, &[]).unwrap();
            assert!(result.is_null());
            value::release(result).unwrap();

            scope::drop_entries(&mut main_scope).unwrap();
        }
    }
}
