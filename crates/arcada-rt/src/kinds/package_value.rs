//! Package values: the scope-resident wrappers that make a dotted package
//! name navigable with member lookups.
//!
//! `scope_insert_package` splits `A.B.C` and nests one wrapper per
//! component. The innermost wrapper is then linked to the real package by
//! parenting its scope to the package's scope, so member lookups fall
//! through to the package's own entries.

use std::any::Any;
use std::cell::{RefCell, UnsafeCell};

use crate::error::{RtError, RtResult};
use crate::package::Package;
use crate::scope::{self, Scope};
use crate::value::{self, Value, ValueOps};

struct PackageValue {
    name: RefCell<String>,
    scope: UnsafeCell<Scope>,
}

impl PackageValue {
    fn scope_ptr(&self) -> *mut Scope {
        self.scope.get()
    }
}

impl ValueOps for PackageValue {
    fn kind(&self) -> &'static str {
        "package"
    }

    fn to_string(&self) -> RtResult<String> {
        Ok(self.name.borrow().clone())
    }

    fn get(&self, key: &str) -> RtResult<*mut Value> {
        match unsafe { scope::try_get(self.scope_ptr(), key) } {
            Some(found) => Ok(unsafe { value::add_ref(found) }),
            None => Err(RtError::MissingMember {
                container: self.name.borrow().clone(),
                key: key.to_string(),
            }),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for PackageValue {
    fn drop(&mut self) {
        // Child wrappers inserted along a dotted path are owned here.
        unsafe {
            let _ = scope::drop_entries(self.scope_ptr());
        }
    }
}

/// A wrapper not yet linked to any package.
pub(crate) fn empty_package_value() -> *mut Value {
    Value::new(PackageValue {
        name: RefCell::new("<package>".to_string()),
        scope: UnsafeCell::new(Scope::new(std::ptr::null_mut())),
    })
}

fn as_package_value(value: *mut Value) -> RtResult<&'static PackageValue> {
    let ops = unsafe { (*value).ops_any() };
    match ops.downcast_ref::<PackageValue>() {
        // The caller keeps the value alive for the duration of the borrow.
        Some(package) => Ok(unsafe { &*(package as *const PackageValue) }),
        None => Err(RtError::NotAPackage {
            kind: unsafe { (*value).kind() },
        }),
    }
}

/// Links a wrapper to its package: takes over the package's name and
/// parents the wrapper scope to the package scope.
///
/// # Safety
/// `value` must be a live package-value handle, `package` a live package.
pub(crate) unsafe fn set_package(value: *mut Value, package: *mut Package) -> RtResult<()> {
    let wrapper = as_package_value(value)?;
    *wrapper.name.borrow_mut() = (*package).name_str().into_owned();
    (*wrapper.scope_ptr()).parent = &mut (*package).scope;
    Ok(())
}

/// Finds or creates the child wrapper for one path component.
///
/// # Safety
/// `value` must be a live package-value handle.
pub(crate) unsafe fn get_or_insert_child(value: *mut Value, key: &str) -> RtResult<*mut Value> {
    let wrapper = as_package_value(value)?;
    if let Some(existing) = scope::try_get(wrapper.scope_ptr(), key) {
        return Ok(existing);
    }
    let child = empty_package_value();
    scope::insert(wrapper.scope_ptr(), key, child)?;
    Ok(child)
}
