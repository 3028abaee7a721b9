//! Scopes: insertion-ordered name→value maps with a single parent link.
//!
//! `scope_t` is layout-visible to C — generated code allocates scopes on
//! the stack (`scope_t function_scope = {parent_scope};`) and packages hold
//! one in a C static. The entry map therefore lives behind a raw pointer
//! that is NULL until the first insertion, so a zero-initialized struct is
//! a valid empty scope.

use std::ptr;

use indexmap::IndexMap;

use crate::error::{RtError, RtResult};
use crate::kinds::{package_value, range_type, string_type};
use crate::package::Package;
use crate::value::{self, Value};

/// A scope, ABI-compatible with the `scope_t` of the C header.
#[repr(C)]
pub struct Scope {
    /// Enclosing scope, or NULL at the top level.
    pub parent: *mut Scope,
    /// Lazily allocated entry map; NULL means empty.
    entries: *mut ScopeEntries,
}

/// Heap side of a scope. Insertion order is preserved — `scope_exec_main`
/// runs the most recently inserted value.
struct ScopeEntries {
    map: IndexMap<String, *mut Value>,
}

impl Scope {
    /// An empty scope with the given parent.
    pub(crate) const fn new(parent: *mut Scope) -> Scope {
        Scope {
            parent,
            entries: ptr::null_mut(),
        }
    }
}

unsafe fn entries_mut<'a>(scope: *mut Scope) -> &'a mut IndexMap<String, *mut Value> {
    if (*scope).entries.is_null() {
        (*scope).entries = Box::into_raw(Box::new(ScopeEntries {
            map: IndexMap::new(),
        }));
    }
    &mut (*(*scope).entries).map
}

/// Number of entries in this scope alone (parents excluded).
unsafe fn own_len(scope: *mut Scope) -> usize {
    (*scope)
        .entries
        .as_ref()
        .map(|entries| entries.map.len())
        .unwrap_or(0)
}

/// Inserts an owned value. Duplicate insertion is an error.
///
/// # Safety
/// `scope` must be a live scope; `value` a live owned handle.
pub(crate) unsafe fn insert(scope: *mut Scope, key: &str, value: *mut Value) -> RtResult<()> {
    let map = entries_mut(scope);
    if map.contains_key(key) {
        return Err(RtError::DuplicateScopeEntry(key.to_string()));
    }
    map.insert(key.to_string(), value);
    Ok(())
}

/// Looks a name up through the parent chain. Returns a borrowed handle.
///
/// # Safety
/// `scope` must be NULL or a live scope chain.
pub(crate) unsafe fn try_get(scope: *mut Scope, key: &str) -> Option<*mut Value> {
    let mut current = scope;
    while !current.is_null() {
        if let Some(entries) = (*current).entries.as_ref() {
            if let Some(&value) = entries.map.get(key) {
                return Some(value);
            }
        }
        current = (*current).parent;
    }
    None
}

/// Looks a name up and returns a fresh owned reference to it.
///
/// # Safety
/// `scope` must be a live scope chain.
pub(crate) unsafe fn get(scope: *mut Scope, key: &str) -> RtResult<*mut Value> {
    match try_get(scope, key) {
        Some(found) => Ok(value::add_ref(found)),
        None => Err(RtError::MissingScopeEntry {
            key: key.to_string(),
            entries: own_len(scope),
        }),
    }
}

/// Calls the last inserted value with zero arguments and drops the result.
///
/// # Safety
/// `scope` must be a live scope.
pub(crate) unsafe fn exec_main(scope: *mut Scope) -> RtResult<()> {
    let Some(entries) = (*scope).entries.as_ref() else {
        return Ok(());
    };
    let Some((_, &last)) = entries.map.last() else {
        return Ok(());
    };
    let result = value::call(value::add_ref(last), scope, &[])?;
    value::release(result)
}

/// Releases every owned value and frees the entry map.
///
/// # Safety
/// `scope` must be a live scope whose entries are not aliased.
pub(crate) unsafe fn drop_entries(scope: *mut Scope) -> RtResult<()> {
    if (*scope).entries.is_null() {
        return Ok(());
    }
    let entries = Box::from_raw((*scope).entries);
    (*scope).entries = ptr::null_mut();
    for (_, value) in entries.map {
        value::release(value)?;
    }
    Ok(())
}

/// True if this scope itself (parents excluded) defines `key`.
unsafe fn has_own(scope: *mut Scope, key: &str) -> bool {
    (*scope)
        .entries
        .as_ref()
        .is_some_and(|entries| entries.map.contains_key(key))
}

/// Installs the built-in types, skipping names already present so the call
/// is idempotent per scope.
///
/// # Safety
/// `scope` must be a live scope.
pub(crate) unsafe fn init_builtins(scope: *mut Scope) -> RtResult<()> {
    if !has_own(scope, "String") {
        insert(scope, "String", string_type::string_type_value())?;
    }
    if !has_own(scope, "Integer") {
        // The 32-bit base Integer range; declared variables default to 0.
        insert(scope, "Integer", range_type::range_type_value(-2147483648, 2147483647))?;
    }
    Ok(())
}

/// Splits the package's dotted name and nests package-value wrappers so
/// that `A.B.C` is reachable as member lookups from `A`.
///
/// # Safety
/// `scope` must be a live scope; `package` a live package whose name
/// outlives the scope.
pub(crate) unsafe fn insert_package(scope: *mut Scope, package: *mut Package) -> RtResult<()> {
    let name = (*package).name_str().to_string();
    let mut components = name.split('.');

    // `split` yields at least one component, even for an empty name.
    let first = components.next().unwrap_or_default();
    let mut current = match try_get(scope, first) {
        Some(existing) => existing,
        None => {
            let wrapper = package_value::empty_package_value();
            insert(scope, first, wrapper)?;
            wrapper
        }
    };

    for component in components {
        current = package_value::get_or_insert_child(current, component)?;
    }

    package_value::set_package(current, package)
}
