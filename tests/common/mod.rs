//! Shared test utilities and fixtures.

#![allow(dead_code)]

use structural::{t, Field, Type, Value};

/// Lift a `json!` literal into a checkable value.
pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Required string field.
pub fn s() -> Field {
    t::str().into()
}

/// Required number field.
pub fn n() -> Field {
    t::num().into()
}

pub fn subtype(names: &[&str]) -> Type {
    t::subtype(names.iter().map(|name| (*name, s())))
}

pub fn exact(names: &[&str]) -> Type {
    t::exact(names.iter().map(|name| (*name, s())))
}

/// Render the root-relative path of every root cause.
pub fn cause_paths(err: &structural::StructuralError) -> Vec<String> {
    err.report().into_iter().map(|c| c.path).collect()
}
