//! Key tracking for record-like checks.
//!
//! Record checks, unions and intersections don't enforce exactness while
//! nested inside one another. Instead they report which keys they recognise
//! and whether unrecognised keys are forbidden, and the outermost node turns
//! that report into a verdict (`check`) or a projection (`slice`). This is what
//! lets `exact(a).and(exact(b))` accept the keys of both sides.
use indexmap::IndexSet;

use crate::failure::{Failure, Outcome, PathSegment};
use crate::kind::{Kind, Type};
use crate::t;
use crate::value::{Record, Value};
use crate::checks::{either, intersect};

/// What a key-tracking check learned about a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyTrack {
    /// Recognised keys, possibly with duplicates. `None` means "not a record
    /// check": anything goes.
    pub known_keys: Option<Vec<String>>,
    /// Unrecognised keys must be rejected.
    pub exact: bool,
}

impl KeyTrack {
    pub(crate) const UNTRACKED: KeyTrack = KeyTrack { known_keys: None, exact: false };

    pub(crate) fn keys(keys: Vec<String>, exact: bool) -> Self {
        Self { known_keys: Some(keys), exact }
    }
}

/// Structural check without the exactness verdict.
pub(crate) fn track(ty: &Type, value: &Value) -> Outcome<KeyTrack> {
    match ty.kind() {
        Kind::Struct(s) => s.track(ty, value),
        Kind::Either(..) => either::track(ty, value),
        Kind::Intersect(l, r) => intersect::track(ty, l, r, value),
        Kind::MergeIntersect(m) => m.track(ty, value),
        Kind::Comment(c) => track(c.inner(), value),
        _ => ty.accept(value).map(|()| KeyTrack::UNTRACKED),
    }
}

/// Track, then reject keys the track didn't recognise when it is exact.
pub(crate) fn check(ty: &Type, value: &Value) -> Outcome<()> {
    let tracked = track(ty, value)?;
    enforce_exact(ty, value, &tracked)
}

/// Track, enforce exactness, then project onto the recognised keys.
pub(crate) fn slice(ty: &Type, value: &Value) -> Outcome<Value> {
    let tracked = track(ty, value)?;
    enforce_exact(ty, value, &tracked)?;
    Ok(project(value, &tracked))
}

fn enforce_exact(ty: &Type, value: &Value, tracked: &KeyTrack) -> Outcome<()> {
    let (true, Some(known)) = (tracked.exact, &tracked.known_keys) else { return Ok(()) };
    let Some(record) = value.as_record() else { return Ok(()) };
    let known: IndexSet<&str> = known.iter().map(String::as_str).collect();
    let extra: Vec<Failure> = record
        .iter()
        .filter(|(k, _)| !known.contains(k.as_str()))
        .map(|(k, v)| {
            Failure::new(v, &t::never(), format!("unknown key `{k}` should not exist"))
                .lift(PathSegment::Key(k.clone()))
        })
        .collect();
    if extra.is_empty() {
        Ok(())
    } else {
        tracing::trace!(extra = extra.len(), "keys: exact check found unknown keys");
        Err(Failure::combine(value, ty, extra))
    }
}

/// Copy the recognised keys that are present into a fresh record. Shallow:
/// nested values are cloned as-is.
fn project(value: &Value, tracked: &KeyTrack) -> Value {
    let (Some(known), Some(record)) = (&tracked.known_keys, value.as_record()) else {
        return value.clone();
    };
    let mut out = Record::new();
    for key in known {
        if out.contains_key(key) {
            continue;
        }
        if let Some(v) = record.get(key) {
            out.insert(key.clone(), v.clone());
        }
    }
    Value::Object(out)
}

// ------------------------------- Tests ------------------------------------ //
