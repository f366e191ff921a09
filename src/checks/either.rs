use crate::failure::{Failure, Outcome};
use crate::keys::{self, KeyTrack};
use crate::kind::{Kind, Type};
use crate::value::Value;

/// Branches are tried left to right and the first success wins with its own
/// key set; key sets are never merged across branches.
pub(crate) fn track(ty: &Type, value: &Value) -> Outcome<KeyTrack> {
    let mut branches = Vec::new();
    flatten(ty, &mut branches);

    let mut failures = Vec::with_capacity(branches.len());
    for branch in branches {
        match keys::track(branch, value) {
            Ok(tracked) => return Ok(tracked),
            Err(failure) => failures.push(failure),
        }
    }
    Err(Failure::union(value, ty, failures))
}

/// `a | (b | c)` and `(a | b) | c` both yield `[a, b, c]`. Comments around a
/// union are looked through.
fn flatten<'t>(ty: &'t Type, out: &mut Vec<&'t Type>) {
    match ty.kind() {
        Kind::Either(l, r) => {
            flatten(l, out);
            flatten(r, out);
        }
        Kind::Comment(c) => flatten(c.inner(), out),
        _ => out.push(ty),
    }
}

// ------------------------------- Tests ------------------------------------ //
