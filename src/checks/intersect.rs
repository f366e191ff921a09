use crate::failure::{Failure, Outcome};
use crate::keys::{self, KeyTrack};
use crate::kind::{Kind, Type};
use crate::value::Value;

/// Both sides see the same input. The result is open as soon as either side
/// is, and knows keys only when both sides do.
pub(crate) fn track(ty: &Type, left: &Type, right: &Type, value: &Value) -> Outcome<KeyTrack> {
    let l = keys::track(left, value);
    let r = keys::track(right, value);

    let (l, r) = match (l, r) {
        (Err(lf), Err(rf)) => {
            let mut failures = Vec::new();
            splice(left, lf, &mut failures);
            splice(right, rf, &mut failures);
            return Err(Failure::combine(value, ty, failures));
        }
        (Err(f), Ok(_)) | (Ok(_), Err(f)) => return Err(f),
        (Ok(l), Ok(r)) => (l, r),
    };

    // A validation constrains the value, not its keys.
    if is_validation(left) {
        return Ok(r);
    }
    if is_validation(right) {
        return Ok(l);
    }

    let known_keys = match (l.known_keys, r.known_keys) {
        (Some(mut a), Some(b)) => {
            a.extend(b);
            Some(a)
        }
        _ => None,
    };
    Ok(KeyTrack { known_keys, exact: l.exact && r.exact })
}

/// A nested default intersection that failed on both of its sides
/// contributes its causes directly instead of one more level of nesting.
fn splice(side: &Type, failure: Failure, out: &mut Vec<Failure>) {
    let side = uncommented(side);
    let nested = matches!(side.kind(), Kind::Intersect(..))
        && failure.is_multiple()
        && failure.expected().ptr_eq(side)
        && failure.path().is_empty();
    if nested {
        out.extend(failure.causes().iter().cloned());
    } else {
        out.push(failure);
    }
}

fn uncommented(ty: &Type) -> &Type {
    match ty.kind() {
        Kind::Comment(c) => uncommented(c.inner()),
        _ => ty,
    }
}

fn is_validation(ty: &Type) -> bool {
    match ty.kind() {
        Kind::Validation(_) => true,
        Kind::Comment(c) => is_validation(c.inner()),
        _ => false,
    }
}

// ------------------------------- Tests ------------------------------------ //
