use crate::failure::{Failure, Outcome, PathSegment};
use crate::kind::Type;
use crate::value::Value;

/// Every present element must match; holes are skipped. Stops at the first
/// bad element.
pub(crate) fn check(ty: &Type, element: &Type, value: &Value) -> Outcome<()> {
    let Value::Array(slots) = value else {
        return Err(Failure::new(value, ty, "not an array"));
    };
    for (i, slot) in slots.iter().enumerate() {
        let Some(item) = slot else { continue };
        element.accept(item).map_err(|f| f.lift(PathSegment::Index(i)))?;
    }
    Ok(())
}

// ------------------------------- Tests ------------------------------------ //
