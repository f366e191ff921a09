use crate::failure::{Failure, Outcome, PathSegment};
use crate::kind::Type;
use crate::value::Value;

/// Elements are addressed by iteration position.
pub(crate) fn check(ty: &Type, element: &Type, value: &Value) -> Outcome<()> {
    let Value::Set(items) = value else {
        return Err(Failure::new(value, ty, "not a Set"));
    };
    for (i, item) in items.iter().enumerate() {
        element.accept(item).map_err(|f| f.lift(PathSegment::NthKey(i)))?;
    }
    Ok(())
}

// ------------------------------- Tests ------------------------------------ //
