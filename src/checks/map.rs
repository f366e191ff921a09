use crate::failure::{Failure, Outcome, PathSegment};
use crate::kind::Type;
use crate::value::Value;

/// Keyed collection with arbitrary keys.
#[derive(Clone)]
pub struct MapType {
    key: Type,
    value: Type,
}

impl MapType {
    pub fn new(key: Type, value: Type) -> Self {
        Self { key, value }
    }

    pub fn key_type(&self) -> &Type { &self.key }
    pub fn value_type(&self) -> &Type { &self.value }

    /// Each entry's key is checked before its value; a bad key is reported
    /// by position, a bad value by the key it sits under.
    pub(crate) fn check(&self, ty: &Type, value: &Value) -> Outcome<()> {
        let Value::Map(entries) = value else {
            return Err(Failure::new(value, ty, "not a Map"));
        };
        for (i, (k, v)) in entries.iter().enumerate() {
            self.key.accept(k).map_err(|f| f.lift(PathSegment::NthKey(i)))?;
            self.value.accept(v).map_err(|f| f.lift(PathSegment::ValueAt(k.clone())))?;
        }
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use crate::failure::render_path;
    use crate::t;
    use crate::value::Value;

    #[test]
    fn bad_keys_report_position() {
        let m = t::map(t::str(), t::num());
        let err = m.check(&Value::map([(Value::from("a"), 1), (Value::from(2), 2)])).unwrap_err();
        assert_eq!(render_path(err.path()), ".keys()[1]");
    }

    #[test]
    fn bad_values_report_their_key() {
        let m = t::map(t::str(), t::num());
        let err = m.check(&Value::map([("a", Value::from(1)), ("b", "x".into())])).unwrap_err();
        assert_eq!(render_path(err.path()), ".get(\"b\")");
    }

    #[test]
    fn records_are_not_maps() {
        let err = t::map(t::str(), t::any()).check(&Value::object([("a", 1)])).unwrap_err();
        assert_eq!(err.message(), "not a Map");
        assert_eq!(t::map(t::str(), t::num()).to_string(), "Map<string, number>");
    }
}
