use std::fmt;

use crate::failure::{Failure, Outcome, PathSegment};
use crate::kind::Type;
use crate::value::Value;

/// A record whose every value matches one type. The key label is cosmetic.
#[derive(Clone)]
pub struct Dict {
    value: Type,
    key_name: Option<String>,
}

impl Dict {
    pub fn new(value: Type, key_name: Option<String>) -> Self {
        Self { value, key_name }
    }

    pub fn value_type(&self) -> &Type { &self.value }
    pub fn key_name(&self) -> Option<&str> { self.key_name.as_deref() }

    pub(crate) fn check(&self, ty: &Type, value: &Value) -> Outcome<()> {
        let record = match value {
            Value::Null => return Err(Failure::new(value, ty, "is null")),
            Value::Array(_) => return Err(Failure::new(value, ty, "is an array")),
            other => other.as_record().ok_or_else(|| Failure::new(value, ty, "not an object"))?,
        };
        for (k, v) in record {
            self.value.accept(v).map_err(|f| f.lift(PathSegment::Key(k.clone())))?;
        }
        Ok(())
    }

    /// Both constraints hold: values match both, and the key label reads as
    /// either side's.
    pub(crate) fn merge(&self, other: &Dict) -> Dict {
        let key_name = match (&self.key_name, &other.key_name) {
            (Some(a), Some(b)) if a != b => Some(format!("{a} | {b}")),
            (Some(a), _) => Some(a.clone()),
            (None, b) => b.clone(),
        };
        Dict { value: self.value.and(&other.value), key_name }
    }
}

impl fmt::Display for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key_name.as_deref().unwrap_or("key");
        write!(f, "{{ [{key}: string]: {} }}", self.value)
    }
}

// ------------------------------- Tests ------------------------------------ //
