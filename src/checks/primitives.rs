//! Leaf checks: literals, runtime tags, class membership, named guards.
use std::fmt;
use std::sync::Arc;

use ordered_float::OrderedFloat;

use crate::failure::{Failure, Outcome};
use crate::kind::Type;
use crate::value::{Class, Tag, Value, render};

// ------------------------------- Literals -------------------------------- //

/// A primitive a value can be compared against for equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(OrderedFloat<f64>),
    String(String),
}

impl Literal {
    /// Strict equality: numbers compare by IEEE value, so `NaN` never
    /// matches and `0` matches `-0`.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Undefined, Value::Undefined) | (Literal::Null, Value::Null) => true,
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => a.0 == *b,
            (Literal::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Undefined => f.write_str("undefined"),
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Number(n) => f.write_str(&render::number(n.0)),
            Literal::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self { Literal::Bool(b) }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self { Literal::Number(OrderedFloat(n)) }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self { Literal::Number(OrderedFloat(f64::from(n))) }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self { Literal::String(s.to_owned()) }
}

impl From<String> for Literal {
    fn from(s: String) -> Self { Literal::String(s) }
}

pub(crate) fn check_literal(ty: &Type, lit: &Literal, value: &Value) -> Outcome<()> {
    if lit.matches(value) {
        Ok(())
    } else {
        Err(Failure::new(value, ty, format!("not equal to {lit}")))
    }
}

// --------------------------- Tags and classes ---------------------------- //

pub(crate) fn check_tag(ty: &Type, tag: Tag, value: &Value) -> Outcome<()> {
    if value.tag() == tag {
        Ok(())
    } else {
        Err(Failure::new(value, ty, format!("not a {tag}")))
    }
}

pub(crate) fn check_instance(ty: &Type, class: &Class, value: &Value) -> Outcome<()> {
    if value.class().is_some_and(|c| c.is_a(class)) {
        Ok(())
    } else {
        Err(Failure::new(value, ty, format!("not an instance of {class}")))
    }
}

// -------------------------------- Guards --------------------------------- //

type Guard = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// An opaque named predicate. The name is only used for diagnostics.
#[derive(Clone)]
pub struct Is {
    name: String,
    guard: Guard,
}

impl Is {
    pub fn new<F>(name: impl Into<String>, guard: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self { name: name.into(), guard: Arc::new(guard) }
    }

    pub fn name(&self) -> &str { &self.name }

    pub(crate) fn check(&self, ty: &Type, value: &Value) -> Outcome<()> {
        if (self.guard)(value) {
            Ok(())
        } else {
            Err(Failure::new(value, ty, format!("not a {} (guard failed)", self.name)))
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;

    #[test]
    fn literal_equality_is_strict() {
        assert!(Literal::from(0.0).matches(&Value::from(-0.0)));
        assert!(!Literal::from(f64::NAN).matches(&Value::Number(f64::NAN)));
        assert!(!Literal::from("1").matches(&Value::from(1)));
        assert!(!Literal::Null.matches(&Value::Undefined));
    }

    #[test]
    fn literal_failure_names_the_literal() {
        let err = t::value("hi").check(&Value::from("ho")).unwrap_err();
        assert_eq!(err.message(), "not equal to \"hi\"");
    }

    #[test]
    fn tag_check_treats_null_as_object() {
        let object = t::type_of(Tag::Object);
        assert!(object.check(&Value::Null).is_ok());
        assert!(object.check(&Value::array([1])).is_ok());
        assert_eq!(t::num().check(&Value::from("1")).unwrap_err().message(), "not a number");
    }

    #[test]
    fn instance_check_walks_parents() {
        let animal = Class::new("Animal");
        let dog = Class::extends("Dog", &animal);
        let rex = Value::instance(&dog, [("name", "Rex")]);
        assert!(t::instance_of(&animal).check(&rex).is_ok());
        assert!(t::obj().check(&rex).is_ok());
        let err = t::instance_of(&dog).check(&Value::object([("name", "Rex")])).unwrap_err();
        assert_eq!(err.message(), "not an instance of Dog");
    }

    #[test]
    fn guard_failure_names_the_guard() {
        let even = t::is("even", |v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0));
        assert!(even.check(&Value::from(4)).is_ok());
        assert_eq!(even.check(&Value::from(3)).unwrap_err().message(), "not a even (guard failed)");
        assert_eq!(even.to_string(), "is(even)");
    }
}
