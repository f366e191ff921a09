//! Constructors for building type trees.
//!
//! ```ignore
//! use structural::t;
//!
//! let post = t::subtype([
//!     ("title", t::str().into()),
//!     ("tags", t::optional(t::array(t::str()))),
//! ]);
//! ```
use once_cell::sync::Lazy;

use crate::checks::annotate::{IntoVerdict, Validation};
use crate::checks::dict::Dict;
use crate::checks::map::MapType;
use crate::checks::primitives::{Is, Literal};
use crate::checks::record::{Field, Modality, Struct};
use crate::kind::{Kind, Type};
use crate::value::{Class, Tag, Value};

// Leaf nodes are shared; every call hands out the same node.
static ANY: Lazy<Type> = Lazy::new(|| Type::from_kind(Kind::Any));
static NEVER: Lazy<Type> = Lazy::new(|| Type::from_kind(Kind::Never));
static NUM: Lazy<Type> = Lazy::new(|| type_of(Tag::Number));
static STR: Lazy<Type> = Lazy::new(|| type_of(Tag::String));
static BOOL: Lazy<Type> = Lazy::new(|| type_of(Tag::Boolean));
static FUNC: Lazy<Type> = Lazy::new(|| type_of(Tag::Function));
static SYM: Lazy<Type> = Lazy::new(|| type_of(Tag::Symbol));
static UNDEF: Lazy<Type> = Lazy::new(|| type_of(Tag::Undefined));
static NIL: Lazy<Type> = Lazy::new(|| value(Literal::Null));
static OBJ: Lazy<Type> = Lazy::new(|| instance_of(&Class::object()));

// ------------------------------- Leaves ---------------------------------- //

pub fn any() -> Type { ANY.clone() }
pub fn never() -> Type { NEVER.clone() }
pub fn num() -> Type { NUM.clone() }
pub fn str() -> Type { STR.clone() }
pub fn bool() -> Type { BOOL.clone() }
pub fn func() -> Type { FUNC.clone() }
pub fn sym() -> Type { SYM.clone() }
pub fn undef() -> Type { UNDEF.clone() }
pub fn nil() -> Type { NIL.clone() }
/// Any non-primitive value.
pub fn obj() -> Type { OBJ.clone() }

pub fn value(literal: impl Into<Literal>) -> Type {
    Type::from_kind(Kind::Value(literal.into()))
}

pub fn type_of(tag: Tag) -> Type {
    Type::from_kind(Kind::TypeOf(tag))
}

pub fn instance_of(class: &Class) -> Type {
    Type::from_kind(Kind::InstanceOf(class.clone()))
}

pub fn is<F>(name: impl Into<String>, guard: F) -> Type
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Type::from_kind(Kind::Is(Is::new(name, guard)))
}

/// A free-standing validation, for use as an intersection operand.
pub fn validation<F, R>(description: impl Into<String>, predicate: F) -> Type
where
    F: Fn(&Value) -> R + Send + Sync + 'static,
    R: IntoVerdict,
{
    Type::from_kind(Kind::Validation(Validation::new(description, predicate)))
}

// ----------------------------- Containers -------------------------------- //

pub fn array(element: Type) -> Type {
    Type::from_kind(Kind::Array(element))
}

pub fn dict(value: Type) -> Type {
    Type::from_kind(Kind::Dict(Dict::new(value, None)))
}

/// A dict whose key renders under a name, e.g. `{ [id: string]: T }`.
pub fn dict_named(key_name: impl Into<String>, value: Type) -> Type {
    Type::from_kind(Kind::Dict(Dict::new(value, Some(key_name.into()))))
}

pub fn map(key: Type, value: Type) -> Type {
    Type::from_kind(Kind::Map(MapType::new(key, value)))
}

pub fn set(element: Type) -> Type {
    Type::from_kind(Kind::Set(element))
}

// ------------------------------- Structs --------------------------------- //

/// Struct that tolerates extra keys.
pub fn subtype<I, K>(fields: I) -> Type
where
    I: IntoIterator<Item = (K, Field)>,
    K: Into<String>,
{
    Struct::new(fields, false).into_type()
}

/// Struct that rejects extra keys.
pub fn exact<I, K>(fields: I) -> Type
where
    I: IntoIterator<Item = (K, Field)>,
    K: Into<String>,
{
    Struct::new(fields, true).into_type()
}

pub fn optional(ty: Type) -> Field {
    Field::new(ty, Modality::Optional)
}

pub fn allow_missing(ty: Type) -> Field {
    Field::new(ty, Modality::AllowMissing)
}

/// `T | null`.
pub fn maybe(ty: Type) -> Type {
    ty.or(&nil())
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_are_shared() {
        assert!(num().ptr_eq(&num()));
        assert!(!num().ptr_eq(&str()));
    }

    #[test]
    fn maybe_admits_null_but_not_undefined() {
        let m = maybe(str());
        assert!(m.check(&Value::Null).is_ok());
        assert!(m.check(&Value::from("x")).is_ok());
        assert!(m.check(&Value::Undefined).is_err());
        assert_eq!(m.to_string(), "string | null");
    }

    #[test]
    fn obj_accepts_every_non_primitive() {
        for v in [
            Value::array([1]),
            Value::object([("a", 1)]),
            Value::map([(1, 2)]),
            Value::set([1]),
            Value::function(Some("f")),
        ] {
            assert!(obj().check(&v).is_ok(), "{v}");
        }
        assert!(obj().check(&Value::Null).is_err());
        assert!(obj().check(&Value::from(1)).is_err());
    }

    #[test]
    fn free_validation_composes() {
        let even = validation("even", |v: &Value| v.as_f64().is_some_and(|n| n % 2.0 == 0.0));
        assert!(num().and(&even).check(&Value::from(2)).is_ok());
        assert!(num().and(&even).check(&Value::from(3)).is_err());
    }
}
