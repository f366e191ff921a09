//! Type nodes.
//!
//! A `Type` is an immutable, cheaply cloned handle onto one `Kind`: the closed
//! set of node variants. Trees are built once through the combinators and
//! then shared freely, including across threads; checking never mutates them.
use std::fmt;
use std::sync::Arc;

use crate::checks::annotate::{Comment, IntoVerdict, Validation};
use crate::checks::dict::Dict;
use crate::checks::map::MapType;
use crate::checks::primitives::{self, Is, Literal};
use crate::checks::{array, set};
use crate::checks::record::Struct;
use crate::error::StructuralError;
use crate::failure::{Failure, Outcome};
use crate::keys::{self, KeyTrack};
use crate::merge::{self, MergeIntersect};
use crate::value::{Class, Tag, Value};

#[derive(Clone)]
pub struct Type(Arc<Kind>);

/// Every concrete node kind. Renderers dispatch on this exhaustively.
pub enum Kind {
    Any,
    Never,
    /// Literal equality.
    Value(Literal),
    /// Runtime-tag match.
    TypeOf(Tag),
    /// Class membership along the parent chain.
    InstanceOf(Class),
    /// Named arbitrary predicate.
    Is(Is),
    Array(Type),
    Dict(Dict),
    Map(MapType),
    Set(Type),
    Struct(Struct),
    Either(Type, Type),
    /// Default intersection: both sides checked against the same input.
    Intersect(Type, Type),
    /// Intersection of record constraints merged into one combined check.
    MergeIntersect(MergeIntersect),
    Validation(Validation),
    Comment(Comment),
}

// ------------------------------ Construction ----------------------------- //

impl Type {
    pub(crate) fn from_kind(kind: Kind) -> Self {
        Type(Arc::new(kind))
    }

    pub fn kind(&self) -> &Kind {
        &self.0
    }

    /// True when both handles share the same node.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn either(left: Type, right: Type) -> Type {
        Type::from_kind(Kind::Either(left, right))
    }

    pub(crate) fn intersect(left: Type, right: Type) -> Type {
        Type::from_kind(Kind::Intersect(left, right))
    }

    pub(crate) fn commented(text: &str, inner: Type) -> Type {
        Type::from_kind(Kind::Comment(Comment::new(text, inner)))
    }
}

// ---------------------------- Core contract ------------------------------ //

impl Type {
    /// Check `value`, borrowing it back on success.
    pub fn check<'v>(&self, value: &'v Value) -> Outcome<&'v Value> {
        self.accept(value).map(|()| value)
    }

    /// Check `value` and project record-like results down to their known keys.
    pub fn slice_result(&self, value: &Value) -> Outcome<Value> {
        match self.kind() {
            Kind::Comment(c) => c.inner().slice_result(value),
            Kind::MergeIntersect(m) => m.slice_result(self, value),
            Kind::Struct(_) | Kind::Either(..) | Kind::Intersect(..) => keys::slice(self, value),
            _ => self.accept(value).map(|()| value.clone()),
        }
    }

    /// Like `check`, but reports the key set and exactness instead of
    /// enforcing exactness.
    pub fn track_keys(&self, value: &Value) -> Outcome<KeyTrack> {
        keys::track(self, value)
    }

    pub fn assert<'v>(&self, value: &'v Value) -> Result<&'v Value, StructuralError> {
        self.check(value).map_err(|failure| self.raise(value, failure))
    }

    pub fn slice(&self, value: &Value) -> Result<Value, StructuralError> {
        self.slice_result(value).map_err(|failure| self.raise(value, failure))
    }

    /// True iff slicing would succeed.
    pub fn guard(&self, value: &Value) -> bool {
        self.accept(value).is_ok()
    }

    pub fn or(&self, other: &Type) -> Type {
        Type::either(self.clone(), other.clone())
    }

    pub fn and(&self, other: &Type) -> Type {
        match self.kind() {
            Kind::Comment(c) => Type::commented(c.text(), c.inner().and(other)),
            _ if merge::is_merge_capable(self) => merge::and(self, other),
            _ => Type::intersect(self.clone(), other.clone()),
        }
    }

    /// Sugar for `self.and(validation)`. The predicate may return `bool` or
    /// `Result<bool, E>`; an `Err` counts as a failed check.
    pub fn validate<F, R>(&self, description: impl Into<String>, predicate: F) -> Type
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        self.and(&Type::from_kind(Kind::Validation(Validation::new(description, predicate))))
    }

    /// String validation against a compiled pattern.
    pub fn matches(&self, description: impl Into<String>, pattern: regex::Regex) -> Type {
        self.validate(description, move |v: &Value| v.as_str().is_some_and(|s| pattern.is_match(s)))
    }

    pub fn comment(&self, text: impl Into<String>) -> Type {
        Type::from_kind(Kind::Comment(Comment::new(text, self.clone())))
    }

    /// Full check, exactness included, without producing a value.
    pub(crate) fn accept(&self, value: &Value) -> Outcome<()> {
        match self.kind() {
            Kind::Any => Ok(()),
            Kind::Never => Err(Failure::new(value, self, "never values cannot occur")),
            Kind::Value(lit) => primitives::check_literal(self, lit, value),
            Kind::TypeOf(tag) => primitives::check_tag(self, *tag, value),
            Kind::InstanceOf(class) => primitives::check_instance(self, class, value),
            Kind::Is(is) => is.check(self, value),
            Kind::Array(element) => array::check(self, element, value),
            Kind::Dict(d) => d.check(self, value),
            Kind::Map(m) => m.check(self, value),
            Kind::Set(element) => set::check(self, element, value),
            Kind::Validation(v) => v.check(self, value),
            Kind::Comment(c) => c.inner().accept(value),
            Kind::Struct(_) | Kind::Either(..) | Kind::Intersect(..) | Kind::MergeIntersect(_) => {
                keys::check(self, value)
            }
        }
    }

    fn raise(&self, value: &Value, failure: Failure) -> StructuralError {
        let failure = if failure.path().is_empty() {
            failure
        } else {
            Failure::rewrap(value, self, failure)
        };
        let err = StructuralError::from_failure(failure);
        tracing::debug!(
            expected = %self,
            causes = err.causes().len(),
            "structural: value rejected"
        );
        err
    }
}

// ------------------------------ Rendering -------------------------------- //

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Any => f.write_str("any"),
            Kind::Never => f.write_str("never"),
            Kind::Value(lit) => write!(f, "{lit}"),
            Kind::TypeOf(tag) => write!(f, "{tag}"),
            Kind::InstanceOf(class) => write!(f, "{class}"),
            Kind::Is(is) => write!(f, "is({})", is.name()),
            Kind::Array(element) => write!(f, "Array<{element}>"),
            Kind::Dict(d) => write!(f, "{d}"),
            Kind::Map(m) => write!(f, "Map<{}, {}>", m.key_type(), m.value_type()),
            Kind::Set(element) => write!(f, "Set<{element}>"),
            Kind::Struct(s) => write!(f, "{s}"),
            Kind::Either(l, r) => write!(f, "{l} | {r}"),
            Kind::Intersect(l, r) => write_intersection(f, l, r),
            Kind::MergeIntersect(m) => write_intersection(f, m.left(), m.right()),
            Kind::Validation(v) => write!(f, "validate({})", v.description()),
            Kind::Comment(c) => write!(f, "{}", c.inner()),
        }
    }
}

fn write_intersection(f: &mut fmt::Formatter<'_>, l: &Type, r: &Type) -> fmt::Result {
    write_operand(f, l)?;
    f.write_str(" & ")?;
    write_operand(f, r)
}

// `&` binds tighter than `|`.
fn write_operand(f: &mut fmt::Formatter<'_>, t: &Type) -> fmt::Result {
    match t.kind() {
        Kind::Either(..) => write!(f, "({t})"),
        _ => write!(f, "{t}"),
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use crate::t;
    use crate::value::Value;

    #[test]
    fn renders_unions_and_intersections() {
        assert_eq!(t::num().or(&t::str()).to_string(), "number | string");
        assert_eq!(t::num().and(&t::value(5)).to_string(), "number & 5");
        assert_eq!(
            t::num().or(&t::str()).and(&t::value(5)).to_string(),
            "(number | string) & 5",
        );
    }

    #[test]
    fn comment_is_transparent() {
        let commented = t::num().comment("A number");
        assert!(commented.check(&Value::from(5)).is_ok());
        assert!(commented.check(&Value::from("5")).is_err());
        assert_eq!(commented.to_string(), "number");
    }

    #[test]
    fn guard_mirrors_slicing() {
        let check = t::exact([("hi", t::str().into())]);
        assert!(check.guard(&Value::object([("hi", "x")])));
        assert!(!check.guard(&Value::object([("hi", "x"), ("extra", "y")])));
    }

    #[test]
    fn nodes_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::Type>();
        assert_send_sync::<crate::failure::Failure>();
    }
}
