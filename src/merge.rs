//! Custom intersection for record constraints.
//!
//! Structs and dicts don't stack as a generic `Intersect`: `a.and(b)` between
//! two of them folds both into one combined record constraint, so that
//! exactness and field modalities resolve field by field. The struct-and-dict
//! hybrid this produces (`MergedRecord`) is private to this module; the only
//! way to build or extend one is through `and`.
use crate::checks::dict::Dict;
use crate::checks::record::Struct;
use crate::failure::{Failure, Outcome};
use crate::keys::{self, KeyTrack};
use crate::kind::{Kind, Type};
use crate::value::{Record, Value};

/// Result of merging record constraints; shown as `left & right`.
#[derive(Clone)]
pub struct MergeIntersect {
    left: Type,
    right: Type,
    combined: Combined,
}

#[derive(Clone)]
enum Combined {
    Struct(Struct),
    Dict(Dict),
    Record(MergedRecord),
}

/// Struct fields plus a value constraint on every key.
#[derive(Clone)]
struct MergedRecord {
    record: Struct,
    dict: Dict,
}

// ------------------------------ Dispatch --------------------------------- //

pub(crate) fn is_merge_capable(ty: &Type) -> bool {
    matches!(ty.kind(), Kind::Struct(_) | Kind::Dict(_) | Kind::MergeIntersect(_))
}

/// `a` is merge-capable; dispatch on the shape of `b`.
pub(crate) fn and(a: &Type, b: &Type) -> Type {
    match b.kind() {
        _ if is_merge_capable(b) => merged(a, b),
        Kind::Either(l, r) => Type::either(a.and(l), a.and(r)),
        Kind::Comment(c) => Type::commented(c.text(), a.and(c.inner())),
        Kind::Intersect(l, r) => match (reaches_merge(l), reaches_merge(r)) {
            (true, true) => Type::intersect(a.and(l), a.and(r)),
            (true, false) => Type::intersect(a.and(l), r.clone()),
            (false, true) => Type::intersect(l.clone(), a.and(r)),
            (false, false) => Type::intersect(a.clone(), b.clone()),
        },
        _ => Type::intersect(a.clone(), b.clone()),
    }
}

fn merged(a: &Type, b: &Type) -> Type {
    let (Some(x), Some(y)) = (component(a), component(b)) else {
        return Type::intersect(a.clone(), b.clone());
    };
    let combined = combine(x, y);
    tracing::trace!(left = %a, right = %b, combined = combined.label(), "merge: combined record constraints");
    Type::from_kind(Kind::MergeIntersect(MergeIntersect {
        left: a.clone(),
        right: b.clone(),
        combined,
    }))
}

/// Whether merging into this subtree would land on a record constraint.
fn reaches_merge(ty: &Type) -> bool {
    match ty.kind() {
        Kind::Struct(_) | Kind::Dict(_) | Kind::MergeIntersect(_) => true,
        Kind::Comment(c) => reaches_merge(c.inner()),
        Kind::Intersect(l, r) | Kind::Either(l, r) => reaches_merge(l) || reaches_merge(r),
        _ => false,
    }
}

fn component(ty: &Type) -> Option<Combined> {
    match ty.kind() {
        Kind::Struct(s) => Some(Combined::Struct(s.clone())),
        Kind::Dict(d) => Some(Combined::Dict(d.clone())),
        Kind::MergeIntersect(m) => Some(m.combined.clone()),
        _ => None,
    }
}

fn combine(a: Combined, b: Combined) -> Combined {
    use Combined as C;
    match (a, b) {
        (C::Struct(x), C::Struct(y)) => C::Struct(x.merge(&y)),
        (C::Dict(x), C::Dict(y)) => C::Dict(x.merge(&y)),
        (C::Struct(record), C::Dict(dict)) | (C::Dict(dict), C::Struct(record)) => {
            C::Record(MergedRecord { record, dict })
        }
        (C::Record(r), C::Struct(s)) => C::Record(MergedRecord { record: r.record.merge(&s), dict: r.dict }),
        (C::Struct(s), C::Record(r)) => C::Record(MergedRecord { record: s.merge(&r.record), dict: r.dict }),
        (C::Record(r), C::Dict(d)) => C::Record(MergedRecord { record: r.record, dict: r.dict.merge(&d) }),
        (C::Dict(d), C::Record(r)) => C::Record(MergedRecord { record: r.record, dict: d.merge(&r.dict) }),
        (C::Record(x), C::Record(y)) => C::Record(MergedRecord {
            record: x.record.merge(&y.record),
            dict: x.dict.merge(&y.dict),
        }),
    }
}

impl Combined {
    fn label(&self) -> &'static str {
        match self {
            Combined::Struct(_) => "struct",
            Combined::Dict(_) => "dict",
            Combined::Record(_) => "struct+dict",
        }
    }
}

// ------------------------------ Checking --------------------------------- //

impl MergeIntersect {
    pub fn left(&self) -> &Type { &self.left }
    pub fn right(&self) -> &Type { &self.right }

    /// The merged struct, when both sides were structs.
    pub fn as_struct(&self) -> Option<&Struct> {
        match &self.combined {
            Combined::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// The merged dict, when both sides were dicts.
    pub fn as_dict(&self) -> Option<&Dict> {
        match &self.combined {
            Combined::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub(crate) fn track(&self, ty: &Type, value: &Value) -> Outcome<KeyTrack> {
        match &self.combined {
            Combined::Struct(s) => s.track(ty, value),
            Combined::Dict(d) => d.check(ty, value).map(|()| KeyTrack::UNTRACKED),
            Combined::Record(r) => r.check(ty, value).map(|()| KeyTrack::UNTRACKED),
        }
    }

    pub(crate) fn slice_result(&self, ty: &Type, value: &Value) -> Outcome<Value> {
        match &self.combined {
            Combined::Record(r) => r.slice(ty, value),
            _ => keys::slice(ty, value),
        }
    }
}

impl MergedRecord {
    /// The dict check runs first. On a record both sides are checked and
    /// both failures reported; the struct side is always open here.
    fn check(&self, ty: &Type, value: &Value) -> Outcome<()> {
        let dict = self.dict.check(ty, value);
        if value.as_record().is_none() {
            return dict;
        }
        let fields = self.record.track(ty, value).map(|_| ());
        match (dict, fields) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(f), Ok(())) | (Ok(()), Err(f)) => Err(f),
            (Err(d), Err(s)) => Err(Failure::combine(value, ty, vec![d, s])),
        }
    }

    /// Struct fields first, then every other key the dict admitted.
    fn slice(&self, ty: &Type, value: &Value) -> Outcome<Value> {
        self.check(ty, value)?;
        let Some(record) = value.as_record() else { return Ok(value.clone()) };
        let mut out = Record::with_capacity(record.len());
        for name in self.record.fields().keys() {
            if let Some(v) = record.get(name) {
                out.insert(name.clone(), v.clone());
            }
        }
        for (k, v) in record {
            out.entry(k.clone()).or_insert_with(|| v.clone());
        }
        Ok(Value::Object(out))
    }
}

// ------------------------------- Tests ------------------------------------ //
