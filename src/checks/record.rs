//! Struct checks: an ordered field map plus an exactness flag.
use std::fmt;

use indexmap::IndexMap;

use crate::failure::{Failure, Outcome, PathSegment};
use crate::keys::KeyTrack;
use crate::kind::{Kind, Type};
use crate::value::{Value, render};

// ------------------------------- Fields ---------------------------------- //

/// Whether a field may be absent, and whether `undefined` stands in for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Must be present and match.
    Required,
    /// May be absent or explicitly `undefined`; otherwise must match.
    Optional,
    /// May be absent; if present it must match, `undefined` included.
    AllowMissing,
}

impl Modality {
    fn rank(self) -> u8 {
        match self {
            Modality::Optional => 0,
            Modality::AllowMissing => 1,
            Modality::Required => 2,
        }
    }

    /// The stricter of two modalities.
    pub fn stricter(self, other: Modality) -> Modality {
        if other.rank() > self.rank() { other } else { self }
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    pub ty: Type,
    pub modality: Modality,
}

impl Field {
    pub fn new(ty: Type, modality: Modality) -> Self {
        Self { ty, modality }
    }

    /// Intersect the wrapped types; the stricter modality wins.
    pub(crate) fn merge(&self, other: &Field) -> Field {
        Field {
            ty: self.ty.and(&other.ty),
            modality: self.modality.stricter(other.modality),
        }
    }
}

impl From<Type> for Field {
    fn from(ty: Type) -> Self {
        Field::new(ty, Modality::Required)
    }
}

// ------------------------------- Structs --------------------------------- //

#[derive(Clone, Default)]
pub struct Struct {
    fields: IndexMap<String, Field>,
    exact: bool,
}

impl Struct {
    pub fn new<I, K>(fields: I, exact: bool) -> Self
    where
        I: IntoIterator<Item = (K, Field)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, f)| (k.into(), f)).collect(),
            exact,
        }
    }

    pub fn builder() -> StructBuilder {
        StructBuilder::default()
    }

    pub fn fields(&self) -> &IndexMap<String, Field> { &self.fields }
    pub fn is_exact(&self) -> bool { self.exact }

    pub(crate) fn into_type(self) -> Type {
        Type::from_kind(Kind::Struct(self))
    }

    /// Fields unique to one side carry over; shared ones merge per field.
    pub(crate) fn merge(&self, other: &Struct) -> Struct {
        let mut fields = self.fields.clone();
        for (name, theirs) in &other.fields {
            let merged = match fields.get(name) {
                Some(ours) => ours.merge(theirs),
                None => theirs.clone(),
            };
            fields.insert(name.clone(), merged);
        }
        Struct { fields, exact: self.exact && other.exact }
    }

    pub(crate) fn track(&self, ty: &Type, value: &Value) -> Outcome<KeyTrack> {
        let record = match value {
            Value::Null => return Err(Failure::new(value, ty, "is null")),
            Value::Array(_) => return Err(Failure::new(value, ty, "is an array")),
            other => other.as_record().ok_or_else(|| Failure::new(value, ty, "not an object"))?,
        };

        let mut failures = Vec::new();
        for (name, field) in &self.fields {
            let result = match (record.get(name), field.modality) {
                (None, Modality::Required) => Err(Failure::new(
                    &Value::Undefined,
                    &field.ty,
                    format!("missing key `{name}`"),
                )),
                (None, _) => Ok(()),
                (Some(Value::Undefined), Modality::Optional) => Ok(()),
                (Some(v), _) => field.ty.accept(v),
            };
            if let Err(failure) = result {
                failures.push(failure.lift(PathSegment::Key(name.clone())));
            }
        }

        if failures.is_empty() {
            Ok(KeyTrack::keys(self.fields.keys().cloned().collect(), self.exact))
        } else {
            Err(Failure::combine(value, ty, failures))
        }
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("{}");
        }
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(name, field)| {
                let key = render::key(name);
                match field.modality {
                    Modality::Required => format!("{key}: {}", field.ty),
                    Modality::Optional => format!("{key}?: {} | undefined", field.ty),
                    Modality::AllowMissing => format!("{key}?: {}", field.ty),
                }
            })
            .collect();
        write!(f, "{{ {} }}", parts.join(", "))
    }
}

// ------------------------------- Builder --------------------------------- //

/// Incremental struct construction, for when a literal field list reads
/// worse than a chain.
#[derive(Default)]
pub struct StructBuilder {
    fields: Vec<(String, Field)>,
    exact: bool,
}

impl StructBuilder {
    pub fn field(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.fields.push((name.into(), Field::new(ty, Modality::Required)));
        self
    }

    pub fn optional(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.fields.push((name.into(), Field::new(ty, Modality::Optional)));
        self
    }

    pub fn allow_missing(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.fields.push((name.into(), Field::new(ty, Modality::AllowMissing)));
        self
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn build(self) -> Type {
        Struct::new(self.fields, self.exact).into_type()
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::render_path;
    use crate::t;

    #[test]
    fn strictness_order() {
        use Modality::*;
        assert_eq!(Optional.stricter(Required), Required);
        assert_eq!(Required.stricter(AllowMissing), Required);
        assert_eq!(Optional.stricter(AllowMissing), AllowMissing);
        assert_eq!(AllowMissing.stricter(Optional), AllowMissing);
        assert_eq!(Optional.stricter(Optional), Optional);
    }

    #[test]
    fn optional_accepts_explicit_undefined_but_allow_missing_does_not() {
        let opt = t::subtype([("a", t::optional(t::num()))]);
        let miss = t::subtype([("a", t::allow_missing(t::num()))]);
        let explicit = Value::object([("a", Value::Undefined)]);
        let absent = Value::Object(Default::default());
        assert!(opt.check(&explicit).is_ok());
        assert!(opt.check(&absent).is_ok());
        assert!(miss.check(&absent).is_ok());
        assert!(miss.check(&explicit).is_err());
    }

    #[test]
    fn collects_every_bad_field() {
        let s = t::subtype([("a", t::num().into()), ("b", t::str().into()), ("c", t::bool().into())]);
        let err = s.check(&Value::object([("a", "x")])).unwrap_err();
        let paths: Vec<String> = err.causes().iter().map(|c| render_path(c.path())).collect();
        assert_eq!(paths, [".a", ".b", ".c"]);
        assert_eq!(err.causes()[1].message(), "missing key `b`");
    }

    #[test]
    fn builder_matches_literal_construction() {
        let built = Struct::builder()
            .field("a", t::num())
            .optional("b", t::str())
            .allow_missing("c", t::bool())
            .exact()
            .build();
        assert_eq!(built.to_string(), "{ a: number, b?: string | undefined, c?: boolean }");
        assert!(built.check(&Value::object([("a", 1)])).is_ok());
        assert!(built.check(&Value::object([("a", 1), ("d", 2)])).is_err());
    }

    #[test]
    fn merge_keeps_left_field_order() {
        let a = Struct::new([("x", Field::from(t::num())), ("y", Field::from(t::num()))], true);
        let b = Struct::new([("z", Field::from(t::num())), ("x", t::optional(t::num()))], false);
        let merged = a.merge(&b);
        let names: Vec<&str> = merged.fields().keys().map(String::as_str).collect();
        assert_eq!(names, ["x", "y", "z"]);
        assert_eq!(merged.fields()["x"].modality, Modality::Required);
        assert!(!merged.is_exact());
    }

    #[test]
    fn empty_struct_renders_braces() {
        assert_eq!(t::subtype(Vec::<(&str, Field)>::new()).to_string(), "{}");
    }
}
