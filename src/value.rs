//! Dynamic value graph walked by the checker.
//!
//! `Value` is a superset of `serde_json::Value`: it also distinguishes
//! `undefined` from `null`, keeps sparse array slots, and models the keyed and
//! unordered collections, dates, and class instances a decoded runtime value
//! graph can hold. Checking never consumes bytes; it only walks this tree.
pub mod render;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Insertion-ordered record body shared by plain objects and instances.
pub type Record = IndexMap<String, Value>;

// ------------------------------- Values ---------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
    Function(Function),
    /// `None` marks a hole in a sparse sequence.
    Array(Vec<Option<Value>>),
    Object(Record),
    /// Entries in insertion order; keys may be any value.
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    Date(DateTime<Utc>),
    Instance(Instance),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Function {
    name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    class: Class,
    fields: Record,
}

impl Symbol {
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
}

impl Function {
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }
}

impl Instance {
    pub fn class(&self) -> &Class { &self.class }
    pub fn fields(&self) -> &Record { &self.fields }
}

// ----------------------------- Runtime tags ------------------------------ //

/// The fixed set of primitive categories a value can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Number,
    String,
    Boolean,
    Function,
    Symbol,
    Undefined,
    /// Null and every non-primitive value.
    Object,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Number => "number",
            Tag::String => "string",
            Tag::Boolean => "boolean",
            Tag::Function => "function",
            Tag::Symbol => "symbol",
            Tag::Undefined => "undefined",
            Tag::Object => "object",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------- Classes --------------------------------- //

/// Identity-compared class descriptor. Membership walks the parent chain.
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

struct ClassInner {
    name: String,
    parent: Option<Class>,
}

static OBJECT: Lazy<Class> = Lazy::new(|| Class(Arc::new(ClassInner {
    name: "Object".into(),
    parent: None,
})));
static ARRAY: Lazy<Class> = Lazy::new(|| Class::extends("Array", &OBJECT));
static MAP: Lazy<Class> = Lazy::new(|| Class::extends("Map", &OBJECT));
static SET: Lazy<Class> = Lazy::new(|| Class::extends("Set", &OBJECT));
static DATE: Lazy<Class> = Lazy::new(|| Class::extends("Date", &OBJECT));
static FUNCTION: Lazy<Class> = Lazy::new(|| Class::extends("Function", &OBJECT));

impl Class {
    /// A new root-level class (its parent is `Object`).
    pub fn new(name: impl Into<String>) -> Self {
        Self::extends(name, &OBJECT)
    }

    pub fn extends(name: impl Into<String>, parent: &Class) -> Self {
        Class(Arc::new(ClassInner { name: name.into(), parent: Some(parent.clone()) }))
    }

    pub fn object() -> Class { OBJECT.clone() }
    pub fn array() -> Class { ARRAY.clone() }
    pub fn map() -> Class { MAP.clone() }
    pub fn set() -> Class { SET.clone() }
    pub fn date() -> Class { DATE.clone() }
    pub fn function() -> Class { FUNCTION.clone() }

    pub fn name(&self) -> &str { &self.0.name }
    pub fn parent(&self) -> Option<&Class> { self.0.parent.as_ref() }

    /// True when `ancestor` is this class or appears on its parent chain.
    pub fn is_a(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == ancestor {
                return true;
            }
            current = class.parent();
        }
        false
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.name())
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------- Construction ------------------------------- //

impl Value {
    /// A dense sequence (no holes).
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(items.into_iter().map(|x| Some(x.into())).collect())
    }

    /// A sequence that may contain holes.
    pub fn sparse<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        Value::Array(slots.into_iter().collect())
    }

    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn set<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    pub fn instance<I, K, V>(class: &Class, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Instance(Instance {
            class: class.clone(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        })
    }

    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Symbol { description: description.map(str::to_owned) })
    }

    pub fn function(name: Option<&str>) -> Self {
        Value::Function(Function { name: name.map(str::to_owned) })
    }
}

// ------------------------------ Inspection ------------------------------- //

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Undefined => Tag::Undefined,
            Value::Bool(_) => Tag::Boolean,
            Value::Number(_) => Tag::Number,
            Value::String(_) => Tag::String,
            Value::Symbol(_) => Tag::Symbol,
            Value::Function(_) => Tag::Function,
            Value::Null
            | Value::Array(_)
            | Value::Object(_)
            | Value::Map(_)
            | Value::Set(_)
            | Value::Date(_)
            | Value::Instance(_) => Tag::Object,
        }
    }

    /// The class a value is an instance of; primitives and null have none.
    pub fn class(&self) -> Option<Class> {
        match self {
            Value::Array(_) => Some(Class::array()),
            Value::Object(_) => Some(Class::object()),
            Value::Map(_) => Some(Class::map()),
            Value::Set(_) => Some(Class::set()),
            Value::Date(_) => Some(Class::date()),
            Value::Function(_) => Some(Class::function()),
            Value::Instance(inst) => Some(inst.class.clone()),
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Symbol(_) => None,
        }
    }

    /// Record body of plain objects and class instances.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            Value::Instance(inst) => Some(&inst.fields),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool { matches!(self, Value::Undefined) }
    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

// ----------------------------- Conversions ------------------------------- //

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Number(n as f64) }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Number(n as f64) }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self { Value::Number(n as f64) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_owned()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self { Value::Date(d) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self {
        x.map_or(Value::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => Value::Array(xs.into_iter().map(|x| Some(x.into())).collect()),
            serde_json::Value::Object(m) => Value::Object(m.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl Value {
    /// Convert to JSON when the value has a JSON representation.
    ///
    /// Holes and `undefined` become `null` inside arrays and are dropped from
    /// records. Dates become RFC 3339 strings. Symbols, functions, maps, sets,
    /// class instances, and non-finite numbers have no JSON form.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;
        match self {
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(*b)),
            Value::Number(n) => json_num_pref_i64(*n),
            Value::String(s) => Some(Json::String(s.clone())),
            Value::Date(d) => Some(Json::String(d.to_rfc3339())),
            Value::Array(slots) => slots
                .iter()
                .map(|slot| match slot {
                    None | Some(Value::Undefined) => Some(Json::Null),
                    Some(x) => x.to_json(),
                })
                .collect::<Option<Vec<_>>>()
                .map(Json::Array),
            Value::Object(record) => {
                let mut out = serde_json::Map::new();
                for (k, v) in record {
                    if v.is_undefined() {
                        continue;
                    }
                    out.insert(k.clone(), v.to_json()?);
                }
                Some(Json::Object(out))
            }
            Value::Undefined
            | Value::Symbol(_)
            | Value::Function(_)
            | Value::Map(_)
            | Value::Set(_)
            | Value::Instance(_) => None,
        }
    }
}

// Prefer emitting integers when exact, so integral fields decode as integers.
fn json_num_pref_i64(n: f64) -> Option<serde_json::Value> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(serde_json::Value::from(n as i64))
    } else {
        serde_json::Number::from_f64(n).map(serde_json::Value::Number)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn class_membership_walks_parent_chain() {
        let animal = Class::new("Animal");
        let dog = Class::extends("Dog", &animal);
        assert!(dog.is_a(&animal));
        assert!(dog.is_a(&Class::object()));
        assert!(!animal.is_a(&dog));
        assert!(Class::date().is_a(&Class::object()));
    }

    #[test]
    fn classes_compare_by_identity() {
        assert_ne!(Class::new("Same"), Class::new("Same"));
        assert_eq!(Class::object(), Class::object());
    }

    #[test]
    fn null_and_collections_report_object_tag() {
        assert_eq!(Value::Null.tag(), Tag::Object);
        assert_eq!(Value::set([1]).tag(), Tag::Object);
        assert_eq!(Value::Undefined.tag(), Tag::Undefined);
        assert_eq!(Value::function(None).tag(), Tag::Function);
    }

    #[test]
    fn json_round_trip_prefers_integers() {
        let json = json!({"a": 1, "b": [1.5, null], "c": "x"});
        let value = Value::from(json.clone());
        assert_eq!(value.to_json(), Some(json));
    }

    #[test]
    fn undefined_and_holes_follow_json_stringify_rules() {
        let value = Value::object([
            ("gone", Value::Undefined),
            ("xs", Value::sparse([Some(1.into()), None, Some(Value::Undefined)])),
        ]);
        assert_eq!(value.to_json(), Some(json!({"xs": [1, null, null]})));
        assert_eq!(Value::map([(1, 2)]).to_json(), None);
        assert_eq!(Value::Number(f64::NAN).to_json(), None);
    }
}
