//! Struct checks: subtype vs exact, field modalities, slicing.

mod common;

use common::{cause_paths, exact, n, s, subtype, v};
use serde_json::json;
use structural::{t, Class, Struct, Value};

#[test]
fn subtype_accepts_exact_matches_and_supertypes() {
    let check = subtype(&["hi"]);
    assert!(check.assert(&v(json!({"hi": "world"}))).is_ok());
    assert!(check.assert(&v(json!({"hi": "world", "foo": "bar"}))).is_ok());
}

#[test]
fn exact_rejects_supertypes() {
    let check = exact(&["hi"]);
    assert!(check.assert(&v(json!({"hi": "world"}))).is_ok());
    let err = check.assert(&v(json!({"hi": "world", "foo": "bar"}))).unwrap_err();
    assert_eq!(cause_paths(&err), [".foo"]);
}

#[test]
fn missing_and_mistyped_fields_are_rejected() {
    let check = subtype(&["hi", "foo"]);
    assert!(check.assert(&v(json!({"hi": "world"}))).is_err());
    assert!(subtype(&["hi"]).assert(&v(json!({"hi": 5}))).is_err());
}

#[test]
fn non_records_are_rejected_with_distinct_messages() {
    let check = subtype(&["hi"]);
    let message = |x: Value| check.check(&x).unwrap_err().message().to_owned();
    assert_eq!(message(Value::Null), "is null");
    assert_eq!(message(v(json!(["hi"]))), "is an array");
    assert_eq!(message(v(json!("hi"))), "not an object");
    assert_eq!(message(Value::map([("hi", "x")])), "not an object");
}

#[test]
fn class_instances_are_records() {
    let user = Class::new("User");
    let check = t::exact([("name", s())]);
    assert!(check.check(&Value::instance(&user, [("name", "ada")])).is_ok());
    assert!(check.check(&Value::instance(&user, [("name", "ada"), ("age", "36")])).is_err());
}

#[test]
fn optional_fields() {
    let check = t::subtype([("hi", s()), ("opt", t::optional(t::bool()))]);
    assert!(check.assert(&v(json!({"hi": "world"}))).is_ok());
    assert!(check.assert(&Value::object([("hi", Value::from("world")), ("opt", Value::Undefined)])).is_ok());
    assert!(check.assert(&v(json!({"hi": "world", "opt": true}))).is_ok());
    assert!(check.assert(&v(json!({"hi": "world", "opt": "yes"}))).is_err());
}

#[test]
fn allow_missing_fields_reject_explicit_undefined() {
    let check = t::subtype([("hi", s()), ("opt", t::allow_missing(t::bool()))]);
    assert!(check.assert(&v(json!({"hi": "world"}))).is_ok());
    assert!(check.assert(&Value::object([("hi", Value::from("world")), ("opt", Value::Undefined)])).is_err());
    let either = t::subtype([("opt", t::allow_missing(t::bool().or(&t::undef())))]);
    assert!(either.assert(&Value::object([("opt", Value::Undefined)])).is_ok());
}

#[test]
fn every_bad_field_is_reported() {
    let check = t::subtype([("a", n()), ("b", s()), ("c", n())]);
    let err = check.assert(&v(json!({"a": "x", "c": 1}))).unwrap_err();
    assert_eq!(cause_paths(&err), [".a", ".b"]);
}

#[test]
fn nested_structs_report_full_paths() {
    let check = t::subtype([("outer", t::subtype([("inner", n())]).into())]);
    let err = check.assert(&v(json!({"outer": {"inner": "x"}}))).unwrap_err();
    assert_eq!(cause_paths(&err), [".outer.inner"]);
}

#[test]
fn slice_drops_unknown_keys_and_absent_optionals() {
    let check = t::subtype([("hi", s()), ("opt", t::optional(t::num()))]);
    let sliced = check.slice(&v(json!({"hi": "world", "extra": 1}))).unwrap();
    assert_eq!(sliced, v(json!({"hi": "world"})));
}

#[test]
fn slice_is_shallow() {
    let check = t::subtype([("inner", t::subtype([("a", n())]).into())]);
    let sliced = check.slice(&v(json!({"inner": {"a": 1, "b": 2}, "x": 0}))).unwrap();
    assert_eq!(sliced, v(json!({"inner": {"a": 1, "b": 2}})));
}

#[test]
fn builder_and_literal_forms_agree() {
    let built = Struct::builder().field("hi", t::str()).optional("opt", t::num()).exact().build();
    let literal = t::exact([("hi", s()), ("opt", t::optional(t::num()))]);
    for x in [json!({"hi": "a"}), json!({"hi": "a", "opt": 1}), json!({"hi": "a", "x": 1}), json!({})] {
        let value = v(x);
        assert_eq!(built.guard(&value), literal.guard(&value));
    }
    assert_eq!(built.to_string(), literal.to_string());
}

#[test]
fn renders_field_modalities() {
    let check = t::subtype([
        ("a", s()),
        ("b", t::optional(t::num())),
        ("c", t::allow_missing(t::num())),
        ("not ident", s()),
    ]);
    assert_eq!(
        check.to_string(),
        r#"{ a: string, b?: number | undefined, c?: number, "not ident": string }"#
    );
}
