//! Diagnostics end to end: rendered messages, flattened causes, reports.

mod common;

use chrono::{TimeZone, Utc};
use common::{cause_paths, s, v};
use serde_json::json;
use structural::{t, Class, Error, Type, Value};

// ============================================================================
// FIXTURES
// ============================================================================

fn user() -> Type {
    t::subtype([
        ("username", s()),
        ("age", t::optional(t::num())),
        (
            "email",
            t::str()
                .validate("has @ symbol", |v: &Value| v.as_str().is_some_and(|s| s.contains('@')))
                .into(),
        ),
    ])
}

fn quote() -> Type {
    t::exact([
        ("text", s()),
        ("author", s()),
        ("date", t::optional(t::instance_of(&Class::date()))),
    ])
}

fn pic() -> Type {
    t::subtype([
        (
            "uri",
            t::str()
                .validate("starts with http", |v: &Value| v.as_str().is_some_and(|s| s.starts_with("http")))
                .into(),
        ),
        ("alt", s()),
    ])
}

fn post() -> Type {
    t::subtype([("owner", user().into()), ("contents", t::array(quote().or(&pic())).into())])
}

fn a_quote() -> Value {
    Value::object([
        ("text", Value::from("Those who do not study history are doomed to repeat it")),
        ("author", Value::from("Albert Einstien")),
        ("date", Value::from(Utc.timestamp_millis_opt(2001).single().unwrap())),
    ])
}

fn a_post(uri: &str) -> Value {
    Value::object([
        (
            "owner",
            v(json!({"username": "the duke", "age": 42, "email": "duke.nuke@example.com"})),
        ),
        (
            "contents",
            Value::array([
                a_quote(),
                Value::object([
                    ("uri", uri),
                    ("alt", "Mr. Doctor Albert Einstien wearing a tweed jacket"),
                ]),
            ]),
        ),
    ])
}

// ============================================================================
// MESSAGES
// ============================================================================

#[test]
fn the_default_value_is_valid() {
    assert!(post().assert(&a_post("https://example.com/pics/albert.jpg")).is_ok());
}

#[test]
fn exact_prints_fields_nicely() {
    let Value::Object(mut fields) = a_quote() else { unreachable!() };
    fields.insert("badBoy".into(), Value::from(true));
    let value = Value::Object(fields);

    let expected = "given value
  {
    text: \"Those who do not study history are doomed to repeat it\",
    author: \"Albert Einstien\",
    date: 1970-01-01T00:00:02.001+00:00,
    badBoy: true
  }
did not match expected type
  { text: string, author: string, date?: Date | undefined }
because: at .badBoy: given value `true` did not match expected type `never`:
    unknown key `badBoy` should not exist";

    let err = quote().assert(&value).unwrap_err();
    assert_eq!(err.to_string(), expected);
}

#[test]
fn short_failures_render_inline() {
    let err = t::num().assert(&v(json!("five"))).unwrap_err();
    assert_eq!(err.to_string(), "given value `\"five\"` did not match expected type `number`:\n  not a number");
}

#[test]
fn union_enumerates_the_missed_types() {
    let err = post().assert(&a_post("example.com")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("did not match any type in the union:"));
    assert!(message.contains("missing key `text`"));
    assert!(message.contains("failed validation: starts with http"));
}

// ============================================================================
// CAUSES
// ============================================================================

#[test]
fn error_contains_flattened_causes() {
    let err = post().assert(&a_post("example.com")).unwrap_err();
    assert_eq!(err.causes().len(), 3);
    assert!(err.causes()[0].to_string().starts_with("at .contents[1].text"));
    assert!(err.causes()[1].to_string().starts_with("at .contents[1].author"));
    assert!(err.causes()[2].to_string().starts_with("at .contents[1].uri"));
}

#[test]
fn error_names_the_outermost_type() {
    let schema = post();
    let err = schema.assert(&a_post("example.com")).unwrap_err();
    assert!(err.expected().ptr_eq(&schema));
    assert!(err.message().starts_with("given value\n"));
}

#[test]
fn report_rows_serialise() {
    let err = post().assert(&a_post("example.com")).unwrap_err();
    let rows = serde_json::to_value(err.report()).unwrap();
    assert_eq!(rows[2]["path"], json!(".contents[1].uri"));
    assert_eq!(rows[2]["received"], json!("\"example.com\""));
    assert_eq!(rows[2]["message"], json!("failed validation: starts with http"));
    assert_eq!(cause_paths(&err).len(), 3);
}

#[test]
fn structural_errors_convert_into_the_crate_error() {
    fn run() -> structural::Result<()> {
        t::num().assert(&Value::from("x"))?;
        Ok(())
    }
    assert!(matches!(run(), Err(Error::Mismatch(_))));
}

#[test]
fn erroring_validations_are_failures_not_panics() {
    let check = t::str().validate("parses", |v: &Value| -> anyhow::Result<bool> {
        let n: u8 = v.as_str().unwrap_or_default().parse()?;
        Ok(n > 0)
    });
    let err = check.assert(&v(json!("many"))).unwrap_err();
    assert!(err.causes()[0].message().starts_with("validation `parses` raised an error:"));
}
