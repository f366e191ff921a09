//! Diagnostic ("inspect") rendering of values.
//!
//! Short values render on one line. Anything wider than `MAX_WIDTH` breaks
//! containers one entry per line with two-space indentation.
use std::fmt;

use super::{Record, Value};

const MAX_WIDTH: usize = 72;
const INDENT: &str = "  ";

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inspect(self))
    }
}

/// Render a value, breaking over lines when the one-line form is too wide.
pub fn inspect(value: &Value) -> String {
    let line = single_line(value);
    if line.chars().count() <= MAX_WIDTH {
        line
    } else {
        multi_line(value, 0)
    }
}

/// Always-one-line rendering, used inside paths.
pub fn single_line(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".into(),
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number(*n),
        Value::String(s) => format!("{s:?}"),
        Value::Symbol(sym) => format!("Symbol({})", sym.description().unwrap_or("")),
        Value::Function(func) => match func.name() {
            Some(name) => format!("[Function {name}]"),
            None => "[Function (anonymous)]".into(),
        },
        Value::Date(d) => d.to_rfc3339(),
        Value::Array(slots) => {
            if slots.is_empty() {
                return "[]".into();
            }
            let parts: Vec<String> = slots.iter().map(slot_line).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(record) => record_line("", record),
        Value::Instance(inst) => record_line(&format!("{} ", inst.class().name()), inst.fields()),
        Value::Map(entries) => {
            if entries.is_empty() {
                return "Map {}".into();
            }
            let parts: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{} => {}", single_line(k), single_line(v)))
                .collect();
            format!("Map {{ {} }}", parts.join(", "))
        }
        Value::Set(items) => {
            if items.is_empty() {
                return "Set {}".into();
            }
            let parts: Vec<String> = items.iter().map(single_line).collect();
            format!("Set {{ {} }}", parts.join(", "))
        }
    }
}

fn multi_line(value: &Value, depth: usize) -> String {
    let pad = INDENT.repeat(depth + 1);
    let close = INDENT.repeat(depth);
    let child = |v: &Value| {
        let line = single_line(v);
        if line.chars().count() + pad.len() <= MAX_WIDTH { line } else { multi_line(v, depth + 1) }
    };
    match value {
        Value::Array(slots) if !slots.is_empty() => {
            let parts: Vec<String> = slots
                .iter()
                .map(|slot| match slot {
                    Some(v) => format!("{pad}{}", child(v)),
                    None => format!("{pad}<empty>"),
                })
                .collect();
            format!("[\n{}\n{close}]", parts.join(",\n"))
        }
        Value::Object(record) if !record.is_empty() => {
            format!("{{\n{}\n{close}}}", record_lines(record, &pad, child))
        }
        Value::Instance(inst) if !inst.fields().is_empty() => {
            format!("{} {{\n{}\n{close}}}", inst.class().name(), record_lines(inst.fields(), &pad, child))
        }
        Value::Map(entries) if !entries.is_empty() => {
            let parts: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{pad}{} => {}", single_line(k), child(v)))
                .collect();
            format!("Map {{\n{}\n{close}}}", parts.join(",\n"))
        }
        Value::Set(items) if !items.is_empty() => {
            let parts: Vec<String> = items.iter().map(|v| format!("{pad}{}", child(v))).collect();
            format!("Set {{\n{}\n{close}}}", parts.join(",\n"))
        }
        other => single_line(other),
    }
}

fn slot_line(slot: &Option<Value>) -> String {
    match slot {
        Some(v) => single_line(v),
        None => "<empty>".into(),
    }
}

fn record_line(prefix: &str, record: &Record) -> String {
    if record.is_empty() {
        return format!("{prefix}{{}}");
    }
    let parts: Vec<String> = record
        .iter()
        .map(|(k, v)| format!("{}: {}", key(k), single_line(v)))
        .collect();
    format!("{prefix}{{ {} }}", parts.join(", "))
}

fn record_lines(record: &Record, pad: &str, child: impl Fn(&Value) -> String) -> String {
    record
        .iter()
        .map(|(k, v)| format!("{pad}{}: {}", key(k), child(v)))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Record keys print bare when they look like identifiers.
pub fn key(k: &str) -> String {
    if is_identifier(k) { k.to_owned() } else { format!("{k:?}") }
}

pub(crate) fn is_identifier(k: &str) -> bool {
    let mut chars = k.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

pub(crate) fn number(n: f64) -> String {
    if n.is_nan() {
        "NaN".into()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".into() } else { "-Infinity".into() }
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// ------------------------------- Tests ------------------------------------ //
