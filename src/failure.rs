//! Path-annotated diagnostics.
//!
//! A `Failure` is created at the node that first detects a mismatch and is
//! *lifted* on the way out: each enclosing container prepends the access path
//! that led to it, so the final path is relative to the root of the check.
//! A cause's path is relative to the location its parent failure points at.
use std::fmt;

use once_cell::sync::OnceCell;

use crate::kind::Type;
use crate::value::Value;
use crate::value::render::{self, single_line};

/// Every `check` produces one of these.
pub type Outcome<T> = Result<T, Failure>;

const INLINE_WIDTH: usize = 40;
const INDENT: &str = "  ";

// ------------------------------- Paths ----------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    /// Record key.
    Key(String),
    /// Sequence index.
    Index(usize),
    /// Position of a key (or element) inside a keyed or unordered collection.
    NthKey(usize),
    /// Value stored under this key of a keyed collection.
    ValueAt(Value),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) if render::is_identifier(k) => write!(f, ".{k}"),
            PathSegment::Key(k) => write!(f, "[{k:?}]"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::NthKey(i) => write!(f, ".keys()[{i}]"),
            PathSegment::ValueAt(key) => write!(f, ".get({})", single_line(key)),
        }
    }
}

pub fn render_path(path: &[PathSegment]) -> String {
    path.iter().map(ToString::to_string).collect()
}

// ------------------------------ Failures --------------------------------- //

/// How the message is produced; composed messages are rendered lazily.
#[derive(Clone, Debug)]
enum Reason {
    Text(String),
    /// "failed multiple checks" over every cause.
    Multiple,
    /// Every losing union branch, one per cause.
    Union,
    /// The single cause, rendered in full (see `Failure::rewrap`).
    Nested,
}

#[derive(Clone)]
pub struct Failure {
    reason: Reason,
    message: OnceCell<String>,
    path: Vec<PathSegment>,
    value: Value,
    expected: Type,
    causes: Vec<Failure>,
}

impl Failure {
    pub fn new(value: &Value, expected: &Type, message: impl Into<String>) -> Self {
        Self::with_reason(Reason::Text(message.into()), value, expected, Vec::new())
    }

    fn with_reason(reason: Reason, value: &Value, expected: &Type, causes: Vec<Failure>) -> Self {
        Self {
            reason,
            message: OnceCell::new(),
            path: Vec::new(),
            value: value.clone(),
            expected: expected.clone(),
            causes,
        }
    }

    /// Fold simultaneous failures of `value` against `expected` into one.
    /// A single failure is returned unchanged.
    pub fn combine(value: &Value, expected: &Type, mut failures: Vec<Failure>) -> Failure {
        debug_assert!(!failures.is_empty(), "combine needs at least one failure");
        if failures.len() == 1 {
            if let Some(only) = failures.pop() {
                return only;
            }
        }
        Self::with_reason(Reason::Multiple, value, expected, failures)
    }

    /// Every branch of a union failed; `branches` holds one leaf per branch.
    pub(crate) fn union(value: &Value, expected: &Type, branches: Vec<Failure>) -> Failure {
        Self::with_reason(Reason::Union, value, expected, branches)
    }

    /// Root a deep failure at the outermost node so the diagnostic names the
    /// outer expected type and the relative path to the actual problem.
    pub(crate) fn rewrap(value: &Value, expected: &Type, inner: Failure) -> Failure {
        Self::with_reason(Reason::Nested, value, expected, vec![inner])
    }

    pub fn lift(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    pub fn lift_path(mut self, segments: impl IntoIterator<Item = PathSegment>) -> Self {
        let mut path: Vec<PathSegment> = segments.into_iter().collect();
        path.append(&mut self.path);
        self.path = path;
        self
    }

    pub fn path(&self) -> &[PathSegment] { &self.path }
    pub fn value(&self) -> &Value { &self.value }
    pub fn expected(&self) -> &Type { &self.expected }
    pub fn causes(&self) -> &[Failure] { &self.causes }

    pub(crate) fn is_multiple(&self) -> bool {
        matches!(self.reason, Reason::Multiple)
    }

    /// The underlying reason, computed on first access.
    pub fn message(&self) -> &str {
        self.message.get_or_init(|| match &self.reason {
            Reason::Text(text) => text.clone(),
            Reason::Multiple => {
                let parts: Vec<String> = self.causes.iter().map(|c| indent(&c.render())).collect();
                format!("failed multiple checks:\n{}", parts.join("\n"))
            }
            Reason::Union => {
                let parts: Vec<String> = self
                    .causes
                    .iter()
                    .map(|c| indent(&format!("- {}", indent_next(&c.render()))))
                    .collect();
                format!("did not match any type in the union:\n{}", parts.join("\n"))
            }
            Reason::Nested => self.causes.iter().map(Failure::render).collect::<Vec<_>>().join("\n"),
        })
    }

    /// Path, received value, expected type, then the reason.
    pub fn render(&self) -> String {
        let at = if self.path.is_empty() {
            String::new()
        } else {
            format!("at {}: ", render_path(&self.path))
        };
        let value = self.value.to_string();
        let expected = self.expected.to_string();
        if fits_inline(&value) && fits_inline(&expected) {
            format!(
                "{at}given value `{value}` did not match expected type `{expected}`:\n{}",
                indent(self.message()),
            )
        } else {
            format!(
                "{at}given value\n{}\ndid not match expected type\n{}\nbecause: {}",
                indent(&value),
                indent(&expected),
                indent_next(self.message()),
            )
        }
    }

    /// Leaf failures with root-relative paths. A failure with no causes is
    /// its own leaf.
    pub fn leaves(&self) -> Vec<Failure> {
        let mut out = Vec::new();
        self.collect_leaves(&[], &mut out);
        out
    }

    fn collect_leaves(&self, base: &[PathSegment], out: &mut Vec<Failure>) {
        let mut path = base.to_vec();
        path.extend(self.path.iter().cloned());
        if self.causes.is_empty() {
            let mut leaf = self.clone();
            leaf.path = path;
            out.push(leaf);
        } else {
            for cause in &self.causes {
                cause.collect_leaves(&path, out);
            }
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("path", &render_path(&self.path))
            .field("expected", &self.expected.to_string())
            .field("message", &self.message())
            .field("causes", &self.causes)
            .finish()
    }
}

// ------------------------------ Helpers ---------------------------------- //

fn fits_inline(s: &str) -> bool {
    !s.contains('\n') && s.chars().count() <= INLINE_WIDTH
}

/// Indent every line.
pub fn indent(s: &str) -> String {
    s.lines().map(|line| format!("{INDENT}{line}")).collect::<Vec<_>>().join("\n")
}

/// Indent every line after the first.
pub fn indent_next(s: &str) -> String {
    let mut lines = s.lines();
    let Some(first) = lines.next() else { return String::new() };
    let mut out = first.to_owned();
    for line in lines {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str(line);
    }
    out
}

// ------------------------------- Tests ------------------------------------ //
