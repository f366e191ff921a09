//! Errors raised at the `assert`/`slice`/`decode` boundary.
//!
//! Inside `check` every mismatch is a `Failure` value; only the boundary turns
//! one into an error.
use serde::Serialize;

use crate::failure::{Failure, render_path};
use crate::kind::Type;
use crate::value::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Mismatch(#[from] StructuralError),
    #[error("value cannot be represented as JSON: {0}")]
    NotJson(String),
    #[error("invalid JSON source: {0}")]
    Json(#[from] serde_json::Error),
    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
}

/// A value did not match a type.
///
/// Carries the fully rendered message plus the root-cause failures, already
/// flattened and re-based onto root-relative paths.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StructuralError {
    message: String,
    value: Value,
    expected: Type,
    causes: Vec<Failure>,
}

/// One root cause in a serialisable form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CauseReport {
    pub path: String,
    pub expected: String,
    pub received: String,
    pub message: String,
}

impl StructuralError {
    pub(crate) fn from_failure(failure: Failure) -> Self {
        Self {
            message: failure.render(),
            value: failure.value().clone(),
            expected: failure.expected().clone(),
            causes: failure.leaves(),
        }
    }

    pub fn message(&self) -> &str { &self.message }
    pub fn value(&self) -> &Value { &self.value }
    pub fn expected(&self) -> &Type { &self.expected }
    pub fn causes(&self) -> &[Failure] { &self.causes }

    pub fn report(&self) -> Vec<CauseReport> {
        self.causes
            .iter()
            .map(|cause| CauseReport {
                path: render_path(cause.path()),
                expected: cause.expected().to_string(),
                received: cause.value().to_string(),
                message: cause.message().to_owned(),
            })
            .collect()
    }
}
