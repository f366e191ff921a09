//! Wrapper nodes that don't change what a type accepts on their own:
//! custom validators and comments.
use std::fmt;
use std::sync::Arc;

use crate::failure::{Failure, Outcome};
use crate::kind::Type;
use crate::value::Value;

// ------------------------------- Verdicts -------------------------------- //

/// What a validation predicate may return.
pub trait IntoVerdict {
    fn into_verdict(self) -> anyhow::Result<bool>;
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> anyhow::Result<bool> {
        Ok(self)
    }
}

impl<E> IntoVerdict for Result<bool, E>
where
    E: Into<anyhow::Error>,
{
    fn into_verdict(self) -> anyhow::Result<bool> {
        self.map_err(Into::into)
    }
}

// ------------------------------ Validation ------------------------------- //

type Predicate = Arc<dyn Fn(&Value) -> anyhow::Result<bool> + Send + Sync>;

/// A described predicate, usually intersected onto another type.
#[derive(Clone)]
pub struct Validation {
    description: String,
    predicate: Predicate,
}

impl Validation {
    pub fn new<F, R>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(move |v: &Value| predicate(v).into_verdict()),
        }
    }

    pub fn description(&self) -> &str { &self.description }

    /// A predicate that errors is a failed check, not a fault.
    pub(crate) fn check(&self, ty: &Type, value: &Value) -> Outcome<()> {
        match (self.predicate)(value) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Failure::new(value, ty, format!("failed validation: {}", self.description))),
            Err(e) => {
                tracing::debug!(description = %self.description, error = %e, "validation: predicate raised");
                Err(Failure::new(
                    value,
                    ty,
                    format!("validation `{}` raised an error: {e:#}", self.description),
                ))
            }
        }
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation").field("description", &self.description).finish_non_exhaustive()
    }
}

// ------------------------------- Comments -------------------------------- //

/// Free-form documentation attached to a type; checking ignores it.
#[derive(Clone, Debug)]
pub struct Comment {
    text: String,
    inner: Type,
}

impl Comment {
    pub fn new(text: impl Into<String>, inner: Type) -> Self {
        Self { text: text.into(), inner }
    }

    pub fn text(&self) -> &str { &self.text }
    pub fn inner(&self) -> &Type { &self.inner }
}

// ------------------------------- Tests ------------------------------------ //
