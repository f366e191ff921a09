//! Typed decoding: check a value structurally, then hand the sliced result to
//! serde with JSON-path context in error messages.
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::kind::Type;
use crate::value::Value;

impl Type {
    /// Slice `value`, then deserialize the projection into `T`.
    ///
    /// Slicing runs first, so a struct type strips unknown keys before serde
    /// sees them and `#[serde(deny_unknown_fields)]` targets still decode.
    pub fn decode<T: DeserializeOwned>(&self, value: &Value) -> Result<T> {
        let sliced = self.slice(value)?;
        let Some(json) = sliced.to_json() else {
            tracing::debug!(expected = %self, "decode: sliced value has no JSON form");
            return Err(Error::NotJson(sliced.to_string()));
        };
        from_json_with_path(json)
    }

    /// Parse JSON text, then `decode` it.
    pub fn decode_str<T: DeserializeOwned>(&self, src: &str) -> Result<T> {
        let json: serde_json::Value = serde_json::from_str(src)?;
        self.decode(&Value::from(json))
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_json_with_path<T: DeserializeOwned>(json: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize::<_, T>(json).map_err(|err| {
        let path = err.path().to_string();
        let message = err.into_inner().to_string();
        tracing::debug!(%path, %message, "decode: deserialization failed");
        Error::Decode { path, message }
    })
}

// ------------------------------- Tests ------------------------------------ //
