//! Error types raised while interpreting server messages.
//!
//! Both types describe *fatal* conditions: they are only produced by the
//! strict handshake and initialization paths. Per-turn merging is lenient and
//! never fails.

use thiserror::Error;

/// A required field is missing or has the wrong JSON type.
///
/// `path` names the location that failed, e.g. `message.updated_objects`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("missing required field `{path}`")]
    MissingField { path: &'static str },

    #[error("field `{path}` should be {expected}, found {found}")]
    WrongType {
        path: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl ProtocolError {
    /// Builds a `WrongType` error from the offending value.
    pub fn wrong_type(
        path: &'static str,
        expected: &'static str,
        value: &serde_json::Value,
    ) -> Self {
        Self::WrongType {
            path,
            expected,
            found: json_type_name(value),
        }
    }
}

/// Geometry of an object could not be used to derive the map bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("object `{id}` has no integer `type` field")]
    MissingType { id: String },

    #[error("boundary `{id}`: `position` should be an array of 4 corners")]
    CornerCount { id: String },

    #[error("boundary `{id}`: corner {corner} should be an array of 2 numbers")]
    CornerShape { id: String, corner: usize },
}

/// Human-readable name of a JSON value's type, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
