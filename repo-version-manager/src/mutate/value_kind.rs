//! Replacement value types for structured updates.

use super::MutateError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Type a replacement value is coerced into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// JSON string.
    #[default]
    String,

    /// JSON number; integers are preferred over floats.
    Number,

    /// JSON boolean.
    Boolean,
}

impl ValueKind {
    /// Parses a type tag: `s`/`string`, `n`/`number`, `b`/`bool`/`boolean`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "s" | "str" | "string" => Some(Self::String),
            "n" | "num" | "number" => Some(Self::Number),
            "b" | "bool" | "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Converts raw user input into a JSON value of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`MutateError::InvalidValue`] if the input does not fit.
    pub fn coerce(self, raw: &str) -> Result<Value, MutateError> {
        let invalid = || MutateError::InvalidValue {
            value: raw.to_string(),
            kind: self,
        };

        match self {
            Self::String => Ok(Value::String(raw.to_string())),
            Self::Number => {
                let trimmed = raw.trim();
                if let Ok(int) = trimmed.parse::<i64>() {
                    return Ok(Value::from(int));
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(invalid)
            }
            Self::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        })
    }
}
