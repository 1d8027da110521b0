//! What an update run writes.

use crate::mutate::{rewrite_marker, update_json_path, MutateError, ValueKind};
use crate::templates::marker_subject;
use std::fmt;

/// The change applied to every candidate branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateRequest {
    /// Rewrite the marker line for `version`.
    Marker {
        /// New version, rendered through the marker format.
        version: String,
    },

    /// Set the JSON value at a dotted key path.
    JsonPath {
        /// Dotted key path, e.g. `dependencies.ck.version`.
        path: String,
        /// Replacement value before coercion.
        value: String,
        /// How the replacement is coerced.
        kind: ValueKind,
    },
}

impl UpdateRequest {
    /// Returns true for marker rewrites.
    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker { .. })
    }

    /// The value written, used as `{{version}}` in formats.
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::Marker { version } => version,
            Self::JsonPath { value, .. } => value,
        }
    }

    /// What is being updated, used as `{{subject}}` in formats.
    #[must_use]
    pub fn subject(&self, marker_prefix: &str) -> String {
        match self {
            Self::Marker { .. } => marker_subject(marker_prefix),
            Self::JsonPath { path, .. } => path.clone(),
        }
    }

    /// Applies the change to `content`.
    ///
    /// `marker_suffix` is the rendered marker format and is ignored for key
    /// path updates.
    ///
    /// # Errors
    ///
    /// Returns a [`MutateError`] if the marker or key path cannot be found or
    /// the value does not fit its kind.
    pub fn apply(
        &self,
        content: &str,
        marker_prefix: &str,
        marker_suffix: &str,
    ) -> Result<String, MutateError> {
        match self {
            Self::Marker { .. } => rewrite_marker(content, marker_prefix, marker_suffix),
            Self::JsonPath { path, value, kind } => update_json_path(content, path, value, *kind),
        }
    }
}

impl fmt::Display for UpdateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker { version } => write!(f, "marker -> {version}"),
            Self::JsonPath { path, value, kind } => write!(f, "{path} = {value} ({kind})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_request_rewrites_marker_line() {
        let request = UpdateRequest::Marker {
            version: "1.45.0".to_string(),
        };
        let updated = request
            .apply(
                "name: app\nconstructionkit/[>=1.0.0]@spx00/release\n",
                "constructionkit/",
                "1.45.0@spx00/release",
            )
            .unwrap();

        assert_eq!(updated, "name: app\nconstructionkit/1.45.0@spx00/release\n");
        assert_eq!(request.subject("constructionkit/"), "constructionkit");
    }

    #[test]
    fn json_request_sets_typed_value() {
        let request = UpdateRequest::JsonPath {
            path: "ck.pinned".to_string(),
            value: "TRUE".to_string(),
            kind: ValueKind::Boolean,
        };
        let updated = request
            .apply(r#"{"ck":{"pinned":false}}"#, "unused/", "unused")
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&updated).unwrap();
        assert_eq!(value["ck"]["pinned"], serde_json::Value::Bool(true));
        assert_eq!(request.subject("unused/"), "ck.pinned");
        assert_eq!(request.version(), "TRUE");
    }
}
