//! Dotted key path updates on JSON documents.

use super::{MutateError, ValueKind};
use serde_json::Value;

/// Sets the value at a dotted key path and returns the re-serialized text.
///
/// Every segment must name an existing key of an object; arrays are not
/// traversed. The replacement is coerced according to `kind`. Output is
/// pretty-printed with keys in their original order, and ends with a newline
/// if the input did.
///
/// # Errors
///
/// Returns an error for invalid JSON, an unresolvable path or a replacement
/// that does not fit `kind`. The input is never modified.
pub fn update_json_path(
    content: &str,
    path: &str,
    raw_value: &str,
    kind: ValueKind,
) -> Result<String, MutateError> {
    let mut document: Value = serde_json::from_str(content).map_err(MutateError::InvalidJson)?;
    set_path(&mut document, path, kind.coerce(raw_value)?)?;

    let mut updated = serde_json::to_string_pretty(&document).map_err(MutateError::Serialize)?;
    if content.ends_with('\n') {
        updated.push('\n');
    }
    Ok(updated)
}

/// Replaces the value of an existing key at `path` inside `document`.
///
/// # Errors
///
/// Returns [`MutateError::InvalidPath`], [`MutateError::NotAnObject`] or
/// [`MutateError::PathNotFound`].
pub fn set_path(document: &mut Value, path: &str, value: Value) -> Result<(), MutateError> {
    let segments: Vec<&str> = path.trim().split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(MutateError::InvalidPath {
            path: path.to_string(),
        });
    }

    let mut current = document;
    for (depth, segment) in segments.iter().enumerate() {
        let Some(object) = current.as_object_mut() else {
            return Err(MutateError::NotAnObject {
                path: container_path(&segments[..depth]),
            });
        };
        current = object
            .get_mut(*segment)
            .ok_or_else(|| MutateError::PathNotFound {
                path: segments[..=depth].join("."),
            })?;
    }

    *current = value;
    Ok(())
}

fn container_path(segments: &[&str]) -> String {
    if segments.is_empty() {
        "(root)".to_string()
    } else {
        segments.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn updates_nested_number() {
        let updated = update_json_path(r#"{"a":{"b":1}}"#, "a.b", "2", ValueKind::Number).unwrap();
        assert_eq!(parse(&updated), json!({"a": {"b": 2}}));
    }

    #[test]
    fn missing_final_key_fails() {
        let result = update_json_path(r#"{"a":{"b":1}}"#, "a.c", "2", ValueKind::Number);
        assert!(matches!(
            result,
            Err(MutateError::PathNotFound { path }) if path == "a.c"
        ));
    }

    #[test]
    fn missing_intermediate_key_fails() {
        let result = update_json_path(r#"{"a":{"b":1}}"#, "x.b", "2", ValueKind::Number);
        assert!(matches!(
            result,
            Err(MutateError::PathNotFound { path }) if path == "x"
        ));
    }

    #[test]
    fn non_object_intermediate_fails() {
        let result = update_json_path(r#"{"a":{"b":[1]}}"#, "a.b.c", "2", ValueKind::Number);
        assert!(matches!(
            result,
            Err(MutateError::NotAnObject { path }) if path == "a.b"
        ));
    }

    #[test]
    fn replaces_container_with_string() {
        let updated = update_json_path(
            r#"{"deps":{"ck":{"pin":"1.0"}}}"#,
            "deps.ck",
            "1.45.0",
            ValueKind::String,
        )
        .unwrap();
        assert_eq!(parse(&updated), json!({"deps": {"ck": "1.45.0"}}));
    }

    #[test]
    fn keeps_key_order_and_trailing_newline() {
        let updated =
            update_json_path("{\"z\": 1, \"a\": false}\n", "a", "true", ValueKind::Boolean)
                .unwrap();
        assert_eq!(updated, "{\n  \"z\": 1,\n  \"a\": true\n}\n");
    }

    #[test]
    fn rejects_empty_segments() {
        let mut document = json!({"a": 1});
        for path in ["", "a.", ".a", "a..b"] {
            assert!(matches!(
                set_path(&mut document, path, json!(2)),
                Err(MutateError::InvalidPath { .. })
            ));
        }
        assert_eq!(document, json!({"a": 1}));
    }

    #[test]
    fn invalid_replacement_leaves_nothing_written() {
        let result = update_json_path(r#"{"a":1}"#, "a", "abc", ValueKind::Number);
        assert!(matches!(result, Err(MutateError::InvalidValue { .. })));
    }
}
