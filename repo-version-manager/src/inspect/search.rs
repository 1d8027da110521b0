//! Recursive key/value search over JSON documents.

use super::InspectError;
use serde_json::{Map, Value};

/// Case-insensitive substring filter on keys and string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    key: Option<String>,
    value: Option<String>,
}

impl SearchFilter {
    /// Creates a filter. Blank parts are ignored.
    #[must_use]
    pub fn new(key: Option<&str>, value: Option<&str>) -> Self {
        let normalize = |part: Option<&str>| {
            part.map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_lowercase)
        };
        Self {
            key: normalize(key),
            value: normalize(value),
        }
    }

    /// Returns true when neither a key nor a value is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.value.is_none()
    }

    /// Tests one entry. Array elements have no key.
    ///
    /// With a key filter the key must contain it; with a value filter the
    /// value must be a string containing it.
    #[must_use]
    pub fn matches(&self, key: Option<&str>, value: &Value) -> bool {
        let key_ok = self.key.as_ref().is_none_or(|wanted| {
            key.is_some_and(|key| key.to_lowercase().contains(wanted.as_str()))
        });
        let value_ok = self.value.as_ref().is_none_or(|wanted| {
            value
                .as_str()
                .is_some_and(|text| text.to_lowercase().contains(wanted.as_str()))
        });
        key_ok && value_ok
    }
}

/// Parses `content` and searches it.
///
/// An empty filter returns the whole document. Otherwise the result is an
/// object mapping each match's path (`a.b[2].c`) to its value.
///
/// # Errors
///
/// Returns [`InspectError::InvalidJson`] if the content does not parse.
pub fn search_json(content: &str, filter: &SearchFilter) -> Result<Value, InspectError> {
    let document: Value = serde_json::from_str(content)?;
    if filter.is_empty() {
        return Ok(document);
    }
    Ok(Value::Object(find_matches(&document, filter)))
}

/// Walks objects and arrays collecting every entry accepted by `filter`.
///
/// Matching containers are recorded and still searched.
#[must_use]
pub fn find_matches(document: &Value, filter: &SearchFilter) -> Map<String, Value> {
    let mut matches = Map::new();
    walk(document, "", filter, &mut matches);
    matches
}

fn walk(value: &Value, path: &str, filter: &SearchFilter, matches: &mut Map<String, Value>) {
    match value {
        Value::Object(entries) => {
            for (key, child) in entries {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                if filter.matches(Some(key), child) {
                    matches.insert(child_path.clone(), child.clone());
                }
                walk(child, &child_path, filter, matches);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let child_path = format!("{path}[{index}]");
                if filter.matches(None, child) {
                    matches.insert(child_path.clone(), child.clone());
                }
                walk(child, &child_path, filter, matches);
            }
        }
        _ => {}
    }
}
