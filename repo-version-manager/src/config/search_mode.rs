//! How fetched files are inspected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inspection mode for the target file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Plain-text scan for the marker line.
    #[default]
    Marker,

    /// Parse as JSON and capture the whole document.
    FullDump,

    /// Parse as JSON and capture entries matching the key/value filter.
    KeyValue,
}

impl SearchMode {
    /// All modes, in menu order.
    pub const ALL: [SearchMode; 3] = [Self::Marker, Self::FullDump, Self::KeyValue];

    /// Returns the serialized name of the mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::FullDump => "full_dump",
            Self::KeyValue => "key_value",
        }
    }

    /// Parses a mode name; `-` and `_` are interchangeable.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|mode| mode.as_str() == normalized)
    }

    /// Returns true for the JSON-based modes.
    #[must_use]
    pub fn is_structured(self) -> bool {
        !matches!(self, Self::Marker)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
