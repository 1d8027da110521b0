//! Marker line scanning and version classification.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

const VERSION: &str = r"\d+\.\d+\.\d+";

/// `[X.Y.Z]`, `[>X.Y.Z <A.B.C]` or `[X.Y.Z || >A.B.C <D.E.F]`.
static BRACKETED_FIXED: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"\[({v}|>{v}\s*<{v}|{v}\s*\|\|\s*>{v}\s*<{v})\]",
        v = VERSION
    );
    Regex::new(&pattern).expect("fixed version pattern is valid")
});

/// A bare pinned version such as `/1.44.0@`.
static BARE_FIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"/{VERSION}@")).expect("bare version pattern is valid")
});

/// `[>=X.Y.Z]`.
static OPEN_LOWER_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[>={VERSION}\]")).expect("lower bound pattern is valid")
});

/// Classification of a marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionClass {
    /// Pinned to an exact version or a closed range.
    Fixed,

    /// Open-ended lower bound; the candidates for an update.
    Latest,

    /// Marker absent, or its version expression is not recognized.
    Unknown,
}

impl VersionClass {
    /// Returns the serialized name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Latest => "latest",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VersionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scanning content for the marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerScan {
    /// Trimmed marker line, if present.
    pub line: Option<String>,

    /// Classification of the line.
    pub class: VersionClass,
}

/// Returns the first line whose trimmed text starts with `prefix`, trimmed.
#[must_use]
pub fn find_marker<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    content
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(prefix))
}

/// Classifies a marker line. Fixed patterns take precedence.
#[must_use]
pub fn classify_marker(line: &str) -> VersionClass {
    if BRACKETED_FIXED.is_match(line) || BARE_FIXED.is_match(line) {
        VersionClass::Fixed
    } else if OPEN_LOWER_BOUND.is_match(line) {
        VersionClass::Latest
    } else {
        VersionClass::Unknown
    }
}

/// Finds and classifies the marker line.
#[must_use]
pub fn scan_marker(content: &str, prefix: &str) -> MarkerScan {
    match find_marker(content, prefix) {
        Some(line) => MarkerScan {
            line: Some(line.to_string()),
            class: classify_marker(line),
        },
        None => MarkerScan {
            line: None,
            class: VersionClass::Unknown,
        },
    }
}
