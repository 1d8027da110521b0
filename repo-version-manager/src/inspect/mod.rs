//! Content inspection.
//!
//! Text files are scanned for the marker line; JSON files are parsed and
//! either captured whole or searched with a [`SearchFilter`].

mod error;
mod marker;
mod search;

pub use error::InspectError;
pub use marker::{classify_marker, find_marker, scan_marker, MarkerScan, VersionClass};
pub use search::{find_matches, search_json, SearchFilter};

use crate::config::{SearchMode, Settings};
use serde_json::Value;

/// Outcome of inspecting one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    /// Marker scan result.
    Marker(MarkerScan),

    /// Parsed document or search matches.
    Structured(Value),
}

/// Inspects file content according to the configured mode.
#[derive(Debug, Clone)]
pub struct Inspector {
    mode: SearchMode,
    marker_prefix: String,
    filter: SearchFilter,
}

impl Inspector {
    /// Creates an inspector.
    #[must_use]
    pub fn new(mode: SearchMode, marker_prefix: impl Into<String>, filter: SearchFilter) -> Self {
        Self {
            mode,
            marker_prefix: marker_prefix.into(),
            filter,
        }
    }

    /// Creates an inspector from settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.search_mode,
            settings.marker_prefix.clone(),
            settings.search_filter(),
        )
    }

    /// Inspects `content`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::InvalidJson`] in the structured modes when the
    /// content does not parse.
    pub fn inspect(&self, content: &str) -> Result<Inspection, InspectError> {
        match self.mode {
            SearchMode::Marker => Ok(Inspection::Marker(scan_marker(
                content,
                &self.marker_prefix,
            ))),
            SearchMode::FullDump => {
                search_json(content, &SearchFilter::default()).map(Inspection::Structured)
            }
            SearchMode::KeyValue => search_json(content, &self.filter).map(Inspection::Structured),
        }
    }
}
