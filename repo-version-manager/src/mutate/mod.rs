//! Content rewriting.
//!
//! Marker lines are rewritten in place in text files; JSON documents are
//! updated at a dotted key path.

mod error;
mod json_path;
mod marker;
mod value_kind;

pub use error::MutateError;
pub use json_path::{set_path, update_json_path};
pub use marker::rewrite_marker;
pub use value_kind::ValueKind;
