//! Marker line rewriting.

use super::MutateError;
use std::borrow::Cow;

/// Replaces the first marker line with `prefix` followed by `suffix`.
///
/// The line keeps its indentation. All other lines are left untouched and
/// joined with the content's newline style (`\r\n` if present, else `\n`).
/// A trailing newline is kept.
///
/// # Errors
///
/// Returns [`MutateError::MarkerNotFound`] if no line starts with `prefix`.
pub fn rewrite_marker(content: &str, prefix: &str, suffix: &str) -> Result<String, MutateError> {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut replaced = false;

    let lines: Vec<Cow<'_, str>> = content
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if !replaced && trimmed.trim_end().starts_with(prefix) {
                replaced = true;
                let indent = &line[..line.len() - trimmed.len()];
                Cow::Owned(format!("{indent}{prefix}{suffix}"))
            } else {
                Cow::Borrowed(line)
            }
        })
        .collect();

    if !replaced {
        return Err(MutateError::MarkerNotFound {
            prefix: prefix.to_string(),
        });
    }

    let mut rewritten = lines.join(newline);
    if content.ends_with('\n') {
        rewritten.push_str(newline);
    }
    Ok(rewritten)
}
