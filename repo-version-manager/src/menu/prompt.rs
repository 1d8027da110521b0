//! Prompt helpers shared by the actions.

use super::{Console, MenuError};

/// Asks a question and returns the trimmed answer.
pub(crate) fn ask<K: Console>(console: &mut K, question: &str) -> Result<String, MenuError> {
    console
        .prompt(question)?
        .map(|answer| answer.trim().to_string())
        .ok_or(MenuError::EndOfInput)
}

/// Asks for a value; an empty answer keeps `current`.
pub(crate) fn ask_or_keep<K: Console>(
    console: &mut K,
    label: &str,
    current: &str,
) -> Result<String, MenuError> {
    let answer = ask(console, &format!("{label} [{current}]"))?;
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer
    })
}

/// Asks for a value that must not be empty.
pub(crate) fn ask_required<K: Console>(
    console: &mut K,
    label: &str,
) -> Result<String, MenuError> {
    let answer = ask(console, label)?;
    if answer.is_empty() {
        return Err(MenuError::input(format!("{label} is required")));
    }
    Ok(answer)
}

/// Asks a yes/no question; anything but `y`/`yes` is no.
pub(crate) fn confirm<K: Console>(console: &mut K, question: &str) -> Result<bool, MenuError> {
    let answer = ask(console, &format!("{question} [y/N]"))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}
