//! Terminal seam of the menu.

use std::io;

/// Output and input used by the menu.
///
/// Implementations decide how the message levels look; the menu only
/// chooses the level.
pub trait Console {
    /// Prints a section heading.
    fn heading(&mut self, text: &str);

    /// Prints a plain line.
    fn info(&mut self, text: &str);

    /// Prints a success message.
    fn success(&mut self, text: &str);

    /// Prints a warning.
    fn warn(&mut self, text: &str);

    /// Prints an error.
    fn error(&mut self, text: &str);

    /// Asks a question and reads one line, without its line ending.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>>;
}
