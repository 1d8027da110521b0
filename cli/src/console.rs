//! Terminal console.

use colored::Colorize;
use repo_version_manager::menu::Console;
use std::io::{self, BufRead, Write};

/// A [`Console`] reading answers from `input` and printing colored lines to
/// `output`.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        // Output failures surface on the next prompt.
        let _ = writeln!(self.output, "{text}");
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn heading(&mut self, text: &str) {
        self.line(format!("\n{}", text.bold().underline()));
    }

    fn info(&mut self, text: &str) {
        self.line(text);
    }

    fn success(&mut self, text: &str) {
        self.line(text.green());
    }

    fn warn(&mut self, text: &str) {
        self.line(text.yellow());
    }

    fn error(&mut self, text: &str) {
        self.line(text.red().bold());
    }

    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", format!("{question}:").cyan())?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(answer.trim_end_matches(['\r', '\n']).to_string()))
    }
}
