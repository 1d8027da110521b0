//! Scripted console.

use crate::menu::Console;
use std::collections::VecDeque;
use std::io;

/// A line printed by the menu, tagged with its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Heading(String),
    Info(String),
    Success(String),
    Warn(String),
    Error(String),
    Prompt(String),
}

impl Output {
    /// Text of the line.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(text)
            | Self::Info(text)
            | Self::Success(text)
            | Self::Warn(text)
            | Self::Error(text)
            | Self::Prompt(text) => text,
        }
    }
}

/// A [`Console`] that answers prompts from a script and records output.
///
/// Once the script is exhausted every prompt reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    output: Vec<Output>,
}

impl ScriptedConsole {
    /// Creates a console answering prompts with `answers`, in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything printed so far.
    #[must_use]
    pub fn output(&self) -> &[Output] {
        &self.output
    }

    /// Returns true if any printed line contains `needle`.
    #[must_use]
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.text().contains(needle))
    }

    /// Error lines printed so far.
    #[must_use]
    pub fn errors(&self) -> Vec<&str> {
        self.output
            .iter()
            .filter_map(|line| match line {
                Output::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of unanswered prompts left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn heading(&mut self, text: &str) {
        self.output.push(Output::Heading(text.to_string()));
    }

    fn info(&mut self, text: &str) {
        self.output.push(Output::Info(text.to_string()));
    }

    fn success(&mut self, text: &str) {
        self.output.push(Output::Success(text.to_string()));
    }

    fn warn(&mut self, text: &str) {
        self.output.push(Output::Warn(text.to_string()));
    }

    fn error(&mut self, text: &str) {
        self.output.push(Output::Error(text.to_string()));
    }

    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        self.output.push(Output::Prompt(question.to_string()));
        Ok(self.answers.pop_front())
    }
}
