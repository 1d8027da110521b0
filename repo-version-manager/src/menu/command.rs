//! Menu commands.

use std::fmt;

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Inspect every matching branch and save the results.
    Check,
    /// Edit the settings file.
    EditConfig,
    /// Open update PRs for the saved results.
    Update,
    /// Show the saved results.
    ShowResults,
    /// Replace the session's token.
    ConfigureToken,
    /// Leave the menu.
    Exit,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Check,
        Self::EditConfig,
        Self::Update,
        Self::ShowResults,
        Self::ConfigureToken,
        Self::Exit,
    ];

    /// Menu letter.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Check => 'A',
            Self::EditConfig => 'B',
            Self::Update => 'C',
            Self::ShowResults => 'D',
            Self::ConfigureToken => 'E',
            Self::Exit => 'F',
        }
    }

    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Check => "Check branches",
            Self::EditConfig => "Edit configuration",
            Self::Update => "Update branches (open PRs)",
            Self::ShowResults => "Show last results",
            Self::ConfigureToken => "Configure GitHub token",
            Self::Exit => "Exit",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::EditConfig => "config",
            Self::Update => "update",
            Self::ShowResults => "results",
            Self::ConfigureToken => "token",
            Self::Exit => "exit",
        }
    }

    /// Parses a menu choice: a letter or a command name, in any case.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|command| {
            input.eq_ignore_ascii_case(command.name())
                || (input.len() == 1
                    && input
                        .chars()
                        .next()
                        .is_some_and(|c| c.eq_ignore_ascii_case(&command.letter())))
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {}", self.letter(), self.label())
    }
}
