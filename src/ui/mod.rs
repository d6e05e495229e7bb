//! User interface module - the message/prompt channel of a release run.
//!
//! Separates concerns:
//! - `formatter` - Pure styling of lines for the terminal
//! - `mock` - Recording implementation for tests
//! - This module - The [Ui] port and the interactive terminal implementation

use std::io::{self, Write};

use console::Term;

use crate::error::Result;

pub mod formatter;
pub mod mock;

pub use formatter::{display_error, display_success, styled};
pub use mock::MockUi;

/// How a line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
}

/// A yes/no question put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
}

impl Prompt {
    pub fn new(message: impl Into<String>) -> Self {
        Prompt {
            message: message.into(),
        }
    }
}

/// The user's answer to a [Prompt]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptResponse {
    pub proceed: bool,
}

/// Message and prompt channel used by the release workflow
pub trait Ui {
    fn write_line(&mut self, tone: Tone, text: &str);

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResponse>;
}

/// Interactive terminal implementation.
///
/// Lines go to stdout; prompts read a line from stdin.
pub struct TerminalUi {
    term: Term,
}

impl TerminalUi {
    pub fn new() -> Self {
        TerminalUi {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui for TerminalUi {
    fn write_line(&mut self, tone: Tone, text: &str) {
        if self.term.write_line(&styled(tone, text)).is_err() {
            println!("{}", text);
        }
    }

    /// Accepts "y" or "yes" (case-insensitive). Anything else, including
    /// pressing Enter, declines.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResponse> {
        print!("{} (y/N): ", styled(Tone::Warning, &prompt.message));
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let response = input.trim().to_lowercase();
        Ok(PromptResponse {
            proceed: response == "y" || response == "yes",
        })
    }
}
