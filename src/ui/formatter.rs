//! Pure formatting functions for UI output.
//!
//! Colors are applied with `console`, which drops them automatically when
//! the output is not a terminal.

use console::style;

use super::Tone;

/// Style a line according to its tone.
pub fn styled(tone: Tone, text: &str) -> String {
    match tone {
        Tone::Success => style(text).green().to_string(),
        Tone::Warning => style(text).yellow().to_string(),
    }
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}
