//! Prompt styling helpers for the shell's primary prompt.

use crate::tui::settings;
use crossterm::style::{Color, Stylize};

/// Apply the cosmetic color transform to derived prompt text.
pub fn styled_prompt(text: &str, color: bool) -> String {
    colorize(text, settings::COLOR_PROMPT, color)
}

/// Wrap `text` in ANSI color codes when color output is enabled.
pub fn colorize(text: &str, fg: Color, color: bool) -> String {
    if color {
        text.with(fg).to_string()
    } else {
        text.to_string()
    }
}
