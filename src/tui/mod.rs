//! Terminal user-interface building blocks.
//!
//! This module hosts the terminal collaborator, the character-level line
//! editor, prompt styling, and the UI constants shared by commands.

pub mod input;
pub mod prompt;
pub mod settings;
pub mod terminal;

pub use input::{is_affirmative, read_response};
pub use prompt::{colorize, styled_prompt};
pub use terminal::{BufferedTerminal, ConsoleTerminal, Terminal};
