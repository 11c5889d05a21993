//! Shell commands.
//!
//! Every command is a trait object bound to the shared [`CommandContext`].
//! The registry builds one instance per command at startup and dispatches
//! invocations by exact name; `args[0]` is always the name the command was
//! invoked under.

/// Implements the metadata methods of [`Command`] inside an `impl` block.
macro_rules! describe {
    (
        name: $name:literal,
        short: $short:literal,
        description: $description:literal,
        usage: $usage:literal $(,)?
    ) => {
        fn name(&self) -> &'static str {
            $name
        }
        fn short_description(&self) -> &'static str {
            $short
        }
        fn description(&self) -> &'static str {
            $description
        }
        fn usage(&self) -> &'static str {
            $usage
        }
    };
}

/// Declares command structs that only hold the shared context.
macro_rules! context_command {
    ($($ty:ident),* $(,)?) => {
        $(
            pub struct $ty {
                context: std::rc::Rc<$crate::commands::CommandContext>,
            }

            impl $ty {
                pub fn new(context: &std::rc::Rc<$crate::commands::CommandContext>) -> Self {
                    Self {
                        context: std::rc::Rc::clone(context),
                    }
                }
            }
        )*
    };
}

pub mod bundle;
pub mod context;
pub mod database;
pub mod general;
pub mod generate;
pub mod home;
pub mod model;
pub mod registry;

use crate::error::CancelCommand;

pub use context::{editor_command_line, Collaborators, CommandContext, HelpEntry, LastError};
pub use registry::CommandRegistry;

/// Outcome of one command: the text to print, or a cancellation.
pub type CommandResult = Result<String, CancelCommand>;

// ---------------------------------------------------------------------------
// Command trait
// ---------------------------------------------------------------------------

/// A named shell command.
///
/// Implementations hold an `Rc<CommandContext>` and must only mutate the
/// session after their guards and argument checks passed.
pub trait Command {
    /// Unique name the command is invoked under.
    fn name(&self) -> &'static str;

    /// One-line summary shown by `?`.
    fn short_description(&self) -> &'static str;

    /// Longer description shown by `? <command>`.
    fn description(&self) -> &'static str;

    /// Usage line shown by `? <command>`.
    fn usage(&self) -> &'static str;

    /// Run with `args[0]` being the invoked name.
    fn execute(&self, args: &[String]) -> CommandResult;

    /// True when the last execution reported errors.
    fn has_errors(&self) -> bool {
        false
    }
}

/// Build an owned argument vector from string slices.
pub fn to_args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
