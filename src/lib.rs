//! gensh: an interactive command shell for code-generation projects.
//!
//! The shell keeps a session (current directory, project home, model,
//! bundle, autoconfirm, GitHub store) and dispatches one-line commands that
//! read or change it and drive the project layer. Launch arguments are
//! translated into the same commands before the interactive loop starts.
//!
//! # Quick start
//!
//! ```no_run
//! use gensh::commands::{Collaborators, CommandRegistry};
//! use gensh::launcher::SpawnLauncher;
//! use gensh::project::LocalProjectFactory;
//! use gensh::session::SessionSettings;
//! use gensh::tui::ConsoleTerminal;
//!
//! let settings = SessionSettings::new(std::env::current_dir().unwrap());
//! let collaborators = Collaborators {
//!     terminal: Box::new(ConsoleTerminal::new()),
//!     launcher: Box::new(SpawnLauncher),
//!     projects: Box::new(LocalProjectFactory::new(None)),
//! };
//! let registry = CommandRegistry::with_builtin_commands(&settings, collaborators).unwrap();
//! gensh::repl::run_repl(&registry);
//! ```

pub mod build_info;
pub mod commands;
pub mod config;
pub mod error;
pub mod launch;
pub mod launcher;
pub mod project;
pub mod repl;
pub mod session;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
