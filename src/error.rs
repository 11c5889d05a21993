//! Unified error types for the shell.

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// ProjectError
// ---------------------------------------------------------------------------

/// Failures reported by the project-automation collaborator.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// A model, bundle or file expected in the project is missing.
    #[error("not found: {0}")]
    NotFound(String),
    /// A bundle's target definitions file could not be parsed.
    #[error("invalid target definition in {} at line {line}: {reason}", .path.display())]
    InvalidTargets {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    /// The operation needs the external backend and none is configured.
    #[error("no project backend configured for `{0}`")]
    BackendUnavailable(&'static str),
    /// The external backend ran but reported a failure.
    #[error("backend `{operation}` failed: {detail}")]
    BackendFailed {
        operation: &'static str,
        detail: String,
    },
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors raised while building the command registry at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command `{0}` is already registered")]
    DuplicateCommand(String),
    #[error("cannot alias `{alias}`: no command named `{target}`")]
    UnknownAliasTarget { alias: String, target: String },
}

// ---------------------------------------------------------------------------
// CancelCommand
// ---------------------------------------------------------------------------

/// Signal that unwinds the currently executing command.
///
/// Only the interactive loop and the batch translator handle it; command
/// helpers propagate it with `?`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("command cancelled: {reason}")]
pub struct CancelCommand {
    pub reason: String,
}

impl CancelCommand {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchError
// ---------------------------------------------------------------------------

/// Failures that abort batch translation of launch arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error(transparent)]
    Cancelled(#[from] CancelCommand),
}
