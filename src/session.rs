//! Mutable session context shared by every command of one shell run.
//!
//! A [`Session`] is built once by the command registry from
//! [`SessionSettings`] and lives for the whole process. Commands never own a
//! session; they reach it through the shared command context.

use crate::tui::settings;
use std::fmt;
use std::path::PathBuf;

/// File-name suffix identifying a DSL model.
pub const DSL_MODEL_SUFFIX: &str = ".model";

/// Host operating-system family, used when launching external commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl OsKind {
    /// Detect the OS family this binary was compiled for.
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name to an OS family.
    pub fn from_name(name: &str) -> Self {
        match name {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Startup values a session is built from.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub current_directory: PathBuf,
    pub editor_command: Option<String>,
    pub default_github_store: String,
    pub os_kind: OsKind,
    /// Apply the cosmetic prompt color transform.
    pub color: bool,
}

impl SessionSettings {
    /// Settings with no editor, the built-in store name and no color.
    pub fn new(current_directory: impl Into<PathBuf>) -> Self {
        Self {
            current_directory: current_directory.into(),
            editor_command: None,
            default_github_store: settings::DEFAULT_GITHUB_STORE.to_string(),
            os_kind: OsKind::current(),
            color: false,
        }
    }
}

/// The single mutable session context.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) current_directory: PathBuf,
    pub(crate) home_directory: Option<PathBuf>,
    pub(crate) current_model: Option<String>,
    pub(crate) current_bundle: Option<String>,
    pub(crate) autoconfirm: bool,
    pub(crate) current_github_store: Option<String>,
    default_github_store: String,
    editor_command: Option<String>,
    os_kind: OsKind,
}

impl Session {
    pub fn new(settings: &SessionSettings) -> Self {
        Self {
            current_directory: settings.current_directory.clone(),
            home_directory: None,
            current_model: None,
            current_bundle: None,
            autoconfirm: false,
            current_github_store: Some(settings.default_github_store.clone()),
            default_github_store: settings.default_github_store.clone(),
            editor_command: settings.editor_command.clone(),
            os_kind: settings.os_kind,
        }
    }

    pub fn current_directory(&self) -> &PathBuf {
        &self.current_directory
    }

    pub fn home_directory(&self) -> Option<&PathBuf> {
        self.home_directory.as_ref()
    }

    pub fn current_model(&self) -> Option<&str> {
        self.current_model.as_deref()
    }

    pub fn current_bundle(&self) -> Option<&str> {
        self.current_bundle.as_deref()
    }

    pub fn autoconfirm(&self) -> bool {
        self.autoconfirm
    }

    pub fn current_github_store(&self) -> Option<&str> {
        self.current_github_store.as_deref()
    }

    pub fn default_github_store(&self) -> &str {
        &self.default_github_store
    }

    pub fn editor_command(&self) -> Option<&str> {
        self.editor_command.as_deref()
    }

    pub fn os_kind(&self) -> OsKind {
        self.os_kind
    }

    /// True when a model is selected and it is a DSL model.
    pub fn has_dsl_model(&self) -> bool {
        self.current_model().is_some_and(is_dsl_model)
    }

    /// Plain prompt text derived from home, model and bundle.
    ///
    /// The order is fixed: home marker, model, bundle, terminator.
    pub fn prompt_text(&self) -> String {
        let mut prompt = String::from(settings::PROMPT_BASE);
        if self.home_directory.is_some() {
            prompt.push_str(settings::PROMPT_HOME_MARKER);
        }
        if let Some(model) = &self.current_model {
            prompt.push('(');
            prompt.push_str(model);
            prompt.push(')');
        }
        if let Some(bundle) = &self.current_bundle {
            prompt.push('[');
            prompt.push_str(bundle);
            prompt.push(']');
        }
        prompt.push_str(settings::PROMPT_TERMINATOR);
        prompt
    }
}

/// True when `name` designates a DSL model.
pub fn is_dsl_model(name: &str) -> bool {
    name.ends_with(DSL_MODEL_SUFFIX)
}
