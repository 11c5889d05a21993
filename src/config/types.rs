//! Configuration data model.
//!
//! Struct definitions and defaults only; loading lives in `config::loader`
//! and file discovery in `config::sources`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults::{DEFAULT_COLOR, DEFAULT_GITHUB_STORE};
use crate::session::{OsKind, SessionSettings};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub editor: EditorConfig,
    pub github: GitHubConfig,
    pub project: ProjectConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Startup session values for a shell launched in `current_directory`.
    pub fn session_settings(&self, current_directory: &Path) -> SessionSettings {
        SessionSettings {
            current_directory: current_directory.to_path_buf(),
            editor_command: self.editor.command.clone(),
            default_github_store: self.github.default_store.clone(),
            os_kind: OsKind::current(),
            color: self.display.color,
        }
    }
}

/// External editor launched by `e`, `em`, `ecfg` and `edb`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// Command template; `$FILE` or `${FILE}` is replaced by the file path,
    /// otherwise the path is appended.
    pub command: Option<String>,
}

/// GitHub store used to look up bundles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitHubConfig {
    pub default_store: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            default_store: DEFAULT_GITHUB_STORE.to_string(),
        }
    }
}

/// Project collaborator settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Executable handling generation and database models.
    pub backend: Option<String>,
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
        }
    }
}

/// Where the configuration text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// `./gensh.toml`.
    Local,
    /// `<config dir>/gensh/gensh.toml`.
    Global(PathBuf),
    /// No file found; built-in defaults were used.
    BuiltInDefaults,
}

/// Loaded configuration plus the source it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}
