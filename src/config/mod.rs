//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`GENSH_EDITOR` with `EDITOR` fallback,
//!    `GENSH_GITHUB_STORE`, `GENSH_BACKEND`, `GENSH_NO_COLOR`).
//! 2. TOML file specified via --config CLI flag
//! 3. ./gensh.toml in the current directory
//! 4. <platform config dir>/gensh/gensh.toml
//! 5. Built-in defaults

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use loader::load_config;
pub use types::{
    Config, ConfigSource, DisplayConfig, EditorConfig, GitHubConfig, LoadedConfig, ProjectConfig,
};
