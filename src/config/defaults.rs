//! Default configuration constants.

pub(super) use crate::tui::settings::DEFAULT_GITHUB_STORE;

/// Config file name, both locally and under the global config directory.
pub(super) const CONFIG_FILE_NAME: &str = "gensh.toml";
/// Application directory under the platform config directory.
pub(super) const CONFIG_APP_DIR: &str = "gensh";
/// Prompt coloring is on unless disabled.
pub(super) const DEFAULT_COLOR: bool = true;
