//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::env::apply_env_overrides;
use super::sources::read_config_text_with_sources;
use super::{Config, LoadedConfig};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        dirs::config_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&Path>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    normalize(&mut config);
    apply_env_overrides(&mut config, &env_lookup)?;
    validate(&config)?;
    Ok(LoadedConfig { config, source })
}

/// Treat blank optional strings as absent.
fn normalize(config: &mut Config) {
    for value in [&mut config.editor.command, &mut config.project.backend] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            *value = None;
        }
    }
    config.github.default_store = config.github.default_store.trim().to_string();
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.github.default_store.is_empty() {
        return Err(ConfigError::Invalid(
            "github.default_store must not be empty".to_string(),
        ));
    }
    if config
        .github
        .default_store
        .chars()
        .any(char::is_whitespace)
    {
        return Err(ConfigError::Invalid(format!(
            "github.default_store `{}` must not contain whitespace",
            config.github.default_store
        )));
    }
    Ok(())
}
