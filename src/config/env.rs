//! Environment overrides.
//!
//! Canonical `GENSH_*` variables take precedence. `EDITOR` is accepted as a
//! fallback for the editor command.

use crate::error::ConfigError;

use super::Config;

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(editor) = env_with_fallback(env_lookup, "GENSH_EDITOR", "EDITOR") {
        config.editor.command = Some(editor);
    }
    if let Some(store) = non_blank(env_lookup("GENSH_GITHUB_STORE")) {
        config.github.default_store = store;
    }
    if let Some(backend) = non_blank(env_lookup("GENSH_BACKEND")) {
        config.project.backend = Some(backend);
    }
    if let Some(value) = non_blank(env_lookup("GENSH_NO_COLOR")) {
        config.display.color = !parse_flag("GENSH_NO_COLOR", &value)?;
    }
    Ok(())
}

/// Resolve a value from the canonical env var or, if absent, its fallback.
pub(super) fn env_with_fallback<FEnv>(
    env_lookup: &FEnv,
    canonical: &str,
    fallback: &str,
) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    non_blank(env_lookup(canonical)).or_else(|| non_blank(env_lookup(fallback)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(format!(
            "invalid {name} value `{value}`: expected true or false"
        ))),
    }
}
