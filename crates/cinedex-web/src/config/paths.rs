//! Config file location.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// File name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolves the config file path from the process environment.
///
/// See [`resolve_config_path_with`] for the lookup order.
///
/// # Errors
///
/// Returns an error if no base directory can be determined.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_config_path_with(dir, |key| std::env::var(key).ok())
}

/// Resolves the config file path using `env` for variable lookups.
///
/// 1. `--dir` given: `{dir}/config.toml`.
/// 2. `CINEDEX_CONFIG` set: that file.
/// 3. `XDG_CONFIG_HOME` set: `$XDG_CONFIG_HOME/cinedex/config.toml`.
/// 4. Otherwise `~/.config/cinedex/config.toml`.
///
/// # Errors
///
/// Returns an error if none of the above applies and `HOME` is unset.
pub fn resolve_config_path_with(
    dir: Option<&PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE_NAME));
    }

    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(file) = non_empty("CINEDEX_CONFIG") {
        return Ok(PathBuf::from(file));
    }
    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("cinedex").join(CONFIG_FILE_NAME));
    }

    let home = non_empty("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("cinedex")
        .join(CONFIG_FILE_NAME))
}
