//! Application configuration module.
//!
//! Manages the TOML config file holding server, TMDB, site and
//! localization settings, plus environment overrides.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, I18nConfig, ServerConfig, SiteConfig, TmdbConfig};
pub use paths::resolve_config_path;
