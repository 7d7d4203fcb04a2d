//! `AppConfig` struct, TOML read/write and environment overrides.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// TMDB client settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Public site identity used in page titles and meta tags.
    #[serde(default)]
    pub site: SiteConfig,
    /// Localization settings.
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// TMDB client configuration. The API token comes from `TMDB_API_TOKEN`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Overrides the API base URL (e.g. a caching proxy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Minimum interval between TMDB requests in milliseconds.
    pub min_interval_ms: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            min_interval_ms: 25,
        }
    }
}

/// Public site identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name, prefixed to page titles.
    pub name: String,
    /// Absolute public URL without trailing slash, used for `og:url`.
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: String::from("Cinedex"),
            url: String::from("http://localhost:3000"),
        }
    }
}

/// Localization settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct I18nConfig {
    /// Languages the site can be rendered in (ISO 639-1).
    pub supported: Vec<String>,
    /// Language used when negotiation finds no match.
    pub fallback: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            supported: vec![String::from("en"), String::from("ja"), String::from("vi")],
            fallback: String::from("en"),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the parsed values are inconsistent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Applies `HOST`, `PORT` and `SITE_URL` overrides read through `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = env("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = env("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number: {port}"))?;
        }
        if let Some(url) = env("SITE_URL").filter(|u| !u.trim().is_empty()) {
            self.site.url = url;
        }
        Ok(())
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if the request timeout is zero, no language is
    /// supported, or the fallback is not one of the supported languages.
    pub fn validate(&self) -> Result<()> {
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be greater than 0");
        }
        if self.i18n.supported.is_empty() {
            bail!("i18n.supported must list at least one language");
        }
        if !self.i18n.supported.contains(&self.i18n.fallback) {
            bail!(
                "i18n.fallback '{}' is not in i18n.supported {:?}",
                self.i18n.fallback,
                self.i18n.supported
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.tmdb.min_interval_ms, 25);
        assert_eq!(config.i18n.fallback, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.site.name = String::from("Reel");
        config.tmdb.base_url = Some(String::from("http://proxy.local/3/"));

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.site, SiteConfig::default());
    }

    #[test]
    fn test_load_rejects_unsupported_fallback() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[i18n]\nsupported = [\"en\"]\nfallback = \"fr\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(format!("{:#}", result.unwrap_err()).contains("not in i18n.supported"));
    }

    #[test]
    fn test_load_rejects_zero_request_timeout() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nrequest_timeout_secs = 0\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(format!("{:#}", result.unwrap_err()).contains("request_timeout_secs"));
    }

    #[test]
    fn test_apply_env_overrides() {
        // Arrange
        let mut config = AppConfig::default();

        // Act
        config
            .apply_env(|key| match key {
                "HOST" => Some(String::from("127.0.0.1")),
                "PORT" => Some(String::from(" 8081 ")),
                _ => None,
            })
            .unwrap();

        // Assert
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.site.url, "http://localhost:3000");
    }

    #[test]
    fn test_apply_env_invalid_port() {
        // Arrange
        let mut config = AppConfig::default();

        // Act
        let result = config.apply_env(|key| (key == "PORT").then(|| String::from("http")));

        // Assert
        assert!(result.unwrap_err().to_string().contains("PORT"));
    }
}
