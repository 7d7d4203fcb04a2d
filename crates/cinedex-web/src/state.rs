//! Shared application state.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cinedex_api::tmdb::TmdbClient;

use crate::config::AppConfig;
use crate::i18n::{Catalogs, Locale, Translator};

/// State available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// TMDB API client.
    pub tmdb: Arc<TmdbClient>,
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Translated UI strings.
    pub catalogs: Arc<Catalogs>,
}

impl AppState {
    /// Builds the state, loading the bundled message catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled catalog fails to parse, or a supported
    /// language has no catalog.
    pub fn new(tmdb: TmdbClient, config: AppConfig) -> Result<Self> {
        let catalogs =
            Catalogs::embedded(&config.i18n.fallback).context("failed to load message catalogs")?;
        if let Some(lang) = config
            .i18n
            .supported
            .iter()
            .find(|lang| !catalogs.languages().any(|bundled| bundled == lang.as_str()))
        {
            bail!("i18n.supported lists '{lang}' but no message catalog exists for it");
        }
        Ok(Self {
            tmdb: Arc::new(tmdb),
            config: Arc::new(config),
            catalogs: Arc::new(catalogs),
        })
    }

    /// Translator for the request locale.
    #[must_use]
    pub fn translator<'a>(&'a self, locale: &'a Locale) -> Translator<'a> {
        self.catalogs.translator(locale.as_str())
    }
}
