//! Document head metadata.

use super::html::Escaped;
use crate::config::SiteConfig;

/// Title, description and canonical URL of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// Full document title, site name included.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Absolute page URL.
    pub url: String,
}

impl PageMeta {
    /// Builds metadata for `path`, prefixing the title with the site name.
    #[must_use]
    pub fn new(site: &SiteConfig, title: &str, description: &str, path: &str) -> Self {
        Self {
            title: format!("{} - {title}", site.name),
            description: String::from(description),
            url: format!("{}{path}", site.url.trim_end_matches('/')),
        }
    }

    /// `<title>` and meta tags, including Open Graph and Twitter cards.
    #[must_use]
    pub fn render(&self) -> String {
        let title = Escaped(&self.title);
        let description = Escaped(&self.description);
        format!(
            "<title>{title}</title>\n\
             <meta name=\"description\" content=\"{description}\">\n\
             <meta property=\"og:url\" content=\"{}\">\n\
             <meta property=\"og:title\" content=\"{title}\">\n\
             <meta property=\"og:description\" content=\"{description}\">\n\
             <meta name=\"twitter:title\" content=\"{title}\">\n\
             <meta name=\"twitter:description\" content=\"{description}\">\n",
            Escaped(&self.url),
        )
    }
}
