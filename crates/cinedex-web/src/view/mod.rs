//! Server-rendered HTML.
//!
//! Every component writes into a `String`; interpolated text goes through
//! [`html::Escaped`].

pub mod breadcrumb;
pub mod gallery;
pub mod html;
pub mod layout;
pub mod media_list;
pub mod meta;
pub mod pages;
pub mod pagination;
pub mod search_form;

use crate::config::SiteConfig;
use crate::i18n::Translator;

/// Request-scoped inputs shared by all components.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Translator for the negotiated locale.
    pub t: Translator<'a>,
    /// Site name and public URL.
    pub site: &'a SiteConfig,
    /// Languages offered in the language switcher.
    pub languages: &'a [String],
    /// Request path.
    pub path: &'a str,
    /// Raw request query, empty when absent.
    pub query: &'a str,
}
