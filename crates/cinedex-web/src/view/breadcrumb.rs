//! Breadcrumb trail and mini title.

use std::fmt::Write as _;

use super::html::Escaped;

/// One step in the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Link target.
    pub href: String,
    /// Visible text.
    pub label: String,
}

impl Breadcrumb {
    /// Creates a crumb.
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Renders the trail; the last crumb is marked as the current page.
#[must_use]
pub fn render_breadcrumbs(crumbs: &[Breadcrumb]) -> String {
    let Some((current, parents)) = crumbs.split_last() else {
        return String::new();
    };
    let mut out = String::from("<nav class=\"breadcrumbs\" aria-label=\"breadcrumb\"><ol>");
    for crumb in parents {
        let _ = write!(
            out,
            "<li><a href=\"{}\">{}</a></li>",
            Escaped(&crumb.href),
            Escaped(&crumb.label)
        );
    }
    let _ = write!(
        out,
        "<li><a href=\"{}\" aria-current=\"page\">{}</a></li></ol></nav>",
        Escaped(&current.href),
        Escaped(&current.label)
    );
    out
}

/// Compact heading shown above the page content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiniTitle {
    /// Main line.
    pub title: String,
    /// Smaller second line.
    pub subtitle: Option<String>,
    /// Small poster next to the title.
    pub image_url: Option<String>,
}

impl MiniTitle {
    /// A title with no subtitle or image.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Markup for the heading.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("<div class=\"mini-title\">");
        if let Some(url) = &self.image_url {
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\" width=\"46\" loading=\"lazy\">",
                Escaped(url),
                Escaped(&self.title)
            );
        }
        let _ = write!(out, "<h1>{}</h1>", Escaped(&self.title));
        if let Some(subtitle) = &self.subtitle {
            let _ = write!(out, "<p class=\"subtitle\">{}</p>", Escaped(subtitle));
        }
        out.push_str("</div>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumbs_mark_current_page() {
        // Arrange
        let crumbs = vec![
            Breadcrumb::new("/", "Home"),
            Breadcrumb::new("/tv-shows/airing-today", "Airing Today"),
        ];

        // Act
        let html = render_breadcrumbs(&crumbs);

        // Assert
        assert!(html.contains("<li><a href=\"/\">Home</a></li>"));
        assert!(html.contains(
            "<li><a href=\"/tv-shows/airing-today\" aria-current=\"page\">Airing Today</a></li>"
        ));
    }

    #[test]
    fn test_empty_breadcrumbs_render_nothing() {
        // Arrange & Act & Assert
        assert_eq!(render_breadcrumbs(&[]), "");
    }

    #[test]
    fn test_mini_title_with_image_and_subtitle() {
        // Arrange
        let mini = MiniTitle {
            title: String::from("Tom & Jerry"),
            subtitle: Some(String::from("Photos")),
            image_url: Some(String::from("https://image.tmdb.org/t/p/w92/p.jpg")),
        };

        // Act
        let html = mini.render();

        // Assert
        assert!(html.contains("<h1>Tom &amp; Jerry</h1>"));
        assert!(html.contains("<p class=\"subtitle\">Photos</p>"));
        assert!(html.contains("src=\"https://image.tmdb.org/t/p/w92/p.jpg\""));
    }
}
