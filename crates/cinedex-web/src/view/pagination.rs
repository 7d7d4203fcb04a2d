//! Windowed pagination control.
//!
//! Shows the first and last page, one sibling on each side of the current
//! page, and an ellipsis for every hidden run. A hidden run of exactly one
//! page is shown as that page instead, so the control keeps a constant
//! width of seven slots once there are more than seven pages.

use std::fmt::Write as _;

use super::html::Escaped;
use crate::http::{ListView, MAX_PAGE, page_href};
use crate::i18n::Translator;

const BOUNDARY: u32 = 1;
const SIBLINGS: u32 = 1;

/// One slot of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A link to this page number.
    Page(u32),
    /// A gap of skipped pages.
    Ellipsis,
}

/// Computes the slots for `current` of `total` pages.
///
/// `current` is clamped into `1..=total`; `total` is capped at
/// [`MAX_PAGE`]. Returns nothing for zero pages.
#[must_use]
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    let total = total.min(MAX_PAGE);
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    // Boundary pages + siblings + current + two ellipses.
    let slots = BOUNDARY * 2 + SIBLINGS * 2 + 3;
    if total <= slots {
        return (1..=total).map(PageItem::Page).collect();
    }

    let end_start = total - BOUNDARY + 1;
    let siblings_start = current
        .saturating_sub(SIBLINGS)
        .min(total - BOUNDARY - SIBLINGS * 2 - 1)
        .max(BOUNDARY + 2);
    let siblings_end = (current + SIBLINGS)
        .max(BOUNDARY + SIBLINGS * 2 + 2)
        .min(end_start - 2);

    let mut items: Vec<PageItem> = (1..=BOUNDARY).map(PageItem::Page).collect();
    if siblings_start > BOUNDARY + 2 {
        items.push(PageItem::Ellipsis);
    } else {
        items.push(PageItem::Page(BOUNDARY + 1));
    }
    items.extend((siblings_start..=siblings_end).map(PageItem::Page));
    if siblings_end < end_start - 2 {
        items.push(PageItem::Ellipsis);
    } else {
        items.push(PageItem::Page(end_start - 1));
    }
    items.extend((end_start..=total).map(PageItem::Page));
    items
}

/// Renders previous/next links around the page slots. Nothing is rendered
/// for a single page.
#[must_use]
pub fn render_pagination(
    t: Translator<'_>,
    path: &str,
    current: u32,
    total: u32,
    view: ListView,
) -> String {
    let items = page_items(current, total);
    if items.len() < 2 {
        return String::new();
    }
    let total = total.min(MAX_PAGE);
    let current = current.clamp(1, total);

    let mut out = String::from("<nav class=\"pagination\" aria-label=\"pagination\"><ul>");
    if current > 1 {
        let _ = write!(
            out,
            "<li><a rel=\"prev\" href=\"{}\">{}</a></li>",
            Escaped(&page_href(path, current - 1, view)),
            Escaped(t.t("previous"))
        );
    }
    for item in items {
        match item {
            PageItem::Page(page) if page == current => {
                let _ = write!(out, "<li><span aria-current=\"page\">{page}</span></li>");
            }
            PageItem::Page(page) => {
                let _ = write!(
                    out,
                    "<li><a href=\"{}\">{page}</a></li>",
                    Escaped(&page_href(path, page, view))
                );
            }
            PageItem::Ellipsis => out.push_str("<li><span class=\"ellipsis\">…</span></li>"),
        }
    }
    if current < total {
        let _ = write!(
            out,
            "<li><a rel=\"next\" href=\"{}\">{}</a></li>",
            Escaped(&page_href(path, current + 1, view)),
            Escaped(t.t("next"))
        );
    }
    out.push_str("</ul></nav>");
    out
}
