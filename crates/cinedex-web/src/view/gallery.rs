//! Photo gallery sections for backdrops, logos and posters.

use std::fmt::Write as _;

use cinedex_api::tmdb::TmdbImage;
use cinedex_api::tmdb::image::{
    LogoSize, PosterSize, ProfileSize, logo_url, poster_url, profile_url,
};

use super::ViewContext;
use super::html::Escaped;
use crate::loaders::PhotosData;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Backdrop,
    Logo,
    Poster,
}

impl Kind {
    const fn heading_key(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrops",
            Self::Logo => "logos",
            Self::Poster => "posters",
        }
    }

    const fn caption_key(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrop-caption",
            Self::Logo => "logo-caption",
            Self::Poster => "poster-caption",
        }
    }

    /// `(thumbnail, original)` URLs. Backdrops have no `w185` size of
    /// their own and use the profile size set.
    fn urls(self, path: &str) -> Option<(String, String)> {
        match self {
            Self::Backdrop => Some((
                profile_url(path, ProfileSize::W185)?,
                profile_url(path, ProfileSize::Original)?,
            )),
            Self::Logo => Some((
                logo_url(path, LogoSize::W185)?,
                logo_url(path, LogoSize::Original)?,
            )),
            Self::Poster => Some((
                poster_url(path, PosterSize::W185)?,
                poster_url(path, PosterSize::Original)?,
            )),
        }
    }
}

/// Renders one section per non-empty image collection.
#[must_use]
pub fn render_gallery(ctx: ViewContext<'_>, data: &PhotosData) -> String {
    let mut out = String::from("<div class=\"gallery\">");
    for (kind, images) in [
        (Kind::Backdrop, &data.images.backdrops),
        (Kind::Logo, &data.images.logos),
        (Kind::Poster, &data.images.posters),
    ] {
        if !images.is_empty() {
            render_section(ctx, &mut out, kind, &data.title, images);
        }
    }
    out.push_str("</div>");
    out
}

fn render_section(
    ctx: ViewContext<'_>,
    out: &mut String,
    kind: Kind,
    title: &str,
    images: &[TmdbImage],
) {
    let t = ctx.t;
    let _ = write!(
        out,
        "<section class=\"gallery-section\"><h2>{}</h2><div class=\"gallery-grid\">",
        Escaped(t.t(kind.heading_key()))
    );
    for image in images {
        let Some((thumbnail, original)) = kind.urls(&image.file_path) else {
            continue;
        };
        let size = format!("{}x{}", image.width, image.height);
        let caption = t.t_with(kind.caption_key(), &[("name", title), ("size", &size)]);
        let _ = write!(
            out,
            "<figure class=\"gallery-item\" data-width=\"{w}\" data-height=\"{h}\">\
             <a href=\"{original}\" target=\"_blank\" rel=\"noopener\">\
             <img src=\"{thumbnail}\" alt=\"{caption}\" title=\"{title}\" loading=\"lazy\"></a>\
             <figcaption>{caption}</figcaption></figure>",
            w = image.width,
            h = image.height,
            original = Escaped(&original),
            thumbnail = Escaped(&thumbnail),
            caption = Escaped(&caption),
            title = Escaped(title),
        );
    }
    out.push_str("</div></section>");
}
