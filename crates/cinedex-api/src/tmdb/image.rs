//! TMDB image CDN URL helpers.
//!
//! Image paths returned by the API (e.g. `/abc.jpg`) are relative; the
//! CDN expects `{base}/{size}{path}` where `size` must be one the CDN
//! renders for that image kind.

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Poster sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    /// 92px wide.
    W92,
    /// 154px wide.
    W154,
    /// 185px wide.
    W185,
    /// 342px wide.
    W342,
    /// 500px wide.
    W500,
    /// 780px wide.
    W780,
    /// Source resolution.
    Original,
}

/// Logo sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSize {
    /// 45px wide.
    W45,
    /// 92px wide.
    W92,
    /// 154px wide.
    W154,
    /// 185px wide.
    W185,
    /// 300px wide.
    W300,
    /// 500px wide.
    W500,
    /// Source resolution.
    Original,
}

/// Profile sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSize {
    /// 45px wide.
    W45,
    /// 185px wide.
    W185,
    /// 632px high.
    H632,
    /// Source resolution.
    Original,
}

/// Size token as it appears in CDN URLs.
pub trait ImageSize: Copy {
    /// Returns the URL token, e.g. `w185`.
    fn token(self) -> &'static str;
}

impl ImageSize for PosterSize {
    fn token(self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

impl ImageSize for LogoSize {
    fn token(self) -> &'static str {
        match self {
            Self::W45 => "w45",
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W300 => "w300",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

impl ImageSize for ProfileSize {
    fn token(self) -> &'static str {
        match self {
            Self::W45 => "w45",
            Self::W185 => "w185",
            Self::H632 => "h632",
            Self::Original => "original",
        }
    }
}

/// Builds a CDN URL for `path` at `size`. Returns `None` for an empty path.
#[must_use]
pub fn image_url(path: &str, size: impl ImageSize) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let separator = if path.starts_with('/') { "" } else { "/" };
    Some(format!(
        "{IMAGE_BASE_URL}{}{separator}{path}",
        size.token()
    ))
}

/// Poster URL.
#[must_use]
pub fn poster_url(path: &str, size: PosterSize) -> Option<String> {
    image_url(path, size)
}

/// Logo URL.
#[must_use]
pub fn logo_url(path: &str, size: LogoSize) -> Option<String> {
    image_url(path, size)
}

/// Profile URL.
#[must_use]
pub fn profile_url(path: &str, size: ProfileSize) -> Option<String> {
    image_url(path, size)
}
