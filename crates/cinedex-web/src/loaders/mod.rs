//! Route loaders: fetch from TMDB and shape the page data.
//!
//! Loaders are generic over [`TmdbApi`](cinedex_api::tmdb::TmdbApi) so
//! tests can substitute a fixture-backed implementation.

mod lists;
mod media;
mod photos;
mod search;

#[cfg(test)]
mod stub;

pub use lists::{ListData, ListRoute, load_list, load_movie_list, load_tv_list};
pub use media::{MediaItem, MediaListPage, route_prefix};
pub use photos::{PhotosData, load_movie_photos, load_photos, load_tv_photos};
pub use search::{SearchData, load_movie_search, load_tv_search};
