//! Fixture-backed `TmdbApi` for loader tests.
#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use anyhow::{Result, bail};
use cinedex_api::tmdb::{
    MediaType, MovieListCategory, SearchMovieParams, SearchTvParams, TmdbApi, TmdbGenre,
    TmdbImages, TmdbMovieDetails, TmdbMovieListResponse, TmdbSearchMovieResponse,
    TmdbSearchTvResponse, TmdbTvDetails, TmdbTvListResponse, TvListCategory,
};
use serde::de::DeserializeOwned;

macro_rules! fixture {
    ($name:literal) => {
        include_str!(concat!("../../../../fixtures/tmdb/", $name, ".json"))
    };
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

#[derive(Debug, Default)]
pub struct StubTmdb {
    pub fail_lists: bool,
    pub fail_genres: bool,
    pub missing_title: bool,
    pub missing_images: bool,
    /// `(language, page)` of the last list or search call.
    pub last_request: Mutex<Option<(String, Option<u32>)>>,
}

impl StubTmdb {
    fn record(&self, language: &str, page: Option<u32>) {
        *self.last_request.lock().unwrap() = Some((String::from(language), page));
    }

    pub fn last_request(&self) -> Option<(String, Option<u32>)> {
        self.last_request.lock().unwrap().clone()
    }
}

impl TmdbApi for StubTmdb {
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbSearchMovieResponse> {
        self.record(&params.language, params.page);
        parse(fixture!("search_movie_dune"))
    }

    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbSearchTvResponse> {
        self.record(&params.language, params.page);
        parse(fixture!("search_tv_empty"))
    }

    async fn movie_list(
        &self,
        _category: MovieListCategory,
        language: &str,
        page: Option<u32>,
    ) -> Result<TmdbMovieListResponse> {
        self.record(language, page);
        if self.fail_lists {
            bail!("TMDB API error (HTTP 500): code=11, message=Internal error");
        }
        parse(fixture!("search_movie_dune"))
    }

    async fn tv_list(
        &self,
        _category: TvListCategory,
        language: &str,
        page: Option<u32>,
    ) -> Result<TmdbTvListResponse> {
        self.record(language, page);
        if self.fail_lists {
            bail!("TMDB API error (HTTP 500): code=11, message=Internal error");
        }
        parse(fixture!("tv_airing_today"))
    }

    async fn movie_details(&self, _movie_id: u64, _language: &str) -> Result<Option<TmdbMovieDetails>> {
        if self.missing_title {
            return Ok(None);
        }
        parse(fixture!("movie_details_438631")).map(Some)
    }

    async fn tv_details(&self, _series_id: u64, _language: &str) -> Result<Option<TmdbTvDetails>> {
        if self.missing_title {
            return Ok(None);
        }
        parse(fixture!("tv_details_1399")).map(Some)
    }

    async fn images(
        &self,
        _media_type: MediaType,
        _id: u64,
        _language: &str,
    ) -> Result<Option<TmdbImages>> {
        if self.missing_images {
            return Ok(None);
        }
        parse(fixture!("tv_images_1399")).map(Some)
    }

    async fn genres(&self, media_type: MediaType, _language: &str) -> Result<Vec<TmdbGenre>> {
        #[derive(serde::Deserialize)]
        struct GenreList {
            genres: Vec<TmdbGenre>,
        }
        if self.fail_genres {
            bail!("TMDB API error (HTTP 401): code=7, message=Invalid API key");
        }
        let list: GenreList = match media_type {
            MediaType::Movie => parse(fixture!("genre_movie_list"))?,
            MediaType::Tv => parse(fixture!("genre_tv_list"))?,
        };
        Ok(list.genres)
    }
}
