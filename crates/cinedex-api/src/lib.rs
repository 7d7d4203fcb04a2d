//! API client library for cinedex.
//!
//! Provides the client for the TMDB API v3 and helpers for building
//! TMDB image URLs.

/// TMDB API client.
pub mod tmdb;
