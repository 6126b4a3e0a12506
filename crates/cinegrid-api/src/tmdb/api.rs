//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{PopularParams, TmdbPopularMoviesResponse, TmdbPopularTvResponse};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the first page (or `params.page`) of popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server answers with a
    /// non-2xx status, or JSON parsing fails.
    async fn popular_movies(&self, params: &PopularParams) -> Result<TmdbPopularMoviesResponse>;

    /// Fetches the first page (or `params.page`) of popular TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server answers with a
    /// non-2xx status, or JSON parsing fails.
    async fn popular_tv(&self, params: &PopularParams) -> Result<TmdbPopularTvResponse>;
}
