//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 popular-title endpoints
//! and builds image and detail page URLs from response fragments.

mod api;
mod client;
mod types;
mod urls;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder, normalize_base_url};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    MediaKind, PopularParams, TmdbErrorResponse, TmdbMovie, TmdbPopularMoviesResponse,
    TmdbPopularResponse, TmdbPopularTvResponse, TmdbTvShow,
};
pub use urls::{
    DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_SIZE, ImageUrlBuilder, TMDB_WEB_BASE_URL, detail_url,
};
