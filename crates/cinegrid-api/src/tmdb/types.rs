//! TMDB API response types and request parameters.

use std::fmt;

use serde::Deserialize;

// --- Media kind ---

/// Catalog resource served by TMDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Feature films (`/movie/...`).
    Movie,
    /// TV series (`/tv/...`).
    Tv,
}

impl MediaKind {
    /// Returns the URL path segment for this resource.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Returns the human-readable catalog heading.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Movie => "Popular Movies",
            Self::Tv => "Popular TV Series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

// --- Popular lists ---

/// Response from the `{movie,tv}/popular` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPopularResponse<T> {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Titles on this page.
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// Response from `movie/popular`.
pub type TmdbPopularMoviesResponse = TmdbPopularResponse<TmdbMovie>;

/// Response from `tv/popular`.
pub type TmdbPopularTvResponse = TmdbPopularResponse<TmdbTvShow>;

/// A single movie entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Release date (YYYY-MM-DD, may be empty or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
}

/// A single TV series entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvShow {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// First air date (YYYY-MM-DD, may be empty or null).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Parameters ---

/// Optional query parameters for the popular endpoints.
///
/// Only `api_key` is sent by default; the fields here are added
/// to the query string when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularParams {
    /// Response language (e.g. "en-US").
    pub language: Option<String>,
    /// Result page (1-500).
    pub page: Option<u32>,
}

impl PopularParams {
    /// Creates empty params.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            language: None,
            page: None,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Builds the optional query pairs (without `api_key`).
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(ref language) = self.language {
            query.push(("language", language.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}
