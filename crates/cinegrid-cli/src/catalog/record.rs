//! `TitleRecord` - the catalog entry shown on a card.

use chrono::NaiveDate;
use cinegrid_api::tmdb::{TmdbMovie, TmdbTvShow};

/// Maximum number of overview characters shown on a card.
pub const OVERVIEW_EXCERPT_CHARS: usize = 50;

/// Number of stars in the rating bar.
const STAR_COUNT: usize = 5;

/// A movie or TV series entry, normalized from the API payload.
///
/// Records are never mutated after a fetch; a new fetch replaces the list.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecord {
    /// TMDB ID.
    pub id: u64,
    /// Display name (movie title or series name).
    pub name: String,
    /// Overview text (may be empty).
    pub overview: String,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date or first air date (YYYY-MM-DD).
    pub release_date: Option<String>,
}

impl From<TmdbMovie> for TitleRecord {
    fn from(movie: TmdbMovie) -> Self {
        Self {
            id: movie.id,
            name: movie.title,
            overview: movie.overview,
            vote_average: movie.vote_average,
            backdrop_path: movie.backdrop_path,
            poster_path: movie.poster_path,
            release_date: movie.release_date,
        }
    }
}

impl From<TmdbTvShow> for TitleRecord {
    fn from(show: TmdbTvShow) -> Self {
        Self {
            id: show.id,
            name: show.name,
            overview: show.overview,
            vote_average: show.vote_average,
            backdrop_path: show.backdrop_path,
            poster_path: show.poster_path,
            release_date: show.first_air_date,
        }
    }
}

impl TitleRecord {
    /// Formats the release date as "Month YYYY" (e.g. "October 1999").
    ///
    /// Falls back to the raw string when it is not a `YYYY-MM-DD` date,
    /// and to `-` when the date is missing or empty.
    #[must_use]
    pub fn release_label(&self) -> String {
        match self.release_date.as_deref().map(str::trim) {
            None | Some("") => String::from("-"),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_or_else(|_| String::from(raw), |d| d.format("%B %Y").to_string()),
        }
    }

    /// Returns the first `OVERVIEW_EXCERPT_CHARS` characters of the overview,
    /// followed by `...` when the text was cut.
    #[must_use]
    pub fn overview_excerpt(&self) -> String {
        let mut chars = self.overview.chars();
        let excerpt: String = chars.by_ref().take(OVERVIEW_EXCERPT_CHARS).collect();
        if chars.next().is_some() {
            format!("{excerpt}...")
        } else {
            excerpt
        }
    }

    /// Number of filled stars out of five (vote average halved and rounded).
    #[must_use]
    #[allow(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn filled_stars(&self) -> usize {
        if !self.vote_average.is_finite() {
            return 0;
        }
        let stars = (self.vote_average / 2.0).round().clamp(0.0, 5.0);
        stars as usize
    }

    /// Builds the rating bar, e.g. `★★★★☆ 8.4`.
    #[must_use]
    pub fn rating_bar(&self) -> String {
        let filled = self.filled_stars().min(STAR_COUNT);
        format!(
            "{}{} {:.1}",
            "\u{2605}".repeat(filled),
            "\u{2606}".repeat(STAR_COUNT.saturating_sub(filled)),
            self.vote_average
        )
    }
}
