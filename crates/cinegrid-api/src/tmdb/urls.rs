//! Image and detail page URL construction.

use url::Url;

use super::client::normalize_base_url;
use super::types::MediaKind;

/// Default TMDB image host.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Default rendition size for card images.
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

/// Base URL of the public TMDB website.
pub const TMDB_WEB_BASE_URL: &str = "https://www.themoviedb.org";

/// Builds image URLs from the path fragments returned by the API
/// (e.g. `/kqjL17yufvn9OVLyXYpvtyrFfak.jpg`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base_url: Url,
    size: String,
}

impl ImageUrlBuilder {
    /// Creates a builder for the given image host and size.
    #[must_use]
    pub fn new(base_url: Url, size: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            size: size.into(),
        }
    }

    /// Returns the full image URL for a path fragment.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url.as_str(),
            self.size,
            path.trim_start_matches('/')
        )
    }

    /// Returns the full image URL, or `None` when the record has no image.
    #[must_use]
    pub fn url_opt(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| self.url(p))
    }
}

/// Returns the TMDB web page for a title.
#[must_use]
pub fn detail_url(kind: MediaKind, id: u64) -> String {
    format!("{TMDB_WEB_BASE_URL}/{}/{id}", kind.path_segment())
}
