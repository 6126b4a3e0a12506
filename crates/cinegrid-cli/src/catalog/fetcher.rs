//! Popular-list fetcher and the loading state it drives.

use anyhow::{Context, Result};
use cinegrid_api::tmdb::{LocalTmdbApi, MediaKind, PopularParams};
use tracing::instrument;

use super::record::TitleRecord;

/// Fetches one page of popular titles for `kind` and normalizes them.
///
/// Issues exactly one API request.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip(api, params))]
pub async fn fetch_popular(
    api: &(impl LocalTmdbApi + Sync),
    kind: MediaKind,
    params: &PopularParams,
) -> Result<Vec<TitleRecord>> {
    let titles = match kind {
        MediaKind::Movie => api
            .popular_movies(params)
            .await
            .context("TMDB movie/popular request failed")?
            .results
            .into_iter()
            .map(TitleRecord::from)
            .collect(),
        MediaKind::Tv => api
            .popular_tv(params)
            .await
            .context("TMDB tv/popular request failed")?
            .results
            .into_iter()
            .map(TitleRecord::from)
            .collect(),
    };
    Ok(titles)
}

/// Fetched list plus loading flag for one catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Resource this catalog lists.
    pub kind: MediaKind,
    /// Titles from the last successful fetch.
    pub titles: Vec<TitleRecord>,
    /// `true` until the first fetch completes (successfully or not).
    pub loading: bool,
}

impl Catalog {
    /// Creates an empty catalog in the loading state.
    #[must_use]
    pub const fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            titles: Vec::new(),
            loading: true,
        }
    }

    /// Applies a fetch result.
    ///
    /// On success the held list is replaced wholesale. On failure the error
    /// is logged and the list is left untouched. The loading flag is cleared
    /// in both cases.
    pub fn apply_fetch(&mut self, result: Result<Vec<TitleRecord>>) {
        match result {
            Ok(titles) => {
                tracing::info!(kind = %self.kind, count = titles.len(), "Fetched popular titles");
                self.titles = titles;
            }
            Err(e) => {
                tracing::error!(kind = %self.kind, "Error fetching data: {e:#}");
            }
        }
        self.loading = false;
    }
}
