//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Columns;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Grid display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// TMDB API configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API base URL (default: `https://api.themoviedb.org/3/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image host base URL (default: `https://image.tmdb.org/t/p/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Image rendition size (default: `w500`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
    /// API key. `TMDB_API_KEY` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Response language (e.g. "en-US"). Not sent when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Grid display configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Default column count (one of 1, 2, 3, 4, 6).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Columns>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Returns a config populated with every built-in default, for `config init`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api: ApiConfig {
                base_url: Some(String::from(cinegrid_api::tmdb::DEFAULT_BASE_URL)),
                image_base_url: Some(String::from(cinegrid_api::tmdb::DEFAULT_IMAGE_BASE_URL)),
                image_size: Some(String::from(cinegrid_api::tmdb::DEFAULT_IMAGE_SIZE)),
                api_key: None,
                language: None,
            },
            display: DisplayConfig {
                columns: Some(Columns::DEFAULT),
            },
        }
    }
}
