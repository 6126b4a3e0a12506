//! Effective settings resolved from CLI flags, environment, and `config.toml`.

use anyhow::{Context, Result};
use cinegrid_api::tmdb::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_SIZE, ImageUrlBuilder, PopularParams,
    TmdbClient, normalize_base_url,
};
use url::Url;

use super::config::AppConfig;
use crate::catalog::Columns;

/// Environment variable holding the TMDB API key.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "CINEGRID_API_URL";
/// Environment variable overriding the default column count.
pub const ENV_COLUMNS: &str = "CINEGRID_COLUMNS";

/// Trailing API key characters left readable by `masked_api_key`.
const VISIBLE_KEY_CHARS: usize = 4;
/// Keys up to this length are masked completely.
const FULLY_MASKED_KEY_LEN: usize = 8;

/// Values given on the command line. They win over every other source.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    /// `--columns`.
    pub columns: Option<Columns>,
}

/// Effective settings.
///
/// Precedence per field: CLI flag > environment > config file > default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// API base URL (ends with `/`).
    pub base_url: Url,
    /// Image URL builder.
    pub images: ImageUrlBuilder,
    /// API key, if configured anywhere.
    pub api_key: Option<String>,
    /// Response language.
    pub language: Option<String>,
    /// Initial column count.
    pub columns: Columns,
}

impl Settings {
    /// Resolves settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Settings::resolve`].
    pub fn from_env(config: &AppConfig, overrides: Overrides) -> Result<Self> {
        Self::resolve(config, |key| std::env::var(key).ok(), overrides)
    }

    /// Resolves settings using `env` to look up environment variables.
    ///
    /// Empty or whitespace-only environment values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL cannot be parsed or `CINEGRID_COLUMNS`
    /// is not one of the allowed column counts.
    pub fn resolve(
        config: &AppConfig,
        env: impl Fn(&str) -> Option<String>,
        overrides: Overrides,
    ) -> Result<Self> {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let base_url_text = lookup(ENV_API_URL)
            .or_else(|| config.api.base_url.clone())
            .unwrap_or_else(|| String::from(DEFAULT_BASE_URL));
        let base_url = Url::parse(&base_url_text)
            .with_context(|| format!("invalid API base URL: {base_url_text}"))?;

        let image_base_text = config
            .api
            .image_base_url
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_IMAGE_BASE_URL));
        let image_base_url = Url::parse(&image_base_text)
            .with_context(|| format!("invalid image base URL: {image_base_text}"))?;
        let image_size = config
            .api
            .image_size
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_IMAGE_SIZE));

        let env_columns = lookup(ENV_COLUMNS)
            .map(|text| Columns::parse(&text))
            .transpose()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid {ENV_COLUMNS}"))?;
        let columns = overrides
            .columns
            .or(env_columns)
            .or(config.display.columns)
            .unwrap_or_default();

        let api_key = lookup(ENV_API_KEY).or_else(|| {
            config
                .api
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
        });

        Ok(Self {
            base_url: normalize_base_url(base_url),
            images: ImageUrlBuilder::new(image_base_url, image_size),
            api_key,
            language: config.api.language.clone(),
            columns,
        })
    }

    /// Returns the API key or an error explaining how to set it.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().with_context(|| {
            format!("TMDB API key is required: set {ENV_API_KEY} or api.api_key in config.toml")
        })
    }

    /// Returns the API key with all but the last four characters masked.
    ///
    /// Keys of eight characters or fewer are masked completely.
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        self.api_key.as_deref().map_or_else(
            || String::from("(not set)"),
            |key| {
                let count = key.chars().count();
                if count <= FULLY_MASKED_KEY_LEN {
                    return "*".repeat(count);
                }
                let hidden = count.saturating_sub(VISIBLE_KEY_CHARS);
                let visible: String = key.chars().skip(hidden).collect();
                format!("{}{visible}", "*".repeat(hidden))
            },
        )
    }

    /// Query parameters for the popular endpoints.
    #[must_use]
    pub fn popular_params(&self) -> PopularParams {
        self.language
            .as_ref()
            .map_or_else(PopularParams::new, |language| {
                PopularParams::new().language(language.clone())
            })
    }

    /// Builds a `TmdbClient` from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the client fails to build.
    pub fn build_client(&self) -> Result<TmdbClient> {
        let api_key = self.require_api_key()?;
        TmdbClient::builder()
            .base_url(self.base_url.clone())
            .api_key(api_key)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .context("failed to build TMDB client")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;
    use crate::config::config::{ApiConfig, DisplayConfig};

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn file_config() -> AppConfig {
        AppConfig {
            api: ApiConfig {
                base_url: Some(String::from("http://config.example/3")),
                api_key: Some(String::from("config-key")),
                language: Some(String::from("en-US")),
                ..ApiConfig::default()
            },
            display: DisplayConfig {
                columns: Some(Columns::try_from(2).unwrap()),
            },
        }
    }

    #[test]
    fn test_defaults_without_any_source() {
        // Arrange & Act
        let settings =
            Settings::resolve(&AppConfig::default(), env_of(&[]), Overrides::default()).unwrap();

        // Assert
        assert_eq!(settings.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(settings.columns, Columns::DEFAULT);
        assert!(settings.api_key.is_none());
        assert!(settings.language.is_none());
        assert_eq!(
            settings.images.url("/x.jpg"),
            "https://image.tmdb.org/t/p/w500/x.jpg"
        );
    }

    #[test]
    fn test_config_file_values_are_used() {
        // Arrange & Act
        let settings =
            Settings::resolve(&file_config(), env_of(&[]), Overrides::default()).unwrap();

        // Assert
        assert_eq!(settings.base_url.as_str(), "http://config.example/3/");
        assert_eq!(settings.api_key.as_deref(), Some("config-key"));
        assert_eq!(settings.columns.get(), 2);
        assert_eq!(settings.popular_params().language.as_deref(), Some("en-US"));
    }

    #[test]
    fn test_env_overrides_config() {
        // Arrange
        let env = env_of(&[
            (ENV_API_KEY, "env-key"),
            (ENV_API_URL, "http://env.example/3/"),
            (ENV_COLUMNS, "6"),
        ]);

        // Act
        let settings = Settings::resolve(&file_config(), env, Overrides::default()).unwrap();

        // Assert
        assert_eq!(settings.api_key.as_deref(), Some("env-key"));
        assert_eq!(settings.base_url.as_str(), "http://env.example/3/");
        assert_eq!(settings.columns.get(), 6);
    }

    #[test]
    fn test_cli_overrides_env() {
        // Arrange
        let env = env_of(&[(ENV_COLUMNS, "6")]);
        let overrides = Overrides {
            columns: Some(Columns::try_from(1).unwrap()),
        };

        // Act
        let settings = Settings::resolve(&file_config(), env, overrides).unwrap();

        // Assert
        assert_eq!(settings.columns.get(), 1);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        // Arrange
        let env = env_of(&[(ENV_API_KEY, "  "), (ENV_COLUMNS, "")]);

        // Act
        let settings = Settings::resolve(&file_config(), env, Overrides::default()).unwrap();

        // Assert
        assert_eq!(settings.api_key.as_deref(), Some("config-key"));
        assert_eq!(settings.columns.get(), 2);
    }

    #[test]
    fn test_invalid_env_columns_is_rejected() {
        // Arrange
        let env = env_of(&[(ENV_COLUMNS, "5")]);

        // Act
        let result = Settings::resolve(&AppConfig::default(), env, Overrides::default());

        // Assert
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains(ENV_COLUMNS));
        assert!(err.contains("columns must be one of"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        // Arrange
        let env = env_of(&[(ENV_API_URL, "not a url")]);

        // Act
        let result = Settings::resolve(&AppConfig::default(), env, Overrides::default());

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("invalid API base URL")
        );
    }

    #[test]
    fn test_require_api_key_missing() {
        // Arrange
        let settings =
            Settings::resolve(&AppConfig::default(), env_of(&[]), Overrides::default()).unwrap();

        // Act
        let result = settings.require_api_key();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("TMDB API key is required")
        );
        assert!(settings.build_client().is_err());
    }

    #[test]
    fn test_masked_api_key() {
        // Arrange
        let mut settings =
            Settings::resolve(&AppConfig::default(), env_of(&[]), Overrides::default()).unwrap();

        // Act & Assert
        assert_eq!(settings.masked_api_key(), "(not set)");
        settings.api_key = Some(String::from("abcdef123456"));
        assert_eq!(settings.masked_api_key(), "********3456");
        settings.api_key = Some(String::from("abcdefghi"));
        assert_eq!(settings.masked_api_key(), "*****fghi");
        settings.api_key = Some(String::from("abcdefgh"));
        assert_eq!(settings.masked_api_key(), "********");
        settings.api_key = Some(String::from("abcd"));
        assert_eq!(settings.masked_api_key(), "****");
        settings.api_key = Some(String::from("abc"));
        assert_eq!(settings.masked_api_key(), "***");
    }

    #[test]
    fn test_build_client_uses_base_url() {
        // Arrange
        let settings =
            Settings::resolve(&file_config(), env_of(&[]), Overrides::default()).unwrap();

        // Act
        let client = settings.build_client().unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), "http://config.example/3/");
    }
}
