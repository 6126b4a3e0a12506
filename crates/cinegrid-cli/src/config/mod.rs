//! Application configuration module.
//!
//! Manages the TOML config file and resolves the effective settings
//! (API endpoint, API key, default column count) from CLI flags,
//! environment variables, and the file.

#[allow(clippy::module_inception)]
mod config;
mod paths;
mod settings;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::{resolve_config_path, resolve_log_path};
pub use settings::{Overrides, Settings};
