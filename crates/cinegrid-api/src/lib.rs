//! API client library for cinegrid.
//!
//! Provides a client for the TMDB API v3 popular-title endpoints.

/// TMDB API client.
pub mod tmdb;
