//! Grid layout controls: column count and image mode.

use std::fmt;
use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

/// Width of the layout grid in units.
pub const GRID_UNITS: u8 = 12;

/// Allowed column counts. Every entry divides `GRID_UNITS` evenly.
pub const COLUMN_CHOICES: [u8; 5] = [1, 2, 3, 4, 6];

/// Number of cards per grid row.
///
/// Only values from `COLUMN_CHOICES` can be constructed, so the card span
/// `GRID_UNITS / columns` is always a non-zero integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Columns(NonZeroU8);

impl Columns {
    /// Default column count.
    pub const DEFAULT: Self = Self(NonZeroU8::MIN.saturating_add(2));

    /// Returns the column count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Returns how many grid units one card spans (`12 / columns`).
    #[must_use]
    pub fn span(self) -> u8 {
        GRID_UNITS / self.0
    }

    /// Returns the next allowed value, wrapping around after the largest.
    #[must_use]
    pub fn next(self) -> Self {
        let pos = COLUMN_CHOICES
            .iter()
            .position(|&c| c == self.get())
            .unwrap_or(0);
        let next = COLUMN_CHOICES
            .get(pos.saturating_add(1))
            .or_else(|| COLUMN_CHOICES.first())
            .copied()
            .unwrap_or(1);
        Self::try_from(next).unwrap_or(Self::DEFAULT)
    }

    /// Parses a column count from text (CLI flag or environment).
    ///
    /// # Errors
    ///
    /// Returns an error message if the text is not an integer from `COLUMN_CHOICES`.
    pub fn parse(text: &str) -> Result<Self, String> {
        let value: u8 = text
            .trim()
            .parse()
            .map_err(|_| format!("columns must be one of 1, 2, 3, 4, 6 (got {text:?})"))?;
        Self::try_from(value)
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Columns {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if !COLUMN_CHOICES.contains(&value) {
            return Err(format!(
                "columns must be one of 1, 2, 3, 4, 6 (got {value})"
            ));
        }
        NonZeroU8::new(value)
            .map(Self)
            .ok_or_else(|| format!("columns must be one of 1, 2, 3, 4, 6 (got {value})"))
    }
}

impl From<Columns> for u8 {
    fn from(columns: Columns) -> Self {
        columns.get()
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Which image field the cards display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// Wide backdrop image (`backdrop_path`).
    #[default]
    Backdrop,
    /// Portrait poster image (`poster_path`).
    Poster,
}

impl ImageMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Backdrop => Self::Poster,
            Self::Poster => Self::Backdrop,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrop",
            Self::Poster => "poster",
        }
    }

    /// Picks the path for this mode.
    #[must_use]
    pub const fn pick<'a>(
        self,
        backdrop: Option<&'a str>,
        poster: Option<&'a str>,
    ) -> Option<&'a str> {
        match self {
            Self::Backdrop => backdrop,
            Self::Poster => poster,
        }
    }
}
