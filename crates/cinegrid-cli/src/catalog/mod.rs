//! Catalog model shared by the TUI and the listing command.
//!
//! Holds the normalized title record, the search filter, the grid layout
//! controls, and the one-shot popular-list fetcher.

mod fetcher;
mod filter;
mod layout;
mod record;

pub use fetcher::{Catalog, fetch_popular};
pub use filter::{filter_indices, filter_titles};
pub use layout::{Columns, GRID_UNITS, ImageMode};
pub use record::TitleRecord;
