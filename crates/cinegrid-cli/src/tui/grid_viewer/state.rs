//! Grid viewer TUI state management.

use anyhow::Result;
use cinegrid_api::tmdb::{ImageUrlBuilder, MediaKind, detail_url};
use ratatui::layout::{Position, Rect};

use crate::catalog::{Catalog, Columns, ImageMode, TitleRecord, filter_indices};

/// Input mode for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Filter,
}

/// State for the grid viewer TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct GridViewerState {
    /// Fetched titles and loading flag.
    pub catalog: Catalog,
    /// Image URL builder for card images.
    pub images: ImageUrlBuilder,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search text.
    pub filter: String,
    /// Cards per grid row.
    pub columns: Columns,
    /// Which image field the cards show.
    pub image_mode: ImageMode,
    /// Whether the detail overlay is open.
    pub show_detail: bool,
    /// Selected position within the filtered list.
    cursor: usize,
    /// First grid row on screen.
    scroll_row: usize,
    /// Cached filtered title indices.
    filtered_indices: Vec<usize>,
    /// Screen areas of the image lines drawn in the last frame.
    image_hitboxes: Vec<Rect>,
}

impl GridViewerState {
    /// Creates a new state in the loading phase.
    #[must_use]
    pub fn new(kind: MediaKind, images: ImageUrlBuilder, columns: Columns, filter: String) -> Self {
        let mut state = Self {
            catalog: Catalog::new(kind),
            images,
            input_mode: InputMode::Normal,
            filter,
            columns,
            image_mode: ImageMode::default(),
            show_detail: false,
            cursor: 0,
            scroll_row: 0,
            filtered_indices: Vec::new(),
            image_hitboxes: Vec::new(),
        };
        state.rebuild_filter_cache();
        state
    }

    /// Returns the catalog resource.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.catalog.kind
    }

    /// Returns `true` while the fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.catalog.loading
    }

    /// Applies the fetch result and rebuilds the filtered view.
    pub fn apply_fetch(&mut self, result: Result<Vec<TitleRecord>>) {
        self.catalog.apply_fetch(result);
        self.rebuild_filter_cache();
        self.select_first();
    }

    /// Returns the cursor position within the filtered list.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns filtered title indices.
    #[must_use]
    pub fn filtered_titles(&self) -> &[usize] {
        &self.filtered_indices
    }

    /// Returns the title at a filtered position.
    #[must_use]
    pub fn title_at(&self, pos: usize) -> Option<&TitleRecord> {
        let idx = self.filtered_indices.get(pos)?;
        self.catalog.titles.get(*idx)
    }

    /// Returns the selected title (if any).
    #[must_use]
    pub fn current_title(&self) -> Option<&TitleRecord> {
        self.title_at(self.cursor)
    }

    /// Returns the detail page URL of the selected title.
    #[must_use]
    pub fn current_detail_url(&self) -> Option<String> {
        self.current_title()
            .map(|t| detail_url(self.catalog.kind, t.id))
    }

    /// Returns the image URL a card shows in the current image mode.
    #[must_use]
    pub fn card_image_url(&self, title: &TitleRecord) -> Option<String> {
        let path = self.image_mode.pick(
            title.backdrop_path.as_deref(),
            title.poster_path.as_deref(),
        );
        self.images.url_opt(path)
    }

    /// Cards per row as `usize`.
    fn per_row(&self) -> usize {
        usize::from(self.columns.get())
    }

    /// Moves the selection one card left.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the selection one card right.
    pub fn move_right(&mut self) {
        let last = self.filtered_indices.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(1).min(last);
    }

    /// Moves the selection one row up.
    pub fn move_up(&mut self) {
        if self.cursor >= self.per_row() {
            self.cursor = self.cursor.saturating_sub(self.per_row());
        }
    }

    /// Moves the selection one row down, stopping at the last card.
    pub fn move_down(&mut self) {
        let target = self.cursor.saturating_add(self.per_row());
        let last = self.filtered_indices.len().saturating_sub(1);
        if target < self.filtered_indices.len() {
            self.cursor = target;
        } else if self.row_of(self.cursor) < self.row_of(last) {
            self.cursor = last;
        }
    }

    /// Moves the selection up by `rows` grid rows.
    pub fn page_up(&mut self, rows: usize) {
        let step = rows.max(1).saturating_mul(self.per_row());
        self.cursor = self.cursor.saturating_sub(step);
    }

    /// Moves the selection down by `rows` grid rows.
    pub fn page_down(&mut self, rows: usize) {
        let step = rows.max(1).saturating_mul(self.per_row());
        let last = self.filtered_indices.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(step).min(last);
    }

    /// Selects the first card.
    pub const fn select_first(&mut self) {
        self.cursor = 0;
        self.scroll_row = 0;
    }

    /// Selects the last card.
    pub fn select_last(&mut self) {
        self.cursor = self.filtered_indices.len().saturating_sub(1);
    }

    /// Sets the column count. The selected card stays selected.
    pub const fn set_columns(&mut self, columns: Columns) {
        self.columns = columns;
    }

    /// Switches to the next allowed column count.
    pub fn cycle_columns(&mut self) {
        self.columns = self.columns.next();
    }

    /// Swaps the image field shown on every card.
    pub const fn toggle_image_mode(&mut self) {
        self.image_mode = self.image_mode.toggled();
    }

    /// Opens the detail overlay if a card is selected.
    pub fn open_detail(&mut self) {
        self.show_detail = self.current_title().is_some();
    }

    /// Closes the detail overlay.
    pub const fn close_detail(&mut self) {
        self.show_detail = false;
    }

    /// Updates the filter and rebuilds the cache.
    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.rebuild_filter_cache();
        self.select_first();
    }

    /// Appends a character to the filter.
    pub fn filter_push(&mut self, ch: char) {
        self.filter.push(ch);
        self.rebuild_filter_cache();
        self.select_first();
    }

    /// Removes the last character from the filter.
    pub fn filter_pop(&mut self) {
        self.filter.pop();
        self.rebuild_filter_cache();
        self.select_first();
    }

    /// Adjusts the scroll offset so the selected row is on screen and
    /// returns the range of filtered positions to draw.
    pub fn visible_range(&mut self, visible_rows: usize) -> std::ops::Range<usize> {
        let visible_rows = visible_rows.max(1);
        let cursor_row = self.row_of(self.cursor);
        if cursor_row < self.scroll_row {
            self.scroll_row = cursor_row;
        } else if cursor_row >= self.scroll_row.saturating_add(visible_rows) {
            self.scroll_row = cursor_row.saturating_sub(visible_rows.saturating_sub(1));
        }
        let start = self.scroll_row.saturating_mul(self.per_row());
        let end = start
            .saturating_add(visible_rows.saturating_mul(self.per_row()))
            .min(self.filtered_indices.len());
        start.min(end)..end
    }

    /// Records the image line areas of the cards drawn in the current frame.
    pub fn set_image_hitboxes(&mut self, hitboxes: Vec<Rect>) {
        self.image_hitboxes = hitboxes;
    }

    /// Returns the number of cards drawn in the last frame.
    #[cfg(test)]
    pub fn rendered_card_count(&self) -> usize {
        self.image_hitboxes.len()
    }

    /// Handles a left click. Clicking any card image toggles the image mode.
    ///
    /// Clicks are ignored while the detail overlay covers the grid.
    /// Returns `true` if the click hit an image.
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        if self.show_detail {
            return false;
        }
        let hit = self
            .image_hitboxes
            .iter()
            .any(|area| area.contains(Position::new(column, row)));
        if hit {
            self.toggle_image_mode();
        }
        hit
    }

    /// Grid row of a filtered position.
    #[allow(clippy::arithmetic_side_effects, clippy::integer_division)]
    fn row_of(&self, pos: usize) -> usize {
        pos / self.per_row().max(1)
    }

    /// Rebuilds the filtered title indices cache.
    fn rebuild_filter_cache(&mut self) {
        self.filtered_indices = filter_indices(&self.catalog.titles, &self.filter);
    }
}
