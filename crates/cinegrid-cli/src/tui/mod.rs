//! TUI module for interactive terminal interfaces.
//!
//! Uses `ratatui` + `crossterm` for rendering.

/// Popular-title grid viewer TUI.
pub mod grid_viewer;

pub use grid_viewer::run_grid_viewer;
