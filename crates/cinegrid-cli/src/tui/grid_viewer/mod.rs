//! Popular-title grid viewer TUI main loop.

/// Grid viewer state types.
pub mod state;
mod ui;

use std::future::Future;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use cinegrid_api::tmdb::{LocalTmdbApi, PopularParams};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use self::state::{GridViewerState, InputMode};
use crate::catalog::{Columns, TitleRecord, fetch_popular};

/// Redraw interval while the fetch is in flight.
const FETCH_TICK: Duration = Duration::from_millis(50);
/// Event poll timeout once the fetch has completed.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the grid viewer TUI.
///
/// The popular list is fetched exactly once, when the viewer starts. The
/// grid shows a loading state until the request completes.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails. A failed
/// fetch is logged and leaves the grid empty.
#[allow(clippy::module_name_repetitions, clippy::future_not_send)]
pub async fn run_grid_viewer(
    api: &(impl LocalTmdbApi + Sync),
    params: &PopularParams,
    mut state: GridViewerState,
) -> Result<()> {
    let fetch = fetch_popular(api, state.kind(), params);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut CrosstermEvents, &mut state, fetch).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Source of terminal input for the event loop.
trait EventSource {
    /// Waits up to `timeout` for the next event.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Reads events from the crossterm terminal.
#[derive(Debug)]
struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if !event::poll(timeout).context("failed to poll events")? {
            return Ok(None);
        }
        event::read().context("failed to read event").map(Some)
    }
}

/// Main event loop. Drives `fetch` to completion alongside input handling.
///
/// `fetch` is polled until it resolves and is never restarted, so a view
/// issues exactly one request however long it stays open.
#[allow(clippy::future_not_send)]
async fn run_event_loop<B>(
    terminal: &mut Terminal<B>,
    events: &mut impl EventSource,
    state: &mut GridViewerState,
    fetch: impl Future<Output = Result<Vec<TitleRecord>>>,
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut fetch = std::pin::pin!(fetch);
    let mut fetch_done = false;
    let mut visible_rows: usize = 1;

    loop {
        terminal
            .draw(|frame| {
                visible_rows = ui::draw(frame, state);
            })
            .context("failed to draw TUI")?;

        let timeout = if fetch_done {
            POLL_INTERVAL
        } else {
            tokio::select! {
                result = &mut fetch => {
                    state.apply_fetch(result);
                    fetch_done = true;
                    continue;
                }
                () = tokio::time::sleep(FETCH_TICK) => Duration::ZERO,
            }
        };

        let Some(event) = events.next_event(timeout)? else {
            continue;
        };
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let quit = if state.show_detail {
                    handle_detail_input(state, key.code, key.modifiers)
                } else {
                    match state.input_mode {
                        InputMode::Filter => handle_filter_input(state, key.code, key.modifiers),
                        InputMode::Normal => {
                            handle_normal_input(state, key.code, key.modifiers, visible_rows)
                        }
                    }
                };
                if quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(state, mouse),
            _ => {}
        }
    }
}

/// Handles key input in filter mode. Returns `true` to exit.
///
/// Printable keys are search text, so only Ctrl-C quits here.
fn handle_filter_input(state: &mut GridViewerState, key: KeyCode, modifiers: KeyModifiers) -> bool {
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc => {
            state.set_filter(String::new());
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.filter_pop();
        }
        KeyCode::Char(c) => {
            state.filter_push(c);
        }
        _ => {}
    }
    false
}

/// Handles key input while the detail overlay is open. Returns `true` to exit.
fn handle_detail_input(state: &mut GridViewerState, key: KeyCode, modifiers: KeyModifiers) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => state.close_detail(),
        KeyCode::Char('o') => open_detail_page(state),
        _ => {}
    }
    false
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input(
    state: &mut GridViewerState,
    key: KeyCode,
    modifiers: KeyModifiers,
    page_rows: usize,
) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Left | KeyCode::Char('h') => state.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.move_right(),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::PageUp => state.page_up(page_rows),
        KeyCode::PageDown => state.page_down(page_rows),
        KeyCode::Home | KeyCode::Char('g') => state.select_first(),
        KeyCode::End | KeyCode::Char('G') => state.select_last(),
        KeyCode::Char('/') => state.input_mode = InputMode::Filter,
        KeyCode::Char('c') => state.cycle_columns(),
        KeyCode::Char('i') => state.toggle_image_mode(),
        KeyCode::Char(digit @ ('1' | '2' | '3' | '4' | '6')) => {
            if let Ok(columns) = Columns::parse(&digit.to_string()) {
                state.set_columns(columns);
            }
        }
        KeyCode::Enter => state.open_detail(),
        KeyCode::Char('o') => open_detail_page(state),
        _ => {}
    }
    false
}

/// Handles mouse input. A left click on a card image toggles the image mode.
fn handle_mouse(state: &mut GridViewerState, mouse: MouseEvent) {
    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
        state.click(mouse.column, mouse.row);
    }
}

/// Opens the TMDB page of the selected title in the default browser.
fn open_detail_page(state: &GridViewerState) {
    let Some(url) = state.current_detail_url() else {
        return;
    };
    if let Err(e) = open::that(&url) {
        tracing::warn!(url = %url, "Failed to open browser: {e}");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;
    use cinegrid_api::tmdb::{
        DEFAULT_IMAGE_BASE_URL, ImageUrlBuilder, MediaKind, TmdbPopularMoviesResponse,
        TmdbPopularTvResponse,
    };
    use crossterm::event::KeyEvent;
    use ratatui::backend::TestBackend;
    use url::Url;

    use super::*;
    use crate::catalog::ImageMode;

    /// Popular-movies API that counts requests.
    struct CountingApi {
        calls: AtomicUsize,
    }

    impl LocalTmdbApi for CountingApi {
        async fn popular_movies(
            &self,
            _params: &PopularParams,
        ) -> Result<TmdbPopularMoviesResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let json = include_str!("../../../../../fixtures/tmdb/popular_movies.json");
            Ok(serde_json::from_str(json)?)
        }

        async fn popular_tv(&self, _params: &PopularParams) -> Result<TmdbPopularTvResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            bail!("request failed: tv/popular");
        }
    }

    /// Replays a fixed list of poll results. `None` is an idle poll.
    struct ScriptedEvents(VecDeque<Option<Event>>);

    impl ScriptedEvents {
        fn new(script: impl IntoIterator<Item = Option<Event>>) -> Self {
            Self(script.into_iter().collect())
        }
    }

    impl EventSource for ScriptedEvents {
        fn next_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            self.0.pop_front().context("event script exhausted")
        }
    }

    fn key(code: KeyCode) -> Option<Event> {
        Some(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn loaded_state(count: u64) -> GridViewerState {
        let images = ImageUrlBuilder::new(Url::parse(DEFAULT_IMAGE_BASE_URL).unwrap(), "w500");
        let mut state =
            GridViewerState::new(MediaKind::Movie, images, Columns::DEFAULT, String::new());
        let titles = (1..=count)
            .map(|id| TitleRecord {
                id,
                name: format!("Title {id}"),
                overview: String::new(),
                vote_average: 5.0,
                backdrop_path: None,
                poster_path: None,
                release_date: None,
            })
            .collect();
        state.apply_fetch(Ok(titles));
        state
    }

    fn press(state: &mut GridViewerState, key: KeyCode) -> bool {
        handle_normal_input(state, key, KeyModifiers::NONE, 2)
    }

    fn type_key(state: &mut GridViewerState, key: KeyCode) -> bool {
        handle_filter_input(state, key, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut state = loaded_state(1);

        // Act
        let ctrl_c = handle_normal_input(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL, 2);
        let detail_q = handle_detail_input(&mut state, KeyCode::Char('q'), KeyModifiers::NONE);

        // Assert
        assert!(press(&mut state, KeyCode::Char('q')));
        assert!(ctrl_c);
        assert!(detail_q);
    }

    #[test]
    fn test_ctrl_c_quits_from_filter_mode() {
        // Arrange
        let mut state = loaded_state(3);
        press(&mut state, KeyCode::Char('/'));
        type_key(&mut state, KeyCode::Char('x'));

        // Act
        let quit = handle_filter_input(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL);

        // Assert
        assert!(quit);
        assert_eq!(state.filter, "x");
        assert_eq!(state.input_mode, InputMode::Filter);
    }

    #[test]
    fn test_navigation_keys() {
        // Arrange: 9 cards in rows of 3
        let mut state = loaded_state(9);

        // Act & Assert
        press(&mut state, KeyCode::Char('l'));
        assert_eq!(state.cursor(), 1);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.cursor(), 4);
        press(&mut state, KeyCode::Char('k'));
        assert_eq!(state.cursor(), 1);
        press(&mut state, KeyCode::Left);
        assert_eq!(state.cursor(), 0);
        press(&mut state, KeyCode::PageDown);
        assert_eq!(state.cursor(), 6);
        press(&mut state, KeyCode::Char('g'));
        assert_eq!(state.cursor(), 0);
        press(&mut state, KeyCode::Char('G'));
        assert_eq!(state.cursor(), 8);
    }

    #[test]
    fn test_column_keys() {
        // Arrange
        let mut state = loaded_state(3);

        // Act & Assert
        press(&mut state, KeyCode::Char('6'));
        assert_eq!(state.columns.get(), 6);
        press(&mut state, KeyCode::Char('5'));
        assert_eq!(state.columns.get(), 6);
        press(&mut state, KeyCode::Char('c'));
        assert_eq!(state.columns.get(), 1);
        press(&mut state, KeyCode::Char('2'));
        assert_eq!(state.columns.get(), 2);
    }

    #[test]
    fn test_image_key_toggles() {
        // Arrange
        let mut state = loaded_state(1);

        // Act
        press(&mut state, KeyCode::Char('i'));

        // Assert
        assert_eq!(state.image_mode, ImageMode::Poster);
    }

    #[test]
    fn test_filter_mode_input() {
        // Arrange
        let mut state = loaded_state(12);
        press(&mut state, KeyCode::Char('/'));
        assert_eq!(state.input_mode, InputMode::Filter);

        // Act: 'q' is text while typing, not quit
        let quit = type_key(&mut state, KeyCode::Char('q'));
        type_key(&mut state, KeyCode::Backspace);
        for c in "title 1".chars() {
            type_key(&mut state, KeyCode::Char(c));
        }
        type_key(&mut state, KeyCode::Enter);

        // Assert
        assert!(!quit);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filter, "title 1");
        assert_eq!(state.filtered_titles().len(), 4);

        // Act: Esc clears
        press(&mut state, KeyCode::Char('/'));
        type_key(&mut state, KeyCode::Esc);

        // Assert
        assert!(state.filter.is_empty());
        assert_eq!(state.filtered_titles().len(), 12);
    }

    #[test]
    fn test_detail_open_and_close() {
        // Arrange
        let mut state = loaded_state(2);

        // Act & Assert
        press(&mut state, KeyCode::Enter);
        assert!(state.show_detail);
        assert!(!handle_detail_input(&mut state, KeyCode::Esc, KeyModifiers::NONE));
        assert!(!state.show_detail);
    }

    #[test]
    fn test_mouse_left_click_on_image_only() {
        // Arrange
        let mut state = loaded_state(1);
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        state.set_image_hitboxes(vec![ratatui::layout::Rect::new(1, 9, 30, 1)]);

        // Act & Assert
        handle_mouse(&mut state, click(50, 9));
        assert_eq!(state.image_mode, ImageMode::Backdrop);
        handle_mouse(&mut state, click(5, 9));
        assert_eq!(state.image_mode, ImageMode::Poster);
        handle_mouse(
            &mut state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Right),
                ..click(5, 9)
            },
        );
        assert_eq!(state.image_mode, ImageMode::Poster);
    }

    #[tokio::test]
    async fn test_event_loop_fetches_once_per_view() {
        // Arrange
        let api = CountingApi {
            calls: AtomicUsize::new(0),
        };
        let images = ImageUrlBuilder::new(Url::parse(DEFAULT_IMAGE_BASE_URL).unwrap(), "w500");
        let mut state =
            GridViewerState::new(MediaKind::Movie, images, Columns::DEFAULT, String::new());
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut events = ScriptedEvents::new([
            None,
            None,
            key(KeyCode::Char('/')),
            key(KeyCode::Char('m')),
            key(KeyCode::Char('a')),
            key(KeyCode::Char('t')),
            key(KeyCode::Enter),
            key(KeyCode::Char('c')),
            None,
            key(KeyCode::Char('i')),
            None,
            None,
            key(KeyCode::Char('q')),
        ]);
        let params = PopularParams::new();
        let fetch = fetch_popular(&api, MediaKind::Movie, &params);

        // Act
        run_event_loop(&mut terminal, &mut events, &mut state, fetch)
            .await
            .unwrap();

        // Assert
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert!(!state.is_loading());
        assert_eq!(state.catalog.titles.len(), 2);
        assert_eq!(state.filter, "mat");
        assert_eq!(state.filtered_titles().len(), 1);
        assert_ne!(state.columns, Columns::DEFAULT);
        assert_eq!(state.image_mode, ImageMode::Poster);
        assert!(events.0.is_empty());
    }
}
