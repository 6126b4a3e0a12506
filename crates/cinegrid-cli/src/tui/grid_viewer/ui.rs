//! TUI rendering logic for the grid viewer.

use cinegrid_api::tmdb::MediaKind;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{GridViewerState, InputMode};
use crate::catalog::{GRID_UNITS, TitleRecord};

/// Height of one card row in terminal lines.
pub const CARD_HEIGHT: u16 = 8;

/// Search box placeholder for each catalog.
const fn search_placeholder(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "Search for a Movie",
        MediaKind::Tv => "Search for TV Serie",
    }
}

/// Draws the grid viewer UI. Returns the number of card rows that fit on screen.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
pub fn draw(frame: &mut Frame, state: &mut GridViewerState) -> usize {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    let main_area = chunks[1];
    let visible_rows = usize::from((main_area.height / CARD_HEIGHT).max(1));

    if state.is_loading() {
        state.set_image_hitboxes(Vec::new());
        draw_message(frame, main_area, state, "Loading...");
    } else if state.filtered_titles().is_empty() {
        state.set_image_hitboxes(Vec::new());
        let message = if state.catalog.titles.is_empty() {
            "No titles"
        } else {
            "No titles match the search"
        };
        draw_message(frame, main_area, state, message);
    } else {
        draw_grid(frame, main_area, state, visible_rows);
    }

    draw_footer(frame, chunks[2], state);

    if state.show_detail {
        let area = frame.area();
        draw_detail(frame, area, state);
    }

    visible_rows
}

/// Draws the header with the search box and title counts.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &GridViewerState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let filter_style = if state.input_mode == InputMode::Filter {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let filter_line = if state.filter.is_empty() && state.input_mode == InputMode::Normal {
        Line::from(Span::styled(
            search_placeholder(state.kind()),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(state.filter.clone())
    };

    let filter = Paragraph::new(filter_line)
        .style(filter_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(filter, header_chunks[0]);

    let stats = format!(
        "{} titles (filtered: {})  cols: {}  img: {}",
        state.catalog.titles.len(),
        state.filtered_titles().len(),
        state.columns,
        state.image_mode.label(),
    );
    let heading = format!(" {} ", state.kind().heading());
    let count =
        Paragraph::new(stats).block(Block::default().borders(Borders::ALL).title(heading));
    frame.render_widget(count, header_chunks[1]);
}

/// Draws a centered status message in the main area.
fn draw_message(frame: &mut Frame, area: Rect, state: &GridViewerState, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.kind().heading()));
    let paragraph = Paragraph::new(message).centered().block(block);
    frame.render_widget(paragraph, area);
}

/// Draws the card grid and records the image line of every card for click handling.
fn draw_grid(frame: &mut Frame, area: Rect, state: &mut GridViewerState, visible_rows: usize) {
    let range = state.visible_range(visible_rows);
    let per_row = usize::from(state.columns.get());
    let span = u32::from(state.columns.span());
    let constraints = vec![Constraint::Ratio(span, u32::from(GRID_UNITS)); per_row];

    let mut hitboxes = Vec::new();
    let positions: Vec<usize> = range.collect();
    for (row_offset, row_positions) in (0_u16..).zip(positions.chunks(per_row)) {
        let y = area
            .y
            .saturating_add(row_offset.saturating_mul(CARD_HEIGHT));
        if y.saturating_add(CARD_HEIGHT) > area.bottom() {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints.clone())
            .split(row_area);

        for (&pos, &cell) in row_positions.iter().zip(cells.iter()) {
            let Some(title) = state.title_at(pos) else {
                continue;
            };
            let selected = pos == state.cursor();
            hitboxes.push(draw_card(frame, cell, state, title, selected));
        }
    }
    state.set_image_hitboxes(hitboxes);
}

/// Draws one card. Returns the area of its image line.
#[allow(clippy::indexing_slicing)]
fn draw_card(
    frame: &mut Frame,
    area: Rect,
    state: &GridViewerState,
    title: &TitleRecord,
    selected: bool,
) -> Rect {
    let border_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title.name))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // release date
            Constraint::Length(1), // rating
            Constraint::Min(1),    // overview
            Constraint::Length(1), // image
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(title.release_label()).style(Style::default().fg(Color::Gray)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(title.rating_bar()).style(Style::default().fg(Color::Yellow)),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(title.overview_excerpt()).wrap(Wrap { trim: true }),
        rows[2],
    );

    let image = state.card_image_url(title).map_or_else(
        || Line::from(Span::styled("(no image)", Style::default().fg(Color::DarkGray))),
        |url| {
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", state.image_mode.label()),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(url),
            ])
        },
    );
    frame.render_widget(Paragraph::new(image), rows[3]);

    rows[3]
}

/// Draws the detail overlay for the selected title.
#[allow(clippy::indexing_slicing)]
fn draw_detail(frame: &mut Frame, area: Rect, state: &GridViewerState) {
    let Some(title) = state.current_title() else {
        return;
    };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(area);
    let popup = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(vertical[1])[1];

    let label = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let image_line = |name: &'static str, path: Option<&str>| {
        Line::from(vec![
            Span::styled(name, label),
            Span::raw(
                state
                    .images
                    .url_opt(path)
                    .unwrap_or_else(|| String::from("(no image)")),
            ),
        ])
    };

    let overview = if title.overview.is_empty() {
        String::from("(no overview)")
    } else {
        title.overview.clone()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Released: ", label),
            Span::raw(title.release_label()),
        ]),
        Line::from(vec![
            Span::styled("Rating:   ", label),
            Span::raw(title.rating_bar()),
        ]),
        Line::from(""),
        Line::from(overview),
        Line::from(""),
        image_line("Backdrop: ", title.backdrop_path.as_deref()),
        image_line("Poster:   ", title.poster_path.as_deref()),
        Line::from(vec![
            Span::styled("Page:     ", label),
            Span::raw(state.current_detail_url().unwrap_or_default()),
        ]),
    ];

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} (ID:{}) ", title.name, title.id))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(detail, popup);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &GridViewerState) {
    let help_text = match (state.input_mode, state.show_detail) {
        (InputMode::Filter, _) => Line::from("Type to search | Esc: clear | Enter: apply"),
        (InputMode::Normal, true) => Line::from("Esc/Enter: close  o: open in browser  q: quit"),
        (InputMode::Normal, false) => Line::from(vec![Span::raw(
            "\u{2190}\u{2191}\u{2192}\u{2193}/hjkl: move  PgUp/PgDn: page  /: search  1-4,6/c: columns  i/click: image  Enter: detail  o: open  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
