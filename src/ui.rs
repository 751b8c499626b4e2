//! UI rendering helpers for the terminal user interface.
//!
//! This module renders `App` with `ratatui` and maps mouse positions back
//! onto the clickable parts of the layout (progress bar and track list).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus, TrackRow};
use crate::config::{ControlsSettings, UiSettings};

/// Screen areas of the main layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub now_playing: Rect,
    pub progress: Rect,
    pub list: Rect,
    pub footer: Rect,
}

/// Split the terminal area into the main layout.
pub fn regions(area: Rect) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(area);
    Regions {
        header: chunks[0],
        now_playing: chunks[1],
        progress: chunks[2],
        list: chunks[3],
        footer: chunks[4],
    }
}

/// The area inside a one-cell border.
fn inner(r: Rect) -> Rect {
    Rect {
        x: r.x.saturating_add(1),
        y: r.y.saturating_add(1),
        width: r.width.saturating_sub(2),
        height: r.height.saturating_sub(2),
    }
}

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// The slice `start..end` of `total` rows shown in a list `height` rows tall,
/// keeping the cursor centered when possible.
pub fn visible_window(total: usize, height: usize, cursor_pos: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = cursor_pos.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// A click inside the progress bar, as `(x, left, width)` in cells for
/// [`Player::seek_at`](crate::player::Player::seek_at). Clicks on the border
/// still count and clamp to the start or end.
pub fn progress_hit(regions: &Regions, column: u16, row: u16) -> Option<(f64, f64, f64)> {
    if !contains(regions.progress, column, row) {
        return None;
    }
    let bar = inner(regions.progress);
    Some((column as f64 + 0.5, bar.x as f64, bar.width as f64))
}

/// Catalog index of the track list row at `column`/`row`.
pub fn list_hit(app: &App, regions: &Regions, column: u16, row: u16) -> Option<usize> {
    let body = inner(regions.list);
    if !contains(body, column, row) {
        return None;
    }
    let display = app.display_indices();
    let cursor_pos = display.iter().position(|&i| i == app.cursor).unwrap_or(0);
    let (start, end) = visible_window(display.len(), body.height as usize, cursor_pos);
    let pos = start + (row - body.y) as usize;
    (pos < end).then(|| display[pos])
}

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    [
        "[space] play/pause".to_string(),
        "[n/l] next".to_string(),
        "[p/h] previous".to_string(),
        format!("[←/→] seek -/+{seek_seconds}s"),
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[/] filter".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Row text, with filter matches uppercased.
fn row_text(app: &App, index: usize, row: &TrackRow, show_artist: bool) -> String {
    let mut title = row.title.clone();
    if !app.filter_query.trim().is_empty() {
        if let Some(positions) = app.match_positions(index) {
            let mut rendered = String::new();
            let mut pos_iter = positions.into_iter();
            let mut next_pos = pos_iter.next();

            for (ci, ch) in row.title.chars().enumerate() {
                if next_pos == Some(ci) {
                    rendered.extend(ch.to_uppercase());
                    next_pos = pos_iter.next();
                } else {
                    rendered.push(ch);
                }
            }
            title = rendered;
        }
    }

    let marker = if row.active { "♪" } else { " " };
    if show_artist {
        format!(
            "{marker} {:>2}. {} - {}  [{}]",
            row.number, row.artist, title, row.duration
        )
    } else {
        format!("{marker} {:>2}. {}  [{}]", row.number, title, row.duration)
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let regions = regions(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" pyre ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, regions.header);

    // Now playing
    let state = if app.playing { "▶ Playing" } else { "❚❚ Paused" };
    let now_playing = Paragraph::new(vec![
        Line::from(format!("{state}  {}", app.title)),
        Line::from(format!("{} / {}", app.elapsed_label, app.duration_label)),
    ])
    .block(Block::bordered().padding(padded()).title(" now playing "));
    frame.render_widget(now_playing, regions.now_playing);

    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(app.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", app.progress * 100.0));
    frame.render_widget(gauge, regions.progress);

    // Track list
    {
        let display = app.display_indices();
        let body_height = inner(regions.list).height as usize;
        let cursor_pos = display.iter().position(|&i| i == app.cursor);
        let (start, end) = visible_window(display.len(), body_height, cursor_pos.unwrap_or(0));

        let items: Vec<ListItem> = display[start..end]
            .iter()
            .map(|&i| {
                let row = &app.rows[i];
                let item = ListItem::new(row_text(app, i, row, ui_settings.show_artist));
                if row.active {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let title = match (app.focus, app.filter_query.trim().is_empty()) {
            (Focus::Filter, _) => format!(" filter: {}_ ", app.filter_query),
            (Focus::List, false) => format!(" tracks (filter: {}) ", app.filter_query.trim()),
            (Focus::List, true) => " tracks ".to_string(),
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if let Some(pos) = cursor_pos {
            state.select(Some(pos - start));
        }
        frame.render_stateful_widget(list, regions.list, &mut state);
    }

    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(padded()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, regions.footer);

    // Blocking notification on top of everything.
    if let Some(message) = app.notification() {
        let popup_area = centered_rect_sized(64, 7, frame.area());
        frame.render_widget(Clear, popup_area);
        let popup = Paragraph::new(format!("{message}\n\n[enter] OK"))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" playback error "))
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }
}
