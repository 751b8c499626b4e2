//! Application model types: `App`, `TrackRow` and `Focus`.

use std::collections::VecDeque;

use crate::catalog::Track;
use crate::player::{KeyTarget, PlayerSurface};

/// One line of the track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    /// 1-based position shown in the list.
    pub number: usize,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub active: bool,
}

/// Which widget receives typed characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Filter,
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    pub rows: Vec<TrackRow>,
    pub title: String,
    pub elapsed_label: String,
    pub duration_label: String,
    pub progress: f64,
    pub playing: bool,

    /// Track list row under the cursor (catalog index).
    pub cursor: usize,
    pub focus: Focus,
    pub filter_query: String,

    notifications: VecDeque<String>,
    lower_titles: Vec<String>,
    frame_pending: bool,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self::default();
        app.request_frame();
        app
    }

    /// Ask for a redraw. Returns `false` when one is already pending, so a
    /// burst of updates produces a single frame.
    pub fn request_frame(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Consume the pending redraw, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }

    /// Catalog index of the active row.
    pub fn active_index(&self) -> Option<usize> {
        self.rows.iter().position(|r| r.active)
    }

    pub fn key_target(&self) -> KeyTarget {
        match self.focus {
            Focus::List => KeyTarget::Page,
            Focus::Filter => KeyTarget::TextInput,
        }
    }

    /// The notification currently blocking input, if any.
    pub fn notification(&self) -> Option<&str> {
        self.notifications.front().map(String::as_str)
    }

    pub fn dismiss_notification(&mut self) {
        if self.notifications.pop_front().is_some() {
            self.request_frame();
        }
    }

    /// Catalog indices of the rows currently shown, honoring the filter.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim().to_ascii_lowercase();
        (0..self.rows.len())
            .filter(|&i| {
                query.is_empty()
                    || Self::fuzzy_match_positions_lower(&self.lower_titles[i], &query).is_some()
            })
            .collect()
    }

    /// Fuzzy-match the filter query against row `index`; `None` when it does not match.
    pub fn match_positions(&self, index: usize) -> Option<Vec<usize>> {
        let query = self.filter_query.trim().to_ascii_lowercase();
        Self::fuzzy_match_positions_lower(self.lower_titles.get(index)?, &query)
    }

    /// Fuzzy/subsequence match: return the character positions in `title`
    /// that match `query`, or `None` if not matched.
    pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
        Self::fuzzy_match_positions_lower(&title.to_lowercase(), &query.to_lowercase())
    }

    fn fuzzy_match_positions_lower(title_lower: &str, query_lower: &str) -> Option<Vec<usize>> {
        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title_lower.chars().enumerate();

        for qc in query_lower.chars() {
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc == qc => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    /// Move the cursor to the next visible row, wrapping around.
    pub fn cursor_next(&mut self) {
        self.step_cursor(1);
    }

    /// Move the cursor to the previous visible row, wrapping around.
    pub fn cursor_prev(&mut self) {
        let len = self.display_indices().len();
        if len > 0 {
            self.step_cursor(len - 1);
        }
    }

    /// Move the cursor down by `rows` visible rows, stopping at the last one.
    /// This is what an unhandled space does to the list.
    pub fn page_down(&mut self, rows: usize) {
        let display = self.display_indices();
        let Some(&last) = display.last() else {
            return;
        };
        let pos = display.iter().position(|&i| i == self.cursor).unwrap_or(0);
        self.cursor = display.get(pos + rows.max(1)).copied().unwrap_or(last);
        self.request_frame();
    }

    fn step_cursor(&mut self, by: usize) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        let next = match display.iter().position(|&i| i == self.cursor) {
            Some(p) => display[(p + by) % display.len()],
            None => display[0],
        };
        self.cursor = next;
        self.request_frame();
    }

    /// Give keyboard focus to the filter input.
    pub fn enter_filter_mode(&mut self) {
        self.focus = Focus::Filter;
        self.request_frame();
    }

    /// Return focus to the list, keeping the query.
    pub fn exit_filter_mode(&mut self) {
        self.focus = Focus::List;
        self.request_frame();
    }

    /// Drop the query and return focus to the list.
    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.focus = Focus::List;
        self.ensure_cursor_visible();
        self.request_frame();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_cursor_visible();
        self.request_frame();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_cursor_visible();
        self.request_frame();
    }

    /// Keep the cursor on a visible row; fall back to the first match.
    fn ensure_cursor_visible(&mut self) {
        let display = self.display_indices();
        if let Some(&first) = display.first() {
            if !display.contains(&self.cursor) {
                self.cursor = first;
            }
        }
    }
}

impl PlayerSurface for App {
    fn render_tracklist(&mut self, tracks: &[Track]) {
        self.rows = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| TrackRow {
                number: i + 1,
                title: t.title.clone(),
                artist: t.artist.clone(),
                duration: t.display_duration.clone(),
                active: i == 0,
            })
            .collect();
        self.lower_titles = tracks.iter().map(|t| t.title.to_lowercase()).collect();
        self.cursor = 0;
        self.request_frame();
    }

    fn mark_active(&mut self, index: usize) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.active = i == index;
        }
        // Follow playback unless the user is narrowing the list.
        if self.focus == Focus::List && self.display_indices().contains(&index) {
            self.cursor = index;
        }
        self.request_frame();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.request_frame();
    }

    fn set_duration_label(&mut self, text: &str) {
        self.duration_label = text.to_string();
        self.request_frame();
    }

    fn set_elapsed_label(&mut self, text: &str) {
        if self.elapsed_label != text {
            self.elapsed_label = text.to_string();
            self.request_frame();
        }
    }

    fn set_progress(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        if self.progress != fraction {
            self.progress = fraction;
            self.request_frame();
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        self.request_frame();
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push_back(message.to_string());
        self.request_frame();
    }
}
