use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, Focus};
use crate::audio::AudioEngine;
use crate::config;
use crate::player::{EngineReport, KeyResponse, PlaybackEngine, Player, PlayerKey};
use crate::ui::{self, Regions};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main terminal event loop: applies engine events, redraws when a frame is
/// pending and dispatches input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<AudioEngine, App>,
    events: &Receiver<EngineReport>,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll_interval = Duration::from_millis(settings.ui.frame_interval_ms);

    loop {
        while let Ok(report) = events.try_recv() {
            player.handle_report(report);
        }

        if player.surface_mut().take_frame_request() {
            terminal.draw(|f| ui::draw(f, player.surface(), &settings.ui, &settings.controls))?;
        }

        if !event::poll(poll_interval)? {
            continue;
        }

        let size = terminal.size()?;
        let regions = ui::regions(Rect::new(0, 0, size.width, size.height));

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(key, player, &regions) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, player, &regions),
            Event::Resize(_, _) => {
                player.surface_mut().request_frame();
            }
            _ => {}
        }
    }
}

fn player_key(code: KeyCode) -> Option<PlayerKey> {
    match code {
        KeyCode::Char(' ') => Some(PlayerKey::Space),
        KeyCode::Left => Some(PlayerKey::ArrowLeft),
        KeyCode::Right => Some(PlayerKey::ArrowRight),
        _ => None,
    }
}

fn page_rows(regions: &Regions) -> usize {
    regions.list.height.saturating_sub(2).max(1) as usize
}

pub(super) fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    player: &mut Player<E, App>,
    regions: &Regions,
) -> Flow {
    // A pending notification blocks everything until acknowledged.
    if player.surface().notification().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            player.surface_mut().dismiss_notification();
        }
        return Flow::Continue;
    }

    let target = player.surface().key_target();
    let response = player_key(key.code)
        .map_or(KeyResponse::Ignored, |k| player.handle_key(k, target));
    match response {
        KeyResponse::Handled {
            prevent_default: true,
        } => return Flow::Continue,
        KeyResponse::Handled {
            prevent_default: false,
        } => {
            default_key_action(key.code, player.surface_mut(), regions);
            return Flow::Continue;
        }
        KeyResponse::Ignored => {}
    }

    if player.surface().focus == Focus::Filter {
        handle_filter_key(key.code, player);
        return Flow::Continue;
    }

    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('/') => player.surface_mut().enter_filter_mode(),
        KeyCode::Char('j') | KeyCode::Down => player.surface_mut().cursor_next(),
        KeyCode::Char('k') | KeyCode::Up => player.surface_mut().cursor_prev(),
        KeyCode::Char('n') | KeyCode::Char('l') => player.next(),
        KeyCode::Char('p') | KeyCode::Char('h') => player.previous(),
        KeyCode::Enter => {
            let cursor = player.surface().cursor;
            player.select_track_and_play(cursor);
        }
        KeyCode::Esc => player.surface_mut().clear_filter(),
        code => default_key_action(code, player.surface_mut(), regions),
    }

    Flow::Continue
}

/// What a key does to the list when nothing else claimed it.
fn default_key_action(code: KeyCode, app: &mut App, regions: &Regions) {
    match code {
        KeyCode::Char(' ') | KeyCode::PageDown => app.page_down(page_rows(regions)),
        _ => {}
    }
}

fn handle_filter_key<E: PlaybackEngine>(code: KeyCode, player: &mut Player<E, App>) {
    match code {
        KeyCode::Esc => player.surface_mut().clear_filter(),
        KeyCode::Backspace => player.surface_mut().pop_filter_char(),
        KeyCode::Down => player.surface_mut().cursor_next(),
        KeyCode::Up => player.surface_mut().cursor_prev(),
        KeyCode::Enter => {
            if player.surface().display_indices().is_empty() {
                return;
            }
            player.surface_mut().exit_filter_mode();
            let cursor = player.surface().cursor;
            player.select_track_and_play(cursor);
        }
        KeyCode::Char(c) if !c.is_control() => player.surface_mut().push_filter_char(c),
        _ => {}
    }
}

pub(super) fn handle_mouse_event<E: PlaybackEngine>(
    mouse: MouseEvent,
    player: &mut Player<E, App>,
    regions: &Regions,
) {
    if player.surface().notification().is_some() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((x, left, width)) = ui::progress_hit(regions, mouse.column, mouse.row) {
                debug!(x, left, width, "progress click");
                player.seek_at(x, left, width);
            } else if let Some(index) =
                ui::list_hit(player.surface(), regions, mouse.column, mouse.row)
            {
                debug!(index, "track list click");
                player.select_track_and_play(index);
            }
        }
        MouseEventKind::ScrollDown => player.surface_mut().cursor_next(),
        MouseEventKind::ScrollUp => player.surface_mut().cursor_prev(),
        _ => {}
    }
}
