use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioEngine;
use crate::catalog::Catalog;
use crate::logging;
use crate::player::{Player, PlayerOptions};

mod event_loop;
mod settings;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_warning) = settings::load_settings();

    let _log_guard = match logging::init(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("pyre: logging disabled: {e}");
            None
        }
    };
    if let Some(msg) = settings_warning {
        eprintln!("pyre: {msg}");
        warn!("{msg}");
    }

    let catalog = Catalog::load(&settings.catalog)?;
    info!(
        tracks = catalog.len(),
        base_dir = %catalog.base_dir().display(),
        "catalog loaded"
    );

    let (engine, events) =
        AudioEngine::spawn(catalog.base_dir().to_path_buf(), settings.audio.clone());
    let mut player = Player::new(
        catalog,
        engine,
        App::new(),
        PlayerOptions::from(&settings.controls),
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut player, &events);

    info!(
        status = ?player.status(),
        track = %player.current_track().title,
        elapsed = player.elapsed(),
        "shutting down"
    );
    player
        .engine_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    run_result
}
