use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Track};
use crate::config::ControlsSettings;

use super::engine::{EngineEvent, EngineReport, PlaybackEngine};
use super::error::PlaybackUnavailable;
use super::surface::PlayerSurface;
use super::time::{format_time, fraction_at, progress_fraction};

/// Tunables for the transport controls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayerOptions {
    /// Seconds moved by a keyboard seek.
    pub seek_step: f64,
    /// Past this many seconds, `previous` restarts the current track.
    pub restart_threshold: f64,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            seek_step: 10.0,
            restart_threshold: 3.0,
        }
    }
}

impl From<&ControlsSettings> for PlayerOptions {
    fn from(controls: &ControlsSettings) -> Self {
        Self {
            seek_step: controls.seek_seconds as f64,
            restart_threshold: controls.restart_threshold_seconds as f64,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    Idle,
    LoadedPaused,
    LoadedPlaying,
}

/// Playlist player session state.
///
/// `is_playing` follows the engine: it only changes on engine events and on
/// failed play attempts, never because a control was pressed.
pub struct Player<E, S> {
    tracks: Vec<Track>,
    current_index: usize,
    is_playing: bool,
    loaded: bool,
    elapsed: f64,
    total: Option<f64>,
    options: PlayerOptions,
    engine: E,
    surface: S,
}

impl<E: PlaybackEngine, S: PlayerSurface> Player<E, S> {
    /// Render the track list and load the first track, paused.
    pub fn new(catalog: Catalog, engine: E, surface: S, options: PlayerOptions) -> Self {
        let (tracks, _) = catalog.into_parts();
        let mut player = Self {
            tracks,
            current_index: 0,
            is_playing: false,
            loaded: false,
            elapsed: 0.0,
            total: None,
            options,
            engine,
            surface,
        };
        player.surface.render_tracklist(&player.tracks);
        player.select_track(0);
        player
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.current_index]
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn status(&self) -> PlayerStatus {
        match (self.loaded, self.is_playing) {
            (false, _) => PlayerStatus::Idle,
            (true, false) => PlayerStatus::LoadedPaused,
            (true, true) => PlayerStatus::LoadedPlaying,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn total(&self) -> Option<f64> {
        self.total
    }

    pub fn options(&self) -> PlayerOptions {
        self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Load track `index` (taken modulo the track count) without starting it.
    pub fn select_track(&mut self, index: usize) {
        let index = index % self.tracks.len();
        self.current_index = index;
        self.loaded = true;
        self.elapsed = 0.0;
        self.total = None;

        let track = &self.tracks[index];
        debug!(index, title = %track.title, "loading track");
        self.engine.load(&track.source);

        self.surface.set_title(&track.title);
        self.surface.set_duration_label(&track.display_duration);
        self.surface.mark_active(index);
        self.surface.set_progress(0.0);
        self.surface.set_elapsed_label(&format_time(0.0));
    }

    /// Load track `index` and start it right away, as a click on the list does.
    pub fn select_track_and_play(&mut self, index: usize) {
        self.select_track(index);
        self.start_playback();
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.engine.pause();
        } else {
            self.start_playback();
        }
    }

    /// Advance cyclically, keeping the current play/pause state.
    pub fn next(&mut self) {
        let resume = self.is_playing;
        self.move_to(self.current_index + 1, resume);
    }

    /// Restart the current track when it is past the restart threshold,
    /// otherwise step back cyclically keeping the play/pause state.
    pub fn previous(&mut self) {
        if self.engine.current_time() > self.options.restart_threshold {
            debug!(index = self.current_index, "restarting track");
            self.engine.set_current_time(0.0);
            self.refresh_time();
            return;
        }

        let resume = self.is_playing;
        let len = self.tracks.len();
        self.move_to((self.current_index + len - 1) % len, resume);
    }

    /// Jump to `fraction` (clamped to `[0, 1]`) of the track. No-op until the
    /// duration is known.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(total) = self.engine.duration() else {
            return;
        };
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.engine.set_current_time(fraction * total);
        self.refresh_time();
    }

    /// Seek from a click at `x` on a progress control spanning `left..left + width`.
    pub fn seek_at(&mut self, x: f64, left: f64, width: f64) {
        self.seek_fraction(fraction_at(x, left, width));
    }

    /// Move the position by `delta` seconds, clamped to the track. No-op
    /// until the duration is known.
    pub fn seek_by(&mut self, delta: f64) {
        let Some(total) = self.engine.duration() else {
            return;
        };
        let target = (self.engine.current_time() + delta).max(0.0).min(total);
        self.engine.set_current_time(target);
        self.refresh_time();
    }

    /// Apply a report from the engine, dropping it when a later `load`
    /// superseded the source it describes.
    pub fn handle_report(&mut self, report: EngineReport) {
        let current = self.engine.current_load();
        if report.load != current {
            debug!(load = report.load, current, event = ?report.event, "stale engine report");
            return;
        }
        self.handle_event(report.event);
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Started => self.set_playing(true),
            EngineEvent::Paused => self.set_playing(false),
            EngineEvent::Ended => self.on_ended(),
            EngineEvent::TimeUpdate => self.refresh_time(),
            EngineEvent::MetadataLoaded => {
                self.total = self.engine.duration();
                if let Some(total) = self.total {
                    self.surface.set_duration_label(&format_time(total));
                }
                self.refresh_time();
            }
            EngineEvent::Failed(err) => self.report_unavailable(err),
        }
    }

    // A finished track always rolls over into the next one and keeps playing,
    // wrapping from the last track to the first.
    fn on_ended(&mut self) {
        info!(index = self.current_index, "track ended");
        self.move_to(self.current_index + 1, true);
    }

    fn move_to(&mut self, index: usize, resume: bool) {
        self.select_track(index);
        if resume {
            self.start_playback();
        }
    }

    fn start_playback(&mut self) {
        if let Err(err) = self.engine.play() {
            self.report_unavailable(err);
        }
    }

    fn report_unavailable(&mut self, err: PlaybackUnavailable) {
        warn!(error = %err, "playback failed");
        self.set_playing(false);
        let message = format!(
            "Unable to play \"{}\": {}",
            self.tracks[self.current_index].title, err.reason
        );
        self.surface.notify(&message);
    }

    fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        self.surface.set_playing(playing);
    }

    fn refresh_time(&mut self) {
        self.elapsed = self.engine.current_time();
        self.total = self.engine.duration();
        self.surface
            .set_progress(progress_fraction(self.elapsed, self.total));
        self.surface.set_elapsed_label(&format_time(self.elapsed));
    }
}
