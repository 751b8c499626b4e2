use std::collections::VecDeque;
use std::path::PathBuf;

use super::*;
use crate::catalog::{Catalog, Track};

#[derive(Default)]
struct FakeEngine {
    loaded: Vec<String>,
    playing: bool,
    time: f64,
    duration: Option<f64>,
    /// Sources whose play attempt fails asynchronously with a `Failed` event.
    broken: Vec<String>,
    /// Fail `play()` synchronously.
    stopped: bool,
    reports: VecDeque<EngineReport>,
}

impl FakeEngine {
    fn current(&self) -> &str {
        self.loaded.last().map(String::as_str).unwrap_or("")
    }

    fn loads(&self) -> u64 {
        self.loaded.len() as u64
    }

    fn emit(&mut self, event: EngineEvent) {
        let load = self.loads();
        self.reports.push_back(EngineReport::new(load, event));
    }

    /// The source ran out: paused, then ended.
    fn drain(&mut self) {
        self.playing = false;
        self.emit(EngineEvent::Paused);
        self.emit(EngineEvent::Ended);
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, locator: &str) {
        if self.playing {
            self.playing = false;
            self.emit(EngineEvent::Paused);
        }
        self.loaded.push(locator.to_string());
        self.time = 0.0;
        self.duration = None;
    }

    fn current_load(&self) -> u64 {
        self.loads()
    }

    fn play(&mut self) -> Result<(), PlaybackUnavailable> {
        if self.stopped {
            return Err(PlaybackUnavailable::new(
                self.current(),
                UnavailableReason::EngineStopped,
            ));
        }
        if self.broken.iter().any(|b| b == self.current()) {
            let err = PlaybackUnavailable::new(self.current(), UnavailableReason::NotFound);
            self.emit(EngineEvent::Failed(err));
            return Ok(());
        }
        if !self.playing {
            self.playing = true;
            self.emit(EngineEvent::Started);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.emit(EngineEvent::Paused);
        }
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    title: String,
    active: bool,
}

#[derive(Default)]
struct FakeSurface {
    rows: Vec<Row>,
    title: String,
    duration_label: String,
    elapsed_label: String,
    progress: f64,
    playing: bool,
    notifications: Vec<String>,
}

impl FakeSurface {
    fn active_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.active)
            .map(|(i, _)| i)
            .collect()
    }
}

impl PlayerSurface for FakeSurface {
    fn render_tracklist(&mut self, tracks: &[Track]) {
        self.rows = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| Row {
                title: t.title.clone(),
                active: i == 0,
            })
            .collect();
    }

    fn mark_active(&mut self, index: usize) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.active = i == index;
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_duration_label(&mut self, text: &str) {
        self.duration_label = text.to_string();
    }

    fn set_elapsed_label(&mut self, text: &str) {
        self.elapsed_label = text.to_string();
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = fraction;
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

type TestPlayer = Player<FakeEngine, FakeSurface>;

fn track(title: &str, duration: &str) -> Track {
    Track {
        title: title.to_string(),
        artist: "Band".to_string(),
        source: format!("music/{}.mp3", title.to_lowercase()),
        display_duration: duration.to_string(),
    }
}

fn player_with(tracks: Vec<Track>) -> TestPlayer {
    let catalog = Catalog::new(tracks, PathBuf::from(".")).unwrap();
    Player::new(
        catalog,
        FakeEngine::default(),
        FakeSurface::default(),
        PlayerOptions::default(),
    )
}

fn four_tracks() -> TestPlayer {
    player_with(vec![
        track("One", "1:00"),
        track("Two", "2:00"),
        track("Three", "3:00"),
        track("Four", "4:00"),
    ])
}

/// Deliver everything the engine has emitted, the way the runtime loop does.
fn pump(player: &mut TestPlayer) {
    while let Some(report) = player.engine_mut().reports.pop_front() {
        player.handle_report(report);
    }
}

fn play(player: &mut TestPlayer) {
    player.toggle_play();
    pump(player);
    assert!(player.is_playing());
}

#[test]
fn new_player_loads_first_track_paused() {
    let p = four_tracks();
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.status(), PlayerStatus::LoadedPaused);
    assert!(!p.is_playing());
    assert_eq!(p.engine().loaded, vec!["music/one.mp3".to_string()]);
    assert_eq!(p.surface().title, "One");
    assert_eq!(p.surface().duration_label, "1:00");
    assert_eq!(p.surface().elapsed_label, "0:00");
    assert_eq!(p.surface().active_rows(), vec![0]);
}

#[test]
fn select_track_marks_exactly_one_active_item() {
    let mut p = four_tracks();
    for i in 0..13 {
        p.select_track(i);
        let expected = i % 4;
        assert_eq!(p.current_index(), expected);
        assert_eq!(p.surface().active_rows(), vec![expected]);
        assert_eq!(p.surface().rows[expected].title, p.current_track().title);
    }
}

#[test]
fn select_track_does_not_autoplay_and_resets_display() {
    let mut p = four_tracks();
    p.engine_mut().duration = Some(60.0);
    p.engine_mut().time = 30.0;
    p.handle_event(EngineEvent::TimeUpdate);
    assert_eq!(p.surface().progress, 0.5);

    p.select_track(2);
    pump(&mut p);
    assert!(!p.is_playing());
    assert_eq!(p.surface().progress, 0.0);
    assert_eq!(p.surface().elapsed_label, "0:00");
    assert_eq!(p.surface().title, "Three");
    assert_eq!(p.surface().duration_label, "3:00");
}

#[test]
fn list_click_selects_and_plays() {
    let mut p = four_tracks();
    p.select_track_and_play(3);
    pump(&mut p);
    assert_eq!(p.current_index(), 3);
    assert_eq!(p.status(), PlayerStatus::LoadedPlaying);
    assert!(p.surface().playing);
}

#[test]
fn toggle_play_follows_engine_events() {
    let mut p = four_tracks();
    p.toggle_play();
    // Nothing changes until the engine confirms.
    assert!(!p.is_playing());
    pump(&mut p);
    assert!(p.is_playing());

    p.toggle_play();
    assert!(p.is_playing());
    pump(&mut p);
    assert!(!p.is_playing());
    assert!(!p.surface().playing);
}

#[test]
fn next_cycles_back_to_start_after_n_steps() {
    for start in 0..4 {
        let mut p = four_tracks();
        p.select_track(start);
        for _ in 0..4 {
            p.next();
        }
        assert_eq!(p.current_index(), start);
    }
}

#[test]
fn next_while_paused_stays_paused() {
    let mut p = four_tracks();
    p.next();
    pump(&mut p);
    assert_eq!(p.current_index(), 1);
    assert!(!p.is_playing());
}

#[test]
fn next_while_playing_resumes_on_new_track() {
    let mut p = player_with(vec![track("A", "0:10"), track("B", "0:05")]);
    play(&mut p);
    p.engine_mut().duration = Some(10.0);
    p.engine_mut().time = 4.0;
    p.handle_event(EngineEvent::TimeUpdate);
    assert!(p.surface().progress > 0.0);

    p.next();
    pump(&mut p);
    assert_eq!(p.current_index(), 1);
    assert!(p.is_playing());
    assert_eq!(p.surface().progress, 0.0);
    assert_eq!(p.surface().active_rows(), vec![1]);
    assert_eq!(p.surface().title, "B");
    assert_eq!(p.engine().current(), "music/b.mp3");
}

#[test]
fn previous_past_threshold_restarts_without_changing_track() {
    let mut p = four_tracks();
    p.select_track(2);
    play(&mut p);
    p.engine_mut().time = 3.5;

    p.previous();
    pump(&mut p);
    assert_eq!(p.current_index(), 2);
    assert_eq!(p.engine().time, 0.0);
    assert_eq!(p.engine().loaded.len(), 2);
    assert!(p.is_playing());
    assert_eq!(p.surface().elapsed_label, "0:00");
}

#[test]
fn previous_within_threshold_steps_back_cyclically() {
    let mut p = four_tracks();
    p.engine_mut().time = 3.0;
    p.previous();
    pump(&mut p);
    assert_eq!(p.current_index(), 3);
    assert!(!p.is_playing());

    play(&mut p);
    p.engine_mut().time = 1.0;
    p.previous();
    pump(&mut p);
    assert_eq!(p.current_index(), 2);
    assert!(p.is_playing());
}

#[test]
fn previous_matches_moving_back_one_index() {
    for start in 0..4 {
        let mut p = four_tracks();
        p.select_track(start);
        p.previous();
        assert_eq!(p.current_index(), (start + 3) % 4);
    }
}

#[test]
fn ended_on_last_track_wraps_and_keeps_playing() {
    let mut p = four_tracks();
    p.select_track(3);
    play(&mut p);

    // The engine reports the pause from running out before `ended`.
    p.engine_mut().playing = false;
    p.handle_event(EngineEvent::Paused);
    p.handle_event(EngineEvent::Ended);
    pump(&mut p);

    assert_eq!(p.current_index(), 0);
    assert!(p.is_playing());
    assert_eq!(p.surface().active_rows(), vec![0]);
}

#[test]
fn queued_end_of_previous_track_does_not_skip_after_next() {
    let mut p = four_tracks();
    play(&mut p);

    // Track 0 ran out but its reports are still queued when the user skips.
    p.engine_mut().drain();
    p.next();
    pump(&mut p);

    assert_eq!(p.current_index(), 1);
    assert!(p.is_playing());
    assert_eq!(p.surface().active_rows(), vec![1]);
}

#[test]
fn queued_end_of_previous_track_does_not_skip_after_list_click() {
    let mut p = four_tracks();
    play(&mut p);

    p.engine_mut().drain();
    p.select_track_and_play(2);
    pump(&mut p);

    assert_eq!(p.current_index(), 2);
    assert!(p.is_playing());
}

#[test]
fn reload_pause_between_quick_skips_keeps_playing() {
    let mut p = four_tracks();
    play(&mut p);

    p.next();
    // Only the stop of track 0 arrives before the second skip.
    let first = p.engine_mut().reports.pop_front().unwrap();
    assert_eq!(first.event, EngineEvent::Paused);
    p.handle_report(first);
    p.next();
    pump(&mut p);

    assert_eq!(p.current_index(), 2);
    assert!(p.is_playing());
    assert_eq!(p.engine().current(), "music/three.mp3");
}

#[test]
fn reports_for_the_current_load_are_applied() {
    let mut p = four_tracks();
    let load = p.engine().current_load();
    p.handle_report(EngineReport::new(load, EngineEvent::Started));
    assert!(p.is_playing());

    p.handle_report(EngineReport::new(load - 1, EngineEvent::Paused));
    assert!(p.is_playing());
}

#[test]
fn metadata_replaces_static_duration_label() {
    let mut p = four_tracks();
    assert_eq!(p.surface().duration_label, "1:00");
    p.engine_mut().duration = Some(62.7);
    p.handle_event(EngineEvent::MetadataLoaded);
    assert_eq!(p.surface().duration_label, "1:02");
    assert_eq!(p.total(), Some(62.7));
}

#[test]
fn time_updates_drive_elapsed_and_progress() {
    let mut p = four_tracks();
    p.engine_mut().duration = Some(200.0);
    p.engine_mut().time = 65.0;
    p.handle_event(EngineEvent::TimeUpdate);
    assert_eq!(p.surface().elapsed_label, "1:05");
    assert!((p.surface().progress - 0.325).abs() < 1e-9);
    assert_eq!(p.elapsed(), 65.0);
}

#[test]
fn seek_clamps_click_position_to_control() {
    let mut p = four_tracks();
    p.engine_mut().duration = Some(120.0);

    p.seek_at(5.0, 10.0, 100.0);
    assert_eq!(p.engine().time, 0.0);

    p.seek_at(250.0, 10.0, 100.0);
    assert_eq!(p.engine().time, 120.0);

    p.seek_at(35.0, 10.0, 100.0);
    assert_eq!(p.engine().time, 30.0);
    assert_eq!(p.surface().elapsed_label, "0:30");
}

#[test]
fn seek_before_metadata_is_ignored() {
    let mut p = four_tracks();
    p.engine_mut().time = 2.0;
    p.seek_fraction(0.5);
    assert_eq!(p.engine().time, 2.0);
}

#[test]
fn play_failure_notifies_and_never_reports_playing() {
    let mut p = four_tracks();
    p.engine_mut().broken.push("music/two.mp3".to_string());

    p.select_track_and_play(1);
    pump(&mut p);
    assert!(!p.is_playing());
    assert!(!p.surface().playing);
    assert_eq!(p.surface().notifications.len(), 1);
    assert!(p.surface().notifications[0].contains("Two"));
    assert!(p.surface().notifications[0].contains("not found"));
}

#[test]
fn synchronous_play_failure_resets_playing_flag() {
    let mut p = four_tracks();
    play(&mut p);
    p.engine_mut().stopped = true;

    p.next();
    assert!(!p.is_playing());
    assert_eq!(p.surface().notifications.len(), 1);
    pump(&mut p);
    assert!(!p.is_playing());
}

#[test]
fn space_toggles_and_prevents_default() {
    let mut p = four_tracks();
    let response = p.handle_key(PlayerKey::Space, KeyTarget::Page);
    assert_eq!(
        response,
        KeyResponse::Handled {
            prevent_default: true
        }
    );
    pump(&mut p);
    assert!(p.is_playing());
}

#[test]
fn keys_in_text_input_are_ignored() {
    let mut p = four_tracks();
    assert_eq!(
        p.handle_key(PlayerKey::Space, KeyTarget::TextInput),
        KeyResponse::Ignored
    );
    pump(&mut p);
    assert!(!p.is_playing());
}

#[test]
fn arrow_keys_seek_by_step_and_clamp() {
    let mut p = four_tracks();
    p.engine_mut().duration = Some(25.0);
    p.engine_mut().time = 4.0;

    p.handle_key(PlayerKey::ArrowRight, KeyTarget::Page);
    assert_eq!(p.engine().time, 14.0);
    p.handle_key(PlayerKey::ArrowRight, KeyTarget::Page);
    assert_eq!(p.engine().time, 24.0);
    p.handle_key(PlayerKey::ArrowRight, KeyTarget::Page);
    assert_eq!(p.engine().time, 25.0);

    p.engine_mut().time = 6.0;
    p.handle_key(PlayerKey::ArrowLeft, KeyTarget::Page);
    assert_eq!(p.engine().time, 0.0);
}

#[test]
fn keyboard_seek_waits_for_duration() {
    let mut p = four_tracks();
    p.engine_mut().time = 5.0;

    p.handle_key(PlayerKey::ArrowRight, KeyTarget::Page);
    assert_eq!(p.engine().time, 5.0);
    p.handle_key(PlayerKey::ArrowLeft, KeyTarget::Page);
    assert_eq!(p.engine().time, 5.0);

    p.engine_mut().duration = Some(12.0);
    p.handle_key(PlayerKey::ArrowRight, KeyTarget::Page);
    assert_eq!(p.engine().time, 12.0);
}

#[test]
fn format_time_handles_edge_values() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(397.9), "6:37");
    assert_eq!(format_time(f64::NAN), "0:00");
    assert_eq!(format_time(-5.0), "0:00");
    assert_eq!(format_time(f64::INFINITY), "0:00");
}

#[test]
fn fraction_helpers_clamp() {
    assert_eq!(fraction_at(-3.0, 0.0, 10.0), 0.0);
    assert_eq!(fraction_at(30.0, 0.0, 10.0), 1.0);
    assert_eq!(fraction_at(5.0, 0.0, 0.0), 0.0);
    assert_eq!(progress_fraction(5.0, None), 0.0);
    assert_eq!(progress_fraction(5.0, Some(0.0)), 0.0);
    assert_eq!(progress_fraction(15.0, Some(10.0)), 1.0);
}
