use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::catalog::resolve_source;
use crate::config::AudioSettings;
use crate::player::{EngineReport, PlaybackEngine, PlaybackUnavailable, UnavailableReason};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// Handle to the audio thread.
pub struct AudioEngine {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    base_dir: PathBuf,
    locator: String,
    generation: u64,
    join: Option<JoinHandle<()>>,
}

impl AudioEngine {
    /// Start the audio thread. Sources resolve against `base_dir`; lifecycle
    /// reports arrive on the returned receiver.
    pub fn spawn(
        base_dir: PathBuf,
        audio_settings: AudioSettings,
    ) -> (Self, Receiver<EngineReport>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineReport>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_audio_thread(rx, event_tx, playback.clone(), audio_settings);

        let engine = Self {
            tx,
            playback,
            base_dir,
            locator: String::new(),
            generation: 0,
            join: Some(join),
        };
        (engine, event_rx)
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), PlaybackUnavailable> {
        self.tx.send(cmd).map_err(|_| {
            PlaybackUnavailable::new(self.locator.clone(), UnavailableReason::EngineStopped)
        })
    }
}

impl PlaybackEngine for AudioEngine {
    fn load(&mut self, locator: &str) {
        self.locator = locator.to_string();
        self.generation += 1;

        if let Ok(mut info) = self.playback.lock() {
            info.generation = self.generation;
            info.elapsed = Duration::ZERO;
            info.duration = None;
            info.playing = false;
        }

        let cmd = AudioCmd::Load {
            locator: self.locator.clone(),
            path: resolve_source(&self.base_dir, locator),
            generation: self.generation,
        };
        if let Err(err) = self.send(cmd) {
            warn!(error = %err, "load dropped");
        }
    }

    fn current_load(&self) -> u64 {
        self.generation
    }

    fn play(&mut self) -> Result<(), PlaybackUnavailable> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        if let Err(err) = self.send(AudioCmd::Pause) {
            warn!(error = %err, "pause dropped");
        }
    }

    fn current_time(&self) -> f64 {
        self.playback
            .lock()
            .map(|info| info.elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let mut target = Duration::from_secs_f64(seconds.max(0.0));
        if let Ok(mut info) = self.playback.lock() {
            if let Some(d) = info.duration {
                target = target.min(d);
            }
            info.elapsed = target;
        }
        if let Err(err) = self.send(AudioCmd::Seek(target)) {
            warn!(error = %err, "seek dropped");
        }
    }

    fn duration(&self) -> Option<f64> {
        self.playback
            .lock()
            .ok()
            .and_then(|info| info.duration)
            .map(|d| d.as_secs_f64())
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.quit_softly(Duration::ZERO);
        }
    }
}
