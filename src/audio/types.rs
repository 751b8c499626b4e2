//! Commands and shared state exchanged with the audio thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source; playback stops.
    Load {
        locator: String,
        path: PathBuf,
        generation: u64,
    },
    /// Start or resume the loaded source.
    Play,
    /// Pause the loaded source.
    Pause,
    /// Jump to an absolute position in the loaded source.
    Seek(Duration),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the UI thread.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Bumped on every load; the audio thread only publishes for the newest one.
    pub generation: u64,
    /// Elapsed playback time for the current source.
    pub elapsed: Duration,
    /// Media duration, once known.
    pub duration: Option<Duration>,
    /// Whether audio is currently advancing.
    pub playing: bool,
}

impl PlaybackInfo {
    /// Store a snapshot from the audio thread unless a newer load superseded it.
    pub fn publish(
        &mut self,
        generation: u64,
        elapsed: Duration,
        duration: Option<Duration>,
        playing: bool,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.elapsed = elapsed;
        self.duration = duration;
        self.playing = playing;
        true
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
