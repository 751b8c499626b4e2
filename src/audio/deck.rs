//! The source currently loaded on the audio thread.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rodio::{OutputStream, Sink, Source};
use tracing::{debug, warn};

use crate::player::{PlaybackUnavailable, UnavailableReason};

use super::probe::probe_duration;
use super::sink::{open_decoder, sink_at};

pub(super) struct Deck {
    locator: String,
    path: PathBuf,
    generation: u64,
    sink: Option<Sink>,
    load_error: Option<UnavailableReason>,
    duration: Option<Duration>,
    paused: bool,
    // Elapsed time is the time accumulated before the last resume plus the
    // time since `started_at`.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Deck {
    /// Decode `path` into a paused sink. Failures are kept and reported on `play`.
    pub fn open(
        stream: Option<&OutputStream>,
        locator: String,
        path: PathBuf,
        generation: u64,
    ) -> Self {
        let mut duration = probe_duration(&path);

        let (sink, load_error) = match open_decoder(&path) {
            Err(reason) => (None, Some(reason)),
            Ok(decoder) => {
                if duration.is_none() {
                    duration = decoder.total_duration();
                }
                match stream {
                    Some(stream) => (Some(sink_at(stream, decoder, Duration::ZERO)), None),
                    None => (
                        None,
                        Some(UnavailableReason::NoOutput(
                            "default output stream is unavailable".to_string(),
                        )),
                    ),
                }
            }
        };

        match &load_error {
            Some(reason) => warn!(%locator, %reason, "source not playable"),
            None => debug!(%locator, ?duration, "source loaded"),
        }

        Self {
            locator,
            path,
            generation,
            sink,
            load_error,
            duration,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn sink(&self) -> Option<&Sink> {
        self.sink.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        !self.paused && self.sink.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        let elapsed = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        match self.duration {
            Some(d) => elapsed.min(d),
            None => elapsed,
        }
    }

    /// Start the sink. `Ok(true)` when audio actually started.
    pub fn play(&mut self) -> Result<bool, PlaybackUnavailable> {
        if let Some(reason) = &self.load_error {
            return Err(self.unavailable(reason.clone()));
        }
        let Some(sink) = self.sink.as_ref() else {
            return Ok(false);
        };
        if !self.paused {
            return Ok(false);
        }
        sink.play();
        self.paused = false;
        self.started_at = Some(Instant::now());
        Ok(true)
    }

    /// Pause the sink. `true` when audio actually stopped.
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.hold_position();
        true
    }

    /// Rebuild the sink at `to`, keeping the play/pause state.
    pub fn seek(
        &mut self,
        stream: Option<&OutputStream>,
        to: Duration,
    ) -> Result<(), PlaybackUnavailable> {
        let to = self.duration.map_or(to, |d| to.min(d));
        if self.load_error.is_some() {
            return Ok(());
        }
        let Some(stream) = stream else {
            return Ok(());
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.accumulated = to;
        self.started_at = None;

        match open_decoder(&self.path) {
            Ok(decoder) => {
                let sink = sink_at(stream, decoder, to);
                if !self.paused {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(sink);
                Ok(())
            }
            Err(reason) => {
                self.paused = true;
                self.load_error = Some(reason.clone());
                Err(self.unavailable(reason))
            }
        }
    }

    /// The sink ran dry while playing.
    pub fn finished(&self) -> bool {
        self.is_playing() && self.sink.as_ref().is_some_and(Sink::empty)
    }

    /// Freeze the position after the sink finished.
    pub fn mark_finished(&mut self) {
        self.hold_position();
    }

    pub fn stop(self) {
        if let Some(sink) = self.sink {
            sink.stop();
        }
    }

    fn hold_position(&mut self) {
        self.accumulated = self.elapsed();
        self.started_at = None;
        self.paused = true;
    }

    fn unavailable(&self, reason: UnavailableReason) -> PlaybackUnavailable {
        PlaybackUnavailable::new(self.locator.clone(), reason)
    }
}
