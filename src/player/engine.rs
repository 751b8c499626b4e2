use super::error::PlaybackUnavailable;

/// The media engine the player drives.
///
/// Times are in seconds. Lifecycle changes are not reported through return
/// values; the engine emits [`EngineReport`]s which the owner feeds back into
/// [`Player::handle_report`](super::Player::handle_report).
pub trait PlaybackEngine {
    /// Replace the current source. Playback stops and the position resets to 0.
    fn load(&mut self, locator: &str);
    /// Id of the most recent `load`. Reports carrying an older id are stale.
    fn current_load(&self) -> u64;
    /// Request playback. `Err` means the request could not even be issued;
    /// decode failures may still arrive later as [`EngineEvent::Failed`].
    fn play(&mut self) -> Result<(), PlaybackUnavailable>;
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// True media duration, once known.
    fn duration(&self) -> Option<f64>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Audio actually started.
    Started,
    /// Audio actually stopped advancing (pause, reload or end of track).
    Paused,
    /// The current source played to its end.
    Ended,
    /// The playback position moved.
    TimeUpdate,
    /// `duration()` became known for the current source.
    MetadataLoaded,
    /// The current source cannot be played.
    Failed(PlaybackUnavailable),
}

/// An [`EngineEvent`] tagged with the load it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReport {
    pub load: u64,
    pub event: EngineEvent,
}

impl EngineReport {
    pub fn new(load: u64, event: EngineEvent) -> Self {
        Self { load, event }
    }
}
