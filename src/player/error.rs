use thiserror::Error;

/// A track could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{locator}: {reason}")]
pub struct PlaybackUnavailable {
    pub locator: String,
    pub reason: UnavailableReason,
}

impl PlaybackUnavailable {
    pub fn new(locator: impl Into<String>, reason: UnavailableReason) -> Self {
        Self {
            locator: locator.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnavailableReason {
    #[error("audio file not found")]
    NotFound,
    #[error("unsupported or undecodable audio ({0})")]
    Undecodable(String),
    #[error("could not read audio ({0})")]
    Io(String),
    #[error("no audio output device ({0})")]
    NoOutput(String),
    #[error("audio engine is not running")]
    EngineStopped,
}
