//! The playlist player: track selection, the play/pause state machine and
//! the time/progress display derived from the playback engine.
//!
//! `Player` owns the session state. It drives a [`PlaybackEngine`] and keeps
//! a [`PlayerSurface`] up to date; both are traits so the core does not care
//! whether audio comes from rodio or a test double, or whether the surface is
//! a terminal.

mod engine;
mod error;
mod keys;
mod state;
mod surface;
mod time;

pub use engine::{EngineEvent, EngineReport, PlaybackEngine};
pub use error::{PlaybackUnavailable, UnavailableReason};
pub use keys::{KeyResponse, KeyTarget, PlayerKey};
pub use state::{Player, PlayerOptions, PlayerStatus};
pub use surface::PlayerSurface;
pub use time::{format_time, fraction_at, progress_fraction};

#[cfg(test)]
mod tests;
