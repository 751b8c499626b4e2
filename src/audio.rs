//! Audio subsystem: a rodio-backed [`PlaybackEngine`](crate::player::PlaybackEngine).
//!
//! A dedicated audio thread owns the output stream and the current sink.
//! `AudioEngine` sends it commands, reads the shared `PlaybackInfo` for the
//! position and duration, and hands back a receiver of `EngineEvent`s that
//! the runtime feeds into the player.

mod deck;
mod engine;
mod probe;
mod sink;
mod thread;
mod types;

pub use engine::AudioEngine;
