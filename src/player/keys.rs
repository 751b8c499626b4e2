use tracing::debug;

use super::engine::PlaybackEngine;
use super::state::Player;
use super::surface::PlayerSurface;

/// Keys the player reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerKey {
    Space,
    ArrowLeft,
    ArrowRight,
}

/// Where keyboard focus is when the key arrives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyTarget {
    Page,
    TextInput,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyResponse {
    /// Not for the player; the host handles the key as usual.
    Ignored,
    /// The player acted. With `prevent_default` the host must skip its own
    /// default action for the key.
    Handled { prevent_default: bool },
}

impl<E: PlaybackEngine, S: PlayerSurface> Player<E, S> {
    /// Keyboard transport: space toggles play/pause, the arrows seek by the
    /// configured step. Keys typed into a text input are left alone.
    pub fn handle_key(&mut self, key: PlayerKey, target: KeyTarget) -> KeyResponse {
        if target == KeyTarget::TextInput {
            return KeyResponse::Ignored;
        }

        debug!(?key, "player key");
        match key {
            PlayerKey::Space => {
                self.toggle_play();
                KeyResponse::Handled {
                    prevent_default: true,
                }
            }
            PlayerKey::ArrowRight => {
                self.seek_by(self.options().seek_step);
                KeyResponse::Handled {
                    prevent_default: false,
                }
            }
            PlayerKey::ArrowLeft => {
                self.seek_by(-self.options().seek_step);
                KeyResponse::Handled {
                    prevent_default: false,
                }
            }
        }
    }
}
