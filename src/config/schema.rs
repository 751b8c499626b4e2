use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/pyre/config.toml` or `~/.config/pyre/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PYRE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the audio thread publishes elapsed time while playing (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing the left/right arrows.
    pub seek_seconds: u64,
    /// Past this many seconds into a track, "previous" restarts it instead of going back.
    pub restart_threshold_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 10,
            restart_threshold_seconds: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Input poll interval, which also caps how often a frame is drawn (milliseconds).
    pub frame_interval_ms: u64,
    /// Whether track rows show the artist next to the title.
    pub show_artist: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " AS ROME BURNS ".to_string(),
            frame_interval_ms: 50,
            show_artist: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Optional catalog file replacing the built-in track list.
    pub path: Option<PathBuf>,
    /// Directory the built-in catalog's sources resolve against.
    pub music_dir: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: None,
            music_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set, e.g. `"info"` or `"pyre=debug"`.
    pub level: String,
    /// Directory for `pyre.log`; defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
