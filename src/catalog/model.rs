use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One playable audio item with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Where the audio lives; relative locators resolve against the catalog's base directory.
    pub source: String,
    /// Duration as printed in the track list, e.g. `"6:37"`.
    #[serde(rename = "duration")]
    pub display_duration: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CatalogFile {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no tracks")]
    Empty,
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// An ordered, non-empty list of tracks plus the directory their sources resolve against.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
    base_dir: PathBuf,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>, base_dir: PathBuf) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { tracks, base_dir })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn into_parts(self) -> (Vec<Track>, PathBuf) {
        (self.tracks, self.base_dir)
    }
}
