use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CatalogSettings;

use super::model::{Catalog, CatalogError, CatalogFile};

const BUILTIN_CATALOG: &str = include_str!("../../catalog.toml");

impl Catalog {
    /// Load the catalog named by `settings.path`, or the built-in one when unset.
    pub fn load(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        match &settings.path {
            Some(path) => Self::from_file(path),
            None => Self::parse(BUILTIN_CATALOG, settings.music_dir.clone()),
        }
    }

    /// Read a catalog file; its sources resolve against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&text, base_dir)
    }

    pub fn parse(text: &str, base_dir: PathBuf) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.tracks, base_dir)
    }
}

/// Turn a track's source locator into a filesystem path.
pub fn resolve_source(base_dir: &Path, locator: &str) -> PathBuf {
    let path = Path::new(locator);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
