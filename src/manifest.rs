//! Image manifest loading and normalization.
//!
//! The manifest is the declarative list of source images the website actually
//! references. It is a JSON document with a single `images` array:
//!
//! ```json
//! {
//!   "images": ["hero.jpg", "team.png", "office.jpeg"]
//! }
//! ```
//!
//! Entries are bare file names relative to the source directory. Other keys in
//! the document are ignored.
//!
//! ## Missing Is Fatal
//!
//! An absent manifest is an error, never an empty selection. An explicit
//! `{"images": []}` is the way to select nothing.
//!
//! ## Normalization
//!
//! [`normalize_image_list`] trims every entry, drops empty ones, drops entries
//! without a supported image extension, removes duplicates and sorts the
//! result. The normalized list is the canonical manifest everything
//! downstream consumes.

use crate::inventory::is_supported_image;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Missing manifest file: {0}")]
    Missing(PathBuf),
    #[error("{path} must contain an `images` array of file names: {message}")]
    Format { path: PathBuf, message: String },
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A manifest document as written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Raw entries, in document order, before normalization.
    pub images: Vec<String>,
}

impl Manifest {
    /// The canonical, normalized list of referenced images.
    pub fn normalized(&self) -> Vec<String> {
        normalize_image_list(&self.images)
    }
}

/// Load and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ManifestError::Missing(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ManifestError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    parse_manifest(&content).map_err(|e| ManifestError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse manifest JSON from a string.
pub fn parse_manifest(content: &str) -> Result<Manifest, serde_json::Error> {
    serde_json::from_str(content)
}

/// Trim, filter to supported extensions, de-duplicate and sort.
pub fn normalize_image_list<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .filter(|name| is_supported_image(name))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
