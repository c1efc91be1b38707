//! Source inventory: the image files actually present on disk.
//!
//! Only regular files directly inside the source directory count. Nested
//! directories (including the output tree, which usually lives inside the
//! source directory) and symlinks are never part of the inventory.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Source extensions the pipeline decodes, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed to read source directory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Whether a file name carries a supported image extension (case-insensitive).
pub fn is_supported_image(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// List supported source images directly inside `source_dir`, sorted by name.
pub fn list_source_images(source_dir: &Path) -> Result<Vec<String>, InventoryError> {
    let mut images = Vec::new();

    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| InventoryError::Read {
            path: source_dir.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if is_supported_image(name) {
            images.push(name.to_string());
        }
    }

    images.sort();
    Ok(images)
}
