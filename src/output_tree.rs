//! Output directory lifecycle.
//!
//! ```text
//! optimized/            # output root
//! ├── jpg/              # one flat directory per encoding
//! │   ├── hero.jpg
//! │   └── hero-480w.jpg
//! └── webp/
//!     ├── hero.webp
//!     └── hero-480w.webp
//! ```
//!
//! Variant names derive from source base names, so a renamed or deselected
//! source would leave its old variants behind forever. [`OutputTree::prepare`]
//! therefore empties both encoding directories on every run before anything
//! is generated. Anything else under the output root is left alone.

use crate::imaging::Encoding;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputTreeError {
    #[error("Failed to prepare output directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> OutputTreeError + '_ {
    move |source| OutputTreeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// The destination tree: an output root holding one directory per encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every variant of one encoding.
    pub fn encoding_dir(&self, encoding: Encoding) -> PathBuf {
        self.root.join(encoding.dir_name())
    }

    /// Create the root and every encoding directory. Idempotent.
    pub fn ensure(&self) -> Result<(), OutputTreeError> {
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        for encoding in Encoding::ALL {
            let dir = self.encoding_dir(encoding);
            fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        }
        Ok(())
    }

    /// Remove everything inside the encoding directories.
    pub fn reset(&self) -> Result<(), OutputTreeError> {
        for encoding in Encoding::ALL {
            let dir = self.encoding_dir(encoding);
            clean_directory(&dir).map_err(io_error(&dir))?;
        }
        Ok(())
    }

    /// Ensure the tree exists, then reset it. Runs before every generation.
    pub fn prepare(&self) -> Result<(), OutputTreeError> {
        self.ensure()?;
        self.reset()?;
        tracing::debug!(root = %self.root.display(), "output tree reset");
        Ok(())
    }
}

/// Delete every file and nested directory inside `dir`, keeping `dir` itself.
fn clean_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        return fs::create_dir_all(dir);
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
