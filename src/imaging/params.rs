//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which variants to write) and the [`backend`](super::backend)
//! (which does the actual pixel work). Swapping the backend for a recording
//! mock leaves the operation logic untouched.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`Encoding`]: Target encoding of a variant (JPEG or WebP).
//! - [`TranscodeParams`]: Full specification for one transcode: source,
//!   output path, exact output dimensions, encoding, quality.

use serde::Serialize;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Target encoding of a generated variant.
///
/// Each encoding owns one flat directory under the output root, named after
/// its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Jpeg,
    WebP,
}

impl Encoding {
    /// Every encoding the pipeline writes, in output-directory order.
    pub const ALL: [Encoding; 2] = [Encoding::Jpeg, Encoding::WebP];

    /// File extension of written variants (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Jpeg => "jpg",
            Encoding::WebP => "webp",
        }
    }

    /// Name of the encoding's subdirectory under the output root.
    pub fn dir_name(self) -> &'static str {
        self.extension()
    }

    /// MIME type used in `<source type=...>`.
    pub fn mime_type(self) -> &'static str {
        match self {
            Encoding::Jpeg => "image/jpeg",
            Encoding::WebP => "image/webp",
        }
    }
}

/// Parameters for a single decode → orient → resize → encode operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Exact output dimensions, already clamped to the upright source size.
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
    pub quality: Quality,
}
