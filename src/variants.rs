//! The fixed variant matrix.
//!
//! Every selected source image is written as the cross product of
//! {full size, 480px, 768px, 1200px} × {JPEG, WebP}. The matrix is policy,
//! not input: it lives in the static [`VARIANTS`] table, and adding a width or
//! an encoding is a one-row change there.
//!
//! ## Output Names
//!
//! ```text
//! hero.png  →  jpg/hero.jpg          webp/hero.webp
//!              jpg/hero-480w.jpg     webp/hero-480w.webp
//!              jpg/hero-768w.jpg     webp/hero-768w.webp
//!              jpg/hero-1200w.jpg    webp/hero-1200w.webp
//! ```
//!
//! ## Quality Policy
//!
//! Full-size variants are encoded at slightly higher fidelity than the
//! responsive ones:
//!
//! | Variant    | JPEG | WebP |
//! |------------|------|------|
//! | full size  | 80   | 82   |
//! | responsive | 78   | 80   |

use crate::imaging::{Encoding, Quality};
use std::fmt;

/// Widths of the responsive variants, ascending.
pub const RESPONSIVE_WIDTHS: [u32; 3] = [480, 768, 1200];

/// Encoding used for the `<img>` fallback in picture markup.
pub const FALLBACK_ENCODING: Encoding = Encoding::Jpeg;

/// Which width a variant targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantWidth {
    /// Native resolution, only re-encoded.
    Full,
    /// Resized down to this width; never enlarged.
    Responsive(u32),
}

impl VariantWidth {
    /// The resize target, or `None` for full size.
    pub fn target(self) -> Option<u32> {
        match self {
            VariantWidth::Full => None,
            VariantWidth::Responsive(w) => Some(w),
        }
    }
}

/// One row of the variant matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    pub width: VariantWidth,
    pub encoding: Encoding,
    pub quality: Quality,
}

const fn full(encoding: Encoding, quality: u8) -> VariantSpec {
    VariantSpec {
        width: VariantWidth::Full,
        encoding,
        quality: Quality(quality),
    }
}

const fn responsive(width: u32, encoding: Encoding, quality: u8) -> VariantSpec {
    VariantSpec {
        width: VariantWidth::Responsive(width),
        encoding,
        quality: Quality(quality),
    }
}

/// The complete variant matrix, in generation order.
pub const VARIANTS: &[VariantSpec] = &[
    full(Encoding::Jpeg, 80),
    full(Encoding::WebP, 82),
    responsive(RESPONSIVE_WIDTHS[0], Encoding::Jpeg, 78),
    responsive(RESPONSIVE_WIDTHS[0], Encoding::WebP, 80),
    responsive(RESPONSIVE_WIDTHS[1], Encoding::Jpeg, 78),
    responsive(RESPONSIVE_WIDTHS[1], Encoding::WebP, 80),
    responsive(RESPONSIVE_WIDTHS[2], Encoding::Jpeg, 78),
    responsive(RESPONSIVE_WIDTHS[2], Encoding::WebP, 80),
];

impl VariantSpec {
    /// Output file name for a source base name, e.g. `hero-480w.webp`.
    pub fn file_name(&self, base_name: &str) -> String {
        variant_file_name(base_name, self.width, self.encoding)
    }
}

impl fmt::Display for VariantSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.width {
            VariantWidth::Full => write!(f, "full {}", self.encoding.extension()),
            VariantWidth::Responsive(w) => write!(f, "{}w {}", w, self.encoding.extension()),
        }
    }
}

/// Output file name for any width/encoding pair.
pub fn variant_file_name(base_name: &str, width: VariantWidth, encoding: Encoding) -> String {
    match width {
        VariantWidth::Full => format!("{}.{}", base_name, encoding.extension()),
        VariantWidth::Responsive(w) => format!("{}-{}w.{}", base_name, w, encoding.extension()),
    }
}

/// Strip the final extension from a source file name.
///
/// `hero.png` → `hero`, `team.photo.jpeg` → `team.photo`. Names without an
/// extension (or dotfiles such as `.jpg`) are returned unchanged.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => &file_name[..pos],
        _ => file_name,
    }
}
