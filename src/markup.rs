//! `<picture>` markup for a transcoded source.
//!
//! Given a source file name, [`build_picture`] describes the responsive
//! element that references its variants: one `<source>` per modern encoding
//! and an `<img>` fallback on the JPEG variants. The description is plain
//! data (serializable for `markup --json`); [`Picture::to_markup`] renders it
//! with maud, which escapes every attribute value.
//!
//! ```html
//! <picture>
//!   <source type="image/webp" srcset="…/webp/hero-480w.webp 480w, …" sizes="…">
//!   <img src="…/jpg/hero.jpg" srcset="…/jpg/hero-480w.jpg 480w, …" sizes="…" alt="…" loading="lazy">
//! </picture>
//! ```
//!
//! Nothing here touches the file system; URLs are derived purely from the
//! naming rules in [`variants`](crate::variants).

use crate::imaging::Encoding;
use crate::variants::{
    FALLBACK_ENCODING, RESPONSIVE_WIDTHS, VariantWidth, base_name, variant_file_name,
};
use maud::{Markup, html};
use serde::Serialize;

/// `sizes` hint used when the caller supplies none.
pub const DEFAULT_SIZES: &str = "(max-width: 860px) 100vw, 50vw";

/// One `srcset` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrcsetCandidate {
    pub url: String,
    pub width: u32,
}

/// Every responsive variant of one encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSet {
    pub encoding: Encoding,
    pub mime_type: &'static str,
    pub candidates: Vec<SrcsetCandidate>,
}

impl SourceSet {
    /// `"<url> <w>w, <url> <w>w, ..."`
    pub fn srcset(&self) -> String {
        self.candidates
            .iter()
            .map(|c| format!("{} {}w", c.url, c.width))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Structured description of a `<picture>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    /// WebP first, then the JPEG fallback.
    pub sources: Vec<SourceSet>,
    /// Full-size JPEG URL for `<img src>`.
    pub default_src: String,
    pub sizes: String,
    pub alt: String,
}

/// Describe the `<picture>` element for `file_name`.
///
/// `url_prefix` is the public URL of the output directory, without a
/// trailing slash.
pub fn build_picture(
    file_name: &str,
    alt: &str,
    sizes: Option<&str>,
    url_prefix: &str,
) -> Picture {
    let base = base_name(file_name);
    let url = |width: VariantWidth, encoding: Encoding| {
        format!(
            "{}/{}/{}",
            url_prefix,
            encoding.dir_name(),
            variant_file_name(base, width, encoding)
        )
    };

    let mut encodings = Encoding::ALL;
    // Fallback encoding goes last so browsers prefer the others.
    encodings.sort_by_key(|e| *e == FALLBACK_ENCODING);

    let sources = encodings
        .iter()
        .map(|&encoding| SourceSet {
            encoding,
            mime_type: encoding.mime_type(),
            candidates: RESPONSIVE_WIDTHS
                .iter()
                .map(|&w| SrcsetCandidate {
                    url: url(VariantWidth::Responsive(w), encoding),
                    width: w,
                })
                .collect(),
        })
        .collect();

    Picture {
        sources,
        default_src: url(VariantWidth::Full, FALLBACK_ENCODING),
        sizes: sizes.unwrap_or(DEFAULT_SIZES).to_string(),
        alt: alt.to_string(),
    }
}

impl Picture {
    pub fn source(&self, encoding: Encoding) -> Option<&SourceSet> {
        self.sources.iter().find(|s| s.encoding == encoding)
    }

    /// Rendered `srcset` for one encoding, empty if absent.
    pub fn srcset(&self, encoding: Encoding) -> String {
        self.source(encoding).map(SourceSet::srcset).unwrap_or_default()
    }

    pub fn to_markup(&self) -> Markup {
        let fallback_srcset = self.srcset(FALLBACK_ENCODING);
        html! {
            picture {
                @for set in self.sources.iter().filter(|s| s.encoding != FALLBACK_ENCODING) {
                    source type=(set.mime_type) srcset=(set.srcset()) sizes=(self.sizes);
                }
                img src=(self.default_src) srcset=(fallback_srcset) sizes=(self.sizes) alt=(self.alt) loading="lazy";
            }
        }
    }
}
