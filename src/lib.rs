//! # asset-variants
//!
//! A batch image-transcoding pipeline for static websites. A directory of
//! source photos plus a manifest of the ones the site actually uses go in;
//! a fixed matrix of responsive JPEG and WebP variants comes out, and source
//! images nobody references are reported (and optionally deleted).
//!
//! # Pipeline
//!
//! ```text
//! image-manifest.json ─→ manifest ──┐
//!                                   ├─→ selection ─→ output_tree ─→ process ─→ audit
//! images/*.{jpg,png}  ─→ inventory ─┘   (validate)    (reset)      (variants)  (prune?)
//! ```
//!
//! Every run recomputes everything from scratch: the encoding directories are
//! emptied, then every variant of every selected source is written again.
//! There is no cache and no incremental mode.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Loads `{"images": [...]}` and normalizes the list |
//! | [`inventory`] | Lists supported source images in the source directory |
//! | [`selection`] | Manifest or `--all`, checked against the inventory |
//! | [`output_tree`] | Creates and empties `jpg/` and `webp/` under the output root |
//! | [`variants`] | The static width × encoding matrix and output naming |
//! | [`process`] | Writes every variant of every selected source |
//! | [`imaging`] | Pure-Rust decode, orient, resize, encode behind a backend trait |
//! | [`audit`] | Unused-source report and prune |
//! | [`markup`] | `<picture>` description and HTML for one source |
//! | [`pipeline`] | Orchestrates a run, unifies module errors |
//! | [`config`] | `asset-variants.toml` loading, merging, validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Validate Before Touching Anything
//!
//! Manifest, inventory, and selection are resolved before the output tree is
//! reset. A manifest naming a missing file aborts the run with every missing
//! name listed, and the previous output stays intact.
//!
//! ## Static Variant Matrix
//!
//! Widths, encodings, and qualities live in one table,
//! [`variants::VARIANTS`]. They are not configurable: the markup builder
//! derives URLs from the same table, so the two can never disagree.
//!
//! ## Never Enlarge
//!
//! A responsive width larger than the source is clamped to the source width.
//! The variant file is still written under its nominal name so markup never
//! points at a missing file.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate for decoding, EXIF
//! orientation, Lanczos3 resampling, and JPEG encoding. WebP variants go
//! through the `webp` crate, which builds libwebp from source, so every
//! quality in the matrix reaches its encoder and no system libraries are
//! needed.

pub mod audit;
pub mod config;
pub mod imaging;
pub mod inventory;
pub mod logging;
pub mod manifest;
pub mod markup;
pub mod output;
pub mod output_tree;
pub mod pipeline;
pub mod process;
pub mod selection;
pub mod variants;

#[cfg(test)]
pub(crate) mod test_helpers;
