//! Shared test utilities for the asset-variants test suite.
//!
//! Synthetic source images, manifest files, and directory listings for tests
//! that touch the file system.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! setup_sources(tmp.path(), &[("a.jpg", 1600, 900), ("b.png", 300, 200)]);
//! write_manifest(&tmp.path().join("image-manifest.json"), &["a.jpg"]);
//!
//! assert_eq!(list_dir(tmp.path()), vec!["a.jpg", "b.png", "image-manifest.json"]);
//! ```

use image::{ImageBuffer, Rgb, Rgba};
use std::path::Path;

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a gradient JPEG. Same dimensions always produce the same bytes.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save(path).unwrap();
}

/// Write a JPEG whose left half is black and right half white, tagged with
/// an EXIF APP1 segment carrying `orientation` (1-8).
///
/// The raw pixel grid is `width` x `height`; viewers that honor the tag show
/// it rotated or flipped.
pub fn create_oriented_jpeg(path: &Path, width: u32, height: u32, orientation: u16) {
    let img = ImageBuffer::from_fn(width, height, |x, _| {
        if x < width / 2 { Rgb([0u8, 0, 0]) } else { Rgb([255u8, 255, 255]) }
    });
    let mut encoded = std::io::Cursor::new(Vec::new());
    img.write_to(&mut encoded, image::ImageFormat::Jpeg).unwrap();
    let encoded = encoded.into_inner();

    // Big-endian TIFF header, one IFD with a single SHORT Orientation entry.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let payload_len = (2 + 6 + tiff.len()) as u16;
    let mut bytes = encoded[..2].to_vec(); // SOI
    bytes.extend_from_slice(&[0xFF, 0xE1]);
    bytes.extend_from_slice(&payload_len.to_be_bytes());
    bytes.extend_from_slice(b"Exif\x00\x00");
    bytes.extend_from_slice(&tiff);
    bytes.extend_from_slice(&encoded[2..]);
    std::fs::write(path, bytes).unwrap();
}

/// Write a gradient PNG with a varying alpha channel.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([(y % 256) as u8, (x % 256) as u8, 128, ((x * 3) % 256) as u8])
    });
    img.save(path).unwrap();
}

/// Create source images inside `dir`, choosing the encoder by extension.
pub fn setup_sources(dir: &Path, images: &[(&str, u32, u32)]) {
    std::fs::create_dir_all(dir).unwrap();
    for (name, width, height) in images {
        let path = dir.join(name);
        if name.to_ascii_lowercase().ends_with(".png") {
            create_test_png(&path, *width, *height);
        } else {
            create_test_jpeg(&path, *width, *height);
        }
    }
}

// =========================================================================
// Manifest and directory helpers
// =========================================================================

/// Write `{"images": [...]}` to `path`.
pub fn write_manifest(path: &Path, images: &[&str]) {
    let doc = serde_json::json!({ "images": images });
    std::fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

/// Entry names directly inside `dir`, sorted. Panics if `dir` is unreadable.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
