//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` with content sniffing |
//! | Rotate upright | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//! | Encode → WebP | `webp::Encoder::from_image` + `encode(quality)` (libwebp, lossy) |
//!
//! Both encoders are deterministic: the same source always produces the same
//! file.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Encoding, TranscodeParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::io::Write;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, e: image::ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Open a decoder for `path`, sniffing the real format from the file contents.
fn open_decoder(path: &Path) -> Result<impl ImageDecoder, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .into_decoder()
        .map_err(|e| decode_error(path, e))
}

/// Dimensions after applying an EXIF orientation to raw decoder dimensions.
fn upright_dimensions((width, height): (u32, u32), orientation: Orientation) -> Dimensions {
    match orientation {
        Orientation::Rotate90
        | Orientation::Rotate270
        | Orientation::Rotate90FlipH
        | Orientation::Rotate270FlipH => Dimensions {
            width: height,
            height: width,
        },
        _ => Dimensions { width, height },
    }
}

/// Load, decode and rotate an image upright.
fn load_upright(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = open_decoder(path)?;
    // Missing or unreadable EXIF is not an error: the image is simply upright.
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Encode and write the image to `params.output` in the requested encoding.
fn save_variant(img: &DynamicImage, params: &TranscodeParams) -> Result<(), BackendError> {
    let file = std::fs::File::create(&params.output).map_err(BackendError::Io)?;
    let mut writer = std::io::BufWriter::new(file);

    match params.encoding {
        Encoding::Jpeg => {
            // JPEG has no alpha channel; transparent pixels are flattened.
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut writer, params.quality.value());
            rgb.write_with_encoder(encoder)
                .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
        }
        Encoding::WebP => {
            let pixels = if img.color().has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            };
            let encoder = webp::Encoder::from_image(&pixels)
                .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {}", e)))?;
            let encoded = encoder.encode(f32::from(params.quality.value()));
            writer.write_all(&encoded).map_err(BackendError::Io)?;
        }
    }

    writer.flush().map_err(BackendError::Io)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let mut decoder = open_decoder(path)?;
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        Ok(upright_dimensions(decoder.dimensions(), orientation))
    }

    fn transcode(&self, params: &TranscodeParams) -> Result<(), BackendError> {
        let img = load_upright(&params.source)?;
        let resized = if (img.width(), img.height()) == (params.width, params.height) {
            img
        } else {
            img.resize_exact(params.width, params.height, FilterType::Lanczos3)
        };
        save_variant(&resized, params)
    }
}
