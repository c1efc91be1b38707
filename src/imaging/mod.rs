//! Pure-Rust image processing, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageDecoder::dimensions` + EXIF orientation |
//! | **Transcode → JPEG** | Lanczos3 resize + `JpegEncoder` |
//! | **Transcode → WebP** | Lanczos3 resize + `WebPEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_variant_dimensions;
pub use operations::{GeneratedVariant, create_variants, get_dimensions, plan_variants};
pub use params::{Encoding, Quality, TranscodeParams};
pub use rust_backend::RustBackend;
