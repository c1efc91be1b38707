//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take the variant matrix, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_variant_dimensions;
use super::params::{Encoding, TranscodeParams};
use crate::variants::{VariantSpec, VariantWidth};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get upright image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// A variant written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedVariant {
    pub width_spec: VariantWidth,
    pub encoding: Encoding,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Plan every transcode for one source without executing anything.
///
/// Each encoding writes into `output_root/<encoding dir>/`.
pub fn plan_variants(
    source: &Path,
    output_root: &Path,
    base_name: &str,
    original_dims: (u32, u32),
    specs: &[VariantSpec],
) -> Vec<(VariantSpec, TranscodeParams)> {
    specs
        .iter()
        .map(|spec| {
            let (width, height) = calculate_variant_dimensions(original_dims, spec.width.target());
            let output = output_root
                .join(spec.encoding.dir_name())
                .join(spec.file_name(base_name));
            (
                *spec,
                TranscodeParams {
                    source: source.to_path_buf(),
                    output,
                    width,
                    height,
                    encoding: spec.encoding,
                    quality: spec.quality,
                },
            )
        })
        .collect()
}

/// Write every variant of one source, one transcode at a time.
///
/// Stops at the first backend failure; variants already written stay on disk.
pub fn create_variants(
    backend: &impl ImageBackend,
    source: &Path,
    output_root: &Path,
    base_name: &str,
    original_dims: (u32, u32),
    specs: &[VariantSpec],
) -> Result<Vec<GeneratedVariant>> {
    let mut variants = Vec::with_capacity(specs.len());

    for (spec, params) in plan_variants(source, output_root, base_name, original_dims, specs) {
        backend.transcode(&params)?;
        tracing::debug!(
            output = %params.output.display(),
            width = params.width,
            height = params.height,
            quality = params.quality.value(),
            "wrote variant"
        );

        variants.push(GeneratedVariant {
            width_spec: spec.width,
            encoding: spec.encoding,
            path: params.output,
            width: params.width,
            height: params.height,
        });
    }

    Ok(variants)
}
