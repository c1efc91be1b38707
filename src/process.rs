//! Variant generation for the selection set.
//!
//! Takes the resolved selection and writes the full [variant
//! matrix](crate::variants) for every file into a freshly reset
//! [`OutputTree`](crate::output_tree::OutputTree).
//!
//! ## Output Structure
//!
//! ```text
//! optimized/
//! ├── jpg/
//! │   ├── hero.jpg             # Full size, rotated upright
//! │   ├── hero-480w.jpg        # Responsive widths, never enlarged
//! │   ├── hero-768w.jpg
//! │   └── hero-1200w.jpg
//! └── webp/
//!     ├── hero.webp
//!     └── ...
//! ```
//!
//! ## Sequential Processing
//!
//! Files are processed strictly one after another, and within a file one
//! transcode at a time. The first failure aborts the whole run with the
//! offending file named; variants already written stay on disk until the next
//! run's reset removes them.
//!
//! ## Progress Events
//!
//! Callers can pass an [`mpsc::Sender`] to receive a [`ProcessEvent`] per
//! processed file. The CLI drains them on a printer thread.

use crate::imaging::{
    BackendError, Encoding, GeneratedVariant, ImageBackend, RustBackend, create_variants,
    get_dimensions,
};
use crate::variants::{VARIANTS, base_name};
use std::path::Path;
use std::sync::mpsc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to transform {file}: {source}")]
    Transform {
        file: String,
        #[source]
        source: BackendError,
    },
}

/// Progress notification emitted while generating variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// Generation is about to start for `count` files.
    Started { count: usize },
    /// One source file has had every variant written.
    ImageProcessed {
        /// 1-based position within the selection.
        index: usize,
        file_name: String,
        dimensions: (u32, u32),
        variants: Vec<VariantInfo>,
    },
}

/// Display-oriented summary of one written variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantInfo {
    pub label: String,
    pub encoding: Encoding,
    pub width: u32,
    pub height: u32,
}

/// Every variant written for one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub file_name: String,
    /// Upright source dimensions.
    pub dimensions: (u32, u32),
    pub variants: Vec<GeneratedVariant>,
}

/// Generate variants with the production backend.
pub fn process(
    selection: &[String],
    source_dir: &Path,
    output_root: &Path,
    events: Option<mpsc::Sender<ProcessEvent>>,
) -> Result<Vec<ProcessedImage>, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, selection, source_dir, output_root, events)
}

/// Generate variants using a specific backend (allows testing with mock).
///
/// The output tree must already be prepared.
pub fn process_with_backend(
    backend: &impl ImageBackend,
    selection: &[String],
    source_dir: &Path,
    output_root: &Path,
    events: Option<mpsc::Sender<ProcessEvent>>,
) -> Result<Vec<ProcessedImage>, ProcessError> {
    let emit = |event: ProcessEvent| {
        if let Some(tx) = &events {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    };

    emit(ProcessEvent::Started {
        count: selection.len(),
    });

    let mut processed = Vec::with_capacity(selection.len());

    for (i, file_name) in selection.iter().enumerate() {
        let transform_error = |source| ProcessError::Transform {
            file: file_name.clone(),
            source,
        };
        let source_path = source_dir.join(file_name);

        let dimensions = get_dimensions(backend, &source_path).map_err(transform_error)?;
        let variants = create_variants(
            backend,
            &source_path,
            output_root,
            base_name(file_name),
            dimensions,
            VARIANTS,
        )
        .map_err(transform_error)?;

        tracing::info!(file = %file_name, variants = variants.len(), "processed source");

        emit(ProcessEvent::ImageProcessed {
            index: i + 1,
            file_name: file_name.clone(),
            dimensions,
            variants: variants.iter().map(variant_info).collect(),
        });

        processed.push(ProcessedImage {
            file_name: file_name.clone(),
            dimensions,
            variants,
        });
    }

    Ok(processed)
}

fn variant_info(variant: &GeneratedVariant) -> VariantInfo {
    let label = match variant.width_spec.target() {
        Some(w) => format!("{}w {}", w, variant.encoding.extension()),
        None => format!("full {}", variant.encoding.extension()),
    };
    VariantInfo {
        label,
        encoding: variant.encoding,
        width: variant.width,
        height: variant.height,
    }
}
