//! End-to-end pipeline orchestration.
//!
//! ```text
//! load manifest ─┐
//!                ├─→ resolve selection ─→ reset output ─→ generate ─→ audit ─→ prune?
//! list sources ──┘
//! ```
//!
//! Everything up to and including selection resolution is read-only, so a
//! bad manifest (dangling entries, or two sources that would write the same
//! variant files) leaves the previous output untouched. The reset runs on
//! every successful validation, even for an empty selection. Pruning is the
//! only step that deletes source files and runs last, after every variant of
//! the selection is on disk.

use crate::audit::{AuditError, audit_unused, prune_unused};
use crate::config::PipelineConfig;
use crate::imaging::{ImageBackend, RustBackend};
use crate::inventory::{InventoryError, list_source_images};
use crate::manifest::{ManifestError, load_manifest};
use crate::output_tree::{OutputTree, OutputTreeError};
use crate::process::{ProcessError, ProcessEvent, ProcessedImage, process_with_backend};
use crate::selection::{SelectionError, SelectionMode, resolve_selection};
use std::path::PathBuf;
use std::sync::mpsc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    OutputTree(#[from] OutputTreeError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Inputs of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub source_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub output_dir: PathBuf,
    /// Transcode the whole inventory instead of the manifest (`--all`).
    pub all_sources: bool,
    /// Delete unused sources after generation (`--prune-unused`).
    pub prune_unused: bool,
}

impl RunOptions {
    /// Paths from config; both flags off.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            source_dir: config.paths.source_dir.clone(),
            manifest_path: config.paths.manifest.clone(),
            output_dir: config.paths.output_dir.clone(),
            all_sources: false,
            prune_unused: false,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub selection: Vec<String>,
    pub processed: Vec<ProcessedImage>,
    /// Inventory minus selection, computed before any pruning.
    pub unused: Vec<String>,
    /// How many unused sources were deleted (0 without `--prune-unused`).
    pub pruned: usize,
}

/// Outcome of a read-only audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub selection: Vec<String>,
    pub unused: Vec<String>,
}

/// Load, list, and resolve. Touches nothing on disk.
fn validate(options: &RunOptions) -> Result<(Vec<String>, Vec<String>), PipelineError> {
    // The manifest must exist even when --all ignores its contents.
    let manifest = load_manifest(&options.manifest_path)?.normalized();
    let inventory = list_source_images(&options.source_dir)?;
    let selection = resolve_selection(
        &manifest,
        &inventory,
        SelectionMode::from_all_flag(options.all_sources),
    )?;
    tracing::info!(
        manifest = manifest.len(),
        inventory = inventory.len(),
        selected = selection.len(),
        "selection resolved"
    );
    Ok((inventory, selection))
}

/// Run the full pipeline with the production backend.
pub fn run(
    options: &RunOptions,
    events: Option<mpsc::Sender<ProcessEvent>>,
) -> Result<RunReport, PipelineError> {
    run_with_backend(&RustBackend::new(), options, events)
}

/// Run the full pipeline using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    options: &RunOptions,
    events: Option<mpsc::Sender<ProcessEvent>>,
) -> Result<RunReport, PipelineError> {
    let (inventory, selection) = validate(options)?;

    let tree = OutputTree::new(&options.output_dir);
    tree.prepare()?;

    let processed = process_with_backend(
        backend,
        &selection,
        &options.source_dir,
        tree.root(),
        events,
    )?;

    let unused = audit_unused(&inventory, &selection);

    let pruned = if options.prune_unused && !unused.is_empty() {
        tracing::warn!(count = unused.len(), "pruning unused source images");
        prune_unused(&options.source_dir, &unused)?
    } else {
        0
    };

    Ok(RunReport {
        selection,
        processed,
        unused,
        pruned,
    })
}

/// Report unused sources without writing or deleting anything.
pub fn audit(options: &RunOptions) -> Result<AuditReport, PipelineError> {
    let (inventory, selection) = validate(options)?;
    let unused = audit_unused(&inventory, &selection);
    Ok(AuditReport { selection, unused })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{list_dir, write_manifest};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Source files only need to exist; the mock never decodes them.
    fn fixture(sources: &[&str], manifest: &[&str]) -> (TempDir, RunOptions) {
        let tmp = TempDir::new().unwrap();
        let source_dir = tmp.path().join("images");
        fs::create_dir_all(&source_dir).unwrap();
        for name in sources {
            fs::write(source_dir.join(name), b"placeholder").unwrap();
        }
        let manifest_path = tmp.path().join("image-manifest.json");
        write_manifest(&manifest_path, manifest);

        let options = RunOptions {
            output_dir: source_dir.join("optimized"),
            source_dir,
            manifest_path,
            all_sources: false,
            prune_unused: false,
        };
        (tmp, options)
    }

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    fn output_names(backend: &MockBackend, root: &Path) -> Vec<String> {
        let mut names: Vec<String> = backend
            .transcode_outputs()
            .into_iter()
            .map(|p| {
                Path::new(&p)
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn manifest_mode_generates_selected_and_reports_unused() {
        let (_tmp, options) = fixture(&["a.jpg", "b.png"], &["a.jpg"]);
        let backend = MockBackend::with_dimensions(vec![dims(1600, 900)]);

        let report = run_with_backend(&backend, &options, None).unwrap();

        assert_eq!(report.selection, vec!["a.jpg"]);
        assert_eq!(report.unused, vec!["b.png"]);
        assert_eq!(report.pruned, 0);
        assert_eq!(
            output_names(&backend, &options.output_dir),
            vec![
                "jpg/a-1200w.jpg",
                "jpg/a-480w.jpg",
                "jpg/a-768w.jpg",
                "jpg/a.jpg",
                "webp/a-1200w.webp",
                "webp/a-480w.webp",
                "webp/a-768w.webp",
                "webp/a.webp",
            ]
        );
        // Nothing pruned without the flag.
        assert!(options.source_dir.join("b.png").exists());
    }

    #[test]
    fn all_sources_mode_generates_everything() {
        let (_tmp, mut options) = fixture(&["a.jpg", "b.png"], &["a.jpg"]);
        options.all_sources = true;
        let backend = MockBackend::with_dimensions(vec![dims(300, 200), dims(1600, 900)]);

        let report = run_with_backend(&backend, &options, None).unwrap();

        assert_eq!(report.selection, vec!["a.jpg", "b.png"]);
        assert!(report.unused.is_empty());
        assert_eq!(backend.transcode_outputs().len(), 16);
    }

    #[test]
    fn missing_entry_aborts_before_touching_output() {
        let (_tmp, options) = fixture(&["a.jpg", "b.png"], &["a.jpg", "missing.jpg"]);
        let stale = options.output_dir.join("jpg/old-480w.jpg");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, b"stale").unwrap();
        let backend = MockBackend::new();

        let err = run_with_backend(&backend, &options, None).unwrap_err();

        assert!(matches!(
            &err,
            PipelineError::Selection(SelectionError::MissingSources(names)) if names == &["missing.jpg"]
        ));
        assert_eq!(
            err.to_string(),
            "Manifest references missing source files: missing.jpg"
        );
        assert!(stale.exists());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn missing_manifest_is_fatal_even_with_all() {
        let (_tmp, mut options) = fixture(&["a.jpg"], &[]);
        fs::remove_file(&options.manifest_path).unwrap();
        options.all_sources = true;

        let err = run_with_backend(&MockBackend::new(), &options, None).unwrap_err();
        assert!(matches!(err, PipelineError::Manifest(ManifestError::Missing(_))));
    }

    #[test]
    fn reset_clears_stale_variants() {
        let (_tmp, options) = fixture(&["a.jpg"], &["a.jpg"]);
        let jpg = options.output_dir.join("jpg");
        fs::create_dir_all(&jpg).unwrap();
        fs::write(jpg.join("old-480w.jpg"), b"stale").unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(800, 600)]);

        run_with_backend(&backend, &options, None).unwrap();

        // The mock writes nothing, so only the reset is visible.
        assert!(list_dir(&jpg).is_empty());
        assert!(list_dir(&options.output_dir.join("webp")).is_empty());
    }

    #[test]
    fn empty_selection_still_resets() {
        let (_tmp, options) = fixture(&["a.jpg"], &[]);
        let webp = options.output_dir.join("webp");
        fs::create_dir_all(&webp).unwrap();
        fs::write(webp.join("a.webp"), b"stale").unwrap();

        let report = run_with_backend(&MockBackend::new(), &options, None).unwrap();

        assert!(report.selection.is_empty());
        assert_eq!(report.unused, vec!["a.jpg"]);
        assert!(list_dir(&webp).is_empty());
    }

    #[test]
    fn prune_deletes_unused_after_generation() {
        let (_tmp, mut options) = fixture(&["a.jpg", "b.png"], &["a.jpg"]);
        options.prune_unused = true;
        let backend = MockBackend::with_dimensions(vec![dims(1600, 900)]);

        let report = run_with_backend(&backend, &options, None).unwrap();

        assert_eq!(report.unused, vec!["b.png"]);
        assert_eq!(report.pruned, 1);
        assert_eq!(list_dir(&options.source_dir), vec!["a.jpg", "optimized"]);
    }

    #[test]
    fn failed_generation_never_prunes() {
        let (_tmp, mut options) = fixture(&["a.jpg", "b.png"], &["a.jpg"]);
        options.prune_unused = true;
        let backend = MockBackend::with_dimensions(vec![dims(1600, 900)]).failing_on("a.jpg");

        let err = run_with_backend(&backend, &options, None).unwrap_err();

        assert!(matches!(err, PipelineError::Process(_)));
        assert!(options.source_dir.join("b.png").exists());
    }

    #[test]
    fn audit_is_read_only() {
        let (_tmp, options) = fixture(&["a.jpg", "b.png", "c.jpeg"], &["b.png"]);

        let report = audit(&options).unwrap();

        assert_eq!(report.selection, vec!["b.png"]);
        assert_eq!(report.unused, vec!["a.jpg", "c.jpeg"]);
        assert!(!options.output_dir.exists());
        assert_eq!(list_dir(&options.source_dir).len(), 3);
    }

    #[test]
    fn options_from_config_use_config_paths() {
        let config = PipelineConfig::default();
        let options = RunOptions::from_config(&config);
        assert_eq!(options.source_dir, PathBuf::from("images"));
        assert_eq!(options.manifest_path, PathBuf::from("image-manifest.json"));
        assert_eq!(options.output_dir, PathBuf::from("images/optimized"));
        assert!(!options.all_sources);
        assert!(!options.prune_unused);
    }
}
