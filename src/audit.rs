//! Unused-asset audit and prune.
//!
//! The audit is pure set arithmetic: every inventory file that is not part of
//! the selection is unused. It is computed and reported on every run.
//!
//! Pruning deletes those files from the source directory. It is opt-in
//! (`--prune-unused`) and the pipeline only calls it after every variant of
//! the selection has been written. The first failed deletion stops the prune.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to prune unused source {}: {source}", .path.display())]
    Prune {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Inventory minus selection, in inventory order.
pub fn audit_unused(inventory: &[String], selection: &[String]) -> Vec<String> {
    let selected: BTreeSet<&str> = selection.iter().map(String::as_str).collect();
    inventory
        .iter()
        .filter(|name| !selected.contains(name.as_str()))
        .cloned()
        .collect()
}

/// Delete every unused file from `source_dir`. Returns how many were removed.
pub fn prune_unused(source_dir: &Path, unused: &[String]) -> Result<usize, AuditError> {
    for (removed, name) in unused.iter().enumerate() {
        let path = source_dir.join(name);
        std::fs::remove_file(&path).map_err(|source| AuditError::Prune {
            path: path.clone(),
            source,
        })?;
        tracing::info!(file = %name, removed = removed + 1, "pruned unused source");
    }
    Ok(unused.len())
}
