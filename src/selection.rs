//! Selection resolution: which source files this run transcodes.
//!
//! In the default mode the selection is the normalized manifest; with
//! `--all` it is the whole source inventory. Either way every selected name
//! must exist in the inventory, and all dangling names are reported together
//! so the manifest can be fixed in one pass. Selected names must also map to
//! distinct output names: `hero.jpg` and `hero.png` would both write
//! `jpg/hero.jpg`. Resolution happens before any directory is touched, so a
//! failure leaves the previous output intact.

use crate::variants::base_name;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Manifest references missing source files: {}", .0.join(", "))]
    MissingSources(Vec<String>),
    /// Each group holds two or more sources sharing a base name.
    #[error("Selected sources share an output name: {}", format_groups(.0))]
    OutputNameCollision(Vec<Vec<String>>),
}

fn format_groups(groups: &[Vec<String>]) -> String {
    groups
        .iter()
        .map(|group| group.join(" + "))
        .collect::<Vec<_>>()
        .join("; ")
}

/// How the selection set is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Transcode the normalized manifest.
    Manifest,
    /// Transcode every supported file in the source directory.
    AllSources,
}

impl SelectionMode {
    pub fn from_all_flag(all_sources: bool) -> Self {
        if all_sources {
            SelectionMode::AllSources
        } else {
            SelectionMode::Manifest
        }
    }
}

/// Resolve the selection set and check it against the inventory.
///
/// `manifest` must already be normalized. The result keeps the order of the
/// chosen input (both inputs are sorted).
pub fn resolve_selection(
    manifest: &[String],
    inventory: &[String],
    mode: SelectionMode,
) -> Result<Vec<String>, SelectionError> {
    let selection = match mode {
        SelectionMode::AllSources => inventory,
        SelectionMode::Manifest => manifest,
    };

    let available: BTreeSet<&str> = inventory.iter().map(String::as_str).collect();
    let missing: BTreeSet<&str> = selection
        .iter()
        .map(String::as_str)
        .filter(|name| !available.contains(name))
        .collect();

    if !missing.is_empty() {
        return Err(SelectionError::MissingSources(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    let collisions = output_name_collisions(selection);
    if !collisions.is_empty() {
        return Err(SelectionError::OutputNameCollision(collisions));
    }

    Ok(selection.to_vec())
}

/// Groups of selected names whose variants would land on the same files.
fn output_name_collisions(selection: &[String]) -> Vec<Vec<String>> {
    let mut by_base: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for name in selection {
        by_base.entry(base_name(name)).or_default().push(name.clone());
    }
    by_base
        .into_values()
        .filter(|group| group.len() > 1)
        .map(|mut group| {
            group.sort();
            group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn manifest_subset_of_inventory_is_selected() {
        let manifest = names(&["a.jpg"]);
        let inventory = names(&["a.jpg", "b.png"]);

        let selection = resolve_selection(&manifest, &inventory, SelectionMode::Manifest).unwrap();
        assert_eq!(selection, names(&["a.jpg"]));
    }

    #[test]
    fn all_sources_selects_full_inventory() {
        let manifest = names(&["a.jpg"]);
        let inventory = names(&["a.jpg", "b.png"]);

        let selection =
            resolve_selection(&manifest, &inventory, SelectionMode::AllSources).unwrap();
        assert_eq!(selection, inventory);
    }

    #[test]
    fn all_sources_ignores_dangling_manifest_entries() {
        let manifest = names(&["a.jpg", "gone.jpg"]);
        let inventory = names(&["a.jpg"]);

        let selection =
            resolve_selection(&manifest, &inventory, SelectionMode::AllSources).unwrap();
        assert_eq!(selection, names(&["a.jpg"]));
    }

    #[test]
    fn every_missing_entry_is_reported() {
        let manifest = names(&["a.jpg", "missing.jpg", "z-missing.png"]);
        let inventory = names(&["a.jpg", "b.png"]);

        let err = resolve_selection(&manifest, &inventory, SelectionMode::Manifest).unwrap_err();
        assert_eq!(
            err,
            SelectionError::MissingSources(names(&["missing.jpg", "z-missing.png"]))
        );
        assert_eq!(
            err.to_string(),
            "Manifest references missing source files: missing.jpg, z-missing.png"
        );
    }

    #[test]
    fn shared_base_names_are_rejected() {
        let manifest = names(&["a.jpg", "a.png", "b.jpg", "c.jpeg", "c.png"]);
        let inventory = manifest.clone();

        let err = resolve_selection(&manifest, &inventory, SelectionMode::Manifest).unwrap_err();
        assert_eq!(
            err,
            SelectionError::OutputNameCollision(vec![
                names(&["a.jpg", "a.png"]),
                names(&["c.jpeg", "c.png"]),
            ])
        );
        assert_eq!(
            err.to_string(),
            "Selected sources share an output name: a.jpg + a.png; c.jpeg + c.png"
        );
    }

    #[test]
    fn collisions_only_count_selected_names() {
        let manifest = names(&["a.jpg"]);
        let inventory = names(&["a.jpg", "a.png"]);

        let selection = resolve_selection(&manifest, &inventory, SelectionMode::Manifest).unwrap();
        assert_eq!(selection, names(&["a.jpg"]));
        assert!(matches!(
            resolve_selection(&manifest, &inventory, SelectionMode::AllSources),
            Err(SelectionError::OutputNameCollision(_))
        ));
    }

    #[test]
    fn missing_sources_are_reported_before_collisions() {
        let manifest = names(&["a.jpg", "a.png", "gone.jpg"]);
        let inventory = names(&["a.jpg", "a.png"]);

        let err = resolve_selection(&manifest, &inventory, SelectionMode::Manifest).unwrap_err();
        assert_eq!(err, SelectionError::MissingSources(names(&["gone.jpg"])));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let manifest = names(&["A.jpg"]);
        let inventory = names(&["a.jpg"]);

        assert!(resolve_selection(&manifest, &inventory, SelectionMode::Manifest).is_err());
    }

    #[test]
    fn empty_manifest_selects_nothing() {
        let inventory = names(&["a.jpg"]);
        let selection = resolve_selection(&[], &inventory, SelectionMode::Manifest).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(SelectionMode::from_all_flag(true), SelectionMode::AllSources);
        assert_eq!(SelectionMode::from_all_flag(false), SelectionMode::Manifest);
    }
}
