//! # Scanner Module
//!
//! Walks the configured page roots and collects the subdirectories that
//! qualify as pages. The scan is best-effort: an entry that fails to stat or
//! read is skipped with a warning and never aborts the overall scan, so a
//! race with a concurrent delete degrades to a missing page rather than a
//! failed generation cycle.
//!
//! Entries are emitted in directory-listing order. The generator does not
//! depend on that order for correctness; most filesystems return a stable
//! ordering between calls, which keeps repeated generated output stable too.

use crate::config::{Config, PageRoot};
use crate::naming;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// One discovered page. Recomputed fresh on every scan, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    /// Directory name, doubling as the component identifier.
    pub folder_name: String,
    /// Group tag of the root this page was found under.
    pub kind: String,
    /// Derived URL path segment.
    pub route_path: String,
    /// Module path used to import the page's source.
    pub import_path: String,
}

/// All pages discovered under one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroup {
    pub kind: String,
    pub route_prefix: Option<String>,
    pub pages: Vec<PageEntry>,
}

/// Scan one page root for qualifying subdirectories.
///
/// A subdirectory qualifies iff it contains the configured entry file.
/// Non-directories are skipped; a missing root yields an empty list.
pub fn scan_root(config: &Config, root: &PageRoot) -> Vec<PageEntry> {
    let mut pages = Vec::new();
    let reader = match std::fs::read_dir(&root.dir) {
        Ok(reader) => reader,
        Err(err) => {
            if root.dir.exists() {
                warn!(dir = ?root.dir, %err, "failed to read page root, skipping");
            }
            return pages;
        }
    };
    for entry in reader {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = ?root.dir, %err, "failed to read directory entry, skipping");
                continue;
            }
        };
        let is_dir = match entry.file_type() {
            Ok(file_type) => file_type.is_dir(),
            Err(err) => {
                warn!(path = ?entry.path(), %err, "failed to stat entry, skipping");
                continue;
            }
        };
        if !is_dir {
            continue;
        }
        if !entry.path().join(&config.entry_file).is_file() {
            continue;
        }
        let folder_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!(name = ?raw, "non-UTF-8 page folder name, skipping");
                continue;
            }
        };
        pages.push(PageEntry {
            route_path: naming::route_path(&folder_name, &config.overrides),
            import_path: config.import_path(&root.kind, &folder_name),
            kind: root.kind.clone(),
            folder_name,
        });
    }
    pages
}

/// Scan every configured root, preserving the configured root order.
pub fn scan_all(config: &Config) -> Vec<PageGroup> {
    config
        .roots
        .iter()
        .map(|root| PageGroup {
            kind: root.kind.clone(),
            route_prefix: root.route_prefix.clone(),
            pages: scan_root(config, root),
        })
        .collect()
}

/// Serialized snapshot of the qualifying folder names per kind, sorted for a
/// stable comparison. The polling fallback diffs consecutive snapshots to
/// catch changes the native watcher missed.
///
/// # Errors
///
/// Returns an error if a root directory that exists cannot be listed; the
/// caller counts the failure and skips the tick.
pub fn snapshot(config: &Config) -> anyhow::Result<String> {
    let mut state: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for root in &config.roots {
        let mut names = Vec::new();
        if root.dir.exists() {
            let reader = std::fs::read_dir(&root.dir)
                .with_context(|| format!("failed to read page root {:?}", root.dir))?;
            for entry in reader {
                let entry = entry.with_context(|| format!("failed to list {:?}", root.dir))?;
                let path = entry.path();
                if path.is_dir() && path.join(&config.entry_file).is_file() {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        state.insert(root.kind.as_str(), names);
    }
    serde_json::to_string(&state).context("failed to serialize scan snapshot")
}

/// True when `path` is an immediate child of `dir`.
pub(crate) fn is_immediate_child(dir: &Path, path: &Path) -> bool {
    path.parent().is_some_and(|parent| parent == dir)
}
