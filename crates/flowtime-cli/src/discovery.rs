//! Artifact discovery: walk the on-disk run tree and hand the core a flat
//! list of attributed artifacts.
//!
//! Expected layout is `<root>/<category>/<group or artifact>`: each
//! category directory holds either iteration-group directories (whose
//! files belong to that group) or loose artifacts, which belong to the
//! distinguished root group. Every listing is sorted by file name, so the
//! output order is deterministic regardless of how the filesystem
//! enumerates entries.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};
use flowtime_error::{FlowtimeError, Result};
use flowtime_types::{Artifact, ROOT_GROUP};
use tracing::{debug, warn};

/// File extensions discovery considers to be stage artifacts.
const ARTIFACT_EXTENSIONS: &[&str] = &["log", "status", "txt"];

/// Collect every artifact under `root`, attributed with category and
/// group key, in deterministic order.
///
/// A file that cannot be read (vanished mid-scan, binary garbage) is
/// skipped with a warning; only failures to list the tree itself abort.
pub fn scan(root: &Path) -> Result<Vec<Artifact>> {
    if !root.exists() {
        return Err(FlowtimeError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(FlowtimeError::RootNotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut artifacts = Vec::new();
    for category_dir in sorted_entries(root)?.into_iter().filter(|p| p.is_dir()) {
        let category = leaf_name(&category_dir);
        for entry in sorted_entries(&category_dir)? {
            if entry.is_dir() {
                let group_key = leaf_name(&entry);
                for file in sorted_entries(&entry)?.into_iter().filter(|p| p.is_file()) {
                    push_artifact(&mut artifacts, &category, &group_key, &file);
                }
            } else {
                push_artifact(&mut artifacts, &category, ROOT_GROUP, &entry);
            }
        }
    }
    debug!(count = artifacts.len(), root = %root.display(), "discovery complete");
    Ok(artifacts)
}

fn push_artifact(artifacts: &mut Vec<Artifact>, category: &str, group_key: &str, path: &Path) {
    let recognized = path
        .extension()
        .is_some_and(|ext| ARTIFACT_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));
    if !recognized {
        return;
    }
    let (text, last_modified) = match read_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable artifact");
            return;
        }
    };
    artifacts.push(Artifact {
        category: category.to_owned(),
        group_key: group_key.to_owned(),
        path: path.to_path_buf(),
        text,
        last_modified,
    });
}

fn read_snapshot(path: &Path) -> std::io::Result<(String, NaiveDateTime)> {
    let text = fs::read_to_string(path)?;
    let modified = fs::metadata(path)?.modified()?;
    Ok((text, DateTime::<Local>::from(modified).naive_local()))
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let listing = fs::read_dir(dir).map_err(|err| FlowtimeError::ScanFailed {
        path: dir.to_path_buf(),
        detail: err.to_string(),
    })?;
    let mut entries: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();
    Ok(entries)
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
