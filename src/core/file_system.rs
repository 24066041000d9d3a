//! Discovery of note files under a notes directory

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::config::StoreConfig;
use super::error::{Result, StoreError};

/// A note file found under the notes directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// Document name derived from the relative path
    pub name: String,
    /// Path relative to the notes directory
    pub relative: PathBuf,
    /// Full path
    pub path: PathBuf,
}

/// Find all note files below `root`, ordered by relative path
pub fn discover_notes(root: &Path, config: &StoreConfig) -> Result<Vec<NoteFile>> {
    if !root.is_dir() {
        return Err(StoreError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkDir::new(root)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e, config));

    let mut notes = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself failing means there is nothing to load
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_note_extension(entry.path(), config) {
            tracing::debug!("Skipping non-note file: {}", entry.path().display());
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        notes.push(NoteFile {
            name: note_name(&relative),
            relative,
            path: entry.into_path(),
        });
    }

    notes.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(notes)
}

/// Hidden entries and ignored directories are pruned from the walk
fn is_skipped(entry: &DirEntry, config: &StoreConfig) -> bool {
    let file_name = entry.file_name().to_string_lossy();

    let skipped = (config.skip_hidden && file_name.starts_with('.'))
        || (entry.file_type().is_dir()
            && config
                .ignored_dirs
                .iter()
                .any(|d| d.as_str() == file_name.as_ref()));

    if skipped {
        tracing::debug!("Pruning {}", entry.path().display());
    }
    skipped
}

/// Check if the path has one of the configured note extensions
fn has_note_extension(path: &Path, config: &StoreConfig) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            config
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// Relative path without extension, `/`-separated
fn note_name(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
