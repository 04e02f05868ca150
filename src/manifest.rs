//! In-memory dataset manifest.
//!
//! The splitter never operates on raw directory listings: membership is
//! captured once into a sorted list of [`LabelEntry`] records, so the
//! enumeration order a filesystem happens to return can never influence
//! the split.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ThermoprepError;

/// One label file in the dataset pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelEntry {
    /// File stem shared by the label and its paired image.
    pub stem: String,
    /// Absolute or caller-relative path of the label file.
    pub label_path: PathBuf,
    /// True if the label file is non-empty (at least one object).
    pub positive: bool,
}

/// Scans a single directory (non-recursive) for `*.txt` label files.
///
/// Entries are classified by file size (`> 0` bytes = positive) and
/// returned sorted by stem. Errors if the directory does not exist.
pub fn scan_labels(dir: &Path) -> Result<Vec<LabelEntry>, ThermoprepError> {
    if !dir.is_dir() {
        return Err(ThermoprepError::LabelDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(ThermoprepError::Io)? {
        let entry = entry.map_err(ThermoprepError::Io)?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let size = entry.metadata().map_err(ThermoprepError::Io)?.len();
        entries.push(LabelEntry {
            stem: stem.to_string(),
            label_path: path.clone(),
            positive: size > 0,
        });
    }

    entries.sort_by(|a, b| a.stem.cmp(&b.stem));
    Ok(entries)
}

/// Pools label files from several split directories into one manifest.
///
/// Directories that do not exist contribute nothing. When the same stem
/// appears in more than one directory the later occurrence wins, matching
/// a copy-into-one-pool overwrite.
pub fn scan_label_pool(dirs: &[PathBuf]) -> Result<Vec<LabelEntry>, ThermoprepError> {
    let mut by_stem: BTreeMap<String, LabelEntry> = BTreeMap::new();
    for dir in dirs {
        if !dir.is_dir() {
            continue;
        }
        for entry in scan_labels(dir)? {
            by_stem.insert(entry.stem.clone(), entry);
        }
    }
    Ok(by_stem.into_values().collect())
}

/// Recursively maps image stems to paths under `images_root`, keeping
/// only files with the given extension (case-insensitive).
pub fn scan_images(images_root: &Path, ext: &str) -> BTreeMap<String, PathBuf> {
    let mut by_stem = BTreeMap::new();
    if !images_root.is_dir() {
        return by_stem;
    }

    for entry in WalkDir::new(images_root).into_iter().flatten() {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let has_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false);
        if !has_ext {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            by_stem.insert(stem.to_string(), path.to_path_buf());
        }
    }

    by_stem
}
