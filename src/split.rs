//! Class-balanced stratified train/val splitting.
//!
//! Positive (non-empty) and negative (empty) label files are shuffled
//! independently under one explicitly seeded RNG, each class contributes
//! `floor(len * ratio)` entries to train, and the merged pools are
//! reshuffled. This preserves the source positive/negative ratio in both
//! output splits up to integer-truncation rounding, where a naive random
//! split could skew the class balance.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::ThermoprepError;
use crate::manifest::LabelEntry;

/// Default train fraction.
pub const DEFAULT_SPLIT_RATIO: f64 = 0.8;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Validates the train fraction before splitting.
pub fn validate_ratio(ratio: f64) -> Result<(), ThermoprepError> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ThermoprepError::InvalidSplitParams {
            message: format!("ratio must be in the interval (0.0, 1.0), got {}", ratio),
        });
    }
    Ok(())
}

/// Partitions a label manifest into train and val.
///
/// Pure with respect to its inputs: identical `(entries, ratio, rng
/// state)` always yield identical membership and order. Callers pass a
/// manifest already sorted by stem, so the result depends only on the
/// seed, never on directory enumeration order. An empty manifest or an
/// absent class yields correspondingly empty contributions without error.
pub fn stratified_split(
    entries: &[LabelEntry],
    ratio: f64,
    rng: &mut StdRng,
) -> (Vec<LabelEntry>, Vec<LabelEntry>) {
    let mut pos: Vec<LabelEntry> = entries.iter().filter(|e| e.positive).cloned().collect();
    let mut neg: Vec<LabelEntry> = entries.iter().filter(|e| !e.positive).cloned().collect();

    pos.shuffle(rng);
    neg.shuffle(rng);

    // Truncating division per class, as in int(len * ratio).
    let n_pos_train = (pos.len() as f64 * ratio) as usize;
    let n_neg_train = (neg.len() as f64 * ratio) as usize;

    let pos_val = pos.split_off(n_pos_train);
    let neg_val = neg.split_off(n_neg_train);

    let mut train = pos;
    train.extend(neg);
    let mut val = pos_val;
    val.extend(neg_val);

    train.shuffle(rng);
    val.shuffle(rng);

    (train, val)
}

/// Copies the selected label files and their paired images into a split's
/// output directories.
///
/// The expected image name is the label stem plus `image_ext`. A label
/// whose image is missing from the pool is dropped entirely (neither file
/// is copied) after a warning on stderr; the run continues. Returns how
/// many pairs were copied.
pub fn copy_split_files(
    selected: &[LabelEntry],
    images: &std::collections::BTreeMap<String, PathBuf>,
    out_img_dir: &Path,
    out_lbl_dir: &Path,
    image_ext: &str,
) -> Result<usize, ThermoprepError> {
    fs::create_dir_all(out_img_dir).map_err(ThermoprepError::Io)?;
    fs::create_dir_all(out_lbl_dir).map_err(ThermoprepError::Io)?;

    let mut copied = 0;
    for entry in selected {
        let img_name = format!("{}.{}", entry.stem, image_ext);
        let Some(src_img) = images.get(&entry.stem) else {
            eprintln!("Warning: Image not found for label {}.txt", entry.stem);
            continue;
        };

        fs::copy(src_img, out_img_dir.join(&img_name)).map_err(ThermoprepError::Io)?;
        fs::copy(&entry.label_path, out_lbl_dir.join(format!("{}.txt", entry.stem)))
            .map_err(ThermoprepError::Io)?;
        copied += 1;
    }

    Ok(copied)
}

/// Split sizes as selected, counted before any copy-time loss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub train: usize,
    pub val: usize,
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done. Train: {} images, Val: {} images.",
            self.train, self.val
        )
    }
}
