//! Positive/negative balance reporting for a split's label directory.
//!
//! Read-only pass used to verify a split between pipeline stages;
//! nothing is persisted.

use std::fmt;
use std::path::Path;

use crate::error::ThermoprepError;
use crate::manifest::scan_labels;

/// Counts for one split's label directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceCounts {
    /// Label files with at least one object line.
    pub positive: usize,
    /// Zero-byte label files.
    pub negative: usize,
}

impl BalanceCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative
    }

    /// Fraction of positive samples; 0.0 for an empty directory.
    pub fn positive_ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.positive as f64 / self.total() as f64
        }
    }

    /// Fraction of negative samples; 0.0 for an empty directory.
    pub fn negative_ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.negative as f64 / self.total() as f64
        }
    }
}

/// Counts zero-byte vs non-empty label files in one directory.
pub fn count_pos_neg(label_dir: &Path) -> Result<BalanceCounts, ThermoprepError> {
    let mut counts = BalanceCounts::default();
    for entry in scan_labels(label_dir)? {
        if entry.positive {
            counts.positive += 1;
        } else {
            counts.negative += 1;
        }
    }
    Ok(counts)
}

/// Human-readable balance report for one split.
#[derive(Clone, Debug)]
pub struct BalanceReport {
    pub split: String,
    pub counts: BalanceCounts,
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut split_title = self.split.clone();
        if let Some(first) = split_title.get_mut(0..1) {
            first.make_ascii_uppercase();
        }

        writeln!(f, "--- {} Split ---", split_title)?;
        writeln!(f, "Total images: {}", self.counts.total())?;
        writeln!(
            f,
            "  Positive (with person): {} ({:.2}%)",
            self.counts.positive,
            self.counts.positive_ratio() * 100.0
        )?;
        writeln!(
            f,
            "  Negative (no person):   {} ({:.2}%)",
            self.counts.negative,
            self.counts.negative_ratio() * 100.0
        )
    }
}
