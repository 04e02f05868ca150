//! YOLO label file text format.
//!
//! One line per object: `class_id cx cy w h`, whitespace separated, all
//! box values normalized to `[0, 1]` and written with six-decimal
//! precision. An empty file is a valid "no objects" label and is
//! semantically distinct from a missing file.
//!
//! Prediction files produced by the external detectors carry one extra
//! field: `class conf cx cy w h`.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::bbox::YoloBox;
use crate::error::ThermoprepError;

/// Class index written for every person box (single-class detector).
pub const PERSON_CLASS_ID: u32 = 0;

/// A parsed ground-truth label row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelRow {
    pub class_id: u32,
    pub bbox: YoloBox,
}

/// A parsed prediction row: a label row plus a confidence score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredictionRow {
    pub class_id: u32,
    pub confidence: f64,
    pub bbox: YoloBox,
}

/// Formats one label line (no trailing newline).
pub fn format_label_line(class_id: u32, bbox: &YoloBox) -> String {
    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        class_id, bbox.cx, bbox.cy, bbox.w, bbox.h
    )
}

/// Writes a label file with one line per box, clamping every box to
/// `[0, 1]` first. Zero boxes produce an empty file, which marks the
/// image as a negative sample.
pub fn write_label_file(
    path: &Path,
    class_id: u32,
    boxes: &[YoloBox],
) -> Result<(), ThermoprepError> {
    let mut file = fs::File::create(path).map_err(ThermoprepError::Io)?;
    for bbox in boxes {
        let clamped = bbox.clamped();
        writeln!(file, "{}", format_label_line(class_id, &clamped)).map_err(ThermoprepError::Io)?;
    }
    Ok(())
}

/// Parses one ground-truth label line.
///
/// Returns `None` for blank lines, lines with a field count other than
/// five, or lines with unparsable numbers. Malformed rows are recoverable
/// during inspection, so they are skipped rather than reported.
pub fn parse_label_line(line: &str) -> Option<LabelRow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 {
        return None;
    }

    let class_id = tokens[0].parse::<u32>().ok()?;
    let cx = tokens[1].parse::<f64>().ok()?;
    let cy = tokens[2].parse::<f64>().ok()?;
    let w = tokens[3].parse::<f64>().ok()?;
    let h = tokens[4].parse::<f64>().ok()?;

    Some(LabelRow {
        class_id,
        bbox: YoloBox::new(cx, cy, w, h),
    })
}

/// Parses one prediction line (`class conf cx cy w h`). Same skip
/// semantics as [`parse_label_line`].
pub fn parse_prediction_line(line: &str) -> Option<PredictionRow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 6 {
        return None;
    }

    let class_id = tokens[0].parse::<u32>().ok()?;
    let confidence = tokens[1].parse::<f64>().ok()?;
    let cx = tokens[2].parse::<f64>().ok()?;
    let cy = tokens[3].parse::<f64>().ok()?;
    let w = tokens[4].parse::<f64>().ok()?;
    let h = tokens[5].parse::<f64>().ok()?;

    Some(PredictionRow {
        class_id,
        confidence,
        bbox: YoloBox::new(cx, cy, w, h),
    })
}

/// Reads all well-formed rows of a label file. A missing file yields an
/// empty list (no boxes), matching how the inspection step treats absent
/// prediction files.
pub fn read_label_file(path: &Path) -> Result<Vec<LabelRow>, ThermoprepError> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(ThermoprepError::Io)?;
    Ok(content.lines().filter_map(parse_label_line).collect())
}

/// Reads all well-formed rows of a prediction file; missing file means
/// no detections.
pub fn read_prediction_file(path: &Path) -> Result<Vec<PredictionRow>, ThermoprepError> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(ThermoprepError::Io)?;
    Ok(content.lines().filter_map(parse_prediction_line).collect())
}
