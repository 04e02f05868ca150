//! Qualitative inspection of predictions against ground truth.
//!
//! Reads back the label and prediction files the external detectors work
//! with and renders a per-image text report. Drawing and plotting stay in
//! external tooling; this only needs the text formats.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ThermoprepError;
use crate::labels::{
    format_label_line, read_label_file, read_prediction_file, LabelRow, PredictionRow,
};

/// Where to find the files for one inspection run.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Directory of materialized images (used only to probe dimensions).
    pub images_dir: PathBuf,
    /// Directory of ground-truth label files.
    pub labels_dir: PathBuf,
    /// Prediction directories, one per model; the directory name labels
    /// the model in the report.
    pub pred_dirs: Vec<PathBuf>,
    /// Image file extension for the dimension probe.
    pub image_ext: String,
}

/// Predictions of one model for one image.
#[derive(Clone, Debug)]
pub struct ModelPredictions {
    pub model: String,
    pub rows: Vec<PredictionRow>,
}

/// Everything gathered for one image stem.
#[derive(Clone, Debug)]
pub struct StemReport {
    pub stem: String,
    /// Pixel dimensions, if the image exists and decodes.
    pub image_size: Option<(u32, u32)>,
    pub ground_truth: Vec<LabelRow>,
    pub models: Vec<ModelPredictions>,
}

/// Full inspection report over the requested stems.
#[derive(Clone, Debug, Default)]
pub struct InspectReport {
    pub stems: Vec<StemReport>,
}

fn probe_image_size(images_dir: &Path, stem: &str, ext: &str) -> Option<(u32, u32)> {
    let path = images_dir.join(format!("{}.{}", stem, ext));
    let size = imagesize::size(&path).ok()?;
    let width = u32::try_from(size.width).ok()?;
    let height = u32::try_from(size.height).ok()?;
    Some((width, height))
}

fn model_name(dir: &Path) -> String {
    dir.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("model")
        .to_string()
}

/// Gathers ground truth and per-model predictions for each stem.
///
/// Missing label or prediction files mean "no boxes"; malformed lines are
/// skipped by the parsers.
pub fn inspect_stems(
    stems: &[String],
    opts: &InspectOptions,
) -> Result<InspectReport, ThermoprepError> {
    let mut report = InspectReport::default();

    for stem in stems {
        let ground_truth = read_label_file(&opts.labels_dir.join(format!("{}.txt", stem)))?;

        let mut models = Vec::with_capacity(opts.pred_dirs.len());
        for pred_dir in &opts.pred_dirs {
            let rows = read_prediction_file(&pred_dir.join(format!("{}.txt", stem)))?;
            models.push(ModelPredictions {
                model: model_name(pred_dir),
                rows,
            });
        }

        report.stems.push(StemReport {
            stem: stem.clone(),
            image_size: probe_image_size(&opts.images_dir, stem, &opts.image_ext),
            ground_truth,
            models,
        });
    }

    Ok(report)
}

impl fmt::Display for StemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.image_size {
            Some((w, h)) => writeln!(f, "=== {} ({}x{}) ===", self.stem, w, h)?,
            None => writeln!(f, "=== {} (image unavailable) ===", self.stem)?,
        }

        writeln!(f, "ground truth: {} box(es)", self.ground_truth.len())?;
        for row in &self.ground_truth {
            writeln!(f, "  {}", format_label_line(row.class_id, &row.bbox))?;
        }

        for model in &self.models {
            writeln!(f, "{}: {} prediction(s)", model.model, model.rows.len())?;
            for row in &model.rows {
                writeln!(
                    f,
                    "  {} conf={:.2} {:.6} {:.6} {:.6} {:.6}",
                    row.class_id, row.confidence, row.bbox.cx, row.bbox.cy, row.bbox.w, row.bbox.h
                )?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stem in &self.stems {
            write!(f, "{}", stem)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_opts(root: &Path, pred_dirs: Vec<PathBuf>) -> InspectOptions {
        InspectOptions {
            images_dir: root.join("images"),
            labels_dir: root.join("labels"),
            pred_dirs,
            image_ext: "jpeg".to_string(),
        }
    }

    #[test]
    fn test_inspect_gathers_gt_and_predictions() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let labels = temp.path().join("labels");
        let preds = temp.path().join("yolov8n");
        fs::create_dir_all(&labels).expect("mkdir");
        fs::create_dir_all(&preds).expect("mkdir");

        fs::write(labels.join("FLIR_00355.txt"), "0 0.5 0.5 0.2 0.3\n").expect("write gt");
        fs::write(
            preds.join("FLIR_00355.txt"),
            "0 0.87 0.51 0.49 0.21 0.29\nshort line\n",
        )
        .expect("write preds");

        let opts = make_opts(temp.path(), vec![preds]);
        let report = inspect_stems(&["FLIR_00355".to_string()], &opts).expect("inspect");

        assert_eq!(report.stems.len(), 1);
        let stem = &report.stems[0];
        assert_eq!(stem.ground_truth.len(), 1);
        assert_eq!(stem.models.len(), 1);
        assert_eq!(stem.models[0].model, "yolov8n");
        // Malformed prediction line skipped.
        assert_eq!(stem.models[0].rows.len(), 1);
        assert!(stem.image_size.is_none());
    }

    #[test]
    fn test_missing_files_mean_no_boxes() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let opts = make_opts(temp.path(), vec![temp.path().join("rtdetr")]);
        let report = inspect_stems(&["FLIR_99999".to_string()], &opts).expect("inspect");

        let stem = &report.stems[0];
        assert!(stem.ground_truth.is_empty());
        assert!(stem.models[0].rows.is_empty());
    }

    #[test]
    fn test_display_sections() {
        let report = InspectReport {
            stems: vec![StemReport {
                stem: "FLIR_00001".to_string(),
                image_size: Some((640, 512)),
                ground_truth: vec![],
                models: vec![ModelPredictions {
                    model: "rtdetr-l".to_string(),
                    rows: vec![],
                }],
            }],
        };

        let text = report.to_string();
        assert!(text.contains("=== FLIR_00001 (640x512) ==="));
        assert!(text.contains("ground truth: 0 box(es)"));
        assert!(text.contains("rtdetr-l: 0 prediction(s)"));
    }
}
