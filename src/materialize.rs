//! Dataset materialization: COCO annotations → YOLO image/label tree.
//!
//! For one raw FLIR split this copies every image that exists on disk
//! into `<proc_root>/images/<split>/` and writes exactly one label file
//! per copied image under `<proc_root>/labels/<split>/`. Images listed
//! in the JSON but absent on disk are skipped without output, so the
//! image/label pairing invariant holds for everything materialized.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::coco::{read_coco_json, CocoIndex};
use crate::error::ThermoprepError;
use crate::labels::{write_label_file, PERSON_CLASS_ID};

/// Subdirectory of a raw FLIR split holding the 8-bit thermal images.
pub const RAW_IMAGE_SUBDIR: &str = "thermal_8_bit";

/// File name of the per-split COCO annotation file in the raw tree.
pub const RAW_ANNOTATION_FILE: &str = "thermal_annotations.json";

/// Counts produced by materializing one split.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Split name ("train" or "val").
    pub split: String,
    /// Images materialized (found on disk, copied or already present).
    pub total: usize,
    /// Images with at least one person box.
    pub with_person: usize,
    /// Person boxes extending past the image frame, clamped on write.
    pub clipped: usize,
}

impl MaterializeReport {
    /// Images with an empty label file.
    pub fn negatives(&self) -> usize {
        self.total - self.with_person
    }
}

impl fmt::Display for MaterializeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] total images: {}, with person: {}, negatives: {}",
            self.split,
            self.total,
            self.with_person,
            self.negatives()
        )?;
        if self.clipped > 0 {
            write!(f, ", clipped boxes: {}", self.clipped)?;
        }
        Ok(())
    }
}

/// Materializes one raw split into the processed YOLO tree.
///
/// Idempotent: already-copied images are left in place, label files are
/// rewritten. A full rebuild each run; there is no incremental mode.
pub fn convert_split(
    split: &str,
    raw_root: &Path,
    proc_root: &Path,
    category_id: u64,
) -> Result<MaterializeReport, ThermoprepError> {
    let ann_file = raw_root.join(split).join(RAW_ANNOTATION_FILE);
    let img_dir = raw_root.join(split).join(RAW_IMAGE_SUBDIR);
    let out_img_dir = proc_root.join("images").join(split);
    let out_lbl_dir = proc_root.join("labels").join(split);

    fs::create_dir_all(&out_img_dir).map_err(ThermoprepError::Io)?;
    fs::create_dir_all(&out_lbl_dir).map_err(ThermoprepError::Io)?;

    let coco = read_coco_json(&ann_file)?;
    let index = CocoIndex::new(coco, category_id);

    let mut report = MaterializeReport {
        split: split.to_string(),
        ..Default::default()
    };

    for image in index.images() {
        // Annotation file names may carry a subdirectory prefix; only the
        // base name is meaningful in the raw image directory.
        let Some(img_name) = Path::new(&image.file_name).file_name() else {
            continue;
        };
        let src_img = img_dir.join(img_name);
        if !src_img.is_file() {
            // Not on disk: neither counted nor materialized.
            continue;
        }

        let dst_img = out_img_dir.join(img_name);
        if !dst_img.exists() {
            fs::copy(&src_img, &dst_img).map_err(ThermoprepError::Io)?;
        }

        let frame_w = f64::from(image.width);
        let frame_h = f64::from(image.height);
        let mut boxes = Vec::new();
        for ann in index.annotations_for(image.id) {
            let bbox = ann.bbox();
            if !bbox.is_within(frame_w, frame_h) {
                report.clipped += 1;
            }
            boxes.push(bbox.to_yolo(frame_w, frame_h));
        }

        let stem = Path::new(img_name).with_extension("");
        let label_path = out_lbl_dir.join(stem).with_extension("txt");
        write_label_file(&label_path, PERSON_CLASS_ID, &boxes)?;

        if !boxes.is_empty() {
            report.with_person += 1;
        }
        report.total += 1;
    }

    Ok(report)
}
