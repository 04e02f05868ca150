//! COCO JSON annotation reader.
//!
//! The FLIR ADAS release ships one COCO-style `thermal_annotations.json`
//! per split. Only the fields the conversion needs are modeled; unknown
//! fields are ignored by serde. Boxes are `[x, y, width, height]` with
//! `(x, y)` as the top-left corner in absolute pixels.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::bbox::BBoxXYWH;
use crate::error::ThermoprepError;

/// COCO category id of the "person" class in the FLIR ADAS annotations.
pub const PERSON_CATEGORY_ID: u64 = 1;

/// Top-level COCO annotation file structure.
#[derive(Debug, Deserialize)]
pub struct CocoFile {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,

    #[serde(default)]
    pub categories: Vec<CocoCategory>,
}

/// COCO image entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CocoImage {
    pub id: u64,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// COCO annotation entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CocoAnnotation {
    pub image_id: u64,
    pub category_id: u64,

    /// COCO bbox format: [x, y, width, height].
    pub bbox: [f64; 4],
}

impl CocoAnnotation {
    /// Returns the annotation's box as a typed pixel-space value.
    pub fn bbox(&self) -> BBoxXYWH {
        BBoxXYWH::from_coco(self.bbox)
    }
}

/// COCO category entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CocoCategory {
    pub id: u64,
    pub name: String,
}

/// Reads a COCO annotation file.
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed. A missing
/// annotation file is unrecoverable for conversion and aborts the run.
pub fn read_coco_json(path: &Path) -> Result<CocoFile, ThermoprepError> {
    let file = File::open(path).map_err(ThermoprepError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ThermoprepError::CocoJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a COCO annotation file from a string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<CocoFile, serde_json::Error> {
    serde_json::from_str(json)
}

/// An index over one COCO file: images by id, and the annotations of a
/// single target category grouped by image id.
///
/// Records are read-only views over the source JSON; nothing here is
/// mutated after construction.
#[derive(Debug)]
pub struct CocoIndex {
    images: Vec<CocoImage>,
    anns_per_image: HashMap<u64, Vec<CocoAnnotation>>,
}

impl CocoIndex {
    /// Builds the index, keeping only annotations of `category_id`.
    pub fn new(coco: CocoFile, category_id: u64) -> Self {
        let mut anns_per_image: HashMap<u64, Vec<CocoAnnotation>> = HashMap::new();
        for ann in coco.annotations {
            if ann.category_id == category_id {
                anns_per_image.entry(ann.image_id).or_default().push(ann);
            }
        }

        Self {
            images: coco.images,
            anns_per_image,
        }
    }

    /// All image records, in file order.
    pub fn images(&self) -> &[CocoImage] {
        &self.images
    }

    /// Target-category annotations for an image; empty slice for a
    /// negative image.
    pub fn annotations_for(&self, image_id: u64) -> &[CocoAnnotation] {
        self.anns_per_image
            .get(&image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coco_json() -> &'static str {
        r#"{
            "images": [
                {"id": 10, "width": 640, "height": 512, "file_name": "thermal_8_bit/FLIR_00001.jpeg"},
                {"id": 11, "width": 640, "height": 512, "file_name": "thermal_8_bit/FLIR_00002.jpeg"}
            ],
            "categories": [
                {"id": 1, "name": "person"},
                {"id": 3, "name": "car"}
            ],
            "annotations": [
                {"id": 1, "image_id": 10, "category_id": 1, "bbox": [10.0, 20.0, 30.0, 40.0]},
                {"id": 2, "image_id": 10, "category_id": 3, "bbox": [0.0, 0.0, 50.0, 50.0]},
                {"id": 3, "image_id": 10, "category_id": 1, "bbox": [100.0, 100.0, 20.0, 60.0]}
            ]
        }"#
    }

    #[test]
    fn test_parse_basic() {
        let coco = from_coco_str(sample_coco_json()).expect("parse failed");
        assert_eq!(coco.images.len(), 2);
        assert_eq!(coco.annotations.len(), 3);
        assert_eq!(coco.categories.len(), 2);
        assert_eq!(coco.images[0].file_name, "thermal_8_bit/FLIR_00001.jpeg");
    }

    #[test]
    fn test_index_groups_target_category_only() {
        let coco = from_coco_str(sample_coco_json()).expect("parse failed");
        let index = CocoIndex::new(coco, PERSON_CATEGORY_ID);

        let anns = index.annotations_for(10);
        assert_eq!(anns.len(), 2);
        assert!(anns.iter().all(|a| a.category_id == PERSON_CATEGORY_ID));

        // Image 11 has no person annotations: negative sample.
        assert!(index.annotations_for(11).is_empty());
    }

    #[test]
    fn test_annotation_bbox_conversion() {
        let coco = from_coco_str(sample_coco_json()).expect("parse failed");
        let bbox = coco.annotations[0].bbox();
        assert_eq!(bbox, BBoxXYWH::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn test_missing_categories_defaults_empty() {
        let json = r#"{"images": [], "annotations": []}"#;
        let coco = from_coco_str(json).expect("parse failed");
        assert!(coco.categories.is_empty());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_coco_json(Path::new("no/such/annotations.json")).unwrap_err();
        assert!(matches!(err, ThermoprepError::Io(_)));
    }
}
