//! Bounding box types for the two coordinate conventions this crate
//! touches: COCO pixel-space XYWH boxes on the way in, YOLO normalized
//! center-format boxes on the way out.

/// An axis-aligned bounding box in COCO convention: `(x, y)` is the
/// top-left corner in absolute pixels, `w`/`h` are the dimensions.
///
/// Note: this type does NOT reject malformed boxes (negative sizes,
/// coordinates outside the image). Annotations are taken as-is from the
/// source JSON; out-of-frame geometry is handled at write time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBoxXYWH {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BBoxXYWH {
    /// Creates a box from explicit coordinates.
    #[inline]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a box from a COCO `bbox` array (`[x, y, width, height]`).
    #[inline]
    pub fn from_coco(bbox: [f64; 4]) -> Self {
        let [x, y, w, h] = bbox;
        Self { x, y, w, h }
    }

    /// Returns true if the box lies fully within an image of the given size.
    /// Boxes that fail this are clamped on the way to the label file.
    #[inline]
    pub fn is_within(&self, image_width: f64, image_height: f64) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.w >= 0.0
            && self.h >= 0.0
            && self.x + self.w <= image_width
            && self.y + self.h <= image_height
    }

    /// Converts to a normalized YOLO center-format box.
    ///
    /// `cx = (x + w/2) / image_width`, `cy = (y + h/2) / image_height`,
    /// `w` and `h` divided by the respective image dimension. No clamping
    /// happens here; see [`YoloBox::clamped`].
    pub fn to_yolo(&self, image_width: f64, image_height: f64) -> YoloBox {
        YoloBox {
            cx: (self.x + self.w / 2.0) / image_width,
            cy: (self.y + self.h / 2.0) / image_height,
            w: self.w / image_width,
            h: self.h / image_height,
        }
    }
}

/// A bounding box in YOLO convention: center x/y plus width/height, all
/// normalized to `[0, 1]` by the image dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct YoloBox {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl YoloBox {
    /// Creates a box from explicit normalized coordinates.
    #[inline]
    pub fn new(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self { cx, cy, w, h }
    }

    /// Returns a copy with every field clamped to `[0, 1]`.
    ///
    /// Applied by the label writer so that annotations extending past the
    /// image frame never produce out-of-range label values.
    #[inline]
    pub fn clamped(&self) -> Self {
        Self {
            cx: self.cx.clamp(0.0, 1.0),
            cy: self.cy.clamp(0.0, 1.0),
            w: self.w.clamp(0.0, 1.0),
            h: self.h.clamp(0.0, 1.0),
        }
    }

    /// Converts back to a pixel-space COCO box.
    ///
    /// Inverse of [`BBoxXYWH::to_yolo`] for boxes that were in frame.
    pub fn to_xywh(&self, image_width: f64, image_height: f64) -> BBoxXYWH {
        let w = self.w * image_width;
        let h = self.h * image_height;
        BBoxXYWH {
            x: self.cx * image_width - w / 2.0,
            y: self.cy * image_height - h / 2.0,
            w,
            h,
        }
    }
}
