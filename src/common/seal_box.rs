use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as top-left corner plus size, with the bottom-right corner cached.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct SealBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub w: f32,
    pub h: f32,
}

impl SealBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            w: x2 - x1,
            h: y2 - y1,
        }
    }

    /// Builds a box from `(left, top, width, height)`.
    pub fn from_ltwh(left: f32, top: f32, w: f32, h: f32) -> Self {
        Self::default().with_x1y1_wh(left, top, w, h)
    }

    /// Builds a box from `(center-x, center-y, width, height)`.
    pub fn from_cxcywh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::default().with_cxcy_wh(cx, cy, w, h)
    }

    /// Returns the width of the bounding box.
    pub fn width(&self) -> f32 {
        self.w
    }

    /// Returns the height of the bounding box.
    pub fn height(&self) -> f32 {
        self.h
    }

    /// Returns the center x-coordinate of the bounding box.
    pub fn cx(&self) -> f32 {
        self.x1 + self.w / 2.
    }

    /// Returns the center y-coordinate of the bounding box.
    pub fn cy(&self) -> f32 {
        self.y1 + self.h / 2.
    }

    /// Returns the bounding box coordinates and size as `(x, y, w, h)`.
    pub fn xy1_wh(&self) -> (f32, f32, f32, f32) {
        (self.x1, self.y1, self.w, self.h)
    }

    /// Returns the corners as `[x_min, y_min, x_max, y_max]`.
    pub fn xyxy(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Computes the area of the bounding box.
    pub fn area(&self) -> f32 {
        self.h.max(0.) * self.w.max(0.)
    }

    /// Computes the intersection area between this bounding box and another.
    pub fn intersect(&self, other: &SealBox) -> f32 {
        let left = self.x1.max(other.x1);
        let right = (self.x1 + self.w).min(other.x1 + other.w);
        let top = self.y1.max(other.y1);
        let bottom = (self.y1 + self.h).min(other.y1 + other.h);
        (right - left).max(0.) * (bottom - top).max(0.)
    }

    /// Computes the union area between this bounding box and another.
    pub fn union(&self, other: &SealBox) -> f32 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Intersection over union. Two degenerate boxes have an IoU of zero.
    pub fn iou(&self, other: &SealBox) -> f32 {
        let union = self.union(other);
        if union <= 0. {
            return 0.;
        }
        self.intersect(other) / union
    }

    /// Euclidean distance between the two box centers.
    pub fn center_distance(&self, other: &SealBox) -> f32 {
        (self.cx() - other.cx()).hypot(self.cy() - other.cy())
    }

    /// Clips the box to `[0, width] x [0, height]`.
    pub fn clipped(&self, width: f32, height: f32) -> Self {
        let x1 = self.x1.clamp(0., width);
        let y1 = self.y1.clamp(0., height);
        let x2 = self.x2.clamp(0., width);
        let y2 = self.y2.clamp(0., height);
        Self::new(x1, y1, x2, y2)
    }

    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (self.x1.round() as i32,
         self.y1.round() as i32,
         self.w.round() as i32,
         self.h.round() as i32)
    }

    /// Sets the bounding box's coordinates and dimensions using `(x, y, w, h)`.
    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.w = w;
        self.h = h;

        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    /// Sets the bounding box's coordinates and dimensions using `(cx, cy, w, h)`.
    pub fn with_cxcy_wh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - (w / 2.0);
        self.y1 = cy - (h / 2.0);
        self.w = w;
        self.h = h;

        self.x2 = cx + (w / 2.0);
        self.y2 = cy + (h / 2.0);
        self
    }
}
