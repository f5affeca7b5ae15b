use serde::{Deserialize, Serialize};
use crate::common::Detection;

/// Detections for one image, in the order they survived suppression.
///
/// An empty set is the normal result for an image with no seal on it.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionSet {
    detections: Vec<Detection>,
}

impl std::fmt::Debug for DetectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut f = f.debug_struct("DetectionSet");
        if !self.detections.is_empty() {
            f.field("Detections", &self.detections);
        }
        f.finish()
    }
}

impl From<Vec<Detection>> for DetectionSet {
    fn from(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl IntoIterator for DetectionSet {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.into_iter()
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}

impl DetectionSet {
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    /// Number of seals found.
    pub fn count(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn has_seal(&self) -> bool {
        !self.detections.is_empty()
    }

    /// Boxes as `[x_min, y_min, x_max, y_max]`, in set order.
    pub fn to_xyxy(&self) -> Vec<[f32; 4]> {
        self.detections.iter().map(|d| d.bbox.xyxy()).collect()
    }
}
