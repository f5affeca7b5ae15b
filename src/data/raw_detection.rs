use crate::common::SealBox;
use crate::detection_processing::nms::Nms;

/// A decoded candidate in model-input space. Never leaves the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawDetection {
    pub bbox: SealBox,
    pub confidence: f32,
    pub class_id: usize,
}

impl RawDetection {
    pub fn new(bbox: SealBox, confidence: f32, class_id: usize) -> Self {
        Self {
            bbox,
            confidence,
            class_id,
        }
    }
}

impl Nms for RawDetection {
    fn iou(&self, other: &Self) -> f32 {
        self.bbox.iou(&other.bbox)
    }

    fn confidence(&self) -> f32 {
        self.confidence
    }
}
