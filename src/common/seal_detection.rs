use serde::{Deserialize, Serialize};
use crate::common::SealBox;

/// One detected seal, expressed in original-image pixel coordinates.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_id: usize,
    pub bbox: SealBox,
    pub label: Option<String>,
    pub confidence: f32,
}

impl Detection {
    pub fn new(class_id: usize, bbox: SealBox, label: Option<String>, confidence: f32) -> Self {
        Self {
            class_id,
            bbox,
            label,
            confidence,
        }
    }

    pub fn get_label(&self) -> String {
        self.label.clone().unwrap_or("Unknown".to_string())
    }
}
