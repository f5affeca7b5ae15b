use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::SealError;
use crate::{utils, Result};

/// Largest accepted model input side, in pixels.
pub const MAX_TARGET_SIDE: u32 = 8192;

/// Channel order the model was trained on. Decoded images are always RGB.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default] Rgb,
    Bgr,
}

/// How the raw output table is laid out after the batch axis is dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// `[4 + nc, N]`: one column per candidate (YOLOv8 / YOLO11 export).
    #[default] AttributesFirst,
    /// `[N, 4 + nc]`: one row per candidate.
    CandidatesFirst,
}

/// Settings for a seal detection pipeline. Fixed for the lifetime of a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub target_width: u32,
    pub target_height: u32,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    /// Enables the proximity pass when set.
    pub min_seal_distance: Option<f32>,
    pub allow_upscale: bool,
    pub worker_count: usize,
    pub pad_value: u8,
    pub channel_order: ChannelOrder,
    pub output_layout: OutputLayout,
    pub class_names: Vec<String>,
    pub labels_path: Option<String>,
    pub profile: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            target_width: 640,
            target_height: 640,
            confidence_threshold: 0.7,
            iou_threshold: 0.45,
            min_seal_distance: None,
            allow_upscale: true,
            worker_count: 4,
            pad_value: 114,
            channel_order: ChannelOrder::Rgb,
            output_layout: OutputLayout::AttributesFirst,
            class_names: vec!["seal".to_string()],
            labels_path: None,
            profile: false,
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads a JSON config. Missing keys take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: DetectorConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    pub fn with_confidence_threshold(mut self, x: f32) -> Self {
        self.confidence_threshold = x;
        self
    }

    pub fn with_iou_threshold(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn with_min_seal_distance(mut self, x: Option<f32>) -> Self {
        self.min_seal_distance = x;
        self
    }

    pub fn with_allow_upscale(mut self, x: bool) -> Self {
        self.allow_upscale = x;
        self
    }

    pub fn with_worker_count(mut self, n: usize) -> Self {
        self.worker_count = n;
        self
    }

    pub fn with_pad_value(mut self, x: u8) -> Self {
        self.pad_value = x;
        self
    }

    pub fn with_channel_order(mut self, x: ChannelOrder) -> Self {
        self.channel_order = x;
        self
    }

    pub fn with_output_layout(mut self, x: OutputLayout) -> Self {
        self.output_layout = x;
        self
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.class_names = names.iter().map(|x| x.to_string()).collect::<Vec<String>>();
        self
    }

    pub fn with_labels_path(mut self, path: &str) -> Self {
        self.labels_path = Some(path.to_string());
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    /// Checks every value range. Called when a detector is built, never per image.
    pub fn validate(&self) -> Result<()> {
        check_unit_range("confidence_threshold", self.confidence_threshold)?;
        check_unit_range("iou_threshold", self.iou_threshold)?;
        if self.target_width == 0 || self.target_height == 0 {
            return Err(SealError::validation(format!(
                "target size must be non-zero, got {}x{}",
                self.target_width, self.target_height
            )));
        }
        if self.target_width > MAX_TARGET_SIDE || self.target_height > MAX_TARGET_SIDE {
            return Err(SealError::validation(format!(
                "target size must be at most {MAX_TARGET_SIDE}x{MAX_TARGET_SIDE}, got {}x{}",
                self.target_width, self.target_height
            )));
        }
        if self.worker_count == 0 {
            return Err(SealError::validation("worker_count must be at least 1"));
        }
        if let Some(distance) = self.min_seal_distance {
            if !distance.is_finite() || distance < 0. {
                return Err(SealError::validation(format!(
                    "min_seal_distance must be a non-negative number, got {distance}"
                )));
            }
        }
        if self.class_names.is_empty() && self.labels_path.is_none() {
            return Err(SealError::validation("at least one class name is required"));
        }
        Ok(())
    }

    /// Class names, read from `labels_path` when one is configured.
    pub fn resolve_class_names(&self) -> Result<Vec<String>> {
        match &self.labels_path {
            Some(path) => {
                let names: Vec<String> = utils::file_to_vec(path)?
                    .into_iter()
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty())
                    .collect();
                if names.is_empty() {
                    return Err(SealError::validation(format!("labels file {path} is empty")));
                }
                Ok(names)
            }
            None => Ok(self.class_names.clone()),
        }
    }
}

fn check_unit_range(name: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SealError::validation(format!("{name} must be within [0, 1], got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_seal_model() {
        let c = DetectorConfig::default();
        assert_eq!((c.target_width, c.target_height), (640, 640));
        assert_eq!(c.confidence_threshold, 0.7);
        assert_eq!(c.iou_threshold, 0.45);
        assert_eq!(c.min_seal_distance, None);
        assert!(c.allow_upscale);
        assert_eq!(c.worker_count, 4);
        assert_eq!(c.class_names, vec!["seal".to_string()]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn thresholds_outside_unit_range_are_rejected() {
        let bad = [
            DetectorConfig::new().with_confidence_threshold(1.5),
            DetectorConfig::new().with_confidence_threshold(-0.1),
            DetectorConfig::new().with_iou_threshold(f32::NAN),
            DetectorConfig::new().with_iou_threshold(2.0),
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(SealError::Validation(_))), "{c:?}");
        }
    }

    #[test]
    fn other_ranges_are_checked() {
        assert!(DetectorConfig::new().with_target_size(0, 640).validate().is_err());
        assert!(DetectorConfig::new().with_target_size(40_000, 40_000).validate().is_err());
        assert!(DetectorConfig::new().with_target_size(640, MAX_TARGET_SIDE + 1).validate().is_err());
        assert!(DetectorConfig::new().with_target_size(MAX_TARGET_SIDE, MAX_TARGET_SIDE).validate().is_ok());
        assert!(DetectorConfig::new().with_worker_count(0).validate().is_err());
        assert!(DetectorConfig::new().with_min_seal_distance(Some(-1.)).validate().is_err());
        assert!(DetectorConfig::new().with_min_seal_distance(Some(f32::INFINITY)).validate().is_err());
        assert!(DetectorConfig::new().with_names(&[]).validate().is_err());
        assert!(DetectorConfig::new().with_min_seal_distance(Some(0.)).validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c: DetectorConfig =
            serde_json::from_str(r#"{"confidence_threshold": 0.5, "channel_order": "bgr"}"#).unwrap();
        assert_eq!(c.confidence_threshold, 0.5);
        assert_eq!(c.channel_order, ChannelOrder::Bgr);
        assert_eq!(c.iou_threshold, 0.45);
        assert_eq!(c.output_layout, OutputLayout::AttributesFirst);
    }
}
