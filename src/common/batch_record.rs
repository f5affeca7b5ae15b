use std::path::PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::common::{DetectionSet, SealImage};
use crate::error::SealError;
use crate::Result;

/// One unit of batch work. Decoding happens on the worker that picks it up.
#[derive(Debug, Clone)]
pub enum BatchInput {
    Path(PathBuf),
    Encoded { id: String, bytes: Vec<u8> },
    Decoded { id: String, image: SealImage },
}

impl BatchInput {
    pub fn source(&self) -> String {
        match self {
            BatchInput::Path(path) => path.display().to_string(),
            BatchInput::Encoded { id, .. } | BatchInput::Decoded { id, .. } => id.clone(),
        }
    }

    /// Produces the pixel buffer, decoding if needed.
    pub fn load(&self) -> Result<SealImage> {
        match self {
            BatchInput::Path(path) => SealImage::open(path),
            BatchInput::Encoded { bytes, .. } => SealImage::decode(bytes),
            BatchInput::Decoded { image, .. } => Ok(image.clone()),
        }
    }
}

impl From<PathBuf> for BatchInput {
    fn from(path: PathBuf) -> Self {
        BatchInput::Path(path)
    }
}

/// Per-record outcome marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordStatus {
    Ok,
    InvalidImage { message: String },
    InferenceError { message: String },
}

impl From<&SealError> for RecordStatus {
    fn from(err: &SealError) -> Self {
        match err {
            SealError::InvalidImage(message) => RecordStatus::InvalidImage { message: message.clone() },
            other => RecordStatus::InferenceError { message: other.to_string() },
        }
    }
}

/// Result for one batch input, placed at the same index as its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub source: String,
    pub detections: DetectionSet,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
    pub status: RecordStatus,
}

impl BatchRecord {
    pub fn from_outcome(source: String, outcome: Result<DetectionSet>) -> Self {
        match outcome {
            Ok(detections) => Self {
                source,
                count: detections.count(),
                detections,
                timestamp: Utc::now(),
                status: RecordStatus::Ok,
            },
            Err(err) => Self {
                source,
                detections: DetectionSet::default(),
                count: 0,
                timestamp: Utc::now(),
                status: RecordStatus::from(&err),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == RecordStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Detection, SealBox};

    #[test]
    fn failures_become_error_markers() {
        let rec = BatchRecord::from_outcome("a.png".into(), Err(SealError::invalid_image("zero width")));
        assert!(!rec.is_ok());
        assert_eq!(rec.count, 0);
        assert_eq!(rec.status, RecordStatus::InvalidImage { message: "zero width".into() });

        let rec = BatchRecord::from_outcome("b.png".into(), Err(SealError::inference("bad shape")));
        assert!(matches!(rec.status, RecordStatus::InferenceError { .. }));
    }

    #[test]
    fn success_counts_detections() {
        let set = DetectionSet::from(vec![
            Detection::new(0, SealBox::from_ltwh(0., 0., 5., 5.), None, 0.9),
            Detection::new(0, SealBox::from_ltwh(50., 50., 5., 5.), None, 0.8),
        ]);
        let rec = BatchRecord::from_outcome("c.png".into(), Ok(set));
        assert!(rec.is_ok());
        assert_eq!(rec.count, 2);

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["status"]["kind"], "ok");
        assert_eq!(json["detections"].as_array().map(|a| a.len()), Some(2));
    }
}
