mod utils;
pub mod common;
pub mod data;
pub mod detection_processing;
pub mod detection_runners;
pub mod error;

use image::{Rgb, RgbImage};
use crate::common::{DetectorConfig, SealImage};
use crate::data::ConfigOrt;
use crate::detection_runners::{OrtEngine, SealDetector};

pub use crate::common::{BatchInput, BatchRecord, Detection, DetectionSet, RecordStatus, SealBox};
pub use crate::error::SealError;

pub type Result<T, E = SealError> = std::result::Result<T, E>;

/// Loads the ONNX model described by `ort_options` and builds a ready-to-use detector.
///
/// A blank frame is pushed through the full pipeline once so a broken model fails here
/// rather than on the first real image.
///
/// Unless `ort_options` fixes the session count, one session is opened per batch worker.
pub fn init_detector(ort_options: &ConfigOrt, config: DetectorConfig) -> Result<SealDetector> {
    let mut ort_options = ort_options.clone();
    if ort_options.num_sessions.is_none() {
        ort_options = ort_options.with_num_sessions(config.worker_count);
    }
    log::info!("Initializing ORT sessions with ({}) execution provider", ort_options.device);
    let engine = OrtEngine::new(&ort_options)?;
    let detector = SealDetector::new(config, engine)?;

    let (w, h) = (detector.config().target_width, detector.config().target_height);
    let warmup = SealImage::new(RgbImage::from_pixel(w, h, Rgb([114, 114, 114])));
    detector.detect(&warmup)?;

    Ok(detector)
}
