use std::sync::Arc;
use crate::common::{BatchInput, BatchRecord, Detection, DetectionSet, DetectorConfig, SealImage};
use crate::data::{LetterboxParams, X};
use crate::detection_processing::{dedup_by_proximity, decode, encode, letterbox, nms, remap_box};
use crate::detection_runners::batch_runner::BatchRunner;
use crate::detection_runners::inference_process::{InferenceProcess, Preprocessed};
use crate::detection_runners::model_invoker::ModelInvoker;
use crate::Result;

/// Single-image seal detection pipeline around an injected model.
///
/// Holds no mutable state, so one detector can serve any number of worker threads.
pub struct SealDetector {
    config: DetectorConfig,
    names: Vec<String>,
    model: Arc<dyn ModelInvoker>,
}

impl std::fmt::Debug for SealDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealDetector")
            .field("config", &self.config)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl SealDetector {
    /// Validates `config` and wraps `model`. Configuration errors surface here, never per image.
    pub fn new<M: ModelInvoker + 'static>(config: DetectorConfig, model: M) -> Result<Self> {
        Self::from_shared(config, Arc::new(model))
    }

    pub fn from_shared(config: DetectorConfig, model: Arc<dyn ModelInvoker>) -> Result<Self> {
        config.validate()?;

        // Class names: labels file, then model metadata, then the configured list
        let names = match (&config.labels_path, model.class_names()) {
            (Some(_), _) => config.resolve_class_names()?,
            (None, Some(parsed)) if !parsed.is_empty() => parsed,
            (None, _) => config.class_names.clone(),
        };

        log::info!(
            "Seal detector ready | Input: {}x{} | Conf: {} | IoU: {} | Min seal distance: {:?} | Classes: {:?}",
            config.target_width,
            config.target_height,
            config.confidence_threshold,
            config.iou_threshold,
            config.min_seal_distance,
            names,
        );

        Ok(Self { config, names, model })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Detects seals in one image. An empty set means no seal was found.
    pub fn detect(&self, image: &SealImage) -> Result<DetectionSet> {
        self.forward(image, self.config.profile)
    }

    /// Runs every input through the pipeline on `worker_count` workers, keeping input order.
    pub fn detect_batch(&self, inputs: &[BatchInput]) -> Vec<BatchRecord> {
        BatchRunner::new(self).run(inputs)
    }

    /// Same as [`SealDetector::detect_batch`] with an explicit pool size (at least one worker).
    pub fn detect_batch_with_workers(&self, inputs: &[BatchInput], workers: usize) -> Vec<BatchRecord> {
        if workers == 0 {
            log::warn!("Batch requested with 0 workers, using 1");
        }
        BatchRunner::with_workers(self, workers.max(1)).run(inputs)
    }

    fn label_for(&self, class_id: usize) -> Option<String> {
        self.names.get(class_id).cloned()
    }
}

impl InferenceProcess for SealDetector {
    type Input = SealImage;

    fn preprocess(&self, x: &Self::Input) -> Result<Preprocessed> {
        let (padded, params) = letterbox(
            x,
            self.config.target_width,
            self.config.target_height,
            self.config.pad_value,
            self.config.allow_upscale,
        )?;
        let tensor = encode(&padded, self.config.channel_order)?;
        Ok(Preprocessed { tensor, params })
    }

    fn inference(&self, xs: &X) -> Result<X> {
        self.model.invoke(xs)
    }

    fn postprocess(&self, ys: X, params: &LetterboxParams) -> Result<DetectionSet> {
        let mut candidates = decode(&ys, self.config.output_layout, self.config.confidence_threshold)?;
        let n_decoded = candidates.len();

        nms(&mut candidates, self.config.iou_threshold);
        let n_kept = candidates.len();

        let detections: Vec<Detection> = candidates
            .iter()
            .map(|raw| Detection {
                class_id: raw.class_id,
                bbox: remap_box(&raw.bbox, params),
                label: self.label_for(raw.class_id),
                confidence: raw.confidence,
            })
            .collect();

        let detections = match self.config.min_seal_distance {
            Some(distance) => dedup_by_proximity(detections, distance),
            None => detections,
        };

        log::debug!(
            "Candidates: {} above threshold | {} after NMS | {} final",
            n_decoded,
            n_kept,
            detections.len()
        );

        Ok(DetectionSet::from(detections))
    }
}
