use std::time::Instant;
use crate::common::DetectionSet;
use crate::data::{LetterboxParams, X};
use crate::utils;
use crate::Result;

/// Model-ready tensor plus what is needed to map results back onto the source image.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub tensor: X,
    pub params: LetterboxParams,
}

pub trait InferenceProcess {
    type Input;

    /// Pre-process the input data.
    fn preprocess(&self, x: &Self::Input) -> Result<Preprocessed>;

    /// Executes the model on the preprocessed data.
    fn inference(&self, xs: &X) -> Result<X>;

    /// Post-process the model's output.
    fn postprocess(&self, ys: X, params: &LetterboxParams) -> Result<DetectionSet>;

    /// Executes the full pipeline, tracing each stage and optionally logging a profile line.
    fn forward(&self, x: &Self::Input, profile: bool) -> Result<DetectionSet> {
        let detect_time = Instant::now();

        let t_pre = Instant::now();
        let pre = self.preprocess(x)?;
        let t_pre = t_pre.elapsed();

        let mut _detect_elapsed = detect_time.elapsed();
        _detect_elapsed = utils::trace("TIME", "Preprocessing input", detect_time, _detect_elapsed);

        let t_exe = Instant::now();
        let ys = self.inference(&pre.tensor)?;
        let t_exe = t_exe.elapsed();

        _detect_elapsed = utils::trace("TIME", "Detection run", detect_time, _detect_elapsed);

        let t_post = Instant::now();
        let ys = self.postprocess(ys, &pre.params)?;
        let t_post = t_post.elapsed();

        utils::trace("TIME", "Postprocessing", detect_time, _detect_elapsed);

        if profile {
            log::info!("> Preprocess: {t_pre:?} | Inference: {t_exe:?} | Postprocess: {t_post:?}");
        }

        Ok(ys)
    }
}
