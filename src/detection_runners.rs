pub mod batch_runner;
pub mod inference_process;
pub mod model_invoker;
pub mod ort_detector;
mod seal_detector;

pub use batch_runner::BatchRunner;
pub use inference_process::{InferenceProcess, Preprocessed};
pub use model_invoker::ModelInvoker;
pub use ort_detector::OrtEngine;
pub use seal_detector::SealDetector;
