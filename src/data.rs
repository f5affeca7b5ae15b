mod config_ort;
mod input_wrapper;
mod letterbox_params;
mod raw_detection;

pub use config_ort::ConfigOrt;
pub use input_wrapper::X;
pub use letterbox_params::LetterboxParams;
pub use raw_detection::RawDetection;

pub(crate) const CROSS_MARK: &str = "❌";
