mod batch_record;
mod detection_set;
mod detector_config;
mod inference_device;
mod seal_box;
mod seal_detection;
mod seal_image;

pub use batch_record::*;
pub use detection_set::*;
pub use detector_config::*;
pub use inference_device::*;
pub use seal_box::*;
pub use seal_detection::*;
pub use seal_image::*;
