pub mod annotate;
pub mod coordinate_remap;
pub mod image_ops;
pub mod nms;
pub mod output_decoder;
pub mod proximity;

pub use annotate::{annotate, encode_png};
pub use coordinate_remap::remap_box;
pub use image_ops::{encode, letterbox};
pub use nms::{nms, Nms};
pub use output_decoder::decode;
pub use proximity::dedup_by_proximity;
