use serde::{Deserialize, Serialize};

/// Inverse-mapping parameters recorded by the letterbox transform for one image.
///
/// `pad_w` / `pad_h` are the left and top borders; the right and bottom borders take any odd remainder.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LetterboxParams {
    pub ratio: f32,
    pub pad_w: f32,
    pub pad_h: f32,
    pub target_width: u32,
    pub target_height: u32,
    pub resized_width: u32,
    pub resized_height: u32,
    pub src_width: u32,
    pub src_height: u32,
}
