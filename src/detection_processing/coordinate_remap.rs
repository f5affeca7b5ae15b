use crate::common::SealBox;
use crate::data::LetterboxParams;

/// Maps a model-space `(left, top, width, height)` box back onto the source image.
///
/// Inverts the letterbox: remove the left/top padding, divide by the scale ratio, then clip
/// to the source image bounds.
pub fn remap_box(bbox: &SealBox, params: &LetterboxParams) -> SealBox {
    let (x, y, w, h) = unletterbox(bbox, params);
    SealBox::from_ltwh(x, y, w, h).clipped(params.src_width as f32, params.src_height as f32)
}

/// The unclipped inverse: `x -= dw; y -= dh; x /= r; y /= r; w /= r; h /= r`.
pub fn unletterbox(bbox: &SealBox, params: &LetterboxParams) -> (f32, f32, f32, f32) {
    let r = params.ratio;
    (
        (bbox.x1 - params.pad_w) / r,
        (bbox.y1 - params.pad_h) / r,
        bbox.w / r,
        bbox.h / r,
    )
}

/// Forward mapping of a source-image box into model space. Inverse of [`unletterbox`].
pub fn letterbox_box(bbox: &SealBox, params: &LetterboxParams) -> SealBox {
    let r = params.ratio;
    SealBox::from_ltwh(
        bbox.x1 * r + params.pad_w,
        bbox.y1 * r + params.pad_h,
        bbox.w * r,
        bbox.h * r,
    )
}
