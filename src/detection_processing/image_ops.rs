//! Letterbox transform and tensor encoding.
//!
//! Resize code adapted from: https://github.com/jamjamjon

use fast_image_resize::{
    images::{CroppedImageMut, Image as FirImage},
    pixels::PixelType,
    FilterType, ResizeAlg, ResizeOptions, Resizer,
};
use crate::common::{ChannelOrder, SealImage};
use crate::data::{LetterboxParams, X};
use crate::error::SealError;
use crate::Result;

/// Scales `img` to fit `target_w x target_h` without distortion and pads the rest with `bg`.
///
/// The left/top border gets half the slack rounded down, the right/bottom border gets the rest.
pub fn letterbox(
    img: &SealImage,
    target_w: u32,
    target_h: u32,
    bg: u8,
    allow_upscale: bool,
) -> Result<(FirImage<'static>, LetterboxParams)> {
    let (w0, h0) = img.dimensions();
    if w0 == 0 || h0 == 0 {
        return Err(SealError::invalid_image(format!("image has a zero dimension ({w0}x{h0})")));
    }
    if target_w == 0 || target_h == 0 {
        return Err(SealError::invalid_image(format!("target has a zero dimension ({target_w}x{target_h})")));
    }

    let mut ratio = (target_w as f64 / w0 as f64).min(target_h as f64 / h0 as f64);
    if !allow_upscale {
        ratio = ratio.min(1.0);
    }
    // The clamp only bites on an axis that rounds below one pixel. `ratio` stays uniform, and
    // the remapper's clip to the source bounds absorbs the difference on that axis.
    let new_w = ((w0 as f64 * ratio).round() as u32).clamp(1, target_w);
    let new_h = ((h0 as f64 * ratio).round() as u32).clamp(1, target_h);

    let left = (target_w - new_w) / 2;
    let top = (target_h - new_h) / 2;

    let mut padded = FirImage::from_vec_u8(
        target_w,
        target_h,
        vec![bg; target_w as usize * target_h as usize * 3],
        PixelType::U8x3,
    )
    .map_err(|e| SealError::invalid_image(format!("letterbox canvas: {e}")))?;

    let src = img.to_fir_image()?;
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    let mut resizer = Resizer::new();
    {
        let mut cropped = CroppedImageMut::new(&mut padded, left, top, new_w, new_h)
            .map_err(|e| SealError::invalid_image(format!("letterbox crop: {e}")))?;
        resizer
            .resize(&src, &mut cropped, &options)
            .map_err(|e| SealError::invalid_image(format!("letterbox resize: {e}")))?;
    }

    let params = LetterboxParams {
        ratio: ratio as f32,
        pad_w: left as f32,
        pad_h: top as f32,
        target_width: target_w,
        target_height: target_h,
        resized_width: new_w,
        resized_height: new_h,
        src_width: w0,
        src_height: h0,
    };

    Ok((padded, params))
}

/// Converts an interleaved RGB image into a `[1, 3, H, W]` tensor scaled to `[0, 1]`.
pub fn encode(img: &FirImage, order: ChannelOrder) -> Result<X> {
    let buf = img.buffer();
    let w = img.width() as usize;
    let h = img.height() as usize;

    if buf.len() != w * h * 3 {
        return Err(SealError::invalid_image(format!(
            "Unexpected buffer size: got {}, expected {}",
            buf.len(),
            w * h * 3
        )));
    }

    let hw = w * h;
    let (c0, c2) = match order {
        ChannelOrder::Rgb => (0, 2),
        ChannelOrder::Bgr => (2, 0),
    };

    let mut out = vec![0.0f32; buf.len()];
    for (i, px) in buf.chunks_exact(3).enumerate() {
        out[i + c0 * hw] = px[0] as f32 / 255.0;
        out[i + hw] = px[1] as f32 / 255.0;
        out[i + c2 * hw] = px[2] as f32 / 255.0;
    }

    X::from_shape_vec(&[1, 3, h, w], out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use crate::common::SealBox;
    use crate::detection_processing::remap_box;

    fn solid(w: u32, h: u32, px: [u8; 3]) -> SealImage {
        SealImage::new(RgbImage::from_pixel(w, h, Rgb(px)))
    }

    fn pixel(img: &FirImage, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * img.width() + x) * 3) as usize;
        let b = img.buffer();
        [b[i], b[i + 1], b[i + 2]]
    }

    #[test]
    fn zero_dimension_is_invalid_image() {
        let err = letterbox(&SealImage::new(RgbImage::new(0, 10)), 640, 640, 114, true).unwrap_err();
        assert!(matches!(err, SealError::InvalidImage(_)));
    }

    #[test]
    fn landscape_image_is_padded_vertically() {
        let (out, p) = letterbox(&solid(1000, 800, [200, 10, 10]), 640, 640, 114, false).unwrap();
        assert!((p.ratio - 0.64).abs() < 1e-6);
        assert_eq!((p.resized_width, p.resized_height), (640, 512));
        assert_eq!((p.pad_w, p.pad_h), (0., 64.));
        assert_eq!((out.width(), out.height()), (640, 640));
        assert_eq!(pixel(&out, 10, 10), [114, 114, 114]);
        assert_eq!(pixel(&out, 10, 63), [114, 114, 114]);
        assert_eq!(pixel(&out, 320, 320), [200, 10, 10]);
        assert_eq!(pixel(&out, 10, 639), [114, 114, 114]);
    }

    #[test]
    fn odd_slack_goes_to_right_and_bottom() {
        let (out, p) = letterbox(&solid(101, 99, [0, 0, 0]), 640, 640, 114, false).unwrap();
        assert_eq!(p.ratio, 1.0);
        // 539 and 541 pixels of slack
        assert_eq!((p.pad_w, p.pad_h), (269., 270.));
        assert_eq!(pixel(&out, 268, 300), [114, 114, 114]);
        assert_eq!(pixel(&out, 269, 300), [0, 0, 0]);
        assert_eq!(pixel(&out, 369, 300), [0, 0, 0]);
        assert_eq!(pixel(&out, 370, 300), [114, 114, 114]);
        assert_eq!(pixel(&out, 300, 269), [114, 114, 114]);
        assert_eq!(pixel(&out, 300, 368), [0, 0, 0]);
        assert_eq!(pixel(&out, 300, 369), [114, 114, 114]);
    }

    #[test]
    fn upscale_follows_configuration() {
        let (_, up) = letterbox(&solid(320, 160, [1, 2, 3]), 640, 640, 114, true).unwrap();
        assert_eq!(up.ratio, 2.0);
        assert_eq!((up.resized_width, up.resized_height), (640, 320));
        assert_eq!(up.pad_h, 160.);

        let (_, fixed) = letterbox(&solid(320, 160, [1, 2, 3]), 640, 640, 114, false).unwrap();
        assert_eq!(fixed.ratio, 1.0);
        assert_eq!((fixed.pad_w, fixed.pad_h), (160., 240.));
    }

    #[test]
    fn extreme_aspect_keeps_at_least_one_pixel() {
        let (_, p) = letterbox(&solid(10_000, 1, [9, 9, 9]), 640, 640, 114, true).unwrap();
        assert_eq!(p.resized_width, 640);
        assert_eq!(p.resized_height, 1);

        // the one-pixel strip maps back inside the single source row
        let strip = SealBox::from_ltwh(0., p.pad_h, 640., 1.);
        let back = remap_box(&strip, &p);
        assert_eq!((back.x1, back.y1), (0., 0.));
        assert!((back.x2 - 10_000.).abs() < 0.01);
        assert_eq!(back.y2, 1.);
    }

    #[test]
    fn encode_is_channel_first_and_normalized() {
        let (img, _) = letterbox(&solid(2, 2, [255, 0, 51]), 2, 2, 114, true).unwrap();
        let x = encode(&img, ChannelOrder::Rgb).unwrap();
        assert_eq!(x.shape(), &[1, 3, 2, 2]);
        assert_eq!(x[[0, 0, 1, 1]], 1.0);
        assert_eq!(x[[0, 1, 0, 0]], 0.0);
        assert!((x[[0, 2, 0, 1]] - 0.2).abs() < 1e-6);
        assert!(x.iter().all(|v| (0.0..=1.0).contains(v)));

        let bgr = encode(&img, ChannelOrder::Bgr).unwrap();
        assert!((bgr[[0, 0, 0, 0]] - 0.2).abs() < 1e-6);
        assert_eq!(bgr[[0, 2, 0, 0]], 1.0);
    }
}
