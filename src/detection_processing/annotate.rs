//! Debug rendering of detections. Never feeds back into detection results.

use std::io::Cursor;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use crate::common::DetectionSet;
use crate::Result;

pub const BOX_THICKNESS: u32 = 5;

pub(crate) fn get_class_colour(class: usize) -> Rgb<u8> {
    match class {
        0 => Rgb([255, 0, 0]),     // red (seal)
        _ => Rgb([0, 0, 255])      // blue (everything else)
    }
}

/// Returns a copy of `image` with a hollow rectangle drawn around every detection.
pub fn annotate(image: &RgbImage, detections: &DetectionSet) -> RgbImage {
    let mut img = image.clone();
    for det in detections {
        let (x, y, w, h) = det.bbox.as_xy_wh_i32();
        let colour = get_class_colour(det.class_id);
        for t in 0..BOX_THICKNESS as i32 {
            let (rw, rh) = (w - 2 * t, h - 2 * t);
            if rw <= 0 || rh <= 0 {
                break;
            }
            let rect = Rect::at(x + t, y + t).of_size(rw as u32, rh as u32);
            draw_hollow_rect_mut(&mut img, rect, colour);
        }
    }
    img
}

/// Encodes an image as an in-memory PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
