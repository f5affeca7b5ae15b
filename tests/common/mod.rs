#![allow(dead_code)]

use image::{Rgb, RgbImage};
use ndarray::Array;
use seal_detect::common::SealImage;
use seal_detect::data::X;
use seal_detect::Result;

/// A candidate row in model-input space: cx, cy, w, h, score.
pub type Row = [f32; 5];

/// Packs rows into the YOLO11 `[1, 5, N]` layout.
pub fn attributes_first(rows: &[Row]) -> X {
    let n = rows.len();
    let mut flat = vec![0.0f32; 5 * n];
    for (i, row) in rows.iter().enumerate() {
        for (f, v) in row.iter().enumerate() {
            flat[f * n + i] = *v;
        }
    }
    X::from(Array::from_shape_vec((1, 5, n), flat).unwrap().into_dyn())
}

/// A fake model that ignores its input and always answers with `rows`.
pub fn fixed_model(rows: Vec<Row>) -> impl Fn(&X) -> Result<X> + Send + Sync + 'static {
    move |input: &X| -> Result<X> {
        assert_eq!(input.ndim(), 4);
        Ok(attributes_first(&rows))
    }
}

pub fn solid_image(w: u32, h: u32, value: u8) -> SealImage {
    SealImage::new(RgbImage::from_pixel(w, h, Rgb([value, value, value])))
}

pub fn png_bytes(w: u32, h: u32, value: u8) -> Vec<u8> {
    seal_detect::detection_processing::encode_png(&RgbImage::from_pixel(w, h, Rgb([value, value, value]))).unwrap()
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
