use std::path::Path;
use fast_image_resize::images::Image as FirImage;
use fast_image_resize::PixelType;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use crate::error::SealError;
use crate::Result;

/// A decoded 3-channel RGB image. Immutable once built; the pipeline only borrows it.
#[derive(Debug, Clone, Default)]
pub struct SealImage {
    pub image: RgbImage,
}

impl std::ops::Deref for SealImage {
    type Target = RgbImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl From<DynamicImage> for SealImage {
    fn from(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }
}

impl From<GrayImage> for SealImage {
    fn from(image: GrayImage) -> Self {
        Self {
            image: DynamicImage::from(image).to_rgb8(),
        }
    }
}

impl From<RgbImage> for SealImage {
    fn from(image: RgbImage) -> Self {
        Self { image }
    }
}

impl From<RgbaImage> for SealImage {
    fn from(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::from(image).to_rgb8(),
        }
    }
}

impl From<SealImage> for RgbImage {
    fn from(image: SealImage) -> Self {
        image.image
    }
}

impl SealImage {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Decodes an encoded byte stream (PNG, JPEG, ...) into an RGB image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from(image))
    }

    /// Opens and decodes an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| SealError::invalid_image(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from(image))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Copies the pixels into a `fast_image_resize` image.
    pub fn to_fir_image(&self) -> Result<FirImage<'static>> {
        let (width, height) = self.image.dimensions();
        FirImage::from_vec_u8(width, height, self.image.as_raw().clone(), PixelType::U8x3)
            .map_err(|e| SealError::invalid_image(format!("Failed to convert to FirImage: {e}")))
    }

    pub fn as_rgb8(&self) -> &RgbImage {
        &self.image
    }
}
