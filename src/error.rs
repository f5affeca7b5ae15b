use thiserror::Error;

/// Failures raised by the seal detection pipeline.
///
/// `InvalidImage` and `Inference` are scoped to a single image and never abort a batch.
/// `Validation` is only produced while building a detector.
#[derive(Error, Debug)]
pub enum SealError {
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("inference error: {0}")]
    Inference(String),
    #[error("invalid configuration: {0}")]
    Validation(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for SealError {
    fn from(err: image::ImageError) -> Self {
        SealError::InvalidImage(err.to_string())
    }
}

impl From<ndarray::ShapeError> for SealError {
    fn from(err: ndarray::ShapeError) -> Self {
        SealError::Inference(err.to_string())
    }
}

impl SealError {
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        SealError::InvalidImage(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        SealError::Inference(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        SealError::Validation(msg.into())
    }
}
