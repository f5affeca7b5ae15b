//! Options for building the ONNX Runtime model invoker.

use serde::{Deserialize, Serialize};
use crate::common::InferenceDevice;
use crate::error::SealError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOrt {
    pub onnx_path: String,
    /// onnxruntime shared library to load. Falls back to `ORT_DYLIB_PATH` when unset.
    pub ort_lib_path: Option<String>,
    pub device: InferenceDevice,
    pub intra_threads: Option<usize>,
    /// Feed the session an f16 tensor instead of f32.
    pub fp16_input: bool,
    /// Sessions opened on the model, each serving one call at a time. Defaults to 1.
    pub num_sessions: Option<usize>,
}

impl Default for ConfigOrt {
    fn default() -> Self {
        Self {
            onnx_path: String::new(),
            ort_lib_path: None,
            device: InferenceDevice::CPU,
            intra_threads: None,
            fp16_input: false,
            num_sessions: None,
        }
    }
}

impl ConfigOrt {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_model(mut self, onnx_path: &str) -> Result<Self> {
        if onnx_path.trim().is_empty() {
            return Err(SealError::validation("model path is empty"));
        }
        self.onnx_path = onnx_path.to_string();
        Ok(self)
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Self {
        self.ort_lib_path = Some(ort_lib_path.to_string());
        self
    }

    pub fn with_device(mut self, device: InferenceDevice) -> Self {
        self.device = device;
        self
    }

    pub fn with_intra_threads(mut self, n: usize) -> Self {
        self.intra_threads = Some(n);
        self
    }

    pub fn with_fp16_input(mut self, x: bool) -> Self {
        self.fp16_input = x;
        self
    }

    pub fn with_num_sessions(mut self, n: usize) -> Self {
        self.num_sessions = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_model_path_is_rejected() {
        assert!(matches!(ConfigOrt::new().with_model("  "), Err(SealError::Validation(_))));
    }

    #[test]
    fn builder_sets_fields() {
        let c = ConfigOrt::new()
            .with_model("seal.onnx").unwrap()
            .with_device(InferenceDevice::CUDA(1))
            .with_intra_threads(2)
            .with_fp16_input(true)
            .with_num_sessions(3);
        assert_eq!(c.onnx_path, "seal.onnx");
        assert_eq!(c.device, InferenceDevice::CUDA(1));
        assert_eq!(c.intra_threads, Some(2));
        assert!(c.fp16_input);
        assert_eq!(c.num_sessions, Some(3));
        assert_eq!(c.ort_lib_path, None);
    }
}
