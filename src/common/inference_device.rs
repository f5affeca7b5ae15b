use serde::{Deserialize, Serialize};

/// Execution provider the ONNX Runtime session is built for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InferenceDevice {
    #[default] CPU,
    CUDA(usize),
    TensorRT(usize),
}

// Hardcoded device names. Storing the "proper" spelling and the lowercase version.
const CPU: [&str; 2] = ["CPU", "cpu"];
const CUDA: [&str; 2] = ["CUDA", "cuda"];
const TENSOR_RT: [&str; 2] = ["TensorRT", "tensorrt"];

impl InferenceDevice {
    pub fn from_str(device: &str, device_id: usize) -> Option<Self> {
        match device.to_lowercase().as_str() {
            "cpu" => Some(InferenceDevice::CPU),
            "cuda" => Some(InferenceDevice::CUDA(device_id)),
            "tensorrt" => Some(InferenceDevice::TensorRT(device_id)),
            _ => None,
        }
    }

    /// Parses `cpu`, `cuda`, `cuda:1`, `tensorrt:0` and so on.
    pub fn parse(spec: &str) -> Option<Self> {
        match spec.split_once(':') {
            Some((device, id)) => Self::from_str(device, id.trim().parse().ok()?),
            None => Self::from_str(spec, 0),
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            InferenceDevice::CPU => CPU[0],
            InferenceDevice::CUDA(_) => CUDA[0],
            InferenceDevice::TensorRT(_) => TENSOR_RT[0],
        }
    }

    pub fn str_lowercase(&self) -> &'static str {
        match self {
            InferenceDevice::CPU => CPU[1],
            InferenceDevice::CUDA(_) => CUDA[1],
            InferenceDevice::TensorRT(_) => TENSOR_RT[1],
        }
    }

    pub fn all_inference_devices() -> Vec<String> {
        vec![
            InferenceDevice::CPU.str_lowercase().to_string(),
            InferenceDevice::CUDA(0).str_lowercase().to_string(),
            InferenceDevice::TensorRT(0).str_lowercase().to_string(),
        ]
    }
}

impl std::fmt::Display for InferenceDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceDevice::CPU => write!(f, "{}", self.str()),
            InferenceDevice::CUDA(id) | InferenceDevice::TensorRT(id) => write!(f, "{}:{}", self.str(), id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_device_with_and_without_id() {
        assert_eq!(InferenceDevice::parse("cpu"), Some(InferenceDevice::CPU));
        assert_eq!(InferenceDevice::parse("CUDA"), Some(InferenceDevice::CUDA(0)));
        assert_eq!(InferenceDevice::parse("tensorrt:2"), Some(InferenceDevice::TensorRT(2)));
        assert_eq!(InferenceDevice::parse("cuda:x"), None);
        assert_eq!(InferenceDevice::parse("tpu"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let dev = InferenceDevice::CUDA(1);
        assert_eq!(InferenceDevice::parse(&dev.to_string()), Some(dev));
    }
}
