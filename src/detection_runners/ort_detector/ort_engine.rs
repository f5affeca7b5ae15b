//! ONNX Runtime backed model invoker.

use std::panic::catch_unwind;
use half::f16;
use ort::execution_providers::{
    CUDAExecutionProvider, ExecutionProvider, ExecutionProviderDispatch, TensorRTExecutionProvider,
};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use regex::Regex;
use crate::common::InferenceDevice;
use crate::data::{ConfigOrt, CROSS_MARK, X};
use crate::detection_runners::model_invoker::ModelInvoker;
use crate::detection_runners::ort_detector::session_pool::SessionPool;
use crate::error::SealError;
use crate::Result;

fn ort_err<E: std::fmt::Display>(err: E) -> SealError {
    SealError::inference(err.to_string())
}

/// ONNXRuntime Backend
///
/// `Session::run` needs exclusive access, so the engine opens `num_sessions` sessions on the
/// same model and hands one to each concurrent call.
pub struct OrtEngine {
    sessions: SessionPool<Session>,
    device: InferenceDevice,
    fp16_input: bool,
    names: Option<Vec<String>>,
}

impl std::fmt::Debug for OrtEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtEngine")
            .field("device", &self.device)
            .field("sessions", &self.sessions.size())
            .field("fp16_input", &self.fp16_input)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl OrtEngine {
    pub fn new(config: &ConfigOrt) -> Result<Self> {
        if config.onnx_path.is_empty() {
            return Err(SealError::validation("no ONNX model path configured"));
        }
        // Dynamically load the library from given path
        if let Some(lib_path) = &config.ort_lib_path {
            Self::load_runtime(lib_path)?;
        }

        let mut device = config.device;
        let providers = match config.device {
            InferenceDevice::CPU => Vec::new(),
            InferenceDevice::CUDA(device_id) => Self::build_cuda(device_id).map(|ep| vec![ep]).unwrap_or_else(|err| {
                log::warn!("{err}, Using cpu");
                device = InferenceDevice::CPU;
                Vec::new()
            }),
            InferenceDevice::TensorRT(device_id) => Self::build_trt(device_id).map(|ep| vec![ep]).unwrap_or_else(|err| {
                log::warn!("{err}, Using cpu");
                device = InferenceDevice::CPU;
                Vec::new()
            }),
        };

        let num_sessions = config.num_sessions.unwrap_or(1).max(1);
        let sessions = (0..num_sessions)
            .map(|_| Self::build_session(config, &providers))
            .collect::<Result<Vec<_>>>()?;

        let names = sessions.first().and_then(Self::fetch_names);

        log::info!(
            "Backend: ONNXRuntime | Device: {} | Model: {} | Sessions: {} | Classes: {:?}",
            device,
            config.onnx_path,
            num_sessions,
            names,
        );

        Ok(Self {
            sessions: SessionPool::new(sessions)?,
            device,
            fp16_input: config.fp16_input,
            names,
        })
    }

    /// ort panics instead of erroring when the library cannot be loaded.
    fn load_runtime(lib_path: &str) -> Result<()> {
        catch_unwind(|| ort::init_from(lib_path).commit())
            .map_err(|_| SealError::inference(format!("{CROSS_MARK} failed to load onnxruntime from {lib_path}")))?
            .map_err(ort_err)?;
        Ok(())
    }

    fn build_session(config: &ConfigOrt, providers: &[ExecutionProviderDispatch]) -> Result<Session> {
        let mut builder = Session::builder()
            .map_err(ort_err)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(ort_err)?;
        if let Some(n) = config.intra_threads {
            builder = builder.with_intra_threads(n).map_err(ort_err)?;
        }
        if !providers.is_empty() {
            builder = builder.with_execution_providers(providers).map_err(ort_err)?;
        }
        builder.commit_from_file(&config.onnx_path).map_err(ort_err)
    }

    fn build_cuda(device_id: usize) -> Result<ExecutionProviderDispatch> {
        let ep = CUDAExecutionProvider::default().with_device_id(device_id as i32);
        if ep.is_available().map_err(ort_err)? {
            Ok(ep.build())
        } else {
            Err(SealError::inference(format!("{CROSS_MARK} CUDA execution provider not available")))
        }
    }

    fn build_trt(device_id: usize) -> Result<ExecutionProviderDispatch> {
        let ep = TensorRTExecutionProvider::default()
            .with_device_id(device_id as i32)
            .with_engine_cache(true)
            .with_engine_cache_path("trt-cache");
        if ep.is_available().map_err(ort_err)? {
            log::info!("🐢 Initial model serialization with TensorRT may takes some time...");
            Ok(ep.build())
        } else {
            Err(SealError::inference(format!("{CROSS_MARK} TensorRT execution provider not available")))
        }
    }

    fn fetch_names(session: &Session) -> Option<Vec<String>> {
        // fetch class names from onnx metadata
        // String format: `{0: 'seal'}`
        let metadata = session.metadata().ok()?;
        let names = metadata.custom("names").ok()??;
        parse_names(&names)
    }
}

/// Parses the Ultralytics `names` metadata string into an ordered list.
pub(crate) fn parse_names(names: &str) -> Option<Vec<String>> {
    let re = Regex::new(r#"(['"])([-()\w '"]+)(['"])"#).ok()?;
    let mut names_ = vec![];
    for (_, [_, name, _]) in re.captures_iter(names).map(|x| x.extract()) {
        names_.push(name.to_string());
    }
    if names_.is_empty() {
        None
    } else {
        Some(names_)
    }
}

impl ModelInvoker for OrtEngine {
    fn invoke(&self, input: &X) -> Result<X> {
        self.sessions.with_session(|session: &mut Session| -> Result<X> {
            let outputs = if self.fp16_input {
                let tensor = Tensor::from_array(input.0.mapv(f16::from_f32)).map_err(ort_err)?;
                session.run(ort::inputs![tensor])
            } else {
                let tensor = Tensor::from_array(input.0.clone()).map_err(ort_err)?;
                session.run(ort::inputs![tensor])
            }
            .map_err(ort_err)?;

            let y = outputs[0].try_extract_array::<f32>().map_err(ort_err)?.into_owned();
            Ok(X::from(y))
        })?
    }

    fn class_names(&self) -> Option<Vec<String>> {
        self.names.clone()
    }
}
