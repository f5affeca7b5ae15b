//! seal-detect - find official seals in images and print the boxes as JSON

use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use seal_detect::common::{DetectorConfig, InferenceDevice, SealImage};
use seal_detect::data::ConfigOrt;
use seal_detect::detection_processing::{annotate, encode_png};
use seal_detect::{init_detector, BatchInput, BatchRecord};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the ONNX seal model.
    #[arg(long)]
    model: String,
    /// Path to the onnxruntime shared library (defaults to ORT_DYLIB_PATH).
    #[arg(long)]
    ort_lib: Option<String>,
    /// JSON detector config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Execution provider: cpu, cuda[:id] or tensorrt[:id].
    #[arg(long, default_value = "cpu")]
    device: String,
    /// Number of images processed in parallel.
    #[arg(long)]
    workers: Option<usize>,
    /// Minimum class score for a detection.
    #[arg(long)]
    conf: Option<f32>,
    /// IoU above which overlapping boxes are suppressed.
    #[arg(long)]
    iou: Option<f32>,
    /// Collapse detections whose centers are closer than this many pixels.
    #[arg(long)]
    min_distance: Option<f32>,
    /// Never enlarge images smaller than the model input.
    #[arg(long)]
    no_upscale: bool,
    /// Write annotated PNGs into this directory.
    #[arg(long)]
    annotate_dir: Option<PathBuf>,
    /// Images to scan.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

fn build_config(args: &Args) -> Result<DetectorConfig> {
    let mut config = match &args.config {
        Some(path) => DetectorConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    if let Some(workers) = args.workers {
        config = config.with_worker_count(workers);
    }
    if let Some(conf) = args.conf {
        config = config.with_confidence_threshold(conf);
    }
    if let Some(iou) = args.iou {
        config = config.with_iou_threshold(iou);
    }
    if args.min_distance.is_some() {
        config = config.with_min_seal_distance(args.min_distance);
    }
    if args.no_upscale {
        config = config.with_allow_upscale(false);
    }
    Ok(config)
}

fn write_annotations(dir: &Path, images: &[PathBuf], records: &[BatchRecord]) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for (path, record) in images.iter().zip(records) {
        if !record.is_ok() {
            continue;
        }
        let image = SealImage::open(path)?;
        let annotated = annotate(image.as_rgb8(), &record.detections);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
        let out = dir.join(format!("result_{stem}.png"));
        std::fs::write(&out, encode_png(&annotated)?)?;
        log::info!("Annotated image written to {}", out.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let device = InferenceDevice::parse(&args.device).ok_or_else(|| {
        anyhow!(
            "unknown device {:?}, expected one of {:?}",
            args.device,
            InferenceDevice::all_inference_devices()
        )
    })?;
    let mut ort_options = ConfigOrt::new().with_model(&args.model)?.with_device(device);
    if let Some(lib) = &args.ort_lib {
        ort_options = ort_options.with_ort_lib_path(lib);
    }

    let config = build_config(&args)?;
    let detector = init_detector(&ort_options, config)?;

    let inputs: Vec<BatchInput> = args.images.iter().cloned().map(BatchInput::from).collect();
    let records = detector.detect_batch(&inputs);

    println!("{}", serde_json::to_string_pretty(&records)?);

    if let Some(dir) = &args.annotate_dir {
        write_annotations(dir, &args.images, &records)?;
    }

    Ok(())
}
