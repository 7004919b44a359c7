//! Decode markers from an image and a list of rough candidate quads.
//!
//! ```text
//! cargo run -p quadmark --example detect_markers -- path/to/config.json
//! ```

use std::{env, fs, path::PathBuf};

use image::ImageReader;
use quadmark::io::gray_view;
use quadmark::{Candidate, DetectionReport, DetectorParams, MarkerDetector};
use serde::{Deserialize, Serialize};

#[cfg(not(feature = "tracing"))]
use std::str::FromStr;

#[cfg(not(feature = "tracing"))]
use log::{info, warn, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::{info, warn};

#[cfg(feature = "tracing")]
use quadmark::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use quadmark::core::init_with_level;

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    image_path: String,
    #[serde(default)]
    output_path: Option<String>,
    candidates: Vec<Candidate>,
    #[serde(default)]
    params: DetectorParams,
}

#[derive(Debug, Serialize)]
struct ExampleReport {
    image_path: String,
    config_path: String,
    num_candidates: usize,
    detection: DetectionReport,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    let log_level = env::var("QUADMARK_LOG")
        .ok()
        .and_then(|s| LevelFilter::from_str(&s).ok())
        .unwrap_or(LevelFilter::Info);
    #[cfg(not(feature = "tracing"))]
    init_with_level(log_level)?;

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run()
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let cfg = load_config(&config_path)?;
    let img = load_image(&PathBuf::from(&cfg.image_path))?;
    info!(
        "{}x{} image, {} candidates",
        img.width(),
        img.height(),
        cfg.candidates.len()
    );

    let detector = MarkerDetector::new(cfg.params.clone());
    let detection = detector.detect_with_report(&gray_view(&img), &cfg.candidates);
    for marker in &detection.markers {
        info!(
            "marker {:#06x} at ({:.2}, {:.2})",
            marker.id, marker.center.x, marker.center.y
        );
    }
    for (idx, reason) in detection.rejected() {
        warn!("candidate {idx}: {reason}");
    }

    let report = ExampleReport {
        image_path: cfg.image_path.clone(),
        config_path: config_path.to_string_lossy().into_owned(),
        num_candidates: cfg.candidates.len(),
        detection,
    };
    write_report(cfg.output_path.as_deref(), &report)
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/detect_markers_config.json"))
}

fn load_config(path: &PathBuf) -> Result<ExampleConfig, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn load_image(path: &PathBuf) -> Result<image::GrayImage, Box<dyn std::error::Error>> {
    Ok(ImageReader::open(path)?.decode()?.to_luma8())
}

fn write_report(path: Option<&str>, report: &ExampleReport) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tmpdata/detect_markers_report.json"));
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, serde_json::to_string_pretty(report)?)?;
    println!("wrote report JSON to {}", out_path.display());
    Ok(())
}
