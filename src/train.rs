//! Thin wrappers around the external training CLIs.
//!
//! The trainers are opaque subprocesses; this module only builds their
//! argument lists and forwards the exit status. Argument construction is
//! kept pure so the exact command line is testable without spawning.

use std::path::PathBuf;
use std::process::Command;

use clap::ValueEnum;

use crate::error::ThermoprepError;

/// Supported external training backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TrainBackend {
    /// Ultralytics `yolo` CLI.
    Yolov8,
    /// RT-DETR training script (`python3 rtdetr/train.py`).
    #[value(alias = "rtdetr")]
    RtDetr,
}

impl TrainBackend {
    /// Human-readable backend name.
    pub fn name(&self) -> &'static str {
        match self {
            TrainBackend::Yolov8 => "yolov8",
            TrainBackend::RtDetr => "rtdetr",
        }
    }

    /// Default model argument for the backend.
    pub fn default_model(&self) -> &'static str {
        match self {
            TrainBackend::Yolov8 => "yolov8n.pt",
            TrainBackend::RtDetr => "rtdetr-l.yaml",
        }
    }
}

/// Parameters of one training invocation.
#[derive(Clone, Debug)]
pub struct TrainConfig {
    pub backend: TrainBackend,
    pub data: PathBuf,
    pub model: String,
    pub epochs: u32,
    pub imgsz: u32,
    pub project: PathBuf,
    pub name: String,
}

/// Builds the program and argument vector for a configuration.
pub fn build_command(cfg: &TrainConfig) -> (String, Vec<String>) {
    let data = cfg.data.to_string_lossy().to_string();
    let project = cfg.project.to_string_lossy().to_string();

    match cfg.backend {
        TrainBackend::Yolov8 => (
            "yolo".to_string(),
            vec![
                "task=detect".to_string(),
                "mode=train".to_string(),
                format!("model={}", cfg.model),
                format!("data={}", data),
                format!("epochs={}", cfg.epochs),
                format!("imgsz={}", cfg.imgsz),
                "--project".to_string(),
                project,
                "--name".to_string(),
                cfg.name.clone(),
            ],
        ),
        TrainBackend::RtDetr => (
            "python3".to_string(),
            vec![
                "rtdetr/train.py".to_string(),
                "--data".to_string(),
                data,
                "--model".to_string(),
                cfg.model.clone(),
                "--epochs".to_string(),
                cfg.epochs.to_string(),
                "--imgsz".to_string(),
                cfg.imgsz.to_string(),
                "--project".to_string(),
                project,
                "--name".to_string(),
                cfg.name.clone(),
            ],
        ),
    }
}

/// Renders the command line the way it is printed before launch.
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

/// Launches the trainer and waits for it to finish.
///
/// A non-zero child exit status is an error; the child's own output goes
/// straight to our stdout/stderr.
pub fn run_training(cfg: &TrainConfig) -> Result<(), ThermoprepError> {
    let (program, args) = build_command(cfg);
    println!("Running: {}", render_command(&program, &args));

    let status = Command::new(&program)
        .args(&args)
        .status()
        .map_err(|source| ThermoprepError::TrainerSpawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(ThermoprepError::TrainerFailed { program, status });
    }

    Ok(())
}
