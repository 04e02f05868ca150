use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// The main error type for thermoprep operations.
#[derive(Debug, Error)]
pub enum ThermoprepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse dataset descriptor {path}: {source}")]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Labels directory not found: {path}")]
    LabelDirMissing { path: PathBuf },

    #[error("Invalid split parameters: {message}")]
    InvalidSplitParams { message: String },

    #[error("Failed to launch trainer '{program}': {source}")]
    TrainerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Trainer '{program}' exited with {status}")]
    TrainerFailed { program: String, status: ExitStatus },
}
