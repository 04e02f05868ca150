//! Ultralytics dataset descriptor.
//!
//! The external training CLIs consume a small YAML file naming the
//! dataset root, the train/val image directories relative to it, and the
//! class-index-to-name mapping. Output is written as a manual string so
//! the layout stays byte-stable; reading back goes through serde_yaml.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ThermoprepError;

/// Default descriptor file name.
pub const DEFAULT_YAML_NAME: &str = "flir_thermal_person.yaml";

/// Parsed dataset descriptor.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct DatasetDescriptor {
    pub path: String,
    pub train: String,
    pub val: String,
    pub names: BTreeMap<usize, String>,
}

/// Writes the descriptor into `proc_root` and returns its path.
pub fn write_dataset_yaml(proc_root: &Path, file_name: &str) -> Result<PathBuf, ThermoprepError> {
    let root = proc_root.to_string_lossy().replace('\\', "/");
    let content = format!(
        "path: {}\ntrain: images/train\nval: images/val\n\nnames:\n  0: person\n",
        root
    );

    let yaml_path = proc_root.join(file_name);
    fs::write(&yaml_path, content).map_err(ThermoprepError::Io)?;
    Ok(yaml_path)
}

/// Reads a descriptor back from disk.
pub fn read_dataset_yaml(path: &Path) -> Result<DatasetDescriptor, ThermoprepError> {
    let data = fs::read_to_string(path).map_err(ThermoprepError::Io)?;
    serde_yaml::from_str(&data).map_err(|source| ThermoprepError::DescriptorParse {
        path: path.to_path_buf(),
        source,
    })
}
