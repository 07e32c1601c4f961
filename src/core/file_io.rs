use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Parses a JSON parameter file that has already been read into memory.
pub fn parse_params<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn output_path(directory: &Path, file_name: &str) -> PathBuf {
    directory.join(file_name)
}
