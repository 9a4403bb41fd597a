//! Pipeline configuration
//!
//! Defaults reproduce the fixed project layout; a JSON file may override any field.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PreprocessError, Result};

pub const RAW_DIR: &str = "namadataset_raw";
pub const RAW_FILE_NAME: &str = "healthcare-dataset-stroke-data.csv";
pub const MODEL_DIR: &str = "Membangun_model";
pub const CLEAN_DIR: &str = "namadataset_preprocessing";
pub const CLEAN_FILE_NAME: &str = "data_bersih.csv";

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "STROKE_PREPROCESS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub input_path: PathBuf,
    /// Where to write the cleaned table; nothing is written when unset.
    pub output_path: Option<PathBuf>,
    /// Rows whose second-pass |z| reaches this value are dropped.
    pub z_threshold: f64,
    pub unknown_smoking_status: String,
    pub rare_gender: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            input_path: Path::new(RAW_DIR).join(RAW_FILE_NAME),
            output_path: None,
            z_threshold: 3.0,
            unknown_smoking_status: "Unknown".to_string(),
            rare_gender: "Other".to_string(),
        }
    }
}

impl PreprocessConfig {
    /// Layout rooted at `root`: raw data in, cleaned data out.
    pub fn for_project<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            input_path: root.join(RAW_DIR).join(RAW_FILE_NAME),
            output_path: Some(root.join(MODEL_DIR).join(CLEAN_DIR).join(CLEAN_FILE_NAME)),
            ..Self::default()
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate(path)?;
        Ok(config)
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = Some(path.into());
        self
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if !(self.z_threshold.is_finite() && self.z_threshold > 0.0) {
            return Err(PreprocessError::Config {
                path: path.to_path_buf(),
                reason: format!("z_threshold must be positive, got {}", self.z_threshold),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_project_layout() {
        let config = PreprocessConfig::for_project("/data/project");
        assert_eq!(
            config.input_path,
            PathBuf::from("/data/project/namadataset_raw/healthcare-dataset-stroke-data.csv")
        );
        assert_eq!(
            config.output_path,
            Some(PathBuf::from(
                "/data/project/Membangun_model/namadataset_preprocessing/data_bersih.csv"
            ))
        );
        assert_eq!(config.z_threshold, 3.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"input_path": "raw.csv", "z_threshold": 2.5}}"#).unwrap();

        let config = PreprocessConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.input_path, PathBuf::from("raw.csv"));
        assert_eq!(config.z_threshold, 2.5);
        assert_eq!(config.output_path, None);
        assert_eq!(config.unknown_smoking_status, "Unknown");
        assert_eq!(config.rare_gender, "Other");
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"z_threshold": 0.0}}"#).unwrap();

        let err = PreprocessConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, PreprocessError::Config { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let err = PreprocessConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, PreprocessError::Json(_)));
    }
}
