//! Preprocessing for the healthcare stroke dataset.
//!
//! Loads the raw CSV, imputes missing values, removes anomalous and duplicate
//! rows, encodes categoricals, standardizes the continuous features, removes
//! z-score outliers and optionally writes the clean table.

pub mod clean;
pub mod config;
pub mod encode;
pub mod error;
pub mod io;
pub mod monitor;
pub mod pipeline;
pub mod records;
pub mod scale;

pub use config::PreprocessConfig;
pub use error::{PreprocessError, Result};
pub use pipeline::{load_and_preprocess, process, process_with_config, process_with_report, run, StageReport};
pub use records::StrokeRecord;
