//! The full raw-to-clean transform.
//!
//! Stages run in a fixed order, each producing a new frame:
//! repair missing values, drop the rare gender, de-duplicate, encode
//! categoricals, drop the identifier, then scale and remove outliers.

use std::path::Path;

use log::{debug, info};
use polars::prelude::*;
use serde::Serialize;

use crate::clean::{drop_duplicates, drop_value, repair_missing};
use crate::config::PreprocessConfig;
use crate::encode::encode_categoricals;
use crate::error::Result;
use crate::io::{check_columns, read_csv, write_table};
use crate::records::{GENDER, ID, NUMERIC_COLUMNS};
use crate::scale::{drop_outliers, standardize_columns};

/// Row counts as the frame leaves each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub input_rows: usize,
    pub after_repair: usize,
    pub after_filter: usize,
    pub after_dedup: usize,
    pub after_encoding: usize,
    pub output_rows: usize,
    pub output_columns: Vec<String>,
}

/// Clean `df` with the default settings.
pub fn process(df: &DataFrame) -> Result<DataFrame> {
    process_with_config(df, &PreprocessConfig::default())
}

pub fn process_with_config(df: &DataFrame, config: &PreprocessConfig) -> Result<DataFrame> {
    process_with_report(df, config).map(|(df, _)| df)
}

pub fn process_with_report(
    df: &DataFrame,
    config: &PreprocessConfig,
) -> Result<(DataFrame, StageReport)> {
    check_columns(df.get_column_names())?;
    let mut report = StageReport {
        input_rows: df.height(),
        ..StageReport::default()
    };

    let df = repair_missing(df, &config.unknown_smoking_status)?;
    report.after_repair = df.height();

    let df = drop_value(&df, GENDER, &config.rare_gender)?;
    report.after_filter = df.height();
    debug!("{} rows after removing gender {:?}", df.height(), config.rare_gender);

    let df = drop_duplicates(&df)?;
    report.after_dedup = df.height();
    debug!("{} rows after de-duplication", df.height());

    let df = encode_categoricals(&df)?;
    report.after_encoding = df.height();

    let df = df.drop(ID)?;

    let df = standardize_columns(&df, &NUMERIC_COLUMNS)?;
    let df = drop_outliers(&df, &NUMERIC_COLUMNS, config.z_threshold)?;
    report.output_rows = df.height();
    report.output_columns = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    info!(
        "preprocessed {} rows into {} rows x {} columns",
        report.input_rows,
        report.output_rows,
        df.width()
    );
    debug!("stage report {}", serde_json::to_string(&report)?);
    Ok((df, report))
}

/// Load `config.input_path`, clean it and write it to `config.output_path` when set.
pub async fn run(config: &PreprocessConfig) -> Result<DataFrame> {
    let raw = read_csv(&config.input_path).await?;
    let (mut df, _) = process_with_report(&raw, config)?;

    if let Some(output) = &config.output_path {
        write_table(output, &mut df).await?;
    }
    Ok(df)
}

/// Load and clean `csv_path`, optionally saving the result to `output_file`.
pub async fn load_and_preprocess<P: AsRef<Path>>(
    csv_path: P,
    output_file: Option<&Path>,
) -> Result<DataFrame> {
    let mut config = PreprocessConfig {
        input_path: csv_path.as_ref().to_path_buf(),
        ..PreprocessConfig::default()
    };
    if let Some(output) = output_file {
        config = config.with_output(output);
    }
    run(&config).await
}
