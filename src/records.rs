use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use polars::prelude::{DataType, Field, Schema};
use serde::{Serialize, Serializer};

use crate::error::Result;

pub const ID: &str = "id";
pub const GENDER: &str = "gender";
pub const AGE: &str = "age";
pub const HYPERTENSION: &str = "hypertension";
pub const HEART_DISEASE: &str = "heart_disease";
pub const EVER_MARRIED: &str = "ever_married";
pub const WORK_TYPE: &str = "work_type";
pub const RESIDENCE_TYPE: &str = "Residence_type";
pub const AVG_GLUCOSE_LEVEL: &str = "avg_glucose_level";
pub const BMI: &str = "bmi";
pub const SMOKING_STATUS: &str = "smoking_status";
pub const STROKE: &str = "stroke";

/// Columns every raw input must carry, in file order.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    ID,
    GENDER,
    AGE,
    HYPERTENSION,
    HEART_DISEASE,
    EVER_MARRIED,
    WORK_TYPE,
    RESIDENCE_TYPE,
    AVG_GLUCOSE_LEVEL,
    BMI,
    SMOKING_STATUS,
    STROKE,
];

/// Continuous columns that get standardized and outlier-filtered.
pub const NUMERIC_COLUMNS: [&str; 3] = [AGE, AVG_GLUCOSE_LEVEL, BMI];

/// Spelling of an absent bmi in the published dataset.
pub const MISSING_BMI: &str = "N/A";

lazy_static! {
    pub static ref RAW_SCHEMA: Arc<Schema> = Arc::new(StrokeRecord::raw_schema());
}

/// One patient observation as it appears in the raw file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeRecord {
    pub id: i32,
    pub gender: String,
    pub age: f64,
    pub hypertension: i32,
    pub heart_disease: i32,
    pub ever_married: String,
    pub work_type: String,
    #[serde(rename = "Residence_type")]
    pub residence_type: String,
    pub avg_glucose_level: f64,
    #[serde(serialize_with = "serialize_bmi")]
    pub bmi: Option<f64>,
    pub smoking_status: String,
    pub stroke: i32,
}

impl StrokeRecord {
    // bmi stays Utf8 on load so the "N/A" markers survive parsing; the pipeline casts it.
    pub fn raw_schema() -> Schema {
        Schema::from_iter(
            vec![
                Field::new(ID, DataType::Int32),
                Field::new(GENDER, DataType::Utf8),
                Field::new(AGE, DataType::Float64),
                Field::new(HYPERTENSION, DataType::Int32),
                Field::new(HEART_DISEASE, DataType::Int32),
                Field::new(EVER_MARRIED, DataType::Utf8),
                Field::new(WORK_TYPE, DataType::Utf8),
                Field::new(RESIDENCE_TYPE, DataType::Utf8),
                Field::new(AVG_GLUCOSE_LEVEL, DataType::Float64),
                Field::new(BMI, DataType::Utf8),
                Field::new(SMOKING_STATUS, DataType::Utf8),
                Field::new(STROKE, DataType::Int32),
            ])
    }
}

fn serialize_bmi<S: Serializer>(bmi: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match bmi {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str(MISSING_BMI),
    }
}

/// Write records in the raw dataset layout, header included.
pub fn write_raw_csv<P: AsRef<Path>>(path: P, records: &[StrokeRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
