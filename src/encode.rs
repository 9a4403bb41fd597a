//! Categorical encoding.
//!
//! Two-valued columns are mapped in place to 0/1. Multi-valued columns are
//! expanded into `<column>_<value>` indicator columns with the
//! lexicographically first category left implicit as the baseline.

use std::collections::BTreeSet;

use log::debug;
use polars::prelude::*;

use crate::error::{PreprocessError, Result};
use crate::records::{EVER_MARRIED, GENDER, RESIDENCE_TYPE, SMOKING_STATUS, WORK_TYPE};

/// (column, value encoded as 0, value encoded as 1)
pub const BINARY_COLUMNS: [(&str, &str, &str); 3] = [
    (GENDER, "Female", "Male"),
    (EVER_MARRIED, "No", "Yes"),
    (RESIDENCE_TYPE, "Rural", "Urban"),
];

pub const ONE_HOT_COLUMNS: [&str; 2] = [WORK_TYPE, SMOKING_STATUS];

/// Replace `column` with Int32 0/1 codes. Any other value, or a null, is an error.
pub fn encode_binary(df: &mut DataFrame, column: &str, negative: &str, positive: &str) -> Result<()> {
    let encoded = df
        .column(column)?
        .utf8()?
        .into_iter()
        .map(|v| match v {
            Some(v) if v == positive => Ok(1i32),
            Some(v) if v == negative => Ok(0i32),
            other => Err(PreprocessError::UnexpectedCategory {
                column: column.to_string(),
                value: other.map(str::to_string),
            }),
        })
        .collect::<Result<Vec<i32>>>()?;

    df.with_column(Series::new(column, encoded))?;
    Ok(())
}

/// Indicator columns for every observed category of `column` except the first.
/// Null rows get zero in every indicator.
pub fn dummies(df: &DataFrame, column: &str) -> Result<Vec<Series>> {
    let values = df.column(column)?.utf8()?;
    let categories: BTreeSet<&str> = values.into_iter().flatten().collect();

    let indicators = categories
        .into_iter()
        .skip(1)
        .map(|category| {
            let flags: Vec<i32> = values
                .into_iter()
                .map(|v| i32::from(v == Some(category)))
                .collect();
            Series::new(&format!("{}_{}", column, category), flags)
        })
        .collect();
    Ok(indicators)
}

/// Expand `columns` into indicators appended after the remaining columns.
pub fn one_hot(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut indicators = Vec::new();
    for &column in columns {
        let expanded = dummies(df, column)?;
        debug!("{} expands into {} indicator columns", column, expanded.len());
        indicators.extend(expanded);
    }

    let mut out = df.clone();
    for &column in columns {
        out = out.drop(column)?;
    }
    for indicator in indicators {
        out.with_column(indicator)?;
    }
    Ok(out)
}

/// Binary-map gender, marriage and residence, then one-hot work type and smoking status.
pub fn encode_categoricals(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    for (column, negative, positive) in BINARY_COLUMNS {
        encode_binary(&mut out, column, negative, positive)?;
    }
    one_hot(&out, &ONE_HOT_COLUMNS)
}
