//! Row-level cleaning: imputation, anomaly filtering and de-duplication.

use std::collections::BTreeMap;

use log::debug;
use polars::prelude::*;

use crate::error::{PreprocessError, Result};
use crate::records::{BMI, MISSING_BMI, SMOKING_STATUS};

/// bmi as Float64. Empty text and the "N/A" marker become null; any other
/// text that does not parse as a number is an error.
pub fn parse_bmi(series: &Series) -> Result<Series> {
    if series.dtype() != &DataType::Utf8 {
        return Ok(series.cast(&DataType::Float64)?);
    }

    let marked: Utf8Chunked = series
        .utf8()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|v| !v.is_empty() && *v != MISSING_BMI))
        .collect();
    let parsed = marked.clone().into_series().cast(&DataType::Float64)?;

    if parsed.null_count() > marked.null_count() {
        let value = marked
            .into_iter()
            .zip(parsed.f64()?.into_iter())
            .find_map(|(text, number)| match (text, number) {
                (Some(text), None) => Some(text.to_string()),
                _ => None,
            })
            .unwrap_or_default();
        return Err(PreprocessError::InvalidNumber {
            column: BMI.to_string(),
            value,
        });
    }
    Ok(parsed)
}

/// Most frequent value. Ties resolve to the lexicographically smallest value.
fn most_frequent<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// Fill absent bmi with the median bmi and replace the unknown smoking
/// sentinel with the most frequent smoking status other than the sentinel.
pub fn repair_missing(df: &DataFrame, unknown: &str) -> Result<DataFrame> {
    let mut out = df.clone();

    let bmi = parse_bmi(df.column(BMI)?)?;
    let bmi = bmi.f64()?;
    let bmi_median = bmi
        .median()
        .ok_or_else(|| PreprocessError::EmptyColumn(BMI.to_string()))?;
    debug!("bmi median {}, filling {} nulls", bmi_median, bmi.null_count());

    let mut filled = bmi.fill_null_with_values(bmi_median)?.into_series();
    filled.rename(BMI);
    out.with_column(filled)?;

    let smoking = df.column(SMOKING_STATUS)?.utf8()?;
    let smoking_mode = most_frequent(smoking.into_iter().flatten().filter(|v| *v != unknown))
        .ok_or_else(|| PreprocessError::EmptyColumn(SMOKING_STATUS.to_string()))?;
    debug!("replacing {:?} smoking status with {:?}", unknown, smoking_mode);

    let resolved: Vec<Option<&str>> = smoking
        .into_iter()
        .map(|v| match v {
            Some(v) if v == unknown => Some(smoking_mode.as_str()),
            other => other,
        })
        .collect();
    let resolved = Series::new(SMOKING_STATUS, resolved);
    out.with_column(resolved)?;

    Ok(out)
}

/// Remove every row whose `column` equals `value`. Nulls are kept.
pub fn drop_value(df: &DataFrame, column: &str, value: &str) -> Result<DataFrame> {
    let keep: Vec<bool> = df
        .column(column)?
        .utf8()?
        .into_iter()
        .map(|v| v != Some(value))
        .collect();
    let mask = Series::new("keep", keep);
    Ok(df.filter(mask.bool()?)?)
}

/// Remove rows equal to an earlier row in every column, preserving order.
pub fn drop_duplicates(df: &DataFrame) -> Result<DataFrame> {
    let out = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(out)
}
