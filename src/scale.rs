//! Standard scaling and z-score outlier removal over the continuous columns.

use log::debug;
use polars::prelude::*;

use crate::error::Result;

/// Replace each of `columns` with its standard score over the current rows.
///
/// Mean and population standard deviation skip nulls, and nulls stay null.
/// A constant column scales by one, so every value becomes zero.
pub fn standardize_columns(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for &column in columns {
        let series = df.column(column)?.cast(&DataType::Float64)?;
        let values = series.f64()?;
        let scaled = match (values.mean(), values.std(0)) {
            (Some(mean), Some(std)) => {
                let scale = if std == 0.0 { 1.0 } else { std };
                let mut scaled = (series.clone() - mean) / scale;
                scaled.rename(column);
                scaled
            }
            _ => series,
        };
        out.with_column(scaled)?;
    }
    Ok(out)
}

/// Keep rows whose |z| is strictly below `threshold` in every one of `columns`.
///
/// The z-scores are recomputed from the values as they stand, so running this
/// after `standardize_columns` scores the already-scaled data a second time.
/// There is no zero-deviation guard, and a single null or NaN leaves the whole
/// column without scores. A missing or NaN score never passes, so either case
/// drops every row.
pub fn drop_outliers(df: &DataFrame, columns: &[&str], threshold: f64) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for &column in columns {
        let series = df.column(column)?.cast(&DataType::Float64)?;
        let values = series.f64()?;

        let poisoned = values.null_count() > 0 || values.into_iter().flatten().any(f64::is_nan);
        let moments = if poisoned {
            None
        } else {
            values.mean().zip(values.std(0))
        };

        for (keep, value) in keep.iter_mut().zip(values.into_iter()) {
            let passes = match (moments, value) {
                (Some((mean, std)), Some(value)) => ((value - mean) / std).abs() < threshold,
                _ => false,
            };
            *keep = *keep && passes;
        }
    }

    let dropped = keep.iter().filter(|k| !**k).count();
    debug!("dropping {} rows at |z| >= {}", dropped, threshold);

    let mask = Series::new("keep", keep);
    Ok(df.filter(mask.bool()?)?)
}
