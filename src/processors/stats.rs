//! Descriptive statistics over the consolidated dataset.

use crate::core::table::DataTable;

/// Summary statistics for one column.
///
/// Every field is `None` when too few numeric values exist to compute it:
/// a column with no numeric values yields all-`None` statistics, and the
/// sample standard deviation needs at least two values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p10: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub max: Option<f64>,
}

/// One row of statistics per requested column.
#[derive(Debug, Clone, Default)]
pub struct SummaryStats {
    pub rows: Vec<ColumnStats>,
}

/// Linearly interpolated percentile of sorted values, `q` in [0, 1].
fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn column_stats(name: &str, values: &[Option<f64>]) -> ColumnStats {
    let mut numeric: Vec<f64> = values.iter().flatten().copied().collect();
    numeric.sort_by(|a, b| a.total_cmp(b));

    let n = numeric.len();
    let mean = if n > 0 {
        Some(numeric.iter().sum::<f64>() / n as f64)
    } else {
        None
    };

    // Sample standard deviation (ddof = 1).
    let std = match (mean, n) {
        (Some(m), n) if n > 1 => Some(
            (numeric.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt(),
        ),
        _ => None,
    };

    ColumnStats {
        column: name.to_string(),
        mean,
        std,
        min: numeric.first().copied(),
        p10: percentile(&numeric, 0.10),
        p25: percentile(&numeric, 0.25),
        median: percentile(&numeric, 0.50),
        p75: percentile(&numeric, 0.75),
        p90: percentile(&numeric, 0.90),
        max: numeric.last().copied(),
    }
}

/// Compute summary statistics for the named columns of a dataset.
///
/// Non-numeric and missing cells are excluded from every statistic
/// independently. A requested column that does not exist in the dataset
/// yields an all-`None` row, same as a column with no numeric values.
pub fn summary_stats(dataset: &DataTable, columns: &[String]) -> SummaryStats {
    let rows = columns
        .iter()
        .map(|name| {
            let values = dataset.numeric_column(name).unwrap_or_default();
            column_stats(name, &values)
        })
        .collect();

    SummaryStats { rows }
}

/// Circular mean of angular values in degrees, result in [0, 360).
///
/// The arithmetic mean is invalid at the wrap-around boundary (the mean of
/// 350 and 10 degrees should be 0, not 180), so the angles are averaged as
/// unit vectors: each value is reduced modulo 360, converted to radians,
/// and the angle is recovered from the mean sine and cosine via the
/// two-argument arctangent. Missing entries are dropped; with none left
/// the result is `None`.
pub fn circular_mean_deg(values: &[Option<f64>]) -> Option<f64> {
    let radians: Vec<f64> = values
        .iter()
        .flatten()
        .map(|v| v.rem_euclid(360.0).to_radians())
        .collect();

    if radians.is_empty() {
        return None;
    }

    let n = radians.len() as f64;
    let sin_mean = radians.iter().map(|r| r.sin()).sum::<f64>() / n;
    let cos_mean = radians.iter().map(|r| r.cos()).sum::<f64>() / n;

    Some(sin_mean.atan2(cos_mean).to_degrees().rem_euclid(360.0))
}
