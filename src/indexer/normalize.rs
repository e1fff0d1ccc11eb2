//! Min-max normalization over the current result set.
//!
//! Bounds are taken from the rows being indexed in this run, so normalized
//! values are only comparable within a single output table.

use serde::Serialize;

/// Bounds observed for one normalized field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationReport {
    pub field: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// True when max == min and the fallback value was emitted instead
    pub degenerate: bool,
}

/// Rescale `values` to [0, 1] using their own minimum and maximum.
///
/// When every value is equal (including the single-row case) the range is
/// empty; each output is `fallback` and the report is flagged degenerate.
pub fn min_max_normalize(
    field: &str,
    values: &[f64],
    fallback: f64,
) -> (Vec<f64>, NormalizationReport) {
    let Some((min, max)) = bounds(values) else {
        let report = NormalizationReport {
            field: field.to_string(),
            min: None,
            max: None,
            degenerate: false,
        };
        return (Vec::new(), report);
    };

    let range = max - min;
    let degenerate = range <= 0.0;
    let normalized = if degenerate {
        log::warn!(
            "Cannot normalize {}: all {} values equal {}. Using {} for every row.",
            field,
            values.len(),
            min,
            fallback
        );
        vec![fallback; values.len()]
    } else {
        values.iter().map(|v| (v - min) / range).collect()
    };

    let report = NormalizationReport {
        field: field.to_string(),
        min: Some(min),
        max: Some(max),
        degenerate,
    };
    (normalized, report)
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
