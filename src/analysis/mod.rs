//! Statistical and heuristic analysis routines.
//!
//! Every routine here is a pure function of its input: it never mutates the caller's data,
//! never panics on short or empty input, and never returns an error. Input that is too short
//! for a statistic produces a "no signal" result (confidence `0`, empty collections, `None`
//! forecasts) so callers can render "not enough data" uniformly.
//!
//! Non-finite numbers (`NaN`, `±inf`) are skipped before any computation.
//!
//! - [`predict_trend`]: least-squares trend line, forecast and goodness of fit
//! - [`detect_anomalies`]: z-score anomaly flagging
//! - [`detect_outliers_iqr`]: quartile-based outlier bounds
//! - [`categorize`]: normalized frequency histogram
//! - [`scan_quality`]: missing/duplicate/outlier/trend report over a whole [`crate::types::DataSet`]
//! - [`generate_insights`]: per-field insight cards built from the routines above
//!
//! ## Example
//!
//! ```rust
//! use dashboard_analytics::analysis::{detect_anomalies, predict_trend, TrendDirection};
//!
//! let trend = predict_trend(&[10.0, 20.0, 30.0, 40.0, 50.0]);
//! assert_eq!(trend.direction, TrendDirection::Increasing);
//! assert_eq!(trend.forecast, Some(vec![60.0, 70.0, 80.0]));
//!
//! let anomalies = detect_anomalies(&[5.0, 5.0, 5.0, 5.0, 100.0], 2.0);
//! assert_eq!(anomalies.flagged[0].index, 4);
//! ```

pub mod anomaly;
pub mod categorize;
pub mod insights;
pub mod outliers;
pub mod quality;
pub mod trend;

pub use anomaly::{detect_anomalies, detect_anomalies_with, AnomalyResult, FlaggedValue};
pub use categorize::{categorize, categorize_with, CategoryCount, CategoryResult};
pub use insights::{field_insights, generate_insights, Insight, InsightKind};
pub use outliers::{detect_outliers_iqr, OutlierResult};
pub use quality::{
    scan_quality, scan_quality_with, DataQualityReport, DuplicateSummary, FieldMissing, FieldTrend,
    MissingDataSummary,
};
pub use trend::{predict_trend, predict_trend_with, TrendDirection, TrendResult};

/// Copy the finite entries of `series`, keeping their original positions.
pub(crate) fn finite_indexed(series: &[f64]) -> Vec<(usize, f64)> {
    series
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .collect()
}

/// Copy the finite entries of `series`.
pub(crate) fn finite_values(series: &[f64]) -> Vec<f64> {
    series.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Arithmetic mean, `None` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor `n`) around `mean`.
pub(crate) fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Format a list of numbers for an explanation string.
pub(crate) fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}
