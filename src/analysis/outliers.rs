//! Interquartile-range outlier detection.
//!
//! Used by the data-quality scan; unlike [`super::anomaly`] it does not assume normally
//! distributed values.

use serde::{Deserialize, Serialize};

use super::finite_values;

/// Result of [`detect_outliers_iqr`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutlierResult {
    /// Field the series came from, when produced by a dataset scan.
    pub field: Option<String>,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Values outside the bounds, in series order.
    pub outlier_values: Vec<f64>,
}

impl OutlierResult {
    /// Attach the originating field name.
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Number of outliers.
    pub fn count(&self) -> usize {
        self.outlier_values.len()
    }
}

/// Detect outliers outside `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`.
///
/// Quartiles use the nearest-rank positions `floor(0.25·n)` and `floor(0.75·n)` of a sorted
/// copy; the caller's slice is left untouched. Empty input yields an all-zero result.
pub fn detect_outliers_iqr(series: &[f64]) -> OutlierResult {
    let values = finite_values(series);
    let n = values.len();
    if n == 0 {
        return OutlierResult::default();
    }

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let q1 = sorted[n / 4];
    let q3 = sorted[(3 * n) / 4];
    let iqr = q3 - q1;
    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    let outlier_values = values
        .into_iter()
        .filter(|v| *v < lower_bound || *v > upper_bound)
        .collect();

    OutlierResult {
        field: None,
        q1,
        q3,
        iqr,
        lower_bound,
        upper_bound,
        outlier_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rank_quartiles() {
        // sorted: [1, 2, 3, 4, 5, 6, 7, 8]; n/4 = 2, 3n/4 = 6
        let r = detect_outliers_iqr(&[8.0, 1.0, 7.0, 2.0, 6.0, 3.0, 5.0, 4.0]);
        assert_eq!(r.q1, 3.0);
        assert_eq!(r.q3, 7.0);
        assert_eq!(r.iqr, 4.0);
        assert_eq!(r.lower_bound, -3.0);
        assert_eq!(r.upper_bound, 13.0);
        assert!(r.outlier_values.is_empty());
    }

    #[test]
    fn flags_values_on_both_sides_in_input_order() {
        let r = detect_outliers_iqr(&[10.0, 11.0, 500.0, 12.0, 13.0, -400.0, 14.0, 15.0]);
        assert_eq!(r.outlier_values, vec![500.0, -400.0]);
        assert_eq!(r.count(), 2);
    }

    #[test]
    fn values_on_the_bounds_are_not_outliers() {
        // sorted [0, 0, 10, 10, 25]: q1 = 0, q3 = 10, bounds [-15, 25]
        let r = detect_outliers_iqr(&[0.0, 10.0, 0.0, 10.0, 25.0]);
        assert_eq!(r.upper_bound, 25.0);
        assert!(r.outlier_values.is_empty());
    }

    #[test]
    fn empty_series_yields_empty_result() {
        let r = detect_outliers_iqr(&[]);
        assert_eq!(r, OutlierResult::default());
    }

    #[test]
    fn caller_slice_is_not_sorted_in_place() {
        let series = vec![3.0, 1.0, 2.0, 100.0];
        let _ = detect_outliers_iqr(&series);
        assert_eq!(series, vec![3.0, 1.0, 2.0, 100.0]);
    }

    #[test]
    fn for_field_attaches_name() {
        let r = detect_outliers_iqr(&[1.0]).for_field("revenue");
        assert_eq!(r.field.as_deref(), Some("revenue"));
        assert_eq!(r.q1, 1.0);
        assert_eq!(r.q3, 1.0);
    }
}
