//! Least-squares trend prediction over an index-ordered series.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;

use super::{finite_values, format_values, mean};

/// Direction of a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Human-readable adjective used in explanations.
    pub fn describe(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "upward",
            TrendDirection::Decreasing => "downward",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Result of [`predict_trend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Change per step of the fitted line.
    pub slope: f64,
    /// Fitted value at index 0.
    pub intercept: f64,
    /// Fitted values at the next positions after the series, or `None` with too little data.
    pub forecast: Option<Vec<f64>>,
    pub direction: TrendDirection,
    /// Raw R². Can be negative for a fit worse than the mean.
    pub goodness_of_fit: f64,
    /// R² clamped to `[0, 1]`.
    pub confidence: f64,
    pub explanation: String,
}

impl TrendResult {
    fn insufficient(n: usize, min_points: usize) -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            forecast: None,
            direction: TrendDirection::Stable,
            goodness_of_fit: 0.0,
            confidence: 0.0,
            explanation: format!(
                "Not enough data to predict a trend (need at least {min_points} values, got {n})."
            ),
        }
    }
}

/// Fit a least-squares line to `series` (x = position `0..n`) and forecast the next 3 values.
///
/// Uses [`AnalysisConfig::default`]; see [`predict_trend_with`].
pub fn predict_trend(series: &[f64]) -> TrendResult {
    predict_trend_with(series, &AnalysisConfig::default())
}

/// Fit a least-squares line to `series` using the thresholds in `config`.
///
/// - Fewer than `config.trend_min_points` finite values yields confidence `0` and no forecast.
/// - `direction` compares the raw slope against `±config.trend_slope_threshold`; the threshold
///   is not normalized to the scale of the data.
pub fn predict_trend_with(series: &[f64], config: &AnalysisConfig) -> TrendResult {
    let values = finite_values(series);
    let n = values.len();
    // Two points are the minimum for a defined slope.
    let min_points = config.trend_min_points.max(2);
    if n < min_points {
        return TrendResult::insufficient(n, min_points);
    }

    let nf = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / nf;

    let forecast: Vec<f64> = (n..n + config.forecast_horizon)
        .map(|x| slope * x as f64 + intercept)
        .collect();

    let goodness_of_fit = r_squared(&values, slope, intercept);
    let confidence = goodness_of_fit.clamp(0.0, 1.0);

    let direction = if slope > config.trend_slope_threshold {
        TrendDirection::Increasing
    } else if slope < -config.trend_slope_threshold {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let explanation = match direction {
        TrendDirection::Stable => format!(
            "Values are stable (slope {slope:.2} per step, R² {goodness_of_fit:.2}). Next {} values forecast: {}.",
            forecast.len(),
            format_values(&forecast)
        ),
        _ => format!(
            "Values are trending {} by {:.2} per step (R² {goodness_of_fit:.2}). Next {} values forecast: {}.",
            direction.describe(),
            slope.abs(),
            forecast.len(),
            format_values(&forecast)
        ),
    };

    TrendResult {
        slope,
        intercept,
        forecast: Some(forecast),
        direction,
        goodness_of_fit,
        confidence,
        explanation,
    }
}

/// `1 - SSres / SStot` for the fitted line against `values`.
///
/// A constant series has `SStot == 0`; its fitted line is the constant itself, so it is
/// reported as a perfect fit.
fn r_squared(values: &[f64], slope: f64, intercept: f64) -> f64 {
    let Some(mean_y) = mean(values) else {
        return 0.0;
    };
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, y) in values.iter().enumerate() {
        let predicted = slope * i as f64 + intercept;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }
    if ss_tot == 0.0 {
        return 1.0;
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn perfect_line_is_fitted_exactly() {
        let r = predict_trend(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_close(r.slope, 10.0);
        assert_close(r.intercept, 10.0);
        assert_eq!(r.forecast, Some(vec![60.0, 70.0, 80.0]));
        assert_eq!(r.direction, TrendDirection::Increasing);
        assert_close(r.goodness_of_fit, 1.0);
        assert_close(r.confidence, 1.0);
        assert!(r.explanation.contains("upward"));
    }

    #[test]
    fn short_series_has_no_forecast() {
        for series in [&[][..], &[1.0][..], &[1.0, 2.0][..]] {
            let r = predict_trend(series);
            assert_eq!(r.confidence, 0.0);
            assert_eq!(r.forecast, None);
            assert!(r.explanation.starts_with("Not enough data"));
        }
    }

    #[test]
    fn decreasing_series() {
        let r = predict_trend(&[9.0, 7.0, 5.0, 3.0]);
        assert_close(r.slope, -2.0);
        assert_eq!(r.direction, TrendDirection::Decreasing);
        assert!(r.explanation.contains("downward"));
    }

    #[test]
    fn slope_threshold_is_absolute() {
        // slope 0.05: stable despite a perfect fit
        let r = predict_trend(&[1.0, 1.05, 1.1, 1.15]);
        assert_eq!(r.direction, TrendDirection::Stable);
        assert_close(r.confidence, 1.0);

        // the same shape scaled up is increasing
        let r = predict_trend(&[100.0, 105.0, 110.0, 115.0]);
        assert_eq!(r.direction, TrendDirection::Increasing);
    }

    #[test]
    fn constant_series_is_a_perfect_stable_fit() {
        let r = predict_trend(&[4.0, 4.0, 4.0, 4.0]);
        assert_eq!(r.slope, 0.0);
        assert_eq!(r.direction, TrendDirection::Stable);
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.forecast, Some(vec![4.0, 4.0, 4.0]));
    }

    #[test]
    fn poor_fit_keeps_raw_r_squared_and_clamps_confidence() {
        let r = predict_trend(&[1.0, 10.0, 1.0, 10.0, 1.0, 10.0, 1.0]);
        assert!(r.goodness_of_fit < 0.2);
        assert!((0.0..=1.0).contains(&r.confidence));
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let r = predict_trend(&[10.0, f64::NAN, 20.0, 30.0, f64::INFINITY]);
        assert_close(r.slope, 10.0);
        assert_eq!(r.forecast, Some(vec![40.0, 50.0, 60.0]));
    }

    #[test]
    fn config_controls_horizon_and_minimum() {
        let cfg = AnalysisConfig {
            forecast_horizon: 1,
            trend_min_points: 5,
            ..AnalysisConfig::default()
        };
        assert_eq!(predict_trend_with(&[1.0, 2.0, 3.0], &cfg).forecast, None);
        assert_eq!(
            predict_trend_with(&[1.0, 2.0, 3.0, 4.0, 5.0], &cfg).forecast,
            Some(vec![6.0])
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let series = vec![3.0, 1.0, 2.0];
        let _ = predict_trend(&series);
        assert_eq!(series, vec![3.0, 1.0, 2.0]);
    }
}
