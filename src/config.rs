//! Tunable thresholds for the analysis routines.
//!
//! [`AnalysisConfig::default`] reproduces the dashboard's fixed constants; the plain analysis
//! functions (e.g. [`crate::analysis::predict_trend`]) always use these defaults. The `_with`
//! variants accept a custom config, which can be loaded from JSON:
//!
//! ```rust
//! use dashboard_analytics::config::AnalysisConfig;
//!
//! let cfg = AnalysisConfig::from_json_str(r#"{ "anomaly_threshold": 3.0 }"#).unwrap();
//! assert_eq!(cfg.anomaly_threshold, 3.0);
//! // Unspecified keys keep their defaults.
//! assert_eq!(cfg.category_top_n, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;

/// Thresholds used by trend, anomaly, categorization and quality analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum series length for a trend fit.
    pub trend_min_points: usize,
    /// Absolute slope (raw units per step) above which a trend is increasing/decreasing.
    pub trend_slope_threshold: f64,
    /// Number of future points forecast by the trend fit.
    pub forecast_horizon: usize,
    /// Minimum series length for z-score anomaly detection.
    pub anomaly_min_points: usize,
    /// z-score at or above which a value is flagged.
    pub anomaly_threshold: f64,
    /// Maximum number of flagged values reported.
    pub anomaly_max_reported: usize,
    /// Number of categories kept in a histogram.
    pub category_top_n: usize,
    /// Missing fraction above which a field is reported as high-missing.
    pub high_missing_ratio: f64,
    /// Percentage change between halves above which a field trend is not stable.
    pub quality_trend_threshold_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_min_points: 3,
            trend_slope_threshold: 0.1,
            forecast_horizon: 3,
            anomaly_min_points: 5,
            anomaly_threshold: 2.0,
            anomaly_max_reported: 5,
            category_top_n: 10,
            high_missing_ratio: 0.10,
            quality_trend_threshold_pct: 5.0,
        }
    }
}

impl AnalysisConfig {
    /// Parse a config from JSON. Missing keys fall back to [`AnalysisConfig::default`].
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
