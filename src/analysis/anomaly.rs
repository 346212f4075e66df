//! z-score anomaly detection.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;

use super::{finite_indexed, mean, population_std_dev};

/// Confidence reported when a large enough series contains no anomalies.
const NO_ANOMALY_CONFIDENCE: f64 = 0.8;

/// A value flagged by [`detect_anomalies`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlaggedValue {
    /// Position in the caller's series.
    pub index: usize,
    pub value: f64,
    /// `|value - mean| / std_dev`.
    pub z_score: f64,
}

/// Result of [`detect_anomalies`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub threshold: f64,
    /// Flagged values in series order, truncated to the first few.
    pub flagged: Vec<FlaggedValue>,
    /// Number of flagged values before truncation.
    pub total_flagged: usize,
    pub confidence: f64,
    pub explanation: String,
}

/// Flag values whose z-score reaches `threshold` (conventionally `2.0`).
///
/// - Fewer than 5 finite values yields confidence `0` and nothing flagged.
/// - A series with zero spread has no anomalies.
/// - At most 5 flagged values are returned, in the order they occur; `total_flagged` keeps the
///   full count.
pub fn detect_anomalies(series: &[f64], threshold: f64) -> AnomalyResult {
    let cfg = AnalysisConfig::default();
    detect(series, threshold, cfg.anomaly_min_points, cfg.anomaly_max_reported)
}

/// [`detect_anomalies`] with the threshold, minimum length and report limit taken from `config`.
pub fn detect_anomalies_with(series: &[f64], config: &AnalysisConfig) -> AnomalyResult {
    detect(
        series,
        config.anomaly_threshold,
        config.anomaly_min_points,
        config.anomaly_max_reported,
    )
}

fn detect(series: &[f64], threshold: f64, min_points: usize, max_reported: usize) -> AnomalyResult {
    let indexed = finite_indexed(series);
    let values: Vec<f64> = indexed.iter().map(|(_, v)| *v).collect();
    let n = values.len();

    let Some(mean) = mean(&values) else {
        return insufficient(0.0, 0.0, threshold, n, min_points);
    };
    let std_dev = population_std_dev(&values, mean);
    if n < min_points {
        return insufficient(mean, std_dev, threshold, n, min_points);
    }

    let mut flagged: Vec<FlaggedValue> = Vec::new();
    if std_dev > 0.0 {
        for &(index, value) in &indexed {
            let z_score = (value - mean).abs() / std_dev;
            if z_score >= threshold {
                flagged.push(FlaggedValue {
                    index,
                    value,
                    z_score,
                });
            }
        }
    }

    let total_flagged = flagged.len();
    flagged.truncate(max_reported);

    let (confidence, explanation) = if total_flagged == 0 {
        (
            NO_ANOMALY_CONFIDENCE,
            format!(
                "No anomalies detected across {n} values (mean {mean:.2}, std dev {std_dev:.2})."
            ),
        )
    } else {
        let shown = flagged
            .iter()
            .map(|f| format!("{:.2} at position {}", f.value, f.index))
            .collect::<Vec<_>>()
            .join(", ");
        (
            (total_flagged as f64 / n as f64 * 5.0).min(1.0),
            format!(
                "Detected {total_flagged} anomal{} at least {threshold} standard deviations from the mean {mean:.2}: {shown}.",
                if total_flagged == 1 { "y" } else { "ies" }
            ),
        )
    };

    AnomalyResult {
        mean,
        std_dev,
        threshold,
        flagged,
        total_flagged,
        confidence,
        explanation,
    }
}

fn insufficient(
    mean: f64,
    std_dev: f64,
    threshold: f64,
    n: usize,
    min_points: usize,
) -> AnomalyResult {
    AnomalyResult {
        mean,
        std_dev,
        threshold,
        flagged: Vec::new(),
        total_flagged: 0,
        confidence: 0.0,
        explanation: format!(
            "Not enough data to detect anomalies (need at least {min_points} values, got {n})."
        ),
    }
}
