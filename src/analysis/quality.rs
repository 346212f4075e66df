//! Dataset-wide data-quality scan.
//!
//! Combines four passes over a [`DataSet`]:
//!
//! - missing cells per field (null, blank text, non-finite numbers)
//! - exact duplicate rows
//! - IQR outliers for every field that holds numbers
//! - a first-half / second-half trend per numeric field
//!
//! ```rust
//! use dashboard_analytics::analysis::scan_quality;
//! use dashboard_analytics::types::DataSet;
//!
//! let report = scan_quality(&DataSet::default());
//! assert_eq!(report.missing.percentage, 0.0);
//! assert!(report.outliers.is_empty());
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::types::{DataSet, Value, NULL};

use super::outliers::{detect_outliers_iqr, OutlierResult};
use super::trend::TrendDirection;
use super::mean;

/// Missing-cell counts for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMissing {
    pub field: String,
    pub missing_count: usize,
    /// Share of rows missing this field, `0..=100`.
    pub percentage: f64,
}

/// Missing-data pass of a [`DataQualityReport`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MissingDataSummary {
    pub total_missing: usize,
    /// `total_missing / (rows × fields) × 100`.
    pub percentage: f64,
    /// One entry per schema field, in schema order.
    pub fields: Vec<FieldMissing>,
    /// Fields missing in more than 10% of rows.
    pub high_missing_fields: Vec<String>,
}

/// Duplicate-row pass of a [`DataQualityReport`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DuplicateSummary {
    /// Rows identical to an earlier row.
    pub count: usize,
    pub percentage: f64,
}

/// Half-over-half change of one numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTrend {
    pub field: String,
    pub first_half_average: Option<f64>,
    pub second_half_average: Option<f64>,
    /// `None` when either half is empty or the first-half average is zero.
    pub change_percentage: Option<f64>,
    pub direction: TrendDirection,
}

/// Result of [`scan_quality`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub row_count: usize,
    pub field_count: usize,
    pub missing: MissingDataSummary,
    pub duplicates: DuplicateSummary,
    /// One entry per field holding at least one number, including fields with no outliers.
    pub outliers: Vec<OutlierResult>,
    /// One entry per field holding at least one number.
    pub trends: Vec<FieldTrend>,
}

impl DataQualityReport {
    /// Total outliers across all fields.
    pub fn total_outliers(&self) -> usize {
        self.outliers.iter().map(OutlierResult::count).sum()
    }
}

/// Scan `dataset` with default thresholds. Never panics; an empty dataset yields an empty
/// report.
pub fn scan_quality(dataset: &DataSet) -> DataQualityReport {
    scan_quality_with(dataset, &AnalysisConfig::default())
}

/// Scan `dataset` using `config.high_missing_ratio` and `config.quality_trend_threshold_pct`.
pub fn scan_quality_with(dataset: &DataSet, config: &AnalysisConfig) -> DataQualityReport {
    let row_count = dataset.row_count();
    let field_count = dataset.schema.len();

    let missing = missing_pass(dataset, config.high_missing_ratio);
    let duplicates = duplicate_pass(dataset);

    let mut outliers = Vec::new();
    let mut trends = Vec::new();
    for name in dataset.schema.field_names() {
        if !dataset.has_numeric_values(name) {
            continue;
        }
        let values = dataset.numeric_values(name);
        outliers.push(detect_outliers_iqr(&values).for_field(name));
        trends.push(half_trend(name, &values, config.quality_trend_threshold_pct));
    }

    let report = DataQualityReport {
        row_count,
        field_count,
        missing,
        duplicates,
        outliers,
        trends,
    };

    tracing::debug!(
        target: "dashboard::quality",
        rows = row_count,
        fields = field_count,
        missing_pct = report.missing.percentage,
        duplicates = report.duplicates.count,
        outliers = report.total_outliers(),
        "data quality scan finished"
    );

    report
}

fn missing_pass(dataset: &DataSet, high_missing_ratio: f64) -> MissingDataSummary {
    let row_count = dataset.row_count();
    let mut fields = Vec::with_capacity(dataset.schema.len());
    let mut high_missing_fields = Vec::new();
    let mut total_missing = 0usize;

    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        let missing_count = dataset
            .rows
            .iter()
            .filter(|row| row.get(idx).is_none_or(Value::is_missing))
            .count();
        total_missing += missing_count;

        let fraction = ratio(missing_count, row_count);
        if fraction > high_missing_ratio {
            high_missing_fields.push(field.name.clone());
        }
        fields.push(FieldMissing {
            field: field.name.clone(),
            missing_count,
            percentage: fraction * 100.0,
        });
    }

    MissingDataSummary {
        total_missing,
        percentage: ratio(total_missing, row_count * dataset.schema.len()) * 100.0,
        fields,
        high_missing_fields,
    }
}

fn duplicate_pass(dataset: &DataSet) -> DuplicateSummary {
    let mut seen: HashSet<String> = HashSet::with_capacity(dataset.row_count());
    let mut count = 0usize;
    for row in &dataset.rows {
        if !seen.insert(canonical_row_key(dataset, row)) {
            count += 1;
        }
    }
    DuplicateSummary {
        count,
        percentage: ratio(count, dataset.row_count()) * 100.0,
    }
}

/// Serialize a row as a JSON object with its fields in sorted name order, so two rows compare
/// equal regardless of the order their fields were declared in.
///
/// Zeros are written without sign and non-finite numbers as `null`.
fn canonical_row_key(dataset: &DataSet, row: &[Value]) -> String {
    let keyed: BTreeMap<&str, serde_json::Value> = dataset
        .schema
        .field_names()
        .zip(row.iter().chain(std::iter::repeat(NULL)))
        .map(|(name, value)| (name, canonical_cell(value)))
        .collect();
    serde_json::Value::Object(keyed.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
        .to_string()
}

fn canonical_cell(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Number(v) => {
            let v = if *v == 0.0 { 0.0 } else { *v };
            serde_json::Number::from_f64(v).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Text(s) => serde_json::Value::String(s.clone()),
    }
}

fn half_trend(field: &str, values: &[f64], threshold_pct: f64) -> FieldTrend {
    let (first, second) = values.split_at(values.len() / 2);
    let first_half_average = mean(first);
    let second_half_average = mean(second);

    let change_percentage = match (first_half_average, second_half_average) {
        (Some(a), Some(b)) if a != 0.0 => Some((b - a) / a * 100.0),
        _ => None,
    };
    let direction = match change_percentage {
        Some(pct) if pct > threshold_pct => TrendDirection::Increasing,
        Some(pct) if pct < -threshold_pct => TrendDirection::Decreasing,
        _ => TrendDirection::Stable,
    };

    FieldTrend {
        field: field.to_string(),
        first_half_average,
        second_half_average,
        change_percentage,
        direction,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
