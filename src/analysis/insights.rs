//! Insight cards for the dashboard's "AI insights" panel.
//!
//! Each numeric field gets a trend card and an anomaly card; each text field gets a category
//! card. Cards whose underlying routine reported no signal (confidence `0`) are dropped.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::types::{DataSet, DataType, Field};

use super::anomaly::detect_anomalies_with;
use super::categorize::categorize_with;
use super::trend::predict_trend_with;

/// Which routine produced an [`Insight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Trend,
    Anomaly,
    Category,
}

/// A single plain-text observation about one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub field: String,
    pub title: String,
    pub explanation: String,
    pub confidence: f64,
}

/// Insights for every field of `dataset`, in schema order.
pub fn generate_insights(dataset: &DataSet, config: &AnalysisConfig) -> Vec<Insight> {
    dataset
        .schema
        .fields
        .iter()
        .flat_map(|field| field_insights(dataset, field, config))
        .collect()
}

/// Insights for a single field.
///
/// Numeric cards are produced whenever the column holds finite numbers; a category card only
/// for fields typed [`DataType::Text`].
pub fn field_insights(dataset: &DataSet, field: &Field, config: &AnalysisConfig) -> Vec<Insight> {
    let mut out = Vec::new();
    let name = field.name.as_str();

    let numbers = dataset.numeric_values(name);
    if !numbers.is_empty() {
        let trend = predict_trend_with(&numbers, config);
        if trend.confidence > 0.0 {
            out.push(Insight {
                kind: InsightKind::Trend,
                field: field.name.clone(),
                title: format!("{} trend in {name}", capitalize(trend.direction.describe())),
                explanation: trend.explanation,
                confidence: trend.confidence,
            });
        }

        let anomalies = detect_anomalies_with(&numbers, config);
        if anomalies.confidence > 0.0 {
            let title = match anomalies.total_flagged {
                0 => format!("No anomalies in {name}"),
                1 => format!("1 anomaly in {name}"),
                n => format!("{n} anomalies in {name}"),
            };
            out.push(Insight {
                kind: InsightKind::Anomaly,
                field: field.name.clone(),
                title,
                explanation: anomalies.explanation,
                confidence: anomalies.confidence,
            });
        }
    }

    if field.data_type == DataType::Text {
        let categories = categorize_with(&dataset.text_values(name), config);
        if let Some(top) = categories.most_common.as_deref() {
            out.push(Insight {
                kind: InsightKind::Category,
                field: field.name.clone(),
                title: format!("Top {name}: {top}"),
                explanation: categories.explanation.clone(),
                confidence: categories.confidence,
            });
        }
    }

    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
