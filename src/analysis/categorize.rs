//! Frequency histogram over categorical values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;

/// Confidence reported whenever at least one category exists.
const CATEGORY_CONFIDENCE: f64 = 0.9;

/// One bar of a [`CategoryResult`] histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Normalized (lowercased, trimmed) label.
    pub label: String,
    pub count: usize,
    /// Share of all counted values, `0..=100`.
    pub percentage: f64,
}

/// Result of [`categorize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Categories by count descending, first-seen order on ties; truncated to the top 10.
    pub histogram: Vec<CategoryCount>,
    pub most_common: Option<String>,
    /// Number of distinct labels before truncation.
    pub unique_count: usize,
    /// Number of non-blank values counted.
    pub total_count: usize,
    pub confidence: f64,
    pub explanation: String,
}

/// Count normalized labels in `series`.
///
/// Labels are lowercased and trimmed before counting, so `"Sales"` and `"sales "` are the same
/// category and are reported as `"sales"`. Values that trim to empty are not counted.
pub fn categorize<S: AsRef<str>>(series: &[S]) -> CategoryResult {
    categorize_with(series, &AnalysisConfig::default())
}

/// [`categorize`] keeping `config.category_top_n` categories.
pub fn categorize_with<S: AsRef<str>>(series: &[S], config: &AnalysisConfig) -> CategoryResult {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut total_count = 0usize;

    for raw in series {
        let label = raw.as_ref().trim().to_lowercase();
        if label.is_empty() {
            continue;
        }
        total_count += 1;
        match positions.get(&label) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }

    let unique_count = counts.len();
    // `sort_by` is stable: ties keep first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(config.category_top_n);

    let histogram: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            percentage: count as f64 / total_count as f64 * 100.0,
            label,
            count,
        })
        .collect();

    let most_common = histogram.first().map(|c| c.label.clone());
    let (confidence, explanation) = match histogram.first() {
        Some(top) => (
            CATEGORY_CONFIDENCE,
            format!(
                "Found {unique_count} categor{}. Most common is '{}' with {} of {total_count} values ({:.1}%).",
                if unique_count == 1 { "y" } else { "ies" },
                top.label,
                top.count,
                top.percentage
            ),
        ),
        None => (0.0, "No categories found.".to_string()),
    };

    CategoryResult {
        histogram,
        most_common,
        unique_count,
        total_count,
        confidence,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let r = categorize(&["Sales", "sales ", "marketing", "Sales"]);
        assert_eq!(
            r.histogram,
            vec![
                CategoryCount {
                    label: "sales".to_string(),
                    count: 3,
                    percentage: 75.0
                },
                CategoryCount {
                    label: "marketing".to_string(),
                    count: 1,
                    percentage: 25.0
                },
            ]
        );
        assert_eq!(r.most_common.as_deref(), Some("sales"));
        assert_eq!(r.unique_count, 2);
        assert_eq!(r.confidence, 0.9);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let r = categorize(&["b", "a", "c", "a", "b", "c"]);
        let labels: Vec<_> = r.histogram.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }

    #[test]
    fn histogram_is_truncated_but_unique_count_is_not() {
        let values: Vec<String> = (0..15).map(|i| format!("cat{i}")).collect();
        let r = categorize(&values);
        assert_eq!(r.histogram.len(), 10);
        assert_eq!(r.unique_count, 15);
        assert_eq!(r.histogram[0].label, "cat0");
    }

    #[test]
    fn empty_input_has_zero_confidence() {
        let r = categorize::<&str>(&[]);
        assert!(r.histogram.is_empty());
        assert_eq!(r.most_common, None);
        assert_eq!(r.confidence, 0.0);

        let r = categorize(&["  ", ""]);
        assert_eq!(r.total_count, 0);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn running_twice_is_idempotent() {
        let input = ["North", " south", "NORTH", "east "];
        assert_eq!(categorize(&input), categorize(&input));
    }
}
