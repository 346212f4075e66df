//! Natural-language chart queries.
//!
//! [`parse_query`] turns free text such as `"Compare revenue by region"` into a
//! [`ChartQuerySpec`]. It is a deterministic keyword matcher, not a grammar: each decision is an
//! ordered table of rules and the first rule whose keyword occurs in the lowercased query wins.
//! Rule order therefore decides ambiguous queries (`"compare the trend"` is a line chart
//! because the trend rule comes first).
//!
//! ```rust
//! use dashboard_analytics::query::{parse_query, Aggregation, ChartType};
//!
//! let spec = parse_query("Compare revenue by region in a bar chart");
//! assert_eq!(spec.chart_type, ChartType::Bar);
//! assert_eq!(spec.aggregation, Aggregation::Sum);
//! assert_eq!(spec.y_axis_field, "Revenue");
//! assert_eq!(spec.x_axis_field, "Region");
//! assert_eq!(spec.title, "Revenue by Region");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chart type selected for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
}

/// How y-axis values are combined per x-axis group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
        })
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Aggregation::Sum => "sum",
            Aggregation::Avg => "avg",
            Aggregation::Count => "count",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        })
    }
}

/// Default x-axis label when no dimension keyword is recognized.
pub const DEFAULT_X_AXIS: &str = "Category";
/// Default y-axis label when no measure keyword is recognized.
pub const DEFAULT_Y_AXIS: &str = "Value";
/// Title used unless both sides of a "by" query are recognized.
pub const DEFAULT_TITLE: &str = "Data Visualization";

/// Chart configuration derived from a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartQuerySpec {
    pub chart_type: ChartType,
    pub aggregation: Aggregation,
    /// Display label of the dimension, e.g. `"Region"`.
    pub x_axis_field: String,
    /// Display label of the measure, e.g. `"Revenue"`.
    pub y_axis_field: String,
    pub title: String,
}

impl Default for ChartQuerySpec {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Bar,
            aggregation: Aggregation::Sum,
            x_axis_field: DEFAULT_X_AXIS.to_string(),
            y_axis_field: DEFAULT_Y_AXIS.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// One entry of a first-match rule table: any keyword selects `effect`.
#[derive(Debug, Clone, Copy)]
struct Rule<T> {
    keywords: &'static [&'static str],
    effect: T,
}

impl<T: Copy> Rule<T> {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Evaluate `rules` in order against lowercased `text`.
fn first_match<T: Copy>(rules: &[Rule<T>], text: &str) -> Option<T> {
    rules.iter().find(|r| r.matches(text)).map(|r| r.effect)
}

const CHART_RULES: &[Rule<ChartType>] = &[
    Rule {
        keywords: &["trend", "over time"],
        effect: ChartType::Line,
    },
    Rule {
        keywords: &["compare", "comparison"],
        effect: ChartType::Bar,
    },
    Rule {
        keywords: &["distribution", "breakdown", "proportion", "percentage"],
        effect: ChartType::Pie,
    },
    Rule {
        keywords: &["correlation", "relationship"],
        effect: ChartType::Scatter,
    },
    Rule {
        keywords: &["line chart", "line graph"],
        effect: ChartType::Line,
    },
    Rule {
        keywords: &["bar chart", "bar graph"],
        effect: ChartType::Bar,
    },
    Rule {
        keywords: &["pie chart"],
        effect: ChartType::Pie,
    },
    Rule {
        keywords: &["scatter"],
        effect: ChartType::Scatter,
    },
];

const AGGREGATION_RULES: &[Rule<Aggregation>] = &[
    Rule {
        keywords: &["average", "mean"],
        effect: Aggregation::Avg,
    },
    Rule {
        keywords: &["count"],
        effect: Aggregation::Count,
    },
    Rule {
        keywords: &["minimum", "min"],
        effect: Aggregation::Min,
    },
    Rule {
        keywords: &["maximum", "max"],
        effect: Aggregation::Max,
    },
];

const MEASURE_RULES: &[Rule<&str>] = &[
    Rule {
        keywords: &["sales"],
        effect: "Sales",
    },
    Rule {
        keywords: &["revenue"],
        effect: "Revenue",
    },
    Rule {
        keywords: &["profit"],
        effect: "Profit",
    },
    Rule {
        keywords: &["cost"],
        effect: "Cost",
    },
];

const DIMENSION_RULES: &[Rule<&str>] = &[
    Rule {
        keywords: &["category"],
        effect: "Category",
    },
    Rule {
        keywords: &["region"],
        effect: "Region",
    },
    Rule {
        keywords: &["month"],
        effect: "Month",
    },
    Rule {
        keywords: &["product"],
        effect: "Product",
    },
];

/// Dimensions that force a line chart.
const TIME_DIMENSION_KEYWORDS: &[&str] = &["month", "time"];

/// Parse a free-text query into a chart configuration. Never fails; unrecognized input yields
/// [`ChartQuerySpec::default`].
pub fn parse_query(text: &str) -> ChartQuerySpec {
    let query = text.to_lowercase();

    let mut chart_type = first_match(CHART_RULES, &query).unwrap_or_default();
    let aggregation = first_match(AGGREGATION_RULES, &query).unwrap_or_default();

    let (left, right) = match split_on_by(&query) {
        Some((left, right)) => (left, Some(right)),
        None => (query.as_str(), None),
    };

    let measure = first_match(MEASURE_RULES, left);
    let dimension = right.and_then(|r| first_match(DIMENSION_RULES, r));

    if right.is_some_and(|r| TIME_DIMENSION_KEYWORDS.iter().any(|k| r.contains(k))) {
        chart_type = ChartType::Line;
    }

    let y_axis_field = measure.unwrap_or(DEFAULT_Y_AXIS).to_string();
    let x_axis_field = dimension.unwrap_or(DEFAULT_X_AXIS).to_string();
    let title = match (measure, dimension) {
        (Some(y), Some(x)) => format!("{y} by {x}"),
        _ => DEFAULT_TITLE.to_string(),
    };

    ChartQuerySpec {
        chart_type,
        aggregation,
        x_axis_field,
        y_axis_field,
        title,
    }
}

/// Split at the first standalone word "by" (so "nearby" or "bypass" do not count).
fn split_on_by(query: &str) -> Option<(&str, &str)> {
    let bytes = query.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let at = query.match_indices("by").map(|(i, _)| i).find(|&i| {
        let before_ok = i == 0 || !is_word(bytes[i - 1]);
        let after_ok = i + 2 >= bytes.len() || !is_word(bytes[i + 2]);
        before_ok && after_ok
    })?;
    Some((&query[..at], &query[at + 2..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_revenue_by_region() {
        let spec = parse_query("Compare revenue by region in a bar chart");
        assert_eq!(
            spec,
            ChartQuerySpec {
                chart_type: ChartType::Bar,
                aggregation: Aggregation::Sum,
                x_axis_field: "Region".to_string(),
                y_axis_field: "Revenue".to_string(),
                title: "Revenue by Region".to_string(),
            }
        );
    }

    #[test]
    fn month_dimension_forces_line_chart() {
        let spec = parse_query("Show sales trend by month");
        assert_eq!(spec.chart_type, ChartType::Line);
        assert_eq!(spec.x_axis_field, "Month");
        assert_eq!(spec.y_axis_field, "Sales");
        assert_eq!(spec.title, "Sales by Month");

        // Overrides an earlier pie decision too.
        let spec = parse_query("Revenue breakdown by month");
        assert_eq!(spec.chart_type, ChartType::Line);
    }

    #[test]
    fn time_dimension_forces_line_without_x_label() {
        let spec = parse_query("compare profit by time period");
        assert_eq!(spec.chart_type, ChartType::Line);
        assert_eq!(spec.x_axis_field, DEFAULT_X_AXIS);
        assert_eq!(spec.title, DEFAULT_TITLE);
    }

    #[test]
    fn rule_order_resolves_ambiguity() {
        // "trend" is checked before "compare".
        assert_eq!(parse_query("compare the trend").chart_type, ChartType::Line);
        // "compare" before "distribution".
        assert_eq!(
            parse_query("compare the distribution").chart_type,
            ChartType::Bar
        );
        // keyword rules before explicit chart names
        assert_eq!(
            parse_query("correlation as a pie chart").chart_type,
            ChartType::Scatter
        );
    }

    #[test]
    fn chart_keywords() {
        assert_eq!(parse_query("sales over time").chart_type, ChartType::Line);
        assert_eq!(parse_query("percentage of cost").chart_type, ChartType::Pie);
        assert_eq!(
            parse_query("relationship between cost and profit").chart_type,
            ChartType::Scatter
        );
        assert_eq!(parse_query("a scatter of cost").chart_type, ChartType::Scatter);
        assert_eq!(parse_query("show revenue").chart_type, ChartType::Bar);
    }

    #[test]
    fn aggregation_keywords() {
        assert_eq!(parse_query("average sales by region").aggregation, Aggregation::Avg);
        assert_eq!(parse_query("mean cost").aggregation, Aggregation::Avg);
        assert_eq!(parse_query("count orders by product").aggregation, Aggregation::Count);
        assert_eq!(parse_query("minimum profit").aggregation, Aggregation::Min);
        assert_eq!(parse_query("max revenue by region").aggregation, Aggregation::Max);
        assert_eq!(parse_query("total revenue").aggregation, Aggregation::Sum);
    }

    #[test]
    fn title_requires_both_sides() {
        let spec = parse_query("revenue by something else");
        assert_eq!(spec.y_axis_field, "Revenue");
        assert_eq!(spec.x_axis_field, DEFAULT_X_AXIS);
        assert_eq!(spec.title, DEFAULT_TITLE);

        // No "by": measure still read, but no title.
        let spec = parse_query("show profit per region");
        assert_eq!(spec.y_axis_field, "Profit");
        assert_eq!(spec.x_axis_field, DEFAULT_X_AXIS);
        assert_eq!(spec.title, DEFAULT_TITLE);
    }

    #[test]
    fn measure_only_read_from_left_of_by() {
        let spec = parse_query("orders by sales region");
        assert_eq!(spec.y_axis_field, DEFAULT_Y_AXIS);
        assert_eq!(spec.x_axis_field, "Region");
    }

    #[test]
    fn by_must_be_a_standalone_word() {
        assert_eq!(split_on_by("nearby stores"), None);
        assert_eq!(split_on_by("sales by region"), Some(("sales ", " region")));
        assert_eq!(split_on_by("by region"), Some(("", " region")));
    }

    #[test]
    fn unmatched_input_is_all_default() {
        assert_eq!(parse_query(""), ChartQuerySpec::default());
        assert_eq!(parse_query("hello there"), ChartQuerySpec::default());
    }
}
