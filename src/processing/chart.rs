//! Turn a [`ChartQuerySpec`] into plottable points.

use serde::{Deserialize, Serialize};

use crate::query::{Aggregation, ChartQuerySpec, ChartType};
use crate::types::{DataSet, DataType};

use super::aggregate::{aggregate, Group};

/// Data for one chart, ready for a rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub chart_type: ChartType,
    pub aggregation: Aggregation,
    pub title: String,
    /// Dataset field used for the x axis.
    pub x_field: String,
    /// Dataset field used for the y axis (`None` when counting rows).
    pub y_field: Option<String>,
    pub points: Vec<Group>,
}

/// Resolve the axis labels of `spec` against `dataset` and aggregate.
///
/// Labels are matched to field names ignoring ASCII case. An unmatched x label falls back to
/// the first text field, an unmatched y label to the first numeric field. Counting needs no
/// y field. Returns `None` if no usable fields exist.
pub fn build_chart_data(dataset: &DataSet, spec: &ChartQuerySpec) -> Option<ChartData> {
    let x_field = resolve_field(dataset, &spec.x_axis_field, DataType::Text)?;
    let y_field = match resolve_field(dataset, &spec.y_axis_field, DataType::Number) {
        Some(f) => Some(f),
        None if spec.aggregation == Aggregation::Count => None,
        None => return None,
    };

    let points = aggregate(dataset, &x_field, y_field.as_deref(), spec.aggregation)?;

    Some(ChartData {
        chart_type: spec.chart_type,
        aggregation: spec.aggregation,
        title: spec.title.clone(),
        x_field,
        y_field,
        points,
    })
}

fn resolve_field(dataset: &DataSet, label: &str, fallback: DataType) -> Option<String> {
    let schema = &dataset.schema;
    let idx = schema
        .index_of_ignore_case(label)
        .or_else(|| schema.fields.iter().position(|f| f.data_type == fallback))?;
    Some(schema.fields[idx].name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;
    use crate::types::{Field, Schema, Value};

    fn dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("order_id", DataType::Number),
            Field::new("region", DataType::Text),
            Field::new("Revenue", DataType::Number),
        ]);
        let rows = vec![
            vec![Value::Number(1.0), Value::Text("north".into()), Value::Number(100.0)],
            vec![Value::Number(2.0), Value::Text("south".into()), Value::Number(50.0)],
            vec![Value::Number(3.0), Value::Text("north".into()), Value::Number(25.0)],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn labels_resolve_case_insensitively() {
        let chart = build_chart_data(&dataset(), &parse_query("compare revenue by region")).unwrap();
        assert_eq!(chart.x_field, "region");
        assert_eq!(chart.y_field.as_deref(), Some("Revenue"));
        assert_eq!(chart.title, "Revenue by Region");
        let totals: Vec<(&str, f64)> = chart.points.iter().map(|g| (g.key.as_str(), g.value)).collect();
        assert_eq!(totals, vec![("north", 125.0), ("south", 50.0)]);
    }

    #[test]
    fn unmatched_labels_fall_back_by_type() {
        let chart = build_chart_data(&dataset(), &ChartQuerySpec::default()).unwrap();
        assert_eq!(chart.x_field, "region");
        assert_eq!(chart.y_field.as_deref(), Some("order_id"));
    }

    #[test]
    fn count_without_numeric_field() {
        let schema = Schema::new(vec![Field::new("product", DataType::Text)]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Text("a".into())], vec![Value::Text("a".into())]],
        );
        let chart = build_chart_data(&ds, &parse_query("count by product")).unwrap();
        assert_eq!(chart.y_field, None);
        assert_eq!(chart.points[0].value, 2.0);

        assert_eq!(build_chart_data(&ds, &parse_query("sales by product")), None);
    }

    #[test]
    fn empty_schema_yields_none() {
        assert_eq!(build_chart_data(&DataSet::default(), &ChartQuerySpec::default()), None);
    }
}
