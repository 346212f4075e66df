//! Chart data preparation.
//!
//! The processing layer turns a [`crate::types::DataSet`] plus a
//! [`crate::query::ChartQuerySpec`] into grouped, aggregated points for the rendering layer.
//!
//! - [`reduce()`]: a single column reduced with an [`Aggregation`]
//! - [`aggregate()`]: group-by aggregation in first-seen group order
//! - [`build_chart_data()`]: axis-label resolution + aggregation for a parsed query
//!
//! ## Example: query → chart points
//!
//! ```rust
//! use dashboard_analytics::processing::build_chart_data;
//! use dashboard_analytics::query::parse_query;
//! use dashboard_analytics::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("region", DataType::Text),
//!     Field::new("revenue", DataType::Number),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Text("north".into()), Value::Number(10.0)],
//!         vec![Value::Text("south".into()), Value::Number(20.0)],
//!         vec![Value::Text("north".into()), Value::Number(5.0)],
//!     ],
//! );
//!
//! let chart = build_chart_data(&ds, &parse_query("average revenue by region")).unwrap();
//! assert_eq!(chart.points[0].key, "north");
//! assert_eq!(chart.points[0].value, 7.5);
//! ```

pub mod aggregate;
pub mod chart;

pub use crate::query::Aggregation;
pub use aggregate::{aggregate, reduce, Group};
pub use chart::{build_chart_data, ChartData};
