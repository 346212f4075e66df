//! `dashboard-analytics` is the analysis core of a data-visualization dashboard.
//!
//! A dataset is imported into an in-memory [`types::DataSet`] (from CSV, JSON, or a built-in
//! sample), charts are described by free-text queries, and the dashboard's insights panel is
//! filled by a handful of small statistical routines.
//!
//! ## Modules
//!
//! - [`types`]: schema + dynamically typed cells + in-memory dataset
//! - [`ingestion`]: dataset provider (CSV/JSON import, samples, observer hooks)
//! - [`analysis`]: trend prediction, anomaly and IQR outlier detection, categorization,
//!   data-quality scanning, insight cards
//! - [`query`]: keyword-based natural-language chart query parser
//! - [`processing`]: group-by aggregation turning a parsed query into chart points
//! - [`execution`]: parallel whole-dataset analysis with metrics and observer hooks
//! - [`store`]: saved dashboards over an injected key-value store
//! - [`config`]: tunable analysis thresholds
//! - [`error`]: error type for the fallible boundaries (I/O, parsing, storage)
//!
//! Analysis routines never fail: too little data yields a result with confidence `0` and an
//! explanation saying so.
//!
//! ## Quick example: sample data → insights → chart
//!
//! ```rust
//! use dashboard_analytics::analysis::{generate_insights, scan_quality};
//! use dashboard_analytics::config::AnalysisConfig;
//! use dashboard_analytics::ingestion::SampleDataset;
//! use dashboard_analytics::processing::build_chart_data;
//! use dashboard_analytics::query::{parse_query, ChartType};
//!
//! let ds = SampleDataset::Sales.load();
//!
//! let insights = generate_insights(&ds, &AnalysisConfig::default());
//! assert!(!insights.is_empty());
//!
//! let report = scan_quality(&ds);
//! assert_eq!(report.missing.total_missing, 0);
//!
//! let spec = parse_query("Show revenue trend by month");
//! assert_eq!(spec.chart_type, ChartType::Line);
//! let chart = build_chart_data(&ds, &spec).unwrap();
//! assert_eq!(chart.points.len(), 6);
//! ```
//!
//! ## Importing a file
//!
//! ```no_run
//! use dashboard_analytics::ingestion::{ingest_from_path, IngestionOptions};
//!
//! # fn main() -> Result<(), dashboard_analytics::DashboardError> {
//! // Format from the extension, schema inferred from the data.
//! let ds = ingest_from_path("sales.csv", &IngestionOptions::default())?;
//! println!("rows={} fields={}", ds.row_count(), ds.schema.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing` (targets `dashboard::ingest`, `dashboard::execution`,
//! `dashboard::quality`, `dashboard::store`) and never installs a subscriber itself.

pub mod analysis;
pub mod config;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod query;
pub mod store;
pub mod types;

pub use error::{DashboardError, DashboardResult};
