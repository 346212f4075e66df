//! Dataset provider: CSV/JSON import and built-in samples.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - infers the schema unless one is supplied
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under [`csv`] and [`json`]; bundled demo data
//! lives in [`samples`].

pub mod csv;
pub mod json;
pub mod observability;
pub mod samples;
pub mod unified;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use samples::SampleDataset;
pub use unified::{ingest_from_path, IngestionFormat, IngestionOptions, IngestionRequest};
