use thiserror::Error;

/// Convenience result type for the fallible boundaries of the crate.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error type returned by ingestion, configuration and dashboard storage.
///
/// Analysis routines never return this: short or empty input produces a "no signal" result
/// instead.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error outside of row-level ingestion.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not conform to the expected shape (missing columns, wrong JSON shape, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// The execution engine's worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A key-value store backend failed.
    #[error("store error: {message}")]
    Store { message: String },
}
