//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which imports a file into an in-memory
//! [`crate::types::DataSet`].
//!
//! - If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension.
//! - If [`IngestionOptions::schema`] is `None`, field types are inferred from the data.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::types::{DataSet, Schema};

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Supported import formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array-of-objects, single object, or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" | "jsonl" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// If `None`, infer the schema from the data.
    pub schema: Option<Schema>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("schema_fields", &self.schema.as_ref().map(Schema::len))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            schema: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Import a dataset from a file.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and field counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// Failures to infer the format are returned without notifying the observer.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use dashboard_analytics::ingestion::{ingest_from_path, IngestionOptions, TracingObserver};
///
/// # fn main() -> Result<(), dashboard_analytics::DashboardError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
///
/// let ds = ingest_from_path("sales.csv", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// Forcing a format and a schema:
///
/// ```no_run
/// use dashboard_analytics::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
/// use dashboard_analytics::types::{DataType, Field, Schema};
///
/// # fn main() -> Result<(), dashboard_analytics::DashboardError> {
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Json),
///     schema: Some(Schema::new(vec![Field::new("user.visits", DataType::Number)])),
///     ..Default::default()
/// };
///
/// let ds = ingest_from_path("export_without_extension", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> DashboardResult<DataSet> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    let schema = options.schema.as_ref();
    let result = match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path, schema),
        IngestionFormat::Json => json::ingest_json_from_path(path, schema),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    fields: ds.schema.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &DashboardError) -> IngestionSeverity {
    match e {
        DashboardError::Io(_) => IngestionSeverity::Critical,
        DashboardError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        DashboardError::Json(err) if err.is_io() => IngestionSeverity::Critical,
        DashboardError::Json(_)
        | DashboardError::SchemaMismatch { .. }
        | DashboardError::ParseError { .. } => IngestionSeverity::Error,
        DashboardError::ThreadPool(_) => IngestionSeverity::Critical,
        DashboardError::Store { .. } => IngestionSeverity::Warning,
    }
}

fn infer_format_from_path(path: &Path) -> DashboardResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DashboardError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| DashboardError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// An owned import request, e.g. for queuing imports behind a file picker.
#[derive(Clone, Debug)]
pub struct IngestionRequest {
    pub path: PathBuf,
    pub options: IngestionOptions,
}

impl IngestionRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: IngestionOptions::default(),
        }
    }

    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> DashboardResult<DataSet> {
        ingest_from_path(&self.path, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_inference() {
        assert_eq!(IngestionFormat::from_extension("CSV"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("jsonl"), Some(IngestionFormat::Json));
        assert_eq!(IngestionFormat::from_extension("parquet"), None);
    }

    #[test]
    fn missing_file_is_critical() {
        let err = ingest_from_path("definitely/not/here.csv", &IngestionOptions::default()).unwrap_err();
        assert_eq!(severity_for_error(&err), IngestionSeverity::Critical);
    }

    #[test]
    fn unknown_extension_is_schema_mismatch() {
        let err = ingest_from_path("data.xlsx", &IngestionOptions::default()).unwrap_err();
        assert!(matches!(err, DashboardError::SchemaMismatch { .. }));
    }
}
