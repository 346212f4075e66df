//! Observer hooks for dataset imports.
//!
//! The dashboard reports import outcomes (a file loaded, a parse failure, a missing file) through
//! an [`IngestionObserver`]. [`TracingObserver`] forwards them to `tracing`; callers may install
//! their own observers and fan out with [`CompositeObserver`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::DashboardError;

use super::unified::IngestionFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    Info,
    /// Non-fatal.
    Warning,
    /// The import failed because of its content.
    Error,
    /// The import failed because the source could not be read at all.
    Critical,
}

/// Context about an import attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: IngestionFormat,
}

/// Shape of a successfully imported dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub rows: usize,
    pub fields: usize,
}

/// Observer interface for import outcomes.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &DashboardError) {}

    /// Called when a failure meets the alert threshold. Defaults to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fans callbacks out to a list of observers, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }

    pub fn push(&mut self, observer: Arc<dyn IngestionObserver>) {
        self.observers.push(observer);
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits import events as `tracing` events under the `dashboard::ingest` target.
///
/// Failures are logged at `warn` (or `error` for [`IngestionSeverity::Critical`]); alerts are
/// always `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            target: "dashboard::ingest",
            format = ?ctx.format,
            path = %ctx.path.display(),
            rows = stats.rows,
            fields = stats.fields,
            "dataset imported"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        if severity >= IngestionSeverity::Critical {
            tracing::error!(
                target: "dashboard::ingest",
                ?severity,
                format = ?ctx.format,
                path = %ctx.path.display(),
                %error,
                "dataset import failed"
            );
        } else {
            tracing::warn!(
                target: "dashboard::ingest",
                ?severity,
                format = ?ctx.format,
                path = %ctx.path.display(),
                %error,
                "dataset import failed"
            );
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &DashboardError) {
        tracing::error!(
            target: "dashboard::ingest",
            alert = true,
            ?severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "dataset import alert"
        );
    }
}
