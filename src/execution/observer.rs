use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Execution events emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    RunStarted { fields: usize, rows: usize },
    FieldStarted { field: String },
    FieldFinished { field: String, insights: usize },
    QualityScanned { total_missing: usize, duplicates: usize, outliers: usize },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
///
/// Field events arrive from worker threads, so their relative order is unspecified.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Logs execution events through `tracing` under the `dashboard::execution` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunStarted { fields, rows } => {
                tracing::debug!(target: "dashboard::execution", fields, rows, "analysis run started");
            }
            ExecutionEvent::FieldStarted { field } => {
                tracing::trace!(target: "dashboard::execution", %field, "field analysis started");
            }
            ExecutionEvent::FieldFinished { field, insights } => {
                tracing::debug!(target: "dashboard::execution", %field, insights, "field analysed");
            }
            ExecutionEvent::QualityScanned {
                total_missing,
                duplicates,
                outliers,
            } => {
                tracing::debug!(
                    target: "dashboard::execution",
                    total_missing,
                    duplicates,
                    outliers,
                    "quality scan finished"
                );
            }
            ExecutionEvent::RunFinished { elapsed, metrics } => {
                tracing::info!(target: "dashboard::execution", ?elapsed, %metrics, "analysis run finished");
            }
        }
    }
}

/// Real-time metrics for an analysis run.
///
/// The engine updates these counters during execution; callers can snapshot them at any time.
/// Counters reset at the start of every run.
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    elapsed_ns: AtomicU64,

    fields_started: AtomicU64,
    fields_finished: AtomicU64,
    insights_generated: AtomicU64,

    active_fields: AtomicUsize,
    max_active_fields: AtomicUsize,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            run_id: AtomicU64::new(0),
            elapsed_ns: AtomicU64::new(0),
            fields_started: AtomicU64::new(0),
            fields_finished: AtomicU64::new(0),
            insights_generated: AtomicU64::new(0),
            active_fields: AtomicUsize::new(0),
            max_active_fields: AtomicUsize::new(0),
        }
    }

    pub(crate) fn begin_run(&self) {
        self.run_id.fetch_add(1, Ordering::SeqCst);
        self.elapsed_ns.store(0, Ordering::SeqCst);
        self.fields_started.store(0, Ordering::SeqCst);
        self.fields_finished.store(0, Ordering::SeqCst);
        self.insights_generated.store(0, Ordering::SeqCst);
        self.active_fields.store(0, Ordering::SeqCst);
        self.max_active_fields.store(0, Ordering::SeqCst);
    }

    pub(crate) fn end_run(&self, elapsed: Duration) {
        // Sub-nanosecond runs still count as finished.
        let ns = elapsed.as_nanos().clamp(1, u64::MAX as u128) as u64;
        self.elapsed_ns.store(ns, Ordering::SeqCst);
    }

    pub(crate) fn on_field_start(&self) {
        self.fields_started.fetch_add(1, Ordering::SeqCst);
        let now = self.active_fields.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_fields.fetch_max(now, Ordering::SeqCst);
    }

    pub(crate) fn on_field_end(&self, insights: usize) {
        self.fields_finished.fetch_add(1, Ordering::SeqCst);
        self.insights_generated
            .fetch_add(insights as u64, Ordering::SeqCst);
        self.active_fields.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        ExecutionMetricsSnapshot {
            run_id: self.run_id.load(Ordering::SeqCst),
            elapsed: (elapsed_ns > 0).then(|| Duration::from_nanos(elapsed_ns)),
            fields_started: self.fields_started.load(Ordering::SeqCst),
            fields_finished: self.fields_finished.load(Ordering::SeqCst),
            insights_generated: self.insights_generated.load(Ordering::SeqCst),
            max_active_fields: self.max_active_fields.load(Ordering::SeqCst),
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    /// `None` while a run is in progress (or before the first run).
    pub elapsed: Option<Duration>,
    pub fields_started: u64,
    pub fields_finished: u64,
    pub insights_generated: u64,
    pub max_active_fields: usize,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, fields={}/{}, insights={}, max_active_fields={}, elapsed={:?}",
            self.run_id,
            self.fields_finished,
            self.fields_started,
            self.insights_generated,
            self.max_active_fields,
            self.elapsed
        )
    }
}
