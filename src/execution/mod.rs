//! Execution engine for whole-dataset analysis with configurable parallelism.
//!
//! This module sits "above" [`crate::analysis`] and provides:
//!
//! - Parallel per-field insight generation on a dedicated `rayon` pool
//! - A combined run that scans data quality alongside insight generation
//! - Real-time metrics + observer hooks for monitoring
//!
//! Results never depend on scheduling: insights come back in schema order, identical to
//! [`crate::analysis::generate_insights`].

mod observer;

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;

use crate::analysis::{field_insights, scan_quality_with, DataQualityReport, Insight};
use crate::config::AnalysisConfig;
use crate::error::DashboardResult;
use crate::types::DataSet;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, TracingExecutionObserver,
};

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Thresholds handed to every analysis routine.
    pub config: AnalysisConfig,
}

/// Everything the dashboard's insights panel shows for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetAnalysis {
    pub insights: Vec<Insight>,
    pub quality: DataQualityReport,
}

/// Runs analysis over a whole [`DataSet`] on its own thread pool.
pub struct ExecutionEngine {
    pool: ThreadPool,
    config: AnalysisConfig,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// `num_threads == Some(0)` is treated as one thread.
    pub fn new(opts: ExecutionOptions) -> DashboardResult<Self> {
        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("dashboard-analysis-{i}"))
            .build()?;

        Ok(Self {
            pool,
            config: opts.config,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Generate insights for every field, analysing fields in parallel.
    pub fn generate_insights(&self, dataset: &DataSet) -> Vec<Insight> {
        let start = self.begin(dataset);
        let insights = self.pool.install(|| self.insights_impl(dataset));
        self.finish(start);
        insights
    }

    /// Scan data quality. The scan itself is sequential but is tracked via the observer/metrics
    /// hooks.
    pub fn scan_quality(&self, dataset: &DataSet) -> DataQualityReport {
        let start = self.begin(dataset);
        let report = self.quality_impl(dataset);
        self.finish(start);
        report
    }

    /// Insights and the quality report, computed concurrently.
    pub fn analyze(&self, dataset: &DataSet) -> DatasetAnalysis {
        let start = self.begin(dataset);
        let (insights, quality) = self.pool.install(|| {
            rayon::join(
                || self.insights_impl(dataset),
                || self.quality_impl(dataset),
            )
        });
        self.finish(start);
        DatasetAnalysis { insights, quality }
    }

    fn insights_impl(&self, dataset: &DataSet) -> Vec<Insight> {
        let per_field: Vec<Vec<Insight>> = dataset
            .schema
            .fields
            .par_iter()
            .map(|field| {
                self.metrics.on_field_start();
                self.emit(ExecutionEvent::FieldStarted {
                    field: field.name.clone(),
                });

                let out = field_insights(dataset, field, &self.config);

                self.emit(ExecutionEvent::FieldFinished {
                    field: field.name.clone(),
                    insights: out.len(),
                });
                self.metrics.on_field_end(out.len());
                out
            })
            .collect();

        per_field.into_iter().flatten().collect()
    }

    fn quality_impl(&self, dataset: &DataSet) -> DataQualityReport {
        let report = scan_quality_with(dataset, &self.config);
        self.emit(ExecutionEvent::QualityScanned {
            total_missing: report.missing.total_missing,
            duplicates: report.duplicates.count,
            outliers: report.total_outliers(),
        });
        report
    }

    fn begin(&self, dataset: &DataSet) -> Instant {
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            fields: dataset.schema.len(),
            rows: dataset.row_count(),
        });
        Instant::now()
    }

    fn finish(&self, start: Instant) {
        let elapsed = start.elapsed();
        self.metrics.end_run(elapsed);
        self.emit(ExecutionEvent::RunFinished {
            elapsed,
            metrics: self.metrics.snapshot(),
        });
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
