//! Metrics collection and reporting for headless streaming runs.
//!
//! A run produces one [`MetricsReport`], exported as pretty JSON so CI can
//! diff chunk throughput and query behavior between revisions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Top-level metrics report for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Run identifier
    pub run_name: String,

    /// Timestamp when metrics were collected (ISO 8601)
    pub timestamp: String,

    /// Overall result
    pub result: RunResult,

    /// Chunk streaming metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<StreamingMetrics>,

    /// Ray and collision query metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<QueryMetrics>,

    /// Run execution metrics
    pub execution: ExecutionMetrics,
}

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunResult {
    /// All checks passed
    Pass,
    /// Something failed
    Fail,
}

/// Chunk generation and streaming throughput
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamingMetrics {
    /// Ticks simulated
    pub ticks: u64,

    /// Chunks generated over the run
    pub chunks_generated: u64,

    /// Mesh update signals for dirty chunks
    pub chunks_updated: u64,

    /// Chunks dropped by the unload policy
    pub chunks_unloaded: u64,

    /// Height maps generated
    pub height_maps_generated: u64,

    /// Most chunks resident at once
    pub peak_loaded_chunks: usize,

    /// Chunks resident at the end of the run
    pub final_loaded_chunks: usize,

    /// Average time spent in the per-tick update (microseconds)
    pub avg_update_time_us: f64,

    /// Slowest per-tick update (microseconds)
    pub max_update_time_us: u128,
}

/// Spatial query counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryMetrics {
    /// Rays cast
    pub rays_cast: u64,

    /// Rays that hit a block
    pub ray_hits: u64,

    /// Physics steps resolved
    pub collision_steps: u64,

    /// Steps that ended grounded
    pub grounded_steps: u64,
}

/// Run execution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    /// Total wall time (seconds)
    pub duration_seconds: f64,

    /// Worker threads used for generation (0 = synchronous)
    pub worker_threads: usize,
}

/// Builder for constructing metrics reports
pub struct MetricsReportBuilder {
    report: MetricsReport,
}

impl MetricsReportBuilder {
    /// Create a new builder with run name
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            report: MetricsReport {
                run_name: run_name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                result: RunResult::Pass,
                streaming: None,
                queries: None,
                execution: ExecutionMetrics::default(),
            },
        }
    }

    /// Set run result
    pub fn result(mut self, result: RunResult) -> Self {
        self.report.result = result;
        self
    }

    /// Set streaming metrics
    pub fn streaming(mut self, metrics: StreamingMetrics) -> Self {
        self.report.streaming = Some(metrics);
        self
    }

    /// Set query metrics
    pub fn queries(mut self, metrics: QueryMetrics) -> Self {
        self.report.queries = Some(metrics);
        self
    }

    /// Set execution metrics
    pub fn execution(mut self, metrics: ExecutionMetrics) -> Self {
        self.report.execution = metrics;
        self
    }

    /// Build the metrics report
    pub fn build(self) -> MetricsReport {
        self.report
    }
}

/// Sink for writing metrics reports to JSON files
pub struct MetricsSink {
    path: PathBuf,
}

impl MetricsSink {
    /// Create a new metrics sink at the specified path
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    /// Write metrics report to file
    pub fn write(&self, report: &MetricsReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
