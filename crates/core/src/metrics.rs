//! Prometheus metrics for the widget core.
//!
//! This module provides metrics for:
//! - Query pipeline (runs by outcome, engine time, result counts)
//! - Dataset acquisition
//! - Lifecycle failures

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Query Pipeline
// =============================================================================

/// Pipeline runs total by outcome.
pub static PIPELINE_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("autocomplete_pipeline_runs_total", "Total query pipeline runs"),
        &["outcome"], // "skipped", "no_results", "feedback", "rendered", "failed"
    )
    .unwrap()
});

/// Time spent matching and ranking one query.
pub static ENGINE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "autocomplete_engine_duration_seconds",
            "Duration of one match over the dataset",
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["strategy"],
    )
    .unwrap()
});

/// Matches per query, before truncation.
pub static MATCHES_PER_QUERY: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "autocomplete_matches_per_query",
            "Number of dataset items matching a query",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Lifecycle
// =============================================================================

/// Dataset acquisitions total by result.
pub static DATASET_ACQUISITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "autocomplete_dataset_acquisitions_total",
            "Total dataset acquisitions",
        ),
        &["mode", "result"], // mode: "cache", "stream"; result: "success", "failed"
    )
    .unwrap()
});

/// Instances that stopped on an error, by reason.
pub static LIFECYCLE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "autocomplete_lifecycle_failures_total",
            "Total widget instances that failed",
        ),
        &["reason"], // "attach_timeout", "watch", "acquisition"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PIPELINE_RUNS.clone()),
        Box::new(ENGINE_DURATION.clone()),
        Box::new(MATCHES_PER_QUERY.clone()),
        Box::new(DATASET_ACQUISITIONS.clone()),
        Box::new(LIFECYCLE_FAILURES.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }

        PIPELINE_RUNS.with_label_values(&["rendered"]).inc();
        let families = registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "autocomplete_pipeline_runs_total"));
    }
}
