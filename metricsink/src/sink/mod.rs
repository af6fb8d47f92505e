use crate::metric::Metric;

pub mod config;
pub mod flush_worker;
pub mod metricssendqueue;
pub mod sink_error;

/// Where producers hand their metrics. Pushing never blocks and never
/// reports whether the metric was kept.
pub trait MetricsSink: Send + Sync {
    fn push(&self, metric: Metric);
}
