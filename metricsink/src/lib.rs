//! Buffers pre-formatted metric lines from any number of producers and
//! writes them out in batches on a fixed interval.
//!
//! Producers hold a [`MetricsSendQueue`] and push without ever blocking. A
//! single [`FlushWorker`] owns the accumulation buffer and the output
//! destination.

use std::io::Write;

use tokio::task::JoinHandle;

pub mod metric;
pub mod sink;

pub use metric::Metric;
pub use sink::config::{SinkConfig, DEFAULT_FLUSH_INTERVAL, DEFAULT_QUEUE_CAPACITY};
pub use sink::flush_worker::{FlushSummary, FlushWorker, WorkerState};
pub use sink::metricssendqueue::{MetricsReceiveQueue, MetricsSendQueue};
pub use sink::sink_error::{SinkError, StringError};
pub use sink::MetricsSink;

/// Builds a sink and spawns its flush worker on the current tokio runtime.
///
/// The returned queue is the handle producers push through. The join handle
/// resolves once the worker has stopped, either after
/// [`MetricsSendQueue::shutdown`] or once every queue handle is dropped.
pub fn spawn_sink<W>(
    config: SinkConfig,
    output: W,
) -> Result<(MetricsSendQueue, JoinHandle<FlushSummary>), SinkError>
where
    W: Write + Send + 'static,
{
    config.validate()?;
    let (send_queue, receive_queue) = MetricsSendQueue::new(config.queue_capacity)?;
    let worker = FlushWorker::new(receive_queue, output, &config)?;

    Ok((send_queue, tokio::spawn(worker.consume_stuff())))
}
