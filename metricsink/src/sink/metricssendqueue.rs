use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::metric::Metric;

use super::{sink_error::SinkError, MetricsSink};

/// The producer side of the sink. Clone it for every producer.
#[derive(Debug, Clone)]
pub struct MetricsSendQueue {
    tx: Sender<Metric>,
    shutdown: CancellationToken,
    dropped: Arc<AtomicU64>,
}

/// The consumer side. Exactly one exists per queue and it belongs to the
/// flush worker.
#[derive(Debug)]
pub struct MetricsReceiveQueue {
    rx: Receiver<Metric>,
    shutdown: CancellationToken,
}

impl MetricsSink for MetricsSendQueue {
    fn push(&self, metric: Metric) {
        if self.shutdown.is_cancelled() {
            log::debug!("queue is shut down, dropping metric: {:?}", metric.as_str());
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return;
        }

        match self.tx.try_send(metric) {
            Ok(_) => (),
            Err(TrySendError::Full(metric)) => {
                log::debug!("queue is full, dropping metric: {:?}", metric.as_str());
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Closed(metric)) => {
                log::debug!("queue is closed, dropping metric: {:?}", metric.as_str());
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

impl MetricsSendQueue {
    pub fn new(capacity: usize) -> Result<(MetricsSendQueue, MetricsReceiveQueue), SinkError> {
        if capacity == 0 {
            return Err(SinkError::InvalidQueueCapacity);
        }
        let (tx, rx) = mpsc::channel(capacity);
        let shutdown = CancellationToken::new();

        Ok((
            MetricsSendQueue {
                tx,
                shutdown: shutdown.clone(),
                dropped: Arc::new(AtomicU64::new(0)),
            },
            MetricsReceiveQueue { rx, shutdown },
        ))
    }

    /// Closes the queue for every handle. Metrics already queued are still
    /// drained by the worker. Returns without waiting for it.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            log::info!("metrics queue shutdown requested");
        }
        self.shutdown.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Pushes discarded so far because the queue was full or shut down.
    pub fn dropped_metrics(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl MetricsReceiveQueue {
    /// `None` once the queue is closed and empty.
    pub async fn recv(&mut self) -> Option<Metric> {
        self.rx.recv().await
    }

    /// Stops accepting pushes. Queued metrics can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// Cancelled when any send handle calls `shutdown`.
    pub fn shutdown_signal(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}
