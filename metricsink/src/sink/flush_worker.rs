use std::io::Write;
use std::time::Duration;

use bytes::BytesMut;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::metric::Metric;

use super::config::SinkConfig;
use super::metricssendqueue::MetricsReceiveQueue;
use super::sink_error::SinkError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting on the queue and the flush timer.
    #[default]
    Running,
    /// The queue is closed. Whatever is still queued goes into the buffer,
    /// then the buffer is flushed one last time.
    Draining,
    Stopped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub metrics_received: u64,
    pub flushes: u64,
    pub failed_flushes: u64,
    pub bytes_written: u64,
    /// Where the worker was when it returned. Always `Stopped` once
    /// `consume_stuff` completes.
    pub state: WorkerState,
}

/// Owns the accumulation buffer and the output. Only this worker ever
/// touches either, so neither is synchronized.
pub struct FlushWorker<W> {
    rx: MetricsReceiveQueue,
    output: W,
    buffer: BytesMut,
    flush_interval: Duration,
    max_buffer_bytes: Option<usize>,
    started: Instant,
    state: WorkerState,
    summary: FlushSummary,
}

impl<W: Write> FlushWorker<W> {
    /// The flush timer is anchored here: the first tick comes one interval
    /// after construction, whenever the worker actually starts polling.
    pub fn new(
        rx: MetricsReceiveQueue,
        output: W,
        config: &SinkConfig,
    ) -> Result<FlushWorker<W>, SinkError> {
        config.validate()?;

        Ok(FlushWorker {
            rx,
            output,
            buffer: BytesMut::new(),
            flush_interval: config.flush_interval,
            max_buffer_bytes: config.max_buffer_bytes,
            started: Instant::now(),
            state: WorkerState::Running,
            summary: FlushSummary::default(),
        })
    }

    pub async fn consume_stuff(mut self) -> FlushSummary {
        log::info!(
            "started metrics flush worker, flushing every {:?}",
            self.flush_interval
        );

        let mut ticker = interval_at(self.started + self.flush_interval, self.flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let shutdown = self.rx.shutdown_signal();

        loop {
            match self.state {
                WorkerState::Running => {
                    tokio::select! {
                        maybe_metric = self.rx.recv() => match maybe_metric {
                            Some(metric) => self.accumulate(metric),
                            None => {
                                log::info!("every metrics producer is gone");
                                self.transition(WorkerState::Draining);
                            }
                        },
                        _ = ticker.tick() => self.flush(),
                        () = shutdown.cancelled() => self.transition(WorkerState::Draining),
                    }
                }
                WorkerState::Draining => {
                    self.rx.close();
                    while let Some(metric) = self.rx.recv().await {
                        self.accumulate(metric);
                    }
                    self.flush();
                    self.transition(WorkerState::Stopped);
                }
                WorkerState::Stopped => break,
            }
        }

        self.summary.state = self.state;
        log::info!("metrics flush worker stopped: {:?}", self.summary);
        self.summary
    }

    fn transition(&mut self, next: WorkerState) {
        log::info!("metrics flush worker {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn accumulate(&mut self, metric: Metric) {
        log::trace!("buffering metric: {:?}", metric.as_str());
        self.summary.metrics_received += 1;
        self.buffer.extend_from_slice(metric.as_bytes());

        if let Some(max_buffer_bytes) = self.max_buffer_bytes {
            if self.buffer.len() >= max_buffer_bytes {
                log::debug!(
                    "buffer reached {} bytes, flushing early",
                    self.buffer.len()
                );
                self.flush();
            }
        }
    }

    /// Writes the whole buffer as one batch and empties it, whether or not
    /// the write succeeded.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let batch_len = self.buffer.len();
        let result = self
            .output
            .write_all(&self.buffer)
            .and_then(|_| self.output.flush());
        self.buffer.clear();

        match result {
            Ok(_) => {
                self.summary.flushes += 1;
                self.summary.bytes_written += batch_len as u64;
                log::debug!("flushed {} bytes of metrics", batch_len);
            }
            Err(error) => {
                self.summary.failed_flushes += 1;
                log::error!(
                    "buffer flush failure, dropped {} bytes of metrics: {:?}",
                    batch_len,
                    error
                );
            }
        }
    }
}
