use std::time::Duration;

use metricsink::{Metric, MetricsSink};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

mod runtime_stats;

use runtime_stats::read_process_status;

/// Pushes a snapshot of runtime statistics every `collect_interval`, forever.
pub async fn collect_stats<S: MetricsSink>(sink: S, collect_interval: Duration) {
    log::info!("collecting runtime stats every {:?}", collect_interval);

    let mut ticker = interval_at(Instant::now() + collect_interval, collect_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        collect_runtime_metrics(&sink);
    }
}

pub fn collect_runtime_metrics<S: MetricsSink + ?Sized>(sink: &S) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            sink.push(Metric::key_value(
                "num_tasks",
                handle.metrics().num_alive_tasks(),
            ));
        }
        Err(e) => {
            log::debug!("no tokio runtime, skipping num_tasks: {e}");
        }
    }

    match read_process_status() {
        Ok(status) => {
            if let Some(threads) = status.threads {
                sink.push(Metric::key_value("num_threads", threads));
            }
            if let Some(rss_bytes) = status.rss_bytes {
                sink.push(Metric::key_value("rss_bytes", rss_bytes));
            }
            if let Some(vm_bytes) = status.vm_bytes {
                sink.push(Metric::key_value("vm_bytes", vm_bytes));
            }
        }
        Err(e) => {
            log::debug!("process status is unavailable: {e:?}");
        }
    }
}
