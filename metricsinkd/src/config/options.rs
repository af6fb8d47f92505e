use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lazy_static::lazy_static;
use metricsink::{SinkConfig, DEFAULT_QUEUE_CAPACITY};

use super::cli_config::default_config_file;

lazy_static! {
    static ref DEFAULT_CONFIG_FILE: String = default_config_file();
}

#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Collects runtime metrics and flushes them in batches",
    args_override_self = true
)]
pub struct Options {
    #[clap(long, default_value = &**DEFAULT_CONFIG_FILE)]
    pub config_file: String,
    #[clap(long, default_value = "info")]
    pub log_level: String,

    #[clap(long, default_value_t = DEFAULT_QUEUE_CAPACITY, help = "Metrics held before new ones are dropped")]
    pub queue_capacity: usize,
    #[clap(long, default_value = "10s", value_parser = humantime::parse_duration)]
    pub flush_interval: Duration,
    #[clap(
        long,
        help = "Also flush whenever this many bytes are buffered. Unset flushes on the interval only"
    )]
    pub max_buffer_bytes: Option<usize>,

    #[clap(long, default_value = "2s", value_parser = humantime::parse_duration)]
    pub collect_interval: Duration,

    #[clap(long, help = "Append metrics to this file instead of stdout")]
    pub output_file: Option<PathBuf>,
}

impl Options {
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            queue_capacity: self.queue_capacity,
            flush_interval: self.flush_interval,
            max_buffer_bytes: self.max_buffer_bytes,
        }
    }
}
