use config::options::Options;
use metricsink::{FlushSummary, FlushWorker, MetricsSendQueue, SinkError, StringError};

use crate::collector::collect_stats;
use crate::config::cli_config::{get_args, ConfigSource};
use crate::output::open_output;
use crate::signals::wait_for_termination;

mod collector;
mod config;
mod output;
mod signals;

fn main() {
    let (args, config_source) = get_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    match config_source {
        ConfigSource::CommandLine => log::debug!("no config file, using the command line"),
        ConfigSource::ConfigFile(path) => log::info!("using config file: {}", path),
        ConfigSource::UnusableConfigFile(path, e) => {
            log::warn!("ignoring unusable config file {}: {}", path, e)
        }
    }
    log::info!("args: {:?}", args);

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime can be made")
        .block_on(run(args));

    if let Err(e) = result {
        log::error!("metricsinkd failed: {:?}", e);
        std::process::exit(3)
    }
}

async fn run(args: Options) -> Result<(), SinkError> {
    let sink_config = args.sink_config();
    let output = open_output(args.output_file.as_deref())?;
    let (send_queue, receive_queue) = MetricsSendQueue::new(sink_config.queue_capacity)?;
    let worker = FlushWorker::new(receive_queue, output, &sink_config)?;

    // Writes block, so the worker gets a thread and runtime of its own.
    let worker_handle = std::thread::Builder::new()
        .name("metrics-flush".to_string())
        .spawn(move || -> std::io::Result<FlushSummary> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            Ok(runtime.block_on(worker.consume_stuff()))
        })?;

    let collector = tokio::spawn(collect_stats(send_queue.clone(), args.collect_interval));

    let signal_name = wait_for_termination().await?;
    log::info!("received {}, shutting down", signal_name);

    collector.abort();
    send_queue.shutdown();
    let summary = match worker_handle.join() {
        Ok(summary) => summary?,
        Err(panic) => {
            return Err(SinkError::StringError(StringError {
                message: format!("metrics flush worker panicked: {:?}", panic),
            }))
        }
    };
    log::info!("final flush summary: {:?}", summary);
    log::info!("Exiting...");

    Ok(())
}
