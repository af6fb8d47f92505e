use std::ffi::OsString;

use clap::Parser;

use super::options::Options;

pub fn default_config_file() -> String {
    let home = dirs::home_dir();
    match home {
        Some(home_dir) => home_dir
            .join(".metricsink")
            .join("config")
            .to_str()
            .map(str::to_string)
            .unwrap_or_else(|| "./metricsink.config".to_string()),
        None => "./metricsink.config".to_string(),
    }
}

/// Where the effective options came from. Reported by the caller once
/// logging is set up.
#[derive(Debug)]
pub enum ConfigSource {
    CommandLine,
    ConfigFile(String),
    UnusableConfigFile(String, clap::Error),
}

/// Command line first, to learn where the config file is. When that file
/// exists, each non-empty line is one argument, and the real command line is
/// applied after it so it wins.
pub fn get_args() -> (Options, ConfigSource) {
    let command_line_args = Options::parse();
    let config_file_str = std::fs::read_to_string(&command_line_args.config_file).ok();

    resolve_args(
        command_line_args,
        config_file_str.as_deref(),
        std::env::args_os().skip(1),
    )
}

pub fn resolve_args<I, T>(
    command_line_args: Options,
    config_file_str: Option<&str>,
    cli_args: I,
) -> (Options, ConfigSource)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let Some(config_file_str) = config_file_str else {
        return (command_line_args, ConfigSource::CommandLine);
    };

    let config_file = command_line_args.config_file.clone();
    match parse_with_config_file(config_file_str, cli_args) {
        Ok(opts) => (opts, ConfigSource::ConfigFile(config_file)),
        Err(e) => (
            command_line_args,
            ConfigSource::UnusableConfigFile(config_file, e),
        ),
    }
}

pub fn parse_with_config_file<I, T>(config_file_str: &str, cli_args: I) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let file_args = config_file_str
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(OsString::from);

    Options::try_parse_from(
        std::iter::once(OsString::from("metricsinkd"))
            .chain(file_args)
            .chain(cli_args.into_iter().map(Into::into)),
    )
}
