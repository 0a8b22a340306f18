//! Subreddit feed CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use feed_cli::commands::{ChannelReport, fetch_channels, list_channels, parse_channels};
use feed_cli::logging::{LogConfig, LogFormat, init_logging};
use feed_cli::render::{channels_table, render_reports, render_reports_json};
use feed_cli::settings::{FeedSettings, load_settings};
use feed_client::RedditClient;
use feed_state::{AppState, FeedProvider};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, FetchArgs, LogFormatArg, LogLevelArg, OutputFormatArg};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> Result<i32> {
    let settings = load_settings(cli.config.as_deref())?;
    match &cli.command {
        Command::Channels => {
            let state = AppState::from_settings(&settings.channels)?;
            println!("{}", channels_table(&list_channels(&state)));
            Ok(0)
        }
        Command::Fetch(args) => run_fetch(&settings, args).await,
    }
}

async fn run_fetch(settings: &FeedSettings, args: &FetchArgs) -> Result<i32> {
    let channels = parse_channels(&args.channels)?;
    let client = RedditClient::new(&settings.api).context("create Reddit client")?;
    let state = AppState::from_settings(&settings.channels)?;
    let mut provider = FeedProvider::with_state(client, state);

    let reports = fetch_channels(&mut provider, &channels, args.refresh).await?;
    match args.format {
        OutputFormatArg::Table => print!("{}", render_reports(&reports, args.limit)),
        OutputFormatArg::Json => {
            println!("{}", render_reports_json(&reports, args.limit)?);
        }
    }
    Ok(if reports.iter().any(ChannelReport::is_failed) { 1 } else { 0 })
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
