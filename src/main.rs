//! Session-box breakout watcher - main entry point
//!
//! This binary provides two subcommands:
//! - watch: Poll klines, rebuild the session box and report breakout signals
//! - check: One-shot box build and signal evaluation

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "box-breakout")]
#[command(about = "Session-box breakout watcher with live price feed", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watch the market: rebuild the box and evaluate breakouts on a timer
    Watch {
        /// Path to configuration file (defaults apply if absent)
        #[arg(short, long)]
        config: Option<String>,

        /// Trading pair (overrides config file)
        #[arg(short, long)]
        symbol: Option<String>,

        /// Kline interval (overrides config file)
        #[arg(short, long)]
        interval: Option<String>,

        /// Refresh interval in seconds
        #[arg(long, default_value = "60")]
        refresh: u64,

        /// Run a single cycle and exit
        #[arg(long)]
        once: bool,

        /// Disable the live trade-price feed
        #[arg(long)]
        no_feed: bool,
    },

    /// One-shot: fetch klines, build the box, evaluate the latest bar
    Check {
        /// Path to configuration file (defaults apply if absent)
        #[arg(short, long)]
        config: Option<String>,

        /// Trading pair (overrides config file)
        #[arg(short, long)]
        symbol: Option<String>,

        /// Kline interval (overrides config file)
        #[arg(short, long)]
        interval: Option<String>,
    },
}

fn setup_logging(verbose: bool, command_name: &str) -> Result<()> {
    // Create logs directory
    std::fs::create_dir_all("logs")?;

    // Create log file with naming pattern: {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = PathBuf::from("logs").join(&log_filename);

    // Set log level - filter out noisy external crates
    let level = if verbose { "debug" } else { "info" };
    let filter_str = format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn,tungstenite=warn",
        level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // File appender
    let file_appender = tracing_appender::rolling::never("logs", &log_filename);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    // File layer - same format but without ANSI colors
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized");
    info!("Log file: {}", log_path.display());

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Watch { .. } => "watch",
        Commands::Check { .. } => "check",
    };

    setup_logging(cli.verbose, command_name)?;

    match cli.command {
        Commands::Watch {
            config,
            symbol,
            interval,
            refresh,
            once,
            no_feed,
        } => commands::watch::run(config, symbol, interval, refresh, once, no_feed),

        Commands::Check {
            config,
            symbol,
            interval,
        } => commands::check::run(config, symbol, interval),
    }
}
