//! CLI application for extracting order records from noisy text files.

mod commands;
mod output;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ordscan_core::models::config::LoggingConfig;
use ordscan_core::OrdscanConfig;

use commands::{batch, config, parse};

/// ordscan - Extract order records from noisy text
#[derive(Parser)]
#[command(name = "ordscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract orders from a single file
    Parse(parse::ParseArgs),

    /// Extract orders from multiple files
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging comes up first so config failures reach the log as well
    let loaded = load_config(cli.config.as_deref());
    let logging = match &loaded {
        Ok(app_config) => app_config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    let level = log_level(cli.verbose, &logging.level);
    let log_file = cli.log_file.clone().or(logging.file);
    if let Err(e) = init_logging(*level.as_ref().unwrap_or(&Level::WARN), log_file.as_deref()) {
        eprintln!("ordscan: {:#}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = level {
        return fail(e);
    }

    let app_config = match (loaded, &cli.command) {
        (Ok(loaded), _) => loaded,
        // A broken or missing config file must not block `config init`
        (Err(e), Commands::Config(_)) => {
            warn!("{:#}", e);
            OrdscanConfig::default()
        }
        (Err(e), _) => return fail(e),
    };

    let result = match cli.command {
        Commands::Parse(args) => parse::run(args, &app_config),
        Commands::Batch(args) => batch::run(args, &app_config),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

/// Log the full error and show the user only a generic notice.
fn fail(e: anyhow::Error) -> ExitCode {
    error!("{:#}", e);
    eprintln!("Something went wrong. Check logs for details.");
    ExitCode::FAILURE
}

fn load_config(path: Option<&Path>) -> anyhow::Result<OrdscanConfig> {
    match path {
        Some(path) => OrdscanConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => config::load_or_default(&config::default_config_path()),
    }
}

/// Pick the level from the `-v` count, falling back to the configured level.
fn log_level(verbose: u8, configured: &str) -> anyhow::Result<Level> {
    match verbose {
        0 => configured
            .parse::<Level>()
            .map_err(|_| anyhow::anyhow!("invalid log level in config: {}", configured)),
        1 => Ok(Level::INFO),
        2 => Ok(Level::DEBUG),
        _ => Ok(Level::TRACE),
    }
}

fn init_logging(level: Level, log_file: Option<&Path>) -> anyhow::Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let subscriber = builder.with_ansi(false).with_writer(Mutex::new(file)).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
