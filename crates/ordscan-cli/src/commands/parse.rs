//! Parse command - extract orders from a single text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use ordscan_core::{parse_file, OrdscanConfig, OutputFormat};

use crate::output::{format_orders, FormatArg};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config, otherwise json)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Pretty-print JSON records
    #[arg(long)]
    pretty: bool,

    /// Print line counts to stderr
    #[arg(long)]
    stats: bool,
}

pub fn run(args: ParseArgs, config: &OrdscanConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    info!("Processing file: {}", args.input.display());

    let parser = parse_file(&args.input, &config.parser)
        .with_context(|| format!("failed to read orders from {}", args.input.display()))?;

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);
    let output = format_orders(parser.results(), format, args.pretty || config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.stats {
        let stats = parser.stats();
        eprintln!(
            "{} {} lines read, {} orders, {} skipped",
            style("ℹ").blue(),
            stats.lines_read,
            stats.matched,
            stats.skipped
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
