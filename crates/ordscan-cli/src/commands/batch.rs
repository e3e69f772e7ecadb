//! Batch processing command for multiple order files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use ordscan_core::{parse_file, Order, OrdscanConfig, OutputFormat, ParseStats};

use crate::output::{extension, format_orders, FormatArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config, otherwise json)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Also write a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Orders and counters of one successfully parsed file.
struct Parsed {
    orders: Vec<Order>,
    stats: ParseStats,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<Parsed, String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config: &OrdscanConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);

    if let Some(ref output_dir) = args.output_dir {
        check_output_collisions(output_dir, &files, format)?;
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = parse_file(&path, &config.parser)
            .map(|parser| Parsed {
                stats: parser.stats(),
                orders: parser.into_results(),
            })
            .map_err(|e| e.to_string());
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        if let Err(error_msg) = &outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", path.display(), error_msg);
                pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(FileResult {
            path,
            outcome,
            processing_time_ms,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Ok(parsed) = &result.outcome {
                let output_path = output_path(output_dir, &result.path, format);
                let content = format_orders(&parsed.orders, format, config.output.pretty)?;
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let total_orders: usize = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|parsed| parsed.orders.len())
        .sum();

    println!();
    println!(
        "{} Processed {} files in {:?}, {} orders found",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        total_orders
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(msg) = &result.outcome {
                println!("  - {}: {}", result.path.display(), msg);
            }
        }
    }

    Ok(())
}

fn output_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("orders");
    output_dir.join(format!("{}.{}", stem, extension(format)))
}

/// Refuse inputs that share a file stem, since their outputs would overwrite
/// each other in the flat output directory.
fn check_output_collisions(output_dir: &Path, files: &[PathBuf], format: OutputFormat) -> anyhow::Result<()> {
    let mut targets: HashMap<PathBuf, &Path> = HashMap::with_capacity(files.len());
    for input in files {
        let target = output_path(output_dir, input, format);
        if let Some(previous) = targets.get(&target) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                target.display()
            );
        }
        targets.insert(target, input.as_path());
    }
    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "orders",
        "lines",
        "skipped",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        match &result.outcome {
            Ok(parsed) => {
                wtr.write_record([
                    filename,
                    "success",
                    &parsed.orders.len().to_string(),
                    &parsed.stats.lines_read.to_string(),
                    &parsed.stats.skipped.to_string(),
                    &time,
                    "",
                ])?;
            }
            Err(msg) => {
                wtr.write_record([filename, "error", "", "", "", &time, msg])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
