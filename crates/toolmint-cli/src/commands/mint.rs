//! `toolmint mint` - mint tools from a JSONL dataset.

use anyhow::{Context, Result};
use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use toolmint_core::{MintOptions, NormalizedRecord, ToolDocument};
use toolmint_engine::{MintOutcome, ToolMinter, slug};
use toolmint_store::{RunSummary, load_records, merge_into_document};

/// Arguments for the mint command.
#[derive(Debug)]
pub struct MintArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub min_score: f64,
    pub no_tables: bool,
    pub no_columns: bool,
    pub limit: Option<usize>,
    pub summary: bool,
    pub name: Option<String>,
}

/// Counters accumulated over one mint run.
#[derive(Debug, Default)]
struct RunStats {
    processed: usize,
    minted: usize,
    skipped: usize,
}

/// Runs the mint command.
///
/// A run where every record is skipped is still a success: skips are
/// data-quality outcomes, not failures.
///
/// # Errors
///
/// Returns an error for an out-of-range `--min-score`, an unreadable
/// dataset, or a tool document that cannot be loaded or written.
pub fn run(args: &MintArgs) -> Result<()> {
    validate_args(args)?;
    let started_at = Utc::now();
    let start = Instant::now();

    let mut records = load_records(&args.input)
        .with_context(|| format!("failed to load dataset {}", args.input.display()))?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let options = MintOptions::builder()
        .parameterize_tables(!args.no_tables)
        .parameterize_columns(!args.no_columns)
        .min_score(args.min_score)
        .build();
    let minter = ToolMinter::new(options);

    let progress = ProgressBar::new(records.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .context("invalid progress template")?,
    );

    let mut stats = RunStats::default();
    let mut minted = ToolDocument::default();
    for raw in &records {
        stats.processed += 1;
        let record = NormalizedRecord::from_raw(raw);
        match minter.mint(&record) {
            MintOutcome::Minted { key, record, score } => {
                tracing::debug!(key = %key, score, "minted tool");
                minted.insert(key, record);
                stats.minted += 1;
            }
            MintOutcome::Skipped { reason, .. } => {
                tracing::debug!(reason = %reason, "skipped record");
                stats.skipped += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let document = merge_into_document(&args.output, minted)
        .with_context(|| format!("failed to update tool document {}", args.output.display()))?;

    print_report(args, &stats, document.len());

    if args.summary {
        let summary = RunSummary {
            input_file: args.input.display().to_string(),
            output_file: args.output.display().to_string(),
            records_processed: stats.processed,
            tools_minted: stats.minted,
            records_skipped: stats.skipped,
            min_score: args.min_score,
            started_at,
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        write_summary(args, &summary)?;
    }

    Ok(())
}

fn validate_args(args: &MintArgs) -> Result<()> {
    if !(0.0..=100.0).contains(&args.min_score) {
        anyhow::bail!("--min-score must be between 0 and 100, got {}", args.min_score);
    }
    Ok(())
}

fn print_report(args: &MintArgs, stats: &RunStats, total_tools: usize) {
    println!(
        "{} Minted {} tools from {} records ({} skipped)",
        style("✓").green(),
        style(stats.minted).bold(),
        stats.processed,
        stats.skipped
    );
    println!(
        "  {} now holds {} tools",
        args.output.display(),
        style(total_tools).bold()
    );
}

/// Writes the run summary as text and JSON next to the output document.
fn write_summary(args: &MintArgs, summary: &RunSummary) -> Result<()> {
    let fallback = args
        .input
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    let run_name = slug(args.name.as_deref().unwrap_or(&fallback), "run");

    let dir = args.output.parent().map_or_else(PathBuf::new, PathBuf::from);
    let text_path = dir.join(format!("{run_name}.summary.txt"));
    let json_path = dir.join(format!("{run_name}.summary.json"));

    summary
        .export_text(&text_path)
        .with_context(|| format!("failed to write summary {}", text_path.display()))?;
    summary
        .export_json(&json_path)
        .with_context(|| format!("failed to write summary {}", json_path.display()))?;

    println!("  Summary written to {}", text_path.display());
    Ok(())
}
