//! ToolMint CLI.
//!
//! Command-line interface for minting reusable SQL tools from
//! question/SQL datasets and exporting the resulting tool documents.
//!
//! # Examples
//!
//! ```bash
//! # Mint tools from a Spider-style dataset
//! toolmint mint spider_train.jsonl -o tools.json
//!
//! # Stricter quality gate, progress summary written next to the output
//! toolmint mint spider_train.jsonl -o tools.json --min-score 70 --summary
//!
//! # Flatten a tool document to CSV
//! toolmint export tools.json -o tools.csv
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// ToolMint - Mint reusable SQL tools from question/SQL datasets.
///
/// Reads JSONL records pairing natural-language questions with SQL,
/// rewrites literals and identifiers into `{{.name}}` placeholders, scores
/// each candidate for quality, and merges accepted tools into a keyed
/// JSON document.
#[derive(Parser, Debug)]
#[command(name = "toolmint")]
#[command(version, about, long_about = None)]
#[command(author = "ToolMint Team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Export output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// RFC 4180 CSV, one row per tool.
    Csv,
    /// Pretty-printed JSON copy of the document.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mint tools from a JSONL dataset into a tool document.
    ///
    /// Records failing the quality gate are skipped with a logged reason;
    /// a run where every record is skipped still exits successfully.
    ///
    /// # Examples
    ///
    /// ```bash
    /// toolmint mint spider_train.jsonl -o tools.json
    /// toolmint mint spider_train.jsonl -o tools.json --min-score 70 --limit 1000
    /// toolmint mint bird_dev.jsonl -o tools.json --no-tables --summary
    /// ```
    Mint {
        /// Input JSONL dataset of question/SQL records
        input: PathBuf,

        /// Output tool document (merged if it already exists)
        #[arg(short, long, default_value = "tools.json")]
        output: PathBuf,

        /// Minimum quality score a tool must reach (0-100)
        #[arg(long, default_value_t = 50.0)]
        min_score: f64,

        /// Keep table names literal instead of parameterizing them
        #[arg(long = "no-tables")]
        no_tables: bool,

        /// Keep column references literal instead of parameterizing them
        #[arg(long = "no-columns")]
        no_columns: bool,

        /// Process at most this many records
        #[arg(long)]
        limit: Option<usize>,

        /// Write a run summary report next to the output document
        #[arg(long)]
        summary: bool,

        /// Run name used for the summary files (default: input file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Export a tool document to another format.
    ///
    /// # Examples
    ///
    /// ```bash
    /// toolmint export tools.json -o tools.csv
    /// toolmint export tools.json -o copy.json --format json
    /// ```
    Export {
        /// Tool document to export
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Mint {
            input,
            output,
            min_score,
            no_tables,
            no_columns,
            limit,
            summary,
            name,
        } => commands::mint::run(&commands::mint::MintArgs {
            input,
            output,
            min_score,
            no_tables,
            no_columns,
            limit,
            summary,
            name,
        }),
        Commands::Export {
            input,
            output,
            format,
        } => commands::export::run(&input, &output, format),
    }
}

/// Initializes logging infrastructure.
///
/// Logs go to stderr so stdout stays clean for piped output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
