//! `eda`: exploratory data analysis of delimited files.
//!
//! - `eda overview <path>` prints the table shape and the per-column summary.
//! - `eda report <path>` writes CSV tables, SVG charts, a markdown report and an optional JSON
//!   quality summary into an output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eda_report::execution::{AnalysisEngine, AnalysisOptions, TracingAnalysisObserver};
use eda_report::ingestion::{ingest_from_path, IngestionOptions, TracingObserver};
use eda_report::logging::init_logging;
use eda_report::profiling::{flatten_for_display, summarize, QualityThresholds};
use eda_report::report::{write_report, ReportOptions};
use eda_report::types::Table;
use tracing::info;

#[derive(Parser)]
#[command(name = "eda")]
#[command(about = "Exploratory data analysis for CSV/TSV files")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print table shape and a per-column summary
    Overview(OverviewArgs),
    /// Write a full EDA report into a directory
    Report(ReportArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Path to the input file
    pub path: PathBuf,

    /// Field delimiter (single character, `\t` or `tab`); inferred from the extension if omitted
    #[arg(long)]
    pub sep: Option<String>,

    /// Text encoding label (utf-8, windows-1251, latin1, ...)
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,
}

#[derive(Args)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory
    #[arg(long, default_value = "reports")]
    pub out_dir: PathBuf,

    /// Number of top values listed per categorical column
    #[arg(long, default_value_t = 5)]
    pub top_k_categories: usize,

    /// Maximum number of categorical columns profiled for top values
    #[arg(long, default_value_t = 5)]
    pub max_category_columns: usize,

    /// Maximum number of numeric columns drawn as histograms
    #[arg(long, default_value_t = 6)]
    pub max_hist_columns: usize,

    /// Report title
    #[arg(long, default_value = "EDA report")]
    pub title: String,

    /// Missing share at or above which a column is listed as problematic
    #[arg(long, default_value_t = 0.1)]
    pub min_missing_share: f64,

    /// Also write a compact summary.json
    #[arg(long)]
    pub json_summary: bool,

    /// JSON file overriding quality thresholds
    #[arg(long)]
    pub thresholds: Option<PathBuf>,

    /// Run analysis stages sequentially
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all log output except errors")]
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose, cli.global.quiet)?;

    match cli.command {
        Command::Overview(args) => overview(&args),
        Command::Report(args) => report(&args),
    }
}

fn overview(args: &OverviewArgs) -> Result<()> {
    let table = load(&args.input)?;
    let summary = summarize(&table);

    println!("Rows: {}", summary.n_rows);
    println!("Columns: {}", summary.n_cols);
    println!("\nColumns:");
    print!("{}", flatten_for_display(&summary));
    Ok(())
}

fn report(args: &ReportArgs) -> Result<()> {
    let table = load(&args.input)?;

    let thresholds = match &args.thresholds {
        Some(path) => load_thresholds(path)?,
        None => QualityThresholds::default(),
    };
    let options = AnalysisOptions {
        top_k: args.top_k_categories,
        max_category_columns: args.max_category_columns,
        thresholds,
        parallel: !args.sequential,
    };
    let engine = AnalysisEngine::new(options).with_observer(Arc::new(TracingAnalysisObserver));
    let report = engine.run(&table);

    let report_options = ReportOptions {
        title: args.title.clone(),
        source_name: args
            .input
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        min_missing_share: args.min_missing_share,
        json_summary: args.json_summary,
        top_k: args.top_k_categories,
        max_hist_columns: args.max_hist_columns,
    };
    let artifacts = write_report(&table, &report, &report_options, &args.out_dir)
        .with_context(|| format!("failed to write report to {}", args.out_dir.display()))?;

    info!(score = report.quality.quality_score, "quality score");
    println!("Report written to: {}", artifacts.out_dir.display());
    println!("- Markdown: {}", artifacts.report_md.display());
    println!("- Summary: {}", artifacts.summary_csv.display());
    if let Some(path) = &artifacts.missing_csv {
        println!("- Missing values: {}", path.display());
    }
    if let Some(path) = &artifacts.correlation_csv {
        println!("- Correlation: {}", path.display());
    }
    if !artifacts.top_categories.is_empty() {
        println!("- Top categories: {} file(s)", artifacts.top_categories.len());
    }
    if !artifacts.histograms.is_empty() {
        println!("- Histograms: {} file(s)", artifacts.histograms.len());
    }
    if let Some(path) = &artifacts.missing_matrix {
        println!("- Missing matrix: {}", path.display());
    }
    if let Some(path) = &artifacts.correlation_heatmap {
        println!("- Correlation heatmap: {}", path.display());
    }
    if let Some(path) = &artifacts.summary_json {
        println!("- JSON summary: {}", path.display());
    }
    Ok(())
}

fn load(input: &InputArgs) -> Result<Table> {
    let delimiter = input
        .sep
        .as_deref()
        .map(IngestionOptions::parse_delimiter)
        .transpose()?;
    let options = IngestionOptions {
        delimiter,
        encoding: input.encoding.clone(),
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    ingest_from_path(&input.path, &options)
        .with_context(|| format!("failed to read {}", input.path.display()))
}

fn load_thresholds(path: &Path) -> Result<QualityThresholds> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read thresholds file {}", path.display()))?;
    let thresholds: QualityThresholds = serde_json::from_str(&text)
        .with_context(|| format!("invalid thresholds file {}", path.display()))?;
    Ok(thresholds.normalized())
}
