//! CLI entry point for the imputation pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use lex_imputation::io::{read_csv, write_csv};
use lex_imputation::{ColumnOrder, FillPipeline, FillReport, ImputationConfig};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// CLI-compatible column order enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColumnOrder {
    /// Fewest missing values first
    MissingCount,
    /// Dataset column order
    Original,
}

impl From<CliColumnOrder> for ColumnOrder {
    fn from(cli: CliColumnOrder) -> Self {
        match cli {
            CliColumnOrder::MissingCount => ColumnOrder::MissingCountAscending,
            CliColumnOrder::Original => ColumnOrder::Original,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Fill missing values in tabular datasets",
    long_about = "Fills every missing value of a CSV file. Columns with missing values are \
                  filled with their most frequent value, fewest-missing first; anything left \
                  is replaced with zero.\n\n\
                  EXAMPLES:\n  \
                  # Fill and write next to the input\n  \
                  lex-imputation -i data.csv\n\n  \
                  # Preview the processing order\n  \
                  lex-imputation -i data.csv --dry-run\n\n  \
                  # Machine-readable report\n  \
                  lex-imputation -i data.csv -o filled.csv --json | jq .imputations"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: PathBuf,

    /// Path of the filled CSV file
    ///
    /// If not specified, writes "<input_name>_filled.csv" next to the input
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Order in which columns with missing values are imputed
    #[arg(long, value_enum)]
    order: Option<CliColumnOrder>,

    /// Leave values the imputer could not fill as missing
    #[arg(long)]
    no_zero_fill: bool,

    /// Treat float NaN as a regular value instead of a missing one
    #[arg(long)]
    keep_nan: bool,

    /// Show the column classification and processing order without filling
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the JSON report to stdout instead of a human-readable summary
    #[arg(long)]
    json: bool,

    /// Write a JSON report next to the output file
    ///
    /// The report will be saved as <output_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    info!("Loading dataset from: {}", args.input.display());
    let data = read_csv(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let pipeline = FillPipeline::builder().config(config).build();

    if args.dry_run {
        return run_dry_run(&pipeline, &args, &data);
    }

    let result = pipeline.fill(&data).map_err(|e| {
        error!("Imputation failed: {}", e);
        anyhow!("Imputation failed: {}", e)
    })?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let mut filled = result.dataframe;
    write_csv(&mut filled, &output_path)?;
    info!("Filled dataset written to: {}", output_path.display());

    if args.emit_report {
        let report_path = report_path_for(&output_path);
        std::fs::write(&report_path, serde_json::to_string_pretty(&result.report)?)?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
        return Ok(());
    }

    print_human_readable_summary(&result.report, &args.input, &output_path);
    Ok(())
}

/// Merge the optional config file with command line flags.
fn build_config(args: &Args) -> Result<ImputationConfig> {
    let base = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ImputationConfig::from_json_file(path)?
        }
        None => ImputationConfig::default(),
    };

    let order = args.order.map(ColumnOrder::from).unwrap_or(base.column_order);

    Ok(ImputationConfig::builder()
        .column_order(order)
        .zero_fill_remaining(base.zero_fill_remaining && !args.no_zero_fill)
        .treat_nan_as_missing(base.treat_nan_as_missing && !args.keep_nan)
        .build())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_file_name(format!("{}_filled.csv", extract_file_stem(input)))
}

fn report_path_for(output: &Path) -> PathBuf {
    output.with_file_name(format!("{}_report.json", extract_file_stem(output)))
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Run dry-run mode - show what would happen without processing
///
/// With `--json` the plan is printed as JSON instead of the preview.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn run_dry_run(pipeline: &FillPipeline, args: &Args, data: &DataFrame) -> Result<()> {
    let plan = pipeline.plan(data)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Preview of imputation");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", args.input.display());
    println!("  Rows: {}", data.height());
    println!("  Columns: {}", data.width());
    println!("  Missing values: {}", plan.partition.total_missing());
    println!();

    println!("COMPLETE COLUMNS (features)");
    println!("{}", "-".repeat(40));
    if plan.partition.feature_columns.is_empty() {
        println!("  None");
    } else {
        for name in &plan.partition.feature_columns {
            println!("  - {}", name);
        }
    }
    println!();

    println!(
        "PROCESSING ORDER ({})",
        pipeline.config().column_order.display_name()
    );
    println!("{}", "-".repeat(40));
    if plan.processing_order.is_empty() {
        println!("  Nothing to impute");
    } else {
        println!("{:<5} {:<30} {:<10}", "#", "Column", "Missing");
        for (i, col) in plan.processing_order.iter().enumerate() {
            println!(
                "{:<5} {:<30} {:<10}",
                i + 1,
                truncate_str(&col.name, 29),
                col.missing_count
            );
        }
    }
    println!();

    println!("{}", "=".repeat(80));
    println!("To execute this imputation, run without --dry-run");
    println!("{}", "=".repeat(80));

    Ok(())
}

/// Print a human-readable summary of the imputation results.
fn print_human_readable_summary(report: &FillReport, input: &Path, output: &Path) {
    println!();
    println!("{}", "=".repeat(80));
    println!("IMPUTATION COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        input.display(),
        report.rows,
        report.columns
    );
    println!("Output: {}", output.display());
    println!();

    println!("Summary:");
    println!("  Duration: {}ms", report.duration_ms);
    println!(
        "  Missing values: {} -> {}",
        report.missing_before, report.missing_after
    );
    println!("  Columns imputed: {}", report.columns_imputed());
    if report.zero_filled_values > 0 {
        println!("  Zero-filled by final pass: {}", report.zero_filled_values);
    }
    println!();

    if !report.processing_steps.is_empty() {
        println!("Actions Taken:");
        for step in report.processing_steps.iter().take(10) {
            println!("  - {}", step);
        }
        if report.processing_steps.len() > 10 {
            println!(
                "  ... and {} more actions",
                report.processing_steps.len() - 10
            );
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save a JSON report");
    println!("{}", "=".repeat(80));
}
