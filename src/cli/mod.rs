//! Command-line interface for the ingestion pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::core::{read_table, write_table_csv};
use crate::processors::{
    circular_mean_deg, extract_metadata, load_all, summary_stats, SummaryStats,
};

#[derive(Parser)]
#[command(name = "picopatt-pipeline")]
#[command(about = "Sensor session ingestion and statistics pipeline", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate all session files under a directory into one dataset
    Load {
        /// Directory searched recursively for session files
        directory: PathBuf,
        /// Write the consolidated dataset to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute summary statistics over the consolidated dataset
    Stats {
        /// Directory searched recursively for session files
        directory: PathBuf,
        /// Columns to summarize
        #[arg(short = 'C', long, value_delimiter = ',', required = true)]
        columns: Vec<String>,
        /// Angular columns (degrees) reported via circular mean
        #[arg(short, long, value_delimiter = ',')]
        angular: Vec<String>,
    },

    /// Read a single file and preview its shape and inferred metadata
    Inspect {
        /// Session file to read
        file: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    let result = match cli.command {
        Commands::Load { directory, output } => cmd_load(&directory, output, &config),
        Commands::Stats {
            directory,
            columns,
            angular,
        } => cmd_stats(&directory, &columns, &angular, &config),
        Commands::Inspect { file } => cmd_inspect(&file, &config),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn cmd_load(directory: &PathBuf, output: Option<PathBuf>, config: &PipelineConfig) -> Result<()> {
    let start = Instant::now();

    let spinner = create_spinner("Scanning directory for session files...");
    let loaded = load_all(directory, config);
    spinner.finish_and_clear();
    let dataset = loaded.context("load failed")?;

    let mut items = vec![
        ("Directory", directory.display().to_string()),
        ("Rows", dataset.num_rows().to_string()),
        ("Columns", dataset.num_columns().to_string()),
        ("Duration", format!("{:.2?}", start.elapsed())),
    ];

    if let Some(output_path) = output {
        write_table_csv(&output_path, &dataset).context("export failed")?;
        items.push(("Output CSV", output_path.display().to_string()));
    }

    print_summary("Load Complete", &items);
    Ok(())
}

fn cmd_stats(
    directory: &PathBuf,
    columns: &[String],
    angular: &[String],
    config: &PipelineConfig,
) -> Result<()> {
    let start = Instant::now();

    let spinner = create_spinner("Consolidating dataset...");
    let loaded = load_all(directory, config);
    spinner.finish_and_clear();
    let dataset = loaded.context("load failed")?;

    let spinner = create_spinner("Computing statistics...");
    let stats = summary_stats(&dataset, columns);
    spinner.finish_and_clear();

    print_stats_table(&stats);

    for column in angular {
        let values = dataset.numeric_column(column).unwrap_or_default();
        match circular_mean_deg(&values) {
            Some(mean) => println!("circular mean of {:<20}: {:8.2} deg", column, mean),
            None => println!("circular mean of {:<20}: no data", column),
        }
    }

    print_summary(
        "Stats Complete",
        &[
            ("Directory", directory.display().to_string()),
            ("Rows", dataset.num_rows().to_string()),
            ("Columns summarized", columns.len().to_string()),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );

    Ok(())
}

fn print_stats_table(stats: &SummaryStats) {
    let fmt = |v: Option<f64>| match v {
        Some(v) => format!("{:>10.3}", v),
        None => format!("{:>10}", "-"),
    };

    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "column", "mean", "std", "min", "p10", "p25", "median", "p75", "p90", "max"
    );
    for row in &stats.rows {
        println!(
            "{:<20} {} {} {} {} {} {} {} {} {}",
            row.column,
            fmt(row.mean),
            fmt(row.std),
            fmt(row.min),
            fmt(row.p10),
            fmt(row.p25),
            fmt(row.median),
            fmt(row.p75),
            fmt(row.p90),
            fmt(row.max),
        );
    }
}

fn cmd_inspect(file: &PathBuf, config: &PipelineConfig) -> Result<()> {
    let start = Instant::now();

    let table = read_table(file, &config.reader).context("read failed")?;

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let meta = extract_metadata(&name, &config.tracks, &config.slots);

    print_summary(
        "Inspect Complete",
        &[
            ("File", file.display().to_string()),
            ("Rows", table.num_rows().to_string()),
            ("Columns", table.num_columns().to_string()),
            (
                "Date",
                meta.date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            ("Slot", meta.slot.to_string()),
            (
                "Track",
                meta.track
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );

    Ok(())
}
