//! Horizon CLI - densify picked horizon grids

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use horizon_algorithms::densify::{
    densify, DensifyParams, DensifyReport, GridTopology, TopologySummary, DEFAULT_SPACING_SAMPLE,
};
use horizon_algorithms::interpolation::Method;
use horizon_core::io::{read_horizon, write_horizon, HorizonFile};
use horizon_core::PointStore;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "horizon")]
#[command(author, version, about = "Horizon grid densification", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill missing grid positions at a finer index spacing
    Densify {
        /// Input horizon file
        input: PathBuf,
        /// Output horizon file
        output: PathBuf,
        /// Target index spacing between points
        #[arg(short, long, default_value = "2")]
        spacing: i64,
        /// Interpolation method: linear, cubic, nearest
        #[arg(short, long, default_value = "linear")]
        method: String,
        /// Columns and rows sampled when inferring the current spacing
        #[arg(long, default_value_t = DEFAULT_SPACING_SAMPLE)]
        spacing_sample: usize,
    },
    /// Show point count, populated columns/rows and inferred spacing
    Info {
        /// Input horizon file
        input: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set default subscriber")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn read_input(path: &Path) -> Result<HorizonFile> {
    let pb = spinner("Reading horizon...");
    let file = read_horizon(path).with_context(|| format!("Failed to read {}", path.display()));
    pb.finish_and_clear();
    let file = file?;
    info!(
        "Input: {} points, {} header lines",
        file.points.len(),
        file.header.len()
    );
    Ok(file)
}

fn write_output(path: &Path, file: &HorizonFile) -> Result<()> {
    let pb = spinner("Writing output...");
    let res = write_horizon(path, &file.header, &file.points)
        .with_context(|| format!("Failed to write {}", path.display()));
    pb.finish_and_clear();
    res
}

fn done(report: &DensifyReport, path: &Path, elapsed: Duration) {
    println!("Densified horizon saved to: {}", path.display());
    println!("  Total points: {}", report.total_points());
    println!("  Original points: {}", report.original_points);
    println!("  New points: {}", report.candidate_points);
    if report.fallback_points > 0 {
        println!("  Nearest fallback: {}", report.fallback_points);
    }
    println!("  Processing time: {:.2?}", elapsed);
}

/// Summary printed by `info`
#[derive(Debug, Serialize)]
struct InfoSummary {
    file: PathBuf,
    data_lines: usize,
    points: usize,
    #[serde(flatten)]
    topology: TopologySummary,
}

// ─── Commands ───────────────────────────────────────────────────────────

fn run_densify(input: &Path, output: &Path, params: DensifyParams) -> Result<()> {
    params
        .validate()
        .context("Invalid densification parameters")?;

    let file = read_input(input)?;
    let store = PointStore::from_points(file.points.iter().copied());
    if store.is_empty() {
        warn!("No data points read from {}, nothing written", input.display());
        return Ok(());
    }

    info!(
        "Target spacing {}, method {}",
        params.target_spacing, params.method
    );

    let start = Instant::now();
    let pb = spinner("Interpolating...");
    let result = densify(&store, params).context("Failed to densify horizon");
    pb.finish_and_clear();
    let result = result?;
    let elapsed = start.elapsed();

    let report = &result.report;
    info!(
        "Spacing: columns {}, rows {}; {} populated columns, {} populated rows",
        report.topology.col_spacing,
        report.topology.row_spacing,
        report.topology.populated_cols,
        report.topology.populated_rows
    );
    if report.fallback_points > 0 {
        info!(
            "{} of {} new points filled by nearest sample",
            report.fallback_points, report.candidate_points
        );
    }

    let out = HorizonFile {
        header: file.header,
        points: result.points,
    };
    write_output(output, &out)?;
    done(&result.report, output, elapsed);
    Ok(())
}

fn run_info(input: &Path, json: bool) -> Result<()> {
    let file = read_input(input)?;
    let store = PointStore::from_points(file.points.iter().copied());
    let topology = GridTopology::analyze(&store, DEFAULT_SPACING_SAMPLE);

    let summary = InfoSummary {
        file: input.to_path_buf(),
        data_lines: file.points.len(),
        points: store.len(),
        topology: topology.summary(),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
        return Ok(());
    }

    println!("File: {}", summary.file.display());
    println!(
        "Points: {} ({} data lines)",
        summary.points, summary.data_lines
    );
    println!("Populated columns: {}", summary.topology.populated_cols);
    println!("Populated rows: {}", summary.topology.populated_rows);
    println!("Column spacing: {}", summary.topology.col_spacing);
    println!("Row spacing: {}", summary.topology.row_spacing);
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Densify {
            input,
            output,
            spacing,
            method,
            spacing_sample,
        } => {
            let method: Method = method.parse().context("Invalid --method")?;
            let params = DensifyParams {
                target_spacing: spacing,
                method,
                spacing_sample,
            };
            run_densify(&input, &output, params)?;
        }

        Commands::Info { input, json } => run_info(&input, json)?,
    }

    Ok(())
}
