//! CLI entry point for the bikeshare statistics tool.
//!
//! Loads one city's trips, optionally previews the raw rows, filters by month
//! and day of week, and prints the resulting statistics.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_stats::city::City;
use bikeshare_stats::config::{DATA_DIR_VAR, Settings};
use bikeshare_stats::filter::{DayFilter, FilterSelection, MonthFilter};
use bikeshare_stats::output::{print_pretty, write_json, write_preview, write_report};
use bikeshare_stats::{aggregate, filter, load};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing the city CSV files
    #[arg(long, global = true, env = DATA_DIR_VAR)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute trip statistics for a city, optionally filtered
    Stats {
        /// City to analyze (chicago, new york city, washington; prefixes accepted)
        #[arg(short, long)]
        city: City,

        /// Month to filter by (january to june), or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// Day of week to filter by, or "all"
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        /// Also print this many raw rows of the unfiltered data
        #[arg(short, long, value_name = "ROWS")]
        raw: Option<usize>,

        /// Output format for the report
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print raw rows of a city's data
    Preview {
        #[arg(short, long)]
        city: City,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value_t = 5)]
        rows: usize,
    },
    /// List supported cities and their source files
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = settings
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = settings
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let settings = settings.with_data_dir(cli.data_dir);

    match cli.command {
        Commands::Stats {
            city,
            month,
            day,
            raw,
            format,
        } => {
            let selection = FilterSelection { city, month, day };
            run_stats(&settings, selection, raw, format)?;
        }
        Commands::Preview { city, rows } => {
            let records = load(city, &settings.data_dir)
                .with_context(|| format!("loading {city} data"))?;
            write_preview(std::io::stdout().lock(), &records, rows)?;
        }
        Commands::Cities => {
            let mut out = std::io::stdout().lock();
            for city in City::ALL {
                let path = settings.data_dir.join(city.file_name());
                writeln!(out, "{:<15} {}", city.name(), path.display())?;
            }
        }
    }

    Ok(())
}

/// Runs load -> filter -> aggregate for one selection and prints the report.
#[tracing::instrument(skip(settings, format), fields(city = %selection.city, month = %selection.month, day = %selection.day))]
fn run_stats(
    settings: &Settings,
    selection: FilterSelection,
    raw: Option<usize>,
    format: Format,
) -> Result<()> {
    let records = load(selection.city, &settings.data_dir)
        .with_context(|| format!("loading {} data", selection.city))?;

    let mut out = std::io::stdout().lock();

    if let Some(rows) = raw {
        write_preview(&mut out, &records, rows)?;
        writeln!(out)?;
    }

    let filtered = filter(&records, selection.month, selection.day);
    if filtered.is_empty() {
        warn!("No trips match the selected filters");
    }
    info!(
        total = records.len(),
        selected = filtered.len(),
        "Records filtered"
    );

    let report = aggregate(&filtered);
    print_pretty(&report);

    match format {
        Format::Text => write_report(&mut out, &report)?,
        Format::Json => write_json(&mut out, &report)?,
    }

    Ok(())
}
