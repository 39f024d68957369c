//! CLI entry point for the bike-share trip summary tool.
//!
//! `prepare` turns a trip-history CSV into the station/trip summary JSON used
//! by the map viewer; `inspect` reports per-station activity from an existing
//! summary.

use anyhow::Result;
use bikeshare_summary::{
    activity::busiest_stations,
    output::{append_run_stats, read_summary},
    pipeline::prepare,
    types::TripSummary,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_summary")]
#[command(about = "Summarize bike-share trip history into station and trip counts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a trip-history CSV into a summary JSON document
    Prepare {
        /// Trip-history CSV to read
        #[arg(
            value_name = "INPUT",
            env = "TRIPDATA_CSV",
            default_value = "202404-baywheels-tripdata.csv"
        )]
        input: PathBuf,

        /// Summary JSON to write (defaults to INPUT with a .json extension)
        #[arg(short, long, env = "TRIPDATA_JSON")]
        output: Option<PathBuf>,

        /// CSV file to append run statistics to
        #[arg(long)]
        stats_csv: Option<PathBuf>,

        /// Number of busiest stations to log
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Report per-station activity from an existing summary JSON
    Inspect {
        /// Summary JSON produced by `prepare`
        #[arg(value_name = "SUMMARY")]
        summary: PathBuf,

        /// Number of busiest stations to log
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_summary.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_summary.log"));

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

    match cli.command {
        Commands::Prepare {
            input,
            output,
            stats_csv,
            top,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("json"));
            let prepared = prepare(&input, &output)?;

            if let Some(path) = stats_csv {
                append_run_stats(&path, &prepared.stats)?;
                info!(path = %path.display(), "Run stats appended");
            }

            log_busiest(&prepared.summary, top);
        }
        Commands::Inspect { summary, top } => {
            let summary = read_summary(&summary)?;

            let total_trips: u64 = summary
                .aggregated_trips
                .iter()
                .map(|t| t.trip_counts.total)
                .sum();
            let round_trips: u64 = summary
                .aggregated_trips
                .iter()
                .filter(|t| t.is_round_trip())
                .map(|t| t.trip_counts.total)
                .sum();

            info!(
                stations = summary.stations.len(),
                station_pairs = summary.aggregated_trips.len(),
                total_trips,
                round_trips,
                "Summary totals"
            );

            log_busiest(&summary, top);
        }
    }

    Ok(())
}

/// Logs the `top` busiest stations with their start/end/round-trip totals.
fn log_busiest(summary: &TripSummary, top: usize) {
    if top == 0 {
        return;
    }

    for activity in busiest_stations(summary, top) {
        let name = summary
            .stations
            .iter()
            .find(|s| s.id == activity.station_id)
            .map(|s| s.name.as_str())
            .unwrap_or("");

        info!(
            station_id = %activity.station_id,
            station_name = name,
            starting = activity.starting.total,
            ending = activity.ending.total,
            round_trips = activity.round_trips,
            "Busy station"
        );
    }
}
