//! CLI entry point for the AFDC EV charging station importer.
//!
//! Provides subcommands for the weekly snapshot of newly opened stations
//! and the one-time full import, both emitting a CSV table and a GeoJSON
//! FeatureCollection.

use afdc_importer::aggregate;
use afdc_importer::fetch::{self, BasicClient, auth::UrlParam};
use afdc_importer::output::{self, TagSchema};
use afdc_importer::parser::parse_units;
use afdc_importer::schedule::week_range;
use afdc_importer::station::StationRecord;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "afdc_importer")]
#[command(about = "Import and normalize AFDC EV charging station data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot stations opened during the previous Sunday-Saturday week
    Weekly {
        /// Local CSV file or URL to fetch instead of the AFDC API
        #[arg(short, long)]
        source: Option<String>,

        /// Output path prefix for the .csv and .geojson artifacts
        #[arg(short, long, default_value = "ev_charging_weekly_snapshot")]
        output: String,

        /// Run as if today were this date (must be a Sunday)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Full one-time import of all public DC-fast stations
    Import {
        /// Local CSV file or URL to fetch instead of the AFDC API
        #[arg(short, long)]
        source: Option<String>,

        /// Output path prefix for the .csv and .geojson artifacts
        #[arg(short, long, default_value = "afdc_import")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/afdc_importer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("afdc_importer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Weekly {
            source,
            output,
            date,
        } => {
            let today = date.unwrap_or_else(|| Utc::now().date_naive());
            let (start, end) = week_range(today)?;

            let records = load_records(source).await?;
            let week: Vec<StationRecord> = records
                .into_iter()
                .filter(|r| r.open_date().is_some_and(|d| start <= d && d <= end))
                .collect();
            info!(
                rows = week.len(),
                start = %start,
                end = %end,
                "Filtered to stations opened last week"
            );

            let rows = aggregate::weekly_rows(&week);
            write_artifacts(&output, &rows, TagSchema::Weekly)?;
        }
        Commands::Import { source, output } => {
            let records = load_records(source).await?;
            let rows = aggregate::import_rows(&records);
            write_artifacts(&output, &rows, TagSchema::Import)?;
        }
    }

    Ok(())
}

/// Loads and normalizes charging units from a local file, an explicit URL,
/// or the AFDC API.
#[tracing::instrument(skip(source))]
async fn load_records(source: Option<String>) -> Result<Vec<StationRecord>> {
    let text = match source {
        Some(ref path) if !path.starts_with("http") => {
            info!(path = %path, "Reading source CSV from file");
            std::fs::read_to_string(path)?
        }
        other => {
            let key = std::env::var("AFDC_API_KEY").context("AFDC_API_KEY must be set")?;
            let url = other.unwrap_or_else(|| fetch::API_URL.to_string());
            info!(url = %url, "Fetching source CSV");

            let client = UrlParam::api_key(BasicClient::new(), key);
            fetch::fetch_csv(&client, &url).await?
        }
    };

    let raw = parse_units(text.as_bytes())?;
    info!(rows = raw.len(), "Source CSV parsed");

    Ok(raw.iter().map(StationRecord::from_raw).collect())
}

/// Writes both artifacts for a finished row set.
fn write_artifacts(prefix: &str, rows: &[aggregate::OutputRow], schema: TagSchema) -> Result<()> {
    let csv_path = format!("{prefix}.csv");
    let geojson_path = format!("{prefix}.geojson");

    output::write_snapshot(&csv_path, rows, schema)?;
    output::write_geojson(&geojson_path, rows, schema)?;

    info!(
        rows = rows.len(),
        csv = %csv_path,
        geojson = %geojson_path,
        "Exports saved"
    );
    Ok(())
}
