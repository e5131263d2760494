//! # Jadwal Sholat Scraper
//!
//! A batch job that scrapes monthly prayer-time schedules for every city
//! listed on jadwalsholat.org and writes one JSON file per city per month.
//!
//! ## Usage
//!
//! ```sh
//! jadwal_sholat_scraper -o ./adzan
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Targets**: One explicit month, or the current month and the next few
//! 2. **Directory**: Discover the city list once
//! 3. **Schedules**: Fetch and parse each city's month (10 cities at a time)
//! 4. **Output**: Add the "15 minutes before" times and write `<city>/<year>/<month>.json`

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod transform;
mod utils;

use cli::Cli;
use pipeline::{RunSettings, resolve_targets, today_in_jakarta};
use scrapers::jadwalsholat::JadwalSholat;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("jadwal_sholat_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: ensure the output root is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let targets = resolve_targets(args.month, args.year, args.months, today_in_jakarta());
    info!(
        targets = %targets.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        "Resolved targets"
    );

    let portal = JadwalSholat::new(&args.base_url)?;
    let settings = RunSettings {
        output_dir: args.output_dir,
        workers: args.workers,
        offset_minutes: args.offset_minutes,
    };

    let reports = match pipeline::run(&portal, &targets, &settings).await {
        Ok(reports) => reports,
        Err(e) => {
            error!(error = %e, "Failed to fetch the city directory");
            return Err(e.into());
        }
    };

    let written: usize = reports.iter().map(|r| r.written.len()).sum();
    let failed: usize = reports.iter().map(|r| r.failed.len()).sum();

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        written,
        failed,
        "Execution complete"
    );

    Ok(())
}
