//! Command-line interface definitions for the schedule scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The target month and year can also come from the `JWO_MONTH` and
//! `JWO_YEAR` environment variables, which is how scheduled jobs set them.

use crate::pipeline::{DEFAULT_MONTHS, DEFAULT_WORKERS, MAX_MONTHS};
use crate::scrapers::jadwalsholat::BASE_URL;
use crate::transform::{MAX_OFFSET_MINUTES, OFFSET_MINUTES};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the schedule scraper.
///
/// Without `--month` and `--year` the current month (Asia/Jakarta) and the
/// following ones are scraped.
///
/// # Examples
///
/// ```sh
/// # Current month plus the next five, into ./adzan
/// jadwal_sholat_scraper
///
/// # A single month
/// JWO_MONTH=03 JWO_YEAR=2024 jadwal_sholat_scraper
///
/// # Twelve months, 20 cities at a time, elsewhere
/// jadwal_sholat_scraper --months 12 --workers 20 -o /srv/adzan
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Month to scrape (1-12); needs --year as well
    #[arg(long, env = "JWO_MONTH", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year to scrape; needs --month as well
    #[arg(long, env = "JWO_YEAR")]
    pub year: Option<i32>,

    /// Number of months to scrape when no explicit month/year is given (at most 120)
    #[arg(long, env = "JWO_MONTHS", default_value_t = DEFAULT_MONTHS, value_parser = month_count)]
    pub months: usize,

    /// Root directory for the generated JSON files
    #[arg(short, long, default_value = "adzan")]
    pub output_dir: PathBuf,

    /// Cities fetched concurrently
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, value_parser = positive)]
    pub workers: usize,

    /// Minutes subtracted for the `sebelum_*` reminder times (0-1440)
    #[arg(
        long,
        default_value_t = OFFSET_MINUTES,
        value_parser = clap::value_parser!(i64).range(0..=MAX_OFFSET_MINUTES)
    )]
    pub offset_minutes: i64,

    /// Monthly schedule page, also serving the city directory
    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,
}

fn positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn month_count(s: &str) -> Result<usize, String> {
    match positive(s)? {
        n if n > MAX_MONTHS => Err(format!("must be at most {MAX_MONTHS}")),
        n => Ok(n),
    }
}
