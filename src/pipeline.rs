//! Target selection and the per-city fetch → transform → write pipeline.
//!
//! A run fetches the city directory once, then walks its targets in order.
//! For each target every city is processed on a bounded concurrent stream;
//! the next target starts only after the whole stream has drained. Each city
//! yields its own `Result`, so one failing city never stops its siblings.

use crate::error::ScrapeError;
use crate::models::{City, Target};
use crate::outputs::json::write_month;
use crate::scrapers::SchedulePortal;
use crate::scrapers::jadwalsholat::{fetch_cities, fetch_schedule};
use chrono::{Datelike, NaiveDate, TimeDelta, Utc};
use chrono_tz::Asia::Jakarta;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Cities processed concurrently within one target.
pub const DEFAULT_WORKERS: usize = 10;

/// Months covered by automatic target selection.
pub const DEFAULT_MONTHS: usize = 6;

/// Upper bound on automatically generated months.
pub const MAX_MONTHS: usize = 120;

/// Days advanced between automatically generated targets.
///
/// This approximates "next month"; starting late in a 31-day month can skip
/// the following month entirely (Jan 31 + 32 days lands in March).
const STEP_DAYS: i64 = 32;

/// Knobs shared by every city task in a run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub output_dir: PathBuf,
    pub workers: usize,
    pub offset_minutes: i64,
}

/// Result of processing one city for one target.
#[derive(Debug)]
pub struct CityOutcome {
    pub city: City,
    pub result: Result<PathBuf, ScrapeError>,
}

/// Aggregated outcomes for a single target.
#[derive(Debug)]
pub struct TargetReport {
    pub target: Target,
    pub written: Vec<PathBuf>,
    pub failed: Vec<(City, ScrapeError)>,
}

impl TargetReport {
    fn from_outcomes(target: Target, outcomes: Vec<CityOutcome>) -> Self {
        let mut written = Vec::new();
        let mut failed = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(path) => written.push(path),
                Err(e) => failed.push((outcome.city, e)),
            }
        }
        Self {
            target,
            written,
            failed,
        }
    }
}

/// Today's date in Asia/Jakarta, where the schedules apply.
pub fn today_in_jakarta() -> NaiveDate {
    Utc::now().with_timezone(&Jakarta).date_naive()
}

/// `count` targets stepping [`STEP_DAYS`] at a time from `start`,
/// deduplicated in first-seen order.
///
/// Generation stops early at the end of the representable calendar.
pub fn auto_targets(start: NaiveDate, count: usize) -> Vec<Target> {
    (0..count as i64)
        .map_while(|i| {
            let days = TimeDelta::try_days(i.checked_mul(STEP_DAYS)?)?;
            start.checked_add_signed(days)
        })
        .map(|d| Target::new(d.year(), d.month()))
        .unique()
        .collect()
}

/// Pick the targets for a run.
///
/// An explicit month and year select exactly that pair; otherwise
/// [`auto_targets`] from `today`. A lone month or year is ignored.
pub fn resolve_targets(
    month: Option<u32>,
    year: Option<i32>,
    months: usize,
    today: NaiveDate,
) -> Vec<Target> {
    match (month, year) {
        (Some(month), Some(year)) => vec![Target::new(year, month)],
        (None, None) => auto_targets(today, months),
        _ => {
            warn!(?month, ?year, "Month and year must be given together; using automatic targets");
            auto_targets(today, months)
        }
    }
}

/// Fetch, transform and write one city's schedule for `target`.
#[instrument(level = "info", skip_all, fields(city = %city.name, %target))]
pub async fn process_city<P: SchedulePortal>(
    portal: &P,
    city: &City,
    target: Target,
    settings: &RunSettings,
) -> Result<PathBuf, ScrapeError> {
    let records = fetch_schedule(portal, &city.id, target, settings.offset_minutes).await?;
    write_month(&settings.output_dir, &city.name, &records).await
}

/// Process every city for one target, at most `settings.workers` at a time,
/// and wait for all of them.
#[instrument(level = "info", skip_all, fields(%target, cities = cities.len()))]
pub async fn run_target<P: SchedulePortal>(
    portal: &P,
    cities: &[City],
    target: Target,
    settings: &RunSettings,
) -> TargetReport {
    let outcomes: Vec<CityOutcome> = stream::iter(cities)
        .map(|city| async move {
            info!(city = %city.name, "Processing city");
            let result = process_city(portal, city, target, settings).await;
            match &result {
                Ok(path) => info!(city = %city.name, path = %path.display(), "Processing city done"),
                Err(e) => error!(city = %city.name, id = %city.id, error = %e, "Processing city failed"),
            }
            CityOutcome {
                city: city.clone(),
                result,
            }
        })
        .buffer_unordered(settings.workers.max(1))
        .collect()
        .await;

    let report = TargetReport::from_outcomes(target, outcomes);
    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "Target complete"
    );
    report
}

/// Fetch the directory once, then run each target in order.
///
/// # Errors
///
/// Only a failed directory fetch is returned; per-city failures are kept in
/// the reports.
#[instrument(level = "info", skip_all, fields(targets = targets.len()))]
pub async fn run<P: SchedulePortal>(
    portal: &P,
    targets: &[Target],
    settings: &RunSettings,
) -> Result<Vec<TargetReport>, ScrapeError> {
    let cities = fetch_cities(portal).await?;

    let mut reports = Vec::with_capacity(targets.len());
    for &target in targets {
        reports.push(run_target(portal, &cities, target, settings).await);
    }
    Ok(reports)
}
