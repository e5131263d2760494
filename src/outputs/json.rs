//! JSON output of monthly schedules.
//!
//! # Output Structure
//!
//! One file per city per month, the month zero-padded:
//! ```text
//! output_dir/
//! └── jakartapusat/
//!     └── 2024/
//!         ├── 01.json
//!         └── 02.json
//! ```
//!
//! Each file is a JSON array of [`DailyRecord`] objects. Writing truncates
//! any previous file at the same path; nothing is merged.

use crate::error::ScrapeError;
use crate::models::DailyRecord;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Folder mode for created directories (subject to the process umask).
#[cfg(unix)]
const DIR_MODE: u32 = 0o777;

/// Write a city's month of records to `{output_dir}/{city}/{year}/{month}.json`.
///
/// The year and month come from the first record's `tanggal`, so `records`
/// must be non-empty.
///
/// # Returns
///
/// The path written.
///
/// # Errors
///
/// [`ScrapeError::EmptySchedule`] for no records, [`ScrapeError::BadDate`]
/// when the date cannot be split into year and month, and I/O or
/// serialization failures otherwise. A failure mid-write may leave a
/// truncated file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), %city))]
pub async fn write_month(
    output_dir: &Path,
    city: &str,
    records: &[DailyRecord],
) -> Result<PathBuf, ScrapeError> {
    let first = records.first().ok_or(ScrapeError::EmptySchedule)?;
    let (year, month) = year_month(&first.tanggal)?;

    let dir = output_dir.join(city).join(year);
    debug!(dir = %dir.display(), "Ensuring JSON directory exists");
    create_dir(&dir).await?;

    let path = dir.join(format!("{month}.json"));
    let json = serde_json::to_string(records)?;
    fs::write(&path, json).await?;
    info!(path = %path.display(), days = records.len(), "Wrote schedule JSON");

    Ok(path)
}

/// Split `YYYY-MM-D` into its year and month parts.
fn year_month(tanggal: &str) -> Result<(&str, &str), ScrapeError> {
    let mut parts = tanggal.split('-');
    match (parts.next(), parts.next()) {
        (Some(year), Some(month)) if !year.is_empty() && !month.is_empty() => Ok((year, month)),
        _ => Err(ScrapeError::BadDate(tanggal.to_string())),
    }
}

async fn create_dir(dir: &Path) -> Result<(), ScrapeError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder.create(dir).await?;
    Ok(())
}
