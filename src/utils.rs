//! Utility functions for text normalization and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - City name normalization for output folder names
//! - Day-of-month cleanup for schedule dates
//! - File system validation for the output root

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// Normalize a city display name into a folder-safe key.
///
/// Removes every run of non-word characters (anything outside letters,
/// digits and underscore) and lowercases the rest. Idempotent.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_name("Kab. Bandung Barat"), "kabbandungbarat");
/// assert_eq!(normalize_name("kabbandungbarat"), "kabbandungbarat");
/// ```
pub fn normalize_name(name: &str) -> String {
    NON_WORD.replace_all(name, "").to_lowercase()
}

/// Strip the spaces the schedule page puts around the day-of-month cell.
pub fn clean_day(day: &str) -> String {
    day.replace(' ', "")
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
