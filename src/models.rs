//! Data models for cities, daily schedules, and processing targets.
//!
//! This module defines the core data structures used throughout the application:
//! - [`City`]: A selectable city from the directory page
//! - [`PrayerTimes`]: The eight raw clock times scraped for one day
//! - [`DailyRecord`]: One day's schedule plus its derived "before" times
//! - [`Target`]: A (year, month) pair selected for one orchestrator pass
//!
//! The `DailyRecord` field names are Indonesian to match the JSON consumed by
//! the apps reading the generated files, so they must not be renamed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A city as listed on the directory page.
///
/// # Fields
///
/// * `id` - The opaque option value the site uses in schedule queries
/// * `name` - The normalized display name, also used as the output folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// The source site's city identifier.
    pub id: String,
    /// Lowercased display name with non-word characters stripped.
    pub name: String,
}

/// The eight clock times of a single day, exactly as scraped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerTimes {
    pub imsyak: String,
    pub shubuh: String,
    pub terbit: String,
    pub dhuha: String,
    pub dzuhur: String,
    pub ashr: String,
    pub magrib: String,
    pub isya: String,
}

/// One calendar day's schedule for one city.
///
/// Serialized as a flat JSON object with 17 keys: the date, the eight
/// original times, and the eight `sebelum_*` times shifted earlier by the
/// configured offset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyRecord {
    /// The date as `YYYY-MM-D`, day taken verbatim from the page.
    pub tanggal: String,

    pub imsyak: String,
    pub shubuh: String,
    pub terbit: String,
    pub dhuha: String,
    pub dzuhur: String,
    pub ashr: String,
    pub magrib: String,
    pub isya: String,

    pub sebelum_imsyak: String,
    pub sebelum_shubuh: String,
    pub sebelum_terbit: String,
    pub sebelum_dhuha: String,
    pub sebelum_dzuhur: String,
    pub sebelum_ashr: String,
    pub sebelum_magrib: String,
    pub sebelum_isya: String,
}

/// A (year, month) pair to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target {
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
}

impl Target {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> DailyRecord {
        DailyRecord {
            tanggal: "2024-01-1".into(),
            imsyak: "04:05".into(),
            shubuh: "04:15".into(),
            terbit: "05:32".into(),
            dhuha: "06:00".into(),
            dzuhur: "11:56".into(),
            ashr: "15:22".into(),
            magrib: "18:13".into(),
            isya: "19:28".into(),
            sebelum_imsyak: "03:50".into(),
            sebelum_shubuh: "04:00".into(),
            sebelum_terbit: "05:17".into(),
            sebelum_dhuha: "05:45".into(),
            sebelum_dzuhur: "11:41".into(),
            sebelum_ashr: "15:07".into(),
            sebelum_magrib: "17:58".into(),
            sebelum_isya: "19:13".into(),
        }
    }

    #[test]
    fn test_daily_record_serializes_seventeen_keys_in_order() {
        let json = serde_json::to_value(sample_record()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 17);

        let text = serde_json::to_string(&sample_record()).unwrap();
        assert!(text.starts_with(r#"{"tanggal":"2024-01-1","imsyak":"04:05""#));
        assert!(text.ends_with(r#""sebelum_isya":"19:13"}"#));
    }

    #[test]
    fn test_target_display_zero_pads() {
        assert_eq!(Target::new(2024, 3).to_string(), "2024-03");
        assert_eq!(Target::new(2025, 12).to_string(), "2025-12");
    }

    #[test]
    fn test_target_ordering() {
        assert!(Target::new(2024, 12) < Target::new(2025, 1));
        assert!(Target::new(2024, 2) > Target::new(2024, 1));
    }
}
