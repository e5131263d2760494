//! Derivation of the "minutes before" reminder times.

use crate::models::{DailyRecord, PrayerTimes};
use chrono::{NaiveTime, TimeDelta};

/// Minutes subtracted for every `sebelum_*` field unless configured otherwise.
pub const OFFSET_MINUTES: i64 = 15;

/// Largest accepted offset: one full day.
pub const MAX_OFFSET_MINUTES: i64 = 24 * 60;

const CLOCK_FORMAT: &str = "%H:%M";

/// Shift an `HH:MM` clock time earlier by `minutes`.
///
/// Wraps around midnight (`00:10` minus 15 is `23:55`). Input that does not
/// parse as `HH:MM` after trimming is returned unchanged; a malformed cell
/// never fails the record. An offset that cannot be represented as a
/// duration leaves the time unchanged as well.
pub fn minus_minutes(time: &str, minutes: i64) -> String {
    let parsed = NaiveTime::parse_from_str(time.trim(), CLOCK_FORMAT);
    match (parsed, TimeDelta::try_minutes(minutes)) {
        (Ok(t), Some(delta)) => {
            let (shifted, _) = t.overflowing_sub_signed(delta);
            shifted.format(CLOCK_FORMAT).to_string()
        }
        _ => time.to_string(),
    }
}

/// Build a [`DailyRecord`] from scraped times, deriving each offset field
/// independently.
pub fn build_record(tanggal: String, times: PrayerTimes, offset: i64) -> DailyRecord {
    DailyRecord {
        sebelum_imsyak: minus_minutes(&times.imsyak, offset),
        sebelum_shubuh: minus_minutes(&times.shubuh, offset),
        sebelum_terbit: minus_minutes(&times.terbit, offset),
        sebelum_dhuha: minus_minutes(&times.dhuha, offset),
        sebelum_dzuhur: minus_minutes(&times.dzuhur, offset),
        sebelum_ashr: minus_minutes(&times.ashr, offset),
        sebelum_magrib: minus_minutes(&times.magrib, offset),
        sebelum_isya: minus_minutes(&times.isya, offset),
        tanggal,
        imsyak: times.imsyak,
        shubuh: times.shubuh,
        terbit: times.terbit,
        dhuha: times.dhuha,
        dzuhur: times.dzuhur,
        ashr: times.ashr,
        magrib: times.magrib,
        isya: times.isya,
    }
}
