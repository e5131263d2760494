//! Schedule source scrapers.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Directory**: Discover the selectable cities from the directory page
//! 2. **Schedule**: Download and parse one city's month of prayer times
//!
//! Page retrieval sits behind the [`SchedulePortal`] trait so the parsing and
//! pipeline code can be driven by canned HTML in tests. The only live
//! implementation is [`jadwalsholat::JadwalSholat`].

pub mod jadwalsholat;

use crate::error::ScrapeError;
use crate::models::Target;

/// Source of raw directory and schedule pages.
pub trait SchedulePortal {
    /// Fetch the page listing all selectable cities.
    async fn directory_page(&self) -> Result<String, ScrapeError>;

    /// Fetch one city's monthly schedule page for `target`.
    async fn schedule_page(&self, city_id: &str, target: Target) -> Result<String, ScrapeError>;
}
