//! jadwalsholat.org monthly schedule scraper.
//!
//! Both pages live on the same endpoint: without a query string it renders
//! the city picker (`select.inputcity`), and with `?id=&m=&y=` it renders the
//! month table. Schedule rows are `tr` elements styled `table_light`,
//! `table_dark`, or `table_highlight` (today's row).
//!
//! # Row Layout
//!
//! ```text
//! day | imsyak | shubuh | terbit | dhuha | dzuhur | ashr | magrib | isya
//! ```

use super::SchedulePortal;
use crate::error::ScrapeError;
use crate::models::{City, DailyRecord, PrayerTimes, Target};
use crate::transform::build_record;
use crate::utils::{clean_day, normalize_name};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};
use url::Url;

/// The monthly schedule page, which doubles as the directory page.
pub const BASE_URL: &str = "https://jadwalsholat.org/jadwal-sholat/monthly.php";

/// Text cells a schedule row must carry: the day plus eight times.
const ROW_CELLS: usize = 9;

static CITY_OPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("select.inputcity option").unwrap());
static SCHEDULE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.table_light, tr.table_dark, tr.table_highlight").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// HTTP-backed [`SchedulePortal`] for jadwalsholat.org.
#[derive(Debug, Clone)]
pub struct JadwalSholat {
    client: Client,
    base_url: Url,
}

impl JadwalSholat {
    /// Create a portal rooted at `base_url` (normally [`BASE_URL`]).
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Build the schedule query URL, e.g. `...monthly.php?id=308&m=03&y=2024`.
    pub fn schedule_url(&self, city_id: &str, target: Target) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("id", city_id)
            .append_pair("m", &format!("{:02}", target.month))
            .append_pair("y", &format!("{:04}", target.year));
        url
    }

    async fn get_text(&self, url: Url) -> Result<String, ScrapeError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

impl SchedulePortal for JadwalSholat {
    #[instrument(level = "debug", skip_all)]
    async fn directory_page(&self) -> Result<String, ScrapeError> {
        self.get_text(self.base_url.clone()).await
    }

    #[instrument(level = "debug", skip_all, fields(%city_id, %target))]
    async fn schedule_page(&self, city_id: &str, target: Target) -> Result<String, ScrapeError> {
        self.get_text(self.schedule_url(city_id, target)).await
    }
}

/// Fetch and parse the city directory.
///
/// Any failure here is fatal for the run; there is no partial directory.
#[instrument(level = "info", skip_all)]
pub async fn fetch_cities<P: SchedulePortal>(portal: &P) -> Result<Vec<City>, ScrapeError> {
    let html = portal.directory_page().await?;
    let cities = parse_cities(&html)?;
    info!(count = cities.len(), "Indexed cities");
    Ok(cities)
}

/// Fetch one city's month and turn it into [`DailyRecord`]s.
#[instrument(level = "info", skip_all, fields(%city_id, %target))]
pub async fn fetch_schedule<P: SchedulePortal>(
    portal: &P,
    city_id: &str,
    target: Target,
    offset_minutes: i64,
) -> Result<Vec<DailyRecord>, ScrapeError> {
    let html = portal.schedule_page(city_id, target).await?;
    let records = parse_schedule(&html, target, offset_minutes)?;
    debug!(days = records.len(), "Parsed schedule");
    Ok(records)
}

/// Extract `(id, normalized name)` pairs from the directory page.
///
/// Ids are expected to be unique; a repeated id keeps the last name seen.
/// An `<option>` without a `value` attribute submits its text, so the text
/// doubles as the id there.
pub fn parse_cities(html: &str) -> Result<Vec<City>, ScrapeError> {
    let document = Html::parse_document(html);

    let mut by_id = BTreeMap::new();
    for option in document.select(&CITY_OPTION) {
        let text = option.text().collect::<String>();
        let id = option
            .value()
            .attr("value")
            .map(str::to_string)
            .unwrap_or_else(|| text.trim().to_string());
        by_id.insert(id, normalize_name(&text));
    }

    if by_id.is_empty() {
        return Err(ScrapeError::EmptyDirectory);
    }

    Ok(by_id
        .into_iter()
        .map(|(id, name)| City { id, name })
        .collect())
}

/// Parse the month table into records, in page order.
///
/// Unlike a raw `td//text()` read, every text node is trimmed and blank
/// nodes are dropped before cells are counted, so an empty `<td> </td>`
/// does not take a column. Apart from that trim, values are stored without
/// validation; only the row width is checked.
pub fn parse_schedule(
    html: &str,
    target: Target,
    offset_minutes: i64,
) -> Result<Vec<DailyRecord>, ScrapeError> {
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    for (row, tr) in document.select(&SCHEDULE_ROW).enumerate() {
        let cells: Vec<String> = tr
            .select(&CELL)
            .flat_map(|td| td.text())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        if cells.len() < ROW_CELLS {
            return Err(ScrapeError::ShortRow {
                row,
                cells: cells.len(),
            });
        }

        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        let day = next();
        let tanggal = format!(
            "{:04}-{:02}-{}",
            target.year,
            target.month,
            clean_day(&day)
        );
        let times = PrayerTimes {
            imsyak: next(),
            shubuh: next(),
            terbit: next(),
            dhuha: next(),
            dzuhur: next(),
            ashr: next(),
            magrib: next(),
            isya: next(),
        };
        records.push(build_record(tanggal, times, offset_minutes));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTORY_HTML: &str = r#"
        <html><body>
          <form>
            <select class="inputcity" name="kota">
              <option value="1">Ambarawa</option>
              <option value="308">Jakarta Pusat</option>
              <option value="77">Kab. Bandung-Barat</option>
            </select>
            <select class="other"><option value="x">Ignored</option></select>
          </form>
        </body></html>
    "#;

    fn schedule_html() -> String {
        r#"
        <html><body><table>
          <tr class="table_header"><td>Tanggal</td><td>Imsyak</td></tr>
          <tr class="table_light" align="center">
            <td><b>01</b></td><td>04:05</td><td>04:15</td><td>05:32</td><td>06:00</td>
            <td>11:56</td><td>15:22</td><td>18:13</td><td>19:28</td>
          </tr>
          <tr class="table_dark" align="center">
            <td><b> 02 </b></td><td>04:06</td><td>04:16</td><td>05:33</td><td>06:01</td>
            <td>11:57</td><td>15:23</td><td>18:14</td><td>19:29</td>
          </tr>
          <tr class="table_highlight" align="center">
            <td><b>03</b></td><td>04:06</td><td>04:16</td><td>05:33</td><td>06:01</td>
            <td>11:57</td><td>15:23</td><td>18:14</td><td>-</td>
          </tr>
        </table></body></html>
        "#
        .to_string()
    }

    #[test]
    fn test_parse_cities() {
        let cities = parse_cities(DIRECTORY_HTML).unwrap();
        assert_eq!(cities.len(), 3);
        assert!(cities.contains(&City {
            id: "308".into(),
            name: "jakartapusat".into()
        }));
        assert!(cities.contains(&City {
            id: "77".into(),
            name: "kabbandungbarat".into()
        }));
        assert!(cities.iter().all(|c| c.id != "x"));
    }

    #[test]
    fn test_parse_cities_duplicate_id_keeps_last() {
        let html = r#"<select class="inputcity">
            <option value="5">First</option><option value="5">Second</option>
        </select>"#;
        let cities = parse_cities(html).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "second");
    }

    #[test]
    fn test_parse_cities_empty_is_error() {
        let err = parse_cities("<html><body><p>maintenance</p></body></html>").unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyDirectory));
    }

    #[test]
    fn test_parse_schedule_rows_in_order() {
        let records = parse_schedule(&schedule_html(), Target::new(2024, 3), 15).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].tanggal, "2024-03-01");
        assert_eq!(records[0].imsyak, "04:05");
        assert_eq!(records[0].isya, "19:28");
        assert_eq!(records[0].sebelum_imsyak, "03:50");
        assert_eq!(records[0].sebelum_dzuhur, "11:41");

        assert_eq!(records[1].tanggal, "2024-03-02");
        assert_eq!(records[2].tanggal, "2024-03-03");
    }

    #[test]
    fn test_parse_schedule_keeps_malformed_values() {
        let records = parse_schedule(&schedule_html(), Target::new(2024, 3), 15).unwrap();
        assert_eq!(records[2].isya, "-");
        assert_eq!(records[2].sebelum_isya, "-");
    }

    #[test]
    fn test_parse_schedule_trims_and_skips_blank_cells() {
        let html = r#"<table><tr class="table_light">
            <td> 04 </td><td> </td><td>04:05 </td><td>04:15</td><td>05:32</td><td>06:00</td>
            <td>11:56</td><td>15:22</td><td>18:13</td><td>
              19:28
            </td></tr></table>"#;
        let records = parse_schedule(html, Target::new(2024, 3), 15).unwrap();
        assert_eq!(records[0].tanggal, "2024-03-04");
        assert_eq!(records[0].imsyak, "04:05");
        assert_eq!(records[0].isya, "19:28");
    }

    #[test]
    fn test_parse_schedule_short_row_fails() {
        let html = r#"<table>
            <tr class="table_light"><td>01</td><td>04:05</td><td>04:15</td></tr>
        </table>"#;
        let err = parse_schedule(html, Target::new(2024, 3), 15).unwrap_err();
        assert!(matches!(err, ScrapeError::ShortRow { row: 0, cells: 3 }));
    }

    #[test]
    fn test_parse_schedule_without_rows_is_empty() {
        let records = parse_schedule("<table></table>", Target::new(2024, 3), 15).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_schedule_url() {
        let portal = JadwalSholat::new(BASE_URL).unwrap();
        let url = portal.schedule_url("308", Target::new(2024, 3));
        assert_eq!(
            url.as_str(),
            "https://jadwalsholat.org/jadwal-sholat/monthly.php?id=308&m=03&y=2024"
        );
    }
}
