use anyhow::Context;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use url::Url;

use crate::link_resolver::resolve_pdf_link;
use crate::pdf::text_from_pdf_bytes;
use crate::requests::RequestClient;
use crate::text_manipulators::time_tokens;
use crate::timetable::{MI_SOURCE_NAME, MiDayTimes, MonthlyTimetable, assemble_month, day_key};

/// Ordinal positions of the kept fields among the time tokens of one MI
/// PDF row. The PDF lays out more columns than we keep; the gaps are the
/// alternate juristic and start/iqamah sibling columns that are
/// intentionally dropped. A row with fewer than `min_time_tokens` tokens
/// is treated as non-data and skipped.
pub struct MiColumnLayout {
    pub fajr: usize,
    pub zuhr: usize,
    pub asr: usize,
    pub maghrib: usize,
    pub isha: usize,
    pub min_time_tokens: usize,
}

pub const MI_COLUMNS: MiColumnLayout = MiColumnLayout {
    fajr: 1,
    zuhr: 4,
    asr: 7,
    maghrib: 8,
    isha: 10,
    min_time_tokens: 11,
};

lazy_static! {
    static ref DAY_ROW_REGEX: Regex =
        Regex::new(r"^(\d{1,2})\s+\S+\s+(.+)$").expect("day row regex to compile");
}

/// Lazily yields `(day, times)` rows from linearized PDF text.
///
/// A row starts with the day number followed by a weekday abbreviation (or
/// whatever other token the layout puts there); times are collected from
/// the remainder. Lines failing the day pattern, or with too few time
/// tokens, are skipped without error.
pub fn extract_day_rows(pdf_text: &str) -> impl Iterator<Item = (String, MiDayTimes)> + '_ {
    pdf_text.lines().filter_map(|line| parse_day_row(line.trim()))
}

fn parse_day_row(line: &str) -> Option<(String, MiDayTimes)> {
    let captures = DAY_ROW_REGEX.captures(line)?;
    let day: u32 = captures.get(1)?.as_str().parse().ok()?;
    let rest = captures.get(2)?.as_str();

    let times = time_tokens(rest);
    if times.len() < MI_COLUMNS.min_time_tokens {
        return None;
    }

    Some((
        day_key(day),
        MiDayTimes {
            fajr: times[MI_COLUMNS.fajr].to_string(),
            zuhr: times[MI_COLUMNS.zuhr].to_string(),
            asr: times[MI_COLUMNS.asr].to_string(),
            maghrib: times[MI_COLUMNS.maghrib].to_string(),
            isha: times[MI_COLUMNS.isha].to_string(),
        },
    ))
}

#[derive(Debug)]
pub struct MiScraper {
    pub page_url: String,
    pub year: i32,
    pub month: u32,
}

impl MiScraper {
    pub fn new(page_url: String, year: i32, month: u32) -> Self {
        Self {
            page_url,
            year,
            month,
        }
    }

    /// Locates the month's PDF on the listing page, fetches it, recovers
    /// its text and folds the rows into one monthly timetable.
    pub async fn scrape(
        &self,
        request_client: &RequestClient,
    ) -> anyhow::Result<MonthlyTimetable<MiDayTimes>> {
        let listing_html = request_client.fetch_url_body(&self.page_url).await?;
        let page_url = Url::parse(&self.page_url)
            .with_context(|| format!("invalid MI listing page url: {}", self.page_url))?;
        let pdf_url = resolve_pdf_link(&listing_html, &page_url, self.year, self.month)?;

        info!(
            "Scraping MI iqamah times for {}-{:02} from {pdf_url}",
            self.year, self.month
        );
        let pdf_bytes = request_client.fetch_url_bytes(pdf_url.as_str()).await?;
        let pdf_text =
            text_from_pdf_bytes(&pdf_bytes).with_context(|| format!("the file URL is {pdf_url}"))?;

        Ok(assemble_month(
            MI_SOURCE_NAME,
            self.year,
            self.month,
            extract_day_rows(&pdf_text),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ROW: &str = "1 Sun 05:10 05:18 06:02 12:30 13:05 13:10 16:45 16:50 19:02 19:10 20:32";

    #[test]
    fn a_full_row_becomes_one_day_record() {
        let rows: Vec<_> = extract_day_rows(FULL_ROW).collect();
        assert_eq!(rows.len(), 1);

        let (day, times) = &rows[0];
        assert_eq!(day, "01");
        assert_eq!(
            *times,
            MiDayTimes {
                fajr: "05:18".to_string(),
                zuhr: "13:05".to_string(),
                asr: "16:50".to_string(),
                maghrib: "19:02".to_string(),
                isha: "20:32".to_string(),
            }
        );
    }

    #[test]
    fn day_numbers_are_zero_padded() {
        let text = "9 Tue 05:10 05:18 06:02 12:30 13:05 13:10 16:45 16:50 19:02 19:10 20:32\n\
                    21 Sun 05:10 05:18 06:02 12:30 13:05 13:10 16:45 16:50 19:02 19:10 20:32";
        let days: Vec<_> = extract_day_rows(text).map(|(day, _)| day).collect();
        assert_eq!(days, vec!["09", "21"]);
    }

    #[test]
    fn rows_with_too_few_time_tokens_are_skipped_without_error() {
        let truncated = "1 Sun 05:10 05:18 06:02 12:30";
        assert_eq!(extract_day_rows(truncated).count(), 0);
    }

    #[test]
    fn lines_failing_the_day_pattern_are_skipped() {
        let text = "Date Day Fajr Start 05:10 05:18 06:02 12:30 13:05 13:10 16:45 16:50 19:02 19:10 20:32\n\
                    Printed 01.03.2025";
        assert_eq!(extract_day_rows(text).count(), 0);
    }

    #[test]
    fn header_and_footer_noise_around_rows_is_tolerated() {
        let text = "UKIM Masjid Ibrahim - March 2025\n\
                    \n\
                    2 Mon 05:10 05:18 06:02 12:30 13:05 13:10 16:45 16:50 19:02 19:10 20:32\n\
                    www.masjidibrahim.co.uk";
        let rows: Vec<_> = extract_day_rows(text).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "02");
    }
}
