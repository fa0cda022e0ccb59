use std::collections::BTreeMap;

use anyhow::Context;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;

use crate::requests::RequestClient;
use crate::text_manipulators::time_tokens;
use crate::timetable::{ElmDayTimes, MonthlyTimetable, assemble_elm_year};

/// Ordinal positions of the kept fields among the time tokens of one ELM
/// table row. Indices 2, 4, 7 and 9 carry the jamaah/secondary columns the
/// page publishes alongside the start times; they are intentionally not
/// extracted. A row with fewer than `min_time_tokens` tokens is not a data
/// row and gets skipped.
pub struct ElmColumnLayout {
    pub sunrise: usize,
    pub fajr: usize,
    pub zuhr: usize,
    pub asr_mithl1: usize,
    pub asr_mithl2: usize,
    pub maghrib: usize,
    pub isha: usize,
    pub min_time_tokens: usize,
}

pub const ELM_COLUMNS: ElmColumnLayout = ElmColumnLayout {
    sunrise: 0,
    fajr: 1,
    zuhr: 3,
    asr_mithl1: 5,
    asr_mithl2: 6,
    maghrib: 8,
    isha: 10,
    min_time_tokens: 11,
};

lazy_static! {
    static ref DATE_TOKEN_REGEX: Regex =
        Regex::new(r"\d{2}/\d{2}/\d{4}").expect("date token regex to compile");
}

/// Lazily yields `(month, day, times)` rows from the ELM page text.
///
/// A line qualifies when it contains a `dd/mm/<year>` date token for the
/// target year; `dd`/`mm` then come from the first date token on the line.
/// Lines with fewer than the minimum number of time tokens are not data
/// rows and are skipped silently, never raised.
pub fn extract_day_rows(
    page_text: &str,
    year: i32,
) -> anyhow::Result<impl Iterator<Item = (String, String, ElmDayTimes)> + '_> {
    let year_row_regex = Regex::new(&format!(r"\b\d{{2}}/\d{{2}}/{year}\b"))
        .context("year row regex to compile")?;
    Ok(page_text
        .lines()
        .filter_map(move |line| parse_day_row(line.trim(), &year_row_regex)))
}

fn parse_day_row(line: &str, year_row_regex: &Regex) -> Option<(String, String, ElmDayTimes)> {
    if !year_row_regex.is_match(line) {
        return None;
    }
    let date_token = DATE_TOKEN_REGEX.find(line)?.as_str();
    let day = &date_token[..2];
    let month = &date_token[3..5];

    let times = time_tokens(line);
    if times.len() < ELM_COLUMNS.min_time_tokens {
        return None;
    }

    Some((
        month.to_string(),
        day.to_string(),
        ElmDayTimes {
            sunrise: times[ELM_COLUMNS.sunrise].to_string(),
            fajr: times[ELM_COLUMNS.fajr].to_string(),
            zuhr: times[ELM_COLUMNS.zuhr].to_string(),
            asr_mithl1: times[ELM_COLUMNS.asr_mithl1].to_string(),
            asr_mithl2: times[ELM_COLUMNS.asr_mithl2].to_string(),
            maghrib: times[ELM_COLUMNS.maghrib].to_string(),
            isha: times[ELM_COLUMNS.isha].to_string(),
        },
    ))
}

#[derive(Debug)]
pub struct ElmScraper {
    pub url: String,
    pub year: i32,
}

impl ElmScraper {
    pub fn new(url: String, year: i32) -> Self {
        Self { url, year }
    }

    /// Fetches the page once and folds every matching row into the twelve
    /// month buckets of the target year.
    pub async fn scrape(
        &self,
        request_client: &RequestClient,
    ) -> anyhow::Result<BTreeMap<String, MonthlyTimetable<ElmDayTimes>>> {
        info!("Scraping ELM start times for {} from {}", self.year, self.url);
        let page_text = request_client.fetch_url_body(&self.url).await?;
        let rows = extract_day_rows(&page_text, self.year)?;
        Ok(assemble_elm_year(self.year, rows))
    }
}
