use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ELM_SOURCE_NAME: &str = "ELM";
pub const MI_SOURCE_NAME: &str = "UKIM Masjid Ibrahim";

pub const ELM_FILE_TAG: &str = "elm";
pub const MI_FILE_TAG: &str = "mi";

/// Start times published by East London Mosque, one record per day.
/// `asr_mithl1`/`asr_mithl2` are the two juristic variants of Asr.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElmDayTimes {
    pub sunrise: String,
    pub fajr: String,
    pub zuhr: String,
    pub asr_mithl1: String,
    pub asr_mithl2: String,
    pub maghrib: String,
    pub isha: String,
}

/// Iqamah times published by Masjid Ibrahim. A narrower shape than
/// [`ElmDayTimes`]; the two sources are never merged into one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiDayTimes {
    pub fajr: String,
    pub zuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

/// One month of one source's timetable. `days` keys are zero-padded day
/// numbers ("01".."31") and may be sparse: a missing key means the source
/// row for that date was absent or malformed. The `BTreeMap` keeps
/// serialization deterministic for identical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTimetable<D> {
    pub source: String,
    pub year: i32,
    pub month: String,
    pub days: BTreeMap<String, D>,
}

pub fn month_key(month: u32) -> String {
    format!("{month:02}")
}

pub fn day_key(day: u32) -> String {
    format!("{day:02}")
}

/// Folds extracted `(month, day, times)` rows into the twelve month buckets
/// of an ELM year. All buckets exist up front, so callers always get a
/// complete 12-month structure even when some months have no data. A later
/// row for an already-seen day replaces the earlier one. Rows whose month
/// token falls outside "01".."12" are dropped.
pub fn assemble_elm_year(
    year: i32,
    rows: impl IntoIterator<Item = (String, String, ElmDayTimes)>,
) -> BTreeMap<String, MonthlyTimetable<ElmDayTimes>> {
    let mut months: BTreeMap<String, MonthlyTimetable<ElmDayTimes>> = (1u32..=12)
        .map(|month| {
            let month = month_key(month);
            (
                month.clone(),
                MonthlyTimetable {
                    source: ELM_SOURCE_NAME.to_string(),
                    year,
                    month,
                    days: BTreeMap::new(),
                },
            )
        })
        .collect();

    for (month, day, times) in rows {
        if let Some(bucket) = months.get_mut(&month) {
            bucket.days.insert(day, times);
        }
    }

    months
}

/// Builds one month's timetable from extracted `(day, times)` rows. The
/// caller decides which `(year, month)` to request; no cross-month or
/// cross-source reconciliation happens here.
pub fn assemble_month<D>(
    source: &str,
    year: i32,
    month: u32,
    rows: impl IntoIterator<Item = (String, D)>,
) -> MonthlyTimetable<D> {
    MonthlyTimetable {
        source: source.to_string(),
        year,
        month: month_key(month),
        days: rows.into_iter().collect(),
    }
}
