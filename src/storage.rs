use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::timetable::MonthlyTimetable;

/// Writes one month's timetable as pretty-printed JSON (two-space indent)
/// under `data_dir`, named `<tag>-<year>-<month>.json`. Returns the path
/// written. The timetable is handed over whole; nothing is merged with
/// what may already be on disk.
pub fn write_monthly_timetable<D: Serialize>(
    data_dir: &Path,
    source_tag: &str,
    timetable: &MonthlyTimetable<D>,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("could not create data directory {}", data_dir.display()))?;

    let file_path = data_dir.join(format!(
        "{source_tag}-{}-{}.json",
        timetable.year, timetable.month
    ));
    let json = serde_json::to_string_pretty(timetable)
        .context("could not serialize monthly timetable")?;
    fs::write(&file_path, json)
        .with_context(|| format!("could not write {}", file_path.display()))?;

    Ok(file_path)
}
