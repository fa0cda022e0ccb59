use std::path::Path;
use std::process::ExitCode;

use chrono::{Datelike, Months, Utc};
use dotenv::dotenv;
use futures::stream::{FuturesUnordered, StreamExt};
use muezzin::{
    ELM_FILE_TAG, ElmScraper, MI_FILE_TAG, MiScraper, ScrapingContext, write_monthly_timetable,
};

extern crate env_logger;
extern crate log;

use log::LevelFilter;
use log::{error, info};

async fn run_elm_year_job(context: &ScrapingContext, year: i32) -> anyhow::Result<()> {
    let scraper = ElmScraper::new(context.scraping_config.get_elm_page_url().to_string(), year);
    let months = scraper.scrape(&context.request_client).await?;

    let data_dir = Path::new(context.scraping_config.get_data_dir());
    for timetable in months.values() {
        let path = write_monthly_timetable(data_dir, ELM_FILE_TAG, timetable)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

async fn run_mi_month_job(context: &ScrapingContext, year: i32, month: u32) -> anyhow::Result<()> {
    let scraper = MiScraper::new(
        context.scraping_config.get_mi_page_url().to_string(),
        year,
        month,
    );
    let timetable = scraper.scrape(&context.request_client).await?;

    let data_dir = Path::new(context.scraping_config.get_data_dir());
    let path = write_monthly_timetable(data_dir, MI_FILE_TAG, &timetable)?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let context = match ScrapingContext::new() {
        Ok(context) => context,
        Err(e) => {
            error!("could not build scraping context: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let today = Utc::now().date_naive();
    let year = today.year();

    if let Err(e) = run_elm_year_job(&context, year).await {
        error!("ELM scrape failed: {e:#}");
        return ExitCode::FAILURE;
    }

    // MI publishes one PDF per month; fetch the current month and the next
    // one, rolling December into January of the following year.
    let next = today + Months::new(1);
    let mut mi_jobs: FuturesUnordered<_> = [(year, today.month()), (next.year(), next.month())]
        .into_iter()
        .map(|(job_year, job_month)| run_mi_month_job(&context, job_year, job_month))
        .collect();

    let mut failed = false;
    while let Some(result) = mi_jobs.next().await {
        if let Err(e) = result {
            error!("MI scrape failed: {e:#}");
            failed = true;
        }
    }
    if failed {
        return ExitCode::FAILURE;
    }

    info!("Updated ELM + MI monthly JSON files.");
    ExitCode::SUCCESS
}
