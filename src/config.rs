use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

const DEFAULT_ELM_PAGE_URL: &str = "https://www.eastlondonmosque.org.uk/prayer-times";
const DEFAULT_MI_PAGE_URL: &str = "https://www.masjidibrahim.co.uk/prayer-timetable/";
const DEFAULT_DATA_DIR: &str = "web/data";

/// The env vars the scraper reads. Every var is optional; the production
/// source pages and output directory are the defaults.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    elm_page_url: Option<String>,
    mi_page_url: Option<String>,
    data_dir: Option<String>,
}

pub struct ScrapingConfig {
    elm_page_url: String,
    mi_page_url: String,
    data_dir: String,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Ok(Self {
            elm_page_url: scraping_env
                .elm_page_url
                .unwrap_or_else(|| DEFAULT_ELM_PAGE_URL.to_string()),
            mi_page_url: scraping_env
                .mi_page_url
                .unwrap_or_else(|| DEFAULT_MI_PAGE_URL.to_string()),
            data_dir: scraping_env
                .data_dir
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        })
    }

    pub fn get_elm_page_url(&self) -> &str {
        &self.elm_page_url
    }

    pub fn get_mi_page_url(&self) -> &str {
        &self.mi_page_url
    }

    pub fn get_data_dir(&self) -> &str {
        &self.data_dir
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
