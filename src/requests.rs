use anyhow::anyhow;
use bytes::Bytes;
use reqwest::{Client, ClientBuilder, Response};

use crate::ratelimit::RateLimiter;

const USER_AGENT: &str = "MyPrayerTimes/1.0 (personal, non-commercial)";

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;
        let rate_limiter = RateLimiter::new();
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        // Wait (non-blocking) until we're allowed to make a request according
        // to our self-imposed rate-limiting policy.
        self.rate_limiter.wait_until_ready().await;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("fetch {} {}", response.status(), url));
        }
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        let body = response.text().await?;
        Ok(body)
    }

    pub async fn fetch_url_bytes(&self, url: &str) -> anyhow::Result<Bytes> {
        let response = self.fetch_url_response(url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes)
    }
}
