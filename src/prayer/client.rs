use crate::config::DEFAULT_PRAYER_API_URL;
use crate::prayer::models::{Timings, TimingsResponse};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub struct PrayerClient {
    client: Client,
    base_url: String,
}

impl PrayerClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: DEFAULT_PRAYER_API_URL.to_string(),
        })
    }

    /// Override base URL (config or wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Today's timings for a city, using the given calculation method
    pub async fn fetch_timings(&self, city: &str, country: &str, method: u8) -> Result<Timings> {
        let url = format!("{}/v1/timingsByCity", self.base_url);
        let method = method.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("city", city), ("country", country), ("method", method.as_str())])
            .send()
            .await
            .context("Failed to reach prayer times service")?;

        if !response.status().is_success() {
            anyhow::bail!("Prayer times service error: status {}", response.status());
        }

        let body = response
            .json::<TimingsResponse>()
            .await
            .context("Failed to parse prayer times response")?;

        Ok(body.data.timings)
    }
}
