use crate::config::DEFAULT_TIME_API_URL;
use crate::location::models::TimeApiResponse;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub struct TimeClient {
    client: Client,
    base_url: String,
}

impl TimeClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: DEFAULT_TIME_API_URL.to_string(),
        })
    }

    /// Override base URL (config or wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Timezone and current time for the caller's IP address
    pub async fn fetch_current(&self) -> Result<TimeApiResponse> {
        let url = format!("{}/api/ip", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach time service")?;

        if !response.status().is_success() {
            anyhow::bail!("Time service error: status {}", response.status());
        }

        let body = response
            .json::<TimeApiResponse>()
            .await
            .context("Failed to parse time service response")?;

        Ok(body)
    }
}
