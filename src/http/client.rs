use crate::config::ScraperSettings;
use crate::errors::network_error;
use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// HTTP client with built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub fn from_settings(settings: &ScraperSettings) -> Result<Self> {
        Self::new(&settings.user_agent, settings.timeout_secs, settings.rate_limit_ms)
    }

    /// GET a page and return its body; non-2xx statuses are network errors
    pub async fn fetch_text(&mut self, url: &str) -> Result<String> {
        self.rate_limiter.wait().await;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network_error(url, format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| network_error(url, e))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}
