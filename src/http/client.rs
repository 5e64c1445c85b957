use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::errors::fetch_context;

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

    /// Fetch a page body; `None` when the server reports the page missing
    pub async fn get_text(&mut self, url: &str) -> Result<Option<String>> {
        self.rate_limiter.wait().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| fetch_context(url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} from {}", response.status(), url);
        }

        let text = response
            .text()
            .await
            .context("Failed to extract HTML text")?;
        Ok(Some(text))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}
