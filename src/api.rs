use std::time::Duration;
use tracing::info;

use crate::error::Result;
use crate::types::{Draw, parse_draws};

pub const DEFAULT_RESULTS_URL: &str = "https://loteriascaixa-api.herokuapp.com/api/megasena";

/// Client for the public Mega-Sena results endpoint.
#[derive(Debug, Clone)]
pub struct ResultsClient {
    client: reqwest::Client,
    url: String,
}

impl ResultsClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Every published draw. Fails on transport errors, non-2xx statuses and
    /// malformed records.
    pub async fn fetch_draws(&self) -> Result<Vec<Draw>> {
        info!("fetching results from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let draws = parse_draws(&body)?;
        info!("received {} draws", draws.len());
        Ok(draws)
    }
}
