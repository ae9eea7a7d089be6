//! Rate provider backed by the Frankfurter exchange rate API.

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::rate_provider::{RateProvider, RateSourceError};

pub struct FrankfurterProvider {
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(
        name = "FrankfurterRateFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>, RateSourceError> {
        let url = format!("{}/latest?base={}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxconv/0.2")
            .build()
            .map_err(|e| RateSourceError::Unavailable(e.into()))?;

        let response = client.get(&url).send().await.map_err(|e| {
            RateSourceError::Unavailable(anyhow!(
                "Request error: {} for base: {} URL: {}",
                e,
                base,
                url
            ))
        })?;

        // The upstream answers 404/422 when the base is not a currency it
        // quotes; that is a caller error, not an outage.
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            return Err(RateSourceError::UnknownBase(base.to_string()));
        }
        if !status.is_success() {
            return Err(RateSourceError::Unavailable(anyhow!(
                "HTTP error: {} for base: {}",
                status,
                base
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateSourceError::Unavailable(e.into()))?;

        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            RateSourceError::Unavailable(anyhow!(
                "Failed to parse rates response for {}: {}",
                base,
                e
            ))
        })?;

        debug!("Received {} rates for base {}", data.rates.len(), base);
        Ok(data.rates)
    }
}
