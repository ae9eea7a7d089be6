//! Provides live exchange rates for a base currency.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateSourceError {
    /// The upstream source does not publish rates for this base currency.
    #[error("no rates available for base currency '{0}'")]
    UnknownBase(String),

    /// Network or decoding failure; the fetch is not retried.
    #[error("rate source unavailable: {0}")]
    Unavailable(anyhow::Error),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the rate table for `base`: one unit of `base` expressed in each
    /// quoted currency. The base itself is not included in the table.
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>, RateSourceError>;
}
