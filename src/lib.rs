pub mod config;
pub mod engine;
pub mod error;
pub mod log;
pub mod providers;
pub mod rate_provider;
pub mod symbols;

use anyhow::Result;
use tracing::{debug, info};

use crate::engine::{ConversionReport, Converter};
use crate::error::ConvertError;
use crate::providers::frankfurter::FrankfurterProvider;
use crate::rate_provider::{RateProvider, RateSourceError};
use crate::symbols::SymbolIndex;

pub const DEFAULT_RATES_URL: &str = "https://api.frankfurter.dev/v1";

/// One conversion request as it arrives from the CLI: currencies may still be
/// symbols, and an empty output list means "convert to everything".
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub amount: f64,
    pub input_currency: String,
    pub output_currencies: Vec<String>,
}

/// Resolve the request, fetch live rates for its base and render the
/// conversion result as pretty-printed JSON.
pub async fn run(request: &ConvertRequest, config_path: Option<&str>) -> Result<String> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let index = SymbolIndex::load()?;
    let base = index.resolve_single(&request.input_currency)?;
    debug!("Resolved base currency: {base}");

    let base_url = config
        .providers
        .rates
        .as_ref()
        .map_or(DEFAULT_RATES_URL, |p| &p.base_url);
    let provider = FrankfurterProvider::new(base_url);
    let converter = init_converter(&provider, &base).await?;

    debug!(
        "Output currency specification: {:?}",
        request.output_currencies
    );
    let outputs = index.resolve_many(&request.output_currencies, converter.rates());
    debug!("Resolved output currency codes: {outputs:?}");

    let result = converter.convert(request.amount, &outputs)?;
    let report = ConversionReport::new(request.amount, converter.base(), result);
    Ok(report.to_json_pretty()?)
}

/// Build a converter from freshly fetched rates, translating rate source
/// failures into the request-level error taxonomy: a base the upstream does
/// not quote is an unknown code, everything else means the source is down.
pub async fn init_converter(
    provider: &dyn RateProvider,
    base: &str,
) -> Result<Converter, ConvertError> {
    match provider.fetch_rates(base).await {
        Ok(rates) => Ok(Converter::new(base, rates)),
        Err(RateSourceError::UnknownBase(code)) => Err(ConvertError::UnknownCode(vec![code])),
        Err(err @ RateSourceError::Unavailable(_)) => {
            Err(ConvertError::DataSourceUnavailable(err.to_string()))
        }
    }
}
