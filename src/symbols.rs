//! Resolution of human-friendly currency symbols into 3-letter ISO codes.
//!
//! Symbols are not unique: "$" alone covers more than a dozen dollar and peso
//! currencies. The index maps each symbol to every code that uses it and lets
//! the caller decide how much ambiguity is acceptable. Anything that is not a
//! known symbol passes through unchanged and is validated downstream by the
//! rate table.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::ConvertError;

/// One entry of the reference currency dataset. Field names follow the
/// upstream dataset verbatim.
#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyRecord {
    /// 3-letter ISO 4217 code.
    pub cc: String,
    /// Human-facing currency glyph, e.g. "$" or "Kč".
    pub symbol: String,
}

/// Outcome of a symbol lookup. Resolution is total: unknown tokens are not an
/// error, they are treated as already-valid codes.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The token is a known symbol; at least one code uses it.
    Codes(&'a [String]),
    /// The token is not in the index; use it as-is.
    PassThrough,
}

/// Immutable mapping of currency symbols to the ISO codes using them. Built
/// once at startup from the embedded reference dataset.
pub struct SymbolIndex {
    index: HashMap<String, Vec<String>>,
}

static CURRENCY_DATA: &str = include_str!("data/currencies.json");

impl SymbolIndex {
    /// Group codes under their symbol, preserving first-seen order of codes
    /// per symbol. Duplicate codes in the dataset are appended as-is.
    pub fn from_records(records: &[CurrencyRecord]) -> Self {
        let mut index: HashMap<String, Vec<String>> = HashMap::new();
        for record in records {
            index
                .entry(record.symbol.clone())
                .or_default()
                .push(record.cc.clone());
        }
        debug!("Symbol index built with {} symbols", index.len());
        SymbolIndex { index }
    }

    /// Parse the embedded dataset and build the index. A corrupt dataset is
    /// fatal to the whole process.
    pub fn load() -> Result<Self, ConvertError> {
        let records: Vec<CurrencyRecord> = serde_json::from_str(CURRENCY_DATA).map_err(|e| {
            ConvertError::DataSourceUnavailable(format!("currency dataset: {e}"))
        })?;
        Ok(Self::from_records(&records))
    }

    pub fn lookup(&self, token: &str) -> Resolution<'_> {
        match self.index.get(token) {
            Some(codes) => Resolution::Codes(codes),
            None => Resolution::PassThrough,
        }
    }

    /// Resolve the input (base) currency token. A symbol with exactly one
    /// code resolves to that code; more than one is an error since the base
    /// must be unambiguous. Unknown tokens pass through unchanged and the
    /// rate source rejects them later if they are not real codes.
    pub fn resolve_single(&self, input: &str) -> Result<String, ConvertError> {
        match self.lookup(input) {
            Resolution::Codes(codes) if codes.len() > 1 => {
                Err(ConvertError::AmbiguousSymbol(input.to_string()))
            }
            Resolution::Codes(codes) => Ok(codes[0].clone()),
            Resolution::PassThrough => Ok(input.to_string()),
        }
    }

    /// Resolve the output currency tokens against the known rate table. Each
    /// symbol expands to all of its codes that also have a rate; codes
    /// without a rate are dropped so the resolver never hands the converter a
    /// code it cannot price. A symbol surviving with multiple codes is not an
    /// error, only a warning; results are produced for all of them.
    pub fn resolve_many(&self, inputs: &[String], rates: &HashMap<String, f64>) -> Vec<String> {
        let mut resolved = Vec::new();

        for input in inputs {
            match self.lookup(input) {
                Resolution::Codes(codes) => {
                    let candidates: Vec<String> = codes
                        .iter()
                        .filter(|code| rates.contains_key(*code))
                        .cloned()
                        .collect();

                    debug!("Resolved codes for currency {input}: {candidates:?}");

                    if candidates.len() > 1 {
                        warn!(
                            symbol = %input,
                            codes = ?candidates,
                            "Symbol resolves to multiple currency codes; results \
                             will be printed for all of them. Specify a 3-letter \
                             code to disambiguate"
                        );
                    }

                    resolved.extend(candidates);
                }
                Resolution::PassThrough => resolved.push(input.clone()),
            }
        }

        resolved
    }
}
