//! Error taxonomy for the conversion core.

use thiserror::Error;

/// Fatal errors surfaced by a conversion request. Everything here aborts the
/// request; the only deliberate non-error is the silent drop of resolved
/// codes without a rate during output symbol expansion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input currency symbol maps to more than one ISO code.
    #[error("Ambiguous input currency symbol: '{0}'")]
    AmbiguousSymbol(String),

    /// One or more requested codes are absent from the rate table. The list
    /// is sorted and deduplicated before it gets here.
    #[error("Unknown currency codes: {}", .0.join(", "))]
    UnknownCode(Vec<String>),

    /// The output request is exactly the base currency alone.
    #[error("input currency '{0}' is the same as output currency '{0}'")]
    InputEqualsOutput(String),

    /// An external collaborator (rate source or symbol dataset) failed.
    #[error("Currency data source unavailable: {0}")]
    DataSourceUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_message_joins_codes() {
        let err = ConvertError::UnknownCode(vec!["CDS".to_string(), "INV".to_string()]);
        assert_eq!(err.to_string(), "Unknown currency codes: CDS, INV");
    }

    #[test]
    fn test_ambiguous_symbol_message_carries_symbol() {
        let err = ConvertError::AmbiguousSymbol("$".to_string());
        assert_eq!(err.to_string(), "Ambiguous input currency symbol: '$'");
    }
}
