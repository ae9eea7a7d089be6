//! Conversion of a base-currency amount into quoted currencies.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::error::ConvertError;

/// Converts amounts in `base` currency using a fixed rate table. Constructed
/// once per request with freshly fetched rates and discarded after use. The
/// base is stored verbatim; an invalid base only surfaces if the rate source
/// rejects it or it shows up as an output code.
pub struct Converter {
    base: String,
    rates: HashMap<String, f64>,
}

impl Converter {
    pub fn new(base: &str, rates: HashMap<String, f64>) -> Self {
        debug!("Initializing converter for base '{base}' with {} rates", rates.len());
        Converter {
            base: base.to_string(),
            rates,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rates(&self) -> &HashMap<String, f64> {
        &self.rates
    }

    /// Convert `amount` into the requested output currencies. An empty
    /// request fans out to every code in the rate table. Requesting exactly
    /// the base alone is a degenerate self-conversion and fails; any unknown
    /// requested code fails the whole request, no partial results.
    pub fn convert(
        &self,
        amount: f64,
        output_codes: &[String],
    ) -> Result<BTreeMap<String, f64>, ConvertError> {
        if !output_codes.is_empty() {
            if output_codes.len() == 1 && output_codes[0] == self.base {
                return Err(ConvertError::InputEqualsOutput(self.base.clone()));
            }

            let mut missing: Vec<String> = output_codes
                .iter()
                .filter(|code| !self.rates.contains_key(*code))
                .cloned()
                .collect();
            if !missing.is_empty() {
                missing.sort();
                missing.dedup();
                return Err(ConvertError::UnknownCode(missing));
            }
        }

        Ok(self
            .rates
            .iter()
            .filter(|(code, _)| output_codes.is_empty() || output_codes.contains(*code))
            .map(|(code, rate)| (code.clone(), amount * rate))
            .collect())
    }
}

/// The structured result of one conversion request, rendered as JSON with
/// sorted keys and 2-space indentation so output is snapshot-stable.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ConversionReport {
    pub input: ConversionInput,
    pub output: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ConversionInput {
    pub amount: f64,
    pub currency: String,
}

impl ConversionReport {
    pub fn new(amount: f64, currency: &str, output: BTreeMap<String, f64>) -> Self {
        ConversionReport {
            input: ConversionInput {
                amount,
                currency: currency.to_string(),
            },
            output,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn sample_rates() -> HashMap<String, f64> {
        HashMap::from([
            ("ABC".to_string(), 10.0),
            ("DEF".to_string(), 5.0),
            ("XYZ".to_string(), 2.213),
        ])
    }

    #[test]
    fn test_convert_zero_amount_fans_out_to_zeros() {
        let converter = Converter::new("BSE", sample_rates());
        let result = converter.convert(0.0, &[]).unwrap();

        assert_eq!(result.len(), 3);
        for (_, amount) in result {
            assert!(amount.abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_convert_empty_request_covers_every_rate() {
        let converter = Converter::new("BSE", sample_rates());
        let result = converter.convert(10.0, &[]).unwrap();

        assert_eq!(result.len(), 3);
        assert!((result["ABC"] - 100.0).abs() < TOLERANCE);
        assert!((result["DEF"] - 50.0).abs() < TOLERANCE);
        assert!((result["XYZ"] - 22.13).abs() < TOLERANCE);
        // The rate source never quotes the base against itself.
        assert!(!result.contains_key("BSE"));
    }

    #[test]
    fn test_convert_single_code_multiplies_rate() {
        let converter = Converter::new("BSE", sample_rates());
        let result = converter.convert(3.5, &["XYZ".to_string()]).unwrap();

        assert_eq!(result.len(), 1);
        assert!((result["XYZ"] - 3.5 * 2.213).abs() < TOLERANCE);
    }

    #[test]
    fn test_convert_to_base_alone_fails() {
        let converter = Converter::new("BSE", sample_rates());
        let err = converter.convert(1.0, &["BSE".to_string()]).unwrap_err();
        assert!(matches!(err, ConvertError::InputEqualsOutput(ref b) if b == "BSE"));
    }

    #[test]
    fn test_convert_unknown_codes_fail_sorted() {
        let converter = Converter::new("BSE", sample_rates());
        let err = converter
            .convert(10.0, &["INV".to_string(), "CDS".to_string()])
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency codes: CDS, INV");
    }

    #[test]
    fn test_convert_no_partial_result_with_mixed_codes() {
        let converter = Converter::new("BSE", sample_rates());
        let err = converter
            .convert(10.0, &["ABC".to_string(), "INV".to_string()])
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency codes: INV");
    }

    #[test]
    fn test_report_json_round_trip() {
        let converter = Converter::new("AOA", HashMap::from([("USD".to_string(), 0.0011)]));
        let result = converter.convert(100.0, &[]).unwrap();
        let report = ConversionReport::new(100.0, "AOA", result);

        let rendered = report.to_json_pretty().unwrap();
        let parsed: ConversionReport = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_report_renders_sorted_keys_two_space_indent() {
        let output = BTreeMap::from([("USD".to_string(), 1.0), ("AUD".to_string(), 1.0)]);
        let report = ConversionReport::new(1.0, "AOA", output);

        let rendered = report.to_json_pretty().unwrap();
        let expected = r#"{
  "input": {
    "amount": 1.0,
    "currency": "AOA"
  },
  "output": {
    "AUD": 1.0,
    "USD": 1.0
  }
}"#;
        assert_eq!(rendered, expected);
    }
}
