//! Currency codes and the validated request types accepted by the tools

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::error::ValidationError;

/// A three character currency code, always uppercase.
///
/// Codes are not checked against ISO 4217; the provider decides which codes exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.chars().count() != 3 {
            return Err(ValidationError::InvalidCurrencyCode(raw.to_string()));
        }
        Ok(CurrencyCode(raw.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::parse(s)
    }
}

/// Raw input of the exchange rate lookup, as sent by the caller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeRateRequest {
    pub base_currency: String,
    pub target_currency: String,
}

/// Raw input of the conversion, as sent by the caller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertCurrencyRequest {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateQuery {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ExchangeRateRequest {
    pub fn new(base_currency: impl Into<String>, target_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
            target_currency: target_currency.into(),
        }
    }

    pub fn validate(&self) -> Result<RateQuery, ValidationError> {
        Ok(RateQuery {
            base: CurrencyCode::parse(&self.base_currency)?,
            target: CurrencyCode::parse(&self.target_currency)?,
        })
    }
}

impl ConvertCurrencyRequest {
    pub fn new(
        amount: f64,
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
        }
    }

    pub fn validate(&self) -> Result<ConversionRequest, ValidationError> {
        // Written as a negated comparison so NaN is rejected too
        if !(self.amount > 0.0) {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        Ok(ConversionRequest {
            amount: self.amount,
            from: CurrencyCode::parse(&self.from_currency)?,
            to: CurrencyCode::parse(&self.to_currency)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_currency_codes() {
        let query = ExchangeRateRequest::new("USD", "RUB").validate().unwrap();
        assert_eq!(query.base.as_str(), "USD");
        assert_eq!(query.target.as_str(), "RUB");
    }

    #[test]
    fn test_currency_code_uppercase() {
        let query = ExchangeRateRequest::new("usd", "rUb").validate().unwrap();
        assert_eq!(query.base.as_str(), "USD");
        assert_eq!(query.target.as_str(), "RUB");
    }

    #[test]
    fn test_invalid_currency_code_length() {
        for raw in ["", "U", "US", "USDT", "  USD"] {
            assert_eq!(
                CurrencyCode::parse(raw),
                Err(ValidationError::InvalidCurrencyCode(raw.to_string())),
                "code {raw:?} should be rejected"
            );
        }
        assert!(ExchangeRateRequest::new("US", "RUB").validate().is_err());
        assert!(ExchangeRateRequest::new("USD", "RUBL").validate().is_err());
    }

    #[test]
    fn test_non_alphabetic_codes_are_accepted() {
        assert_eq!(CurrencyCode::parse("1a$").unwrap().as_str(), "1A$");
        assert_eq!(CurrencyCode::parse(" us").unwrap().as_str(), " US");
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(CurrencyCode::parse("€ab").unwrap().as_str(), "€AB");
    }

    #[test]
    fn test_from_str() {
        let code: CurrencyCode = "eur".parse().unwrap();
        assert_eq!(code.to_string(), "EUR");
        assert!("euro".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_valid_conversion_request() {
        let req = ConvertCurrencyRequest::new(100.0, "usd", "RUB")
            .validate()
            .unwrap();
        assert_eq!(req.amount, 100.0);
        assert_eq!(req.from.as_str(), "USD");
        assert_eq!(req.to.as_str(), "RUB");

        let tiny = ConvertCurrencyRequest::new(0.0001, "USD", "RUB").validate();
        assert!(tiny.is_ok());
    }

    #[test]
    fn test_zero_amount() {
        let result = ConvertCurrencyRequest::new(0.0, "USD", "RUB").validate();
        assert_eq!(result, Err(ValidationError::NonPositiveAmount(0.0)));
    }

    #[test]
    fn test_negative_amount() {
        let result = ConvertCurrencyRequest::new(-100.0, "USD", "RUB").validate();
        assert_eq!(result, Err(ValidationError::NonPositiveAmount(-100.0)));
    }

    #[test]
    fn test_nan_amount() {
        assert!(
            ConvertCurrencyRequest::new(f64::NAN, "USD", "RUB")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_amount_checked_before_codes() {
        let result = ConvertCurrencyRequest::new(-1.0, "US", "RUB").validate();
        assert!(matches!(result, Err(ValidationError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_request_deserialization() {
        let req: ConvertCurrencyRequest = serde_json::from_str(
            r#"{"amount": 100, "from_currency": "usd", "to_currency": "rub"}"#,
        )
        .unwrap();
        assert_eq!(req.amount, 100.0);
        assert_eq!(req.from_currency, "usd");
    }
}
