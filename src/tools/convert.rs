use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::{SAMPLE_SIZE, ToolResult};
use crate::core::{
    ConversionRequest, ConvertCurrencyRequest, CurrencyCode, RateProvider, ToolError,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub original_amount: f64,
    pub original_currency: CurrencyCode,
    pub converted_amount: f64,
    pub target_currency: CurrencyCode,
    pub exchange_rate: f64,
    pub timestamp: String,
    pub formatted_result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionEcho {
    pub original_amount: f64,
    pub original_currency: String,
    pub target_currency: String,
}

impl From<&ConvertCurrencyRequest> for ConversionEcho {
    fn from(request: &ConvertCurrencyRequest) -> Self {
        ConversionEcho {
            original_amount: request.amount,
            original_currency: request.from_currency.clone(),
            target_currency: request.to_currency.clone(),
        }
    }
}

impl From<&ConversionRequest> for ConversionEcho {
    fn from(request: &ConversionRequest) -> Self {
        ConversionEcho {
            original_amount: request.amount,
            original_currency: request.from.to_string(),
            target_currency: request.to.to_string(),
        }
    }
}

/// `amount * rate` rounded to two decimal places, ties to even.
///
/// Rounds the exact binary value of the product, so `7566.494999...` stays
/// `7566.49`. Products outside the decimal range have no fractional digits
/// and are returned unchanged.
pub fn convert_amount(amount: f64, rate: f64) -> f64 {
    let product = amount * rate;
    Decimal::from_f64_retain(product)
        .map(|exact| exact.round_dp(2).to_string())
        .and_then(|rounded| rounded.parse().ok())
        .unwrap_or(product)
}

/// Renders `"<amount> <from> = <converted> <to>"`.
///
/// The converted amount always shows a fractional part (`9000.0`), the
/// original amount is printed as given (`100`).
pub fn format_conversion(amount: f64, from: &str, converted: f64, to: &str) -> String {
    format!("{amount} {from} = {converted:?} {to}")
}

pub async fn convert_currency(
    provider: &dyn RateProvider,
    request: &ConvertCurrencyRequest,
) -> ToolResult<Conversion, ConversionEcho> {
    let conversion = match request.validate() {
        Ok(conversion) => conversion,
        Err(err) => return ToolResult::from_outcome(Err(err.into()), request.into()),
    };
    let outcome = convert(provider, &conversion).await;
    ToolResult::from_outcome(outcome, (&conversion).into())
}

pub async fn convert(
    provider: &dyn RateProvider,
    request: &ConversionRequest,
) -> Result<Conversion, ToolError> {
    let snapshot = provider.latest(&request.from).await?;

    let rate = snapshot
        .rate(&request.to)
        .ok_or_else(|| ToolError::UnknownTargetCurrency {
            code: request.to.to_string(),
            available: snapshot.sample_codes(SAMPLE_SIZE),
            timestamp: snapshot.last_update.clone(),
        })?;

    let converted_amount = convert_amount(request.amount, rate);
    debug!(
        amount = request.amount,
        from = %request.from,
        to = %request.to,
        rate,
        converted_amount,
        "Converted amount"
    );

    Ok(Conversion {
        original_amount: request.amount,
        original_currency: request.from.clone(),
        converted_amount,
        target_currency: request.to.clone(),
        exchange_rate: rate,
        timestamp: snapshot.last_update,
        formatted_result: format_conversion(
            request.amount,
            request.from.as_str(),
            converted_amount,
            request.to.as_str(),
        ),
    })
}
