use serde::Serialize;
use tracing::debug;

use super::{SAMPLE_SIZE, ToolResult};
use crate::core::{CurrencyCode, ExchangeRateRequest, RateProvider, RateQuery, ToolError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRate {
    pub base_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    pub exchange_rate: f64,
    pub timestamp: String,
    pub inverse_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateEcho {
    pub base_currency: String,
    pub target_currency: String,
}

impl From<&ExchangeRateRequest> for RateEcho {
    fn from(request: &ExchangeRateRequest) -> Self {
        RateEcho {
            base_currency: request.base_currency.clone(),
            target_currency: request.target_currency.clone(),
        }
    }
}

impl From<&RateQuery> for RateEcho {
    fn from(query: &RateQuery) -> Self {
        RateEcho {
            base_currency: query.base.to_string(),
            target_currency: query.target.to_string(),
        }
    }
}

/// Reciprocal of `rate`. A zero rate yields 0 instead of infinity.
pub fn inverse_rate(rate: f64) -> f64 {
    if rate == 0.0 { 0.0 } else { 1.0 / rate }
}

pub async fn get_exchange_rate(
    provider: &dyn RateProvider,
    request: &ExchangeRateRequest,
) -> ToolResult<ExchangeRate, RateEcho> {
    let query = match request.validate() {
        Ok(query) => query,
        Err(err) => return ToolResult::from_outcome(Err(err.into()), request.into()),
    };
    let outcome = lookup_rate(provider, &query).await;
    ToolResult::from_outcome(outcome, (&query).into())
}

pub async fn lookup_rate(
    provider: &dyn RateProvider,
    query: &RateQuery,
) -> Result<ExchangeRate, ToolError> {
    let snapshot = provider.latest(&query.base).await?;

    let rate = snapshot
        .rate(&query.target)
        .ok_or_else(|| ToolError::UnknownTargetCurrency {
            code: query.target.to_string(),
            available: snapshot.sample_codes(SAMPLE_SIZE),
            timestamp: snapshot.last_update.clone(),
        })?;
    debug!(base = %query.base, target = %query.target, rate, "Resolved exchange rate");

    Ok(ExchangeRate {
        base_currency: query.base.clone(),
        target_currency: query.target.clone(),
        exchange_rate: rate,
        inverse_rate: inverse_rate(rate),
        timestamp: snapshot.last_update,
    })
}
