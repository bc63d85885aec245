//! Rate snapshot and provider abstraction

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::currency::CurrencyCode;
use super::error::FetchError;

/// Rates for one base currency as reported by the provider at a point in time.
///
/// Rates are keyed by code, so iteration is always in ascending code order.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    pub last_update: String,
}

impl RateSnapshot {
    pub fn rate(&self, target: &CurrencyCode) -> Option<f64> {
        self.rates.get(target.as_str()).copied()
    }

    /// Up to `limit` known codes, used as a hint when a lookup misses.
    pub fn sample_codes(&self, limit: usize) -> Vec<String> {
        self.rates.keys().take(limit).cloned().collect()
    }
}

/// Parses provider timestamps such as `Fri, 27 Mar 2020 00:00:01 +0000`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches a fresh snapshot for `base`. Implementations must not cache.
    async fn latest(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError>;
}
