//! The three currency tools and their response contract.
//!
//! Every tool returns a [`ToolResult`]: either a typed success payload or a
//! [`ToolFailure`] carrying the error, its [`FailureKind`] and whatever
//! diagnostics are available. Tools never return `Err` or panic; the caller
//! always gets a well-formed response.
//!
//! On the wire both variants serialize to a flat JSON object with a boolean
//! `success` field:
//!
//! ```json
//! {"success": true, "base_currency": "USD", "target_currency": "RUB", ...}
//! {"success": false, "error": "Currency XYZ not found", "kind": "unknown_target_currency", ...}
//! ```

pub mod catalog;
pub mod convert;
pub mod exchange_rate;
pub mod list;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::core::{
    ConvertCurrencyRequest, ExchangeRateRequest, FailureKind, RateProvider, ToolError,
};

pub use catalog::{ToolCall, ToolOutput, ToolSpec};
pub use convert::{Conversion, ConversionEcho};
pub use exchange_rate::{ExchangeRate, RateEcho};
pub use list::{CurrencyEntry, CurrencyListing, ListingEcho};

/// Maximum number of codes suggested when a target currency is unknown.
pub const SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub enum ToolResult<T, E> {
    Success(T),
    Failure(ToolFailure<E>),
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolFailure<E> {
    pub error: String,
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_currencies_sample: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Input fields echoed back for diagnostics.
    #[serde(flatten)]
    pub echo: E,
}

impl<E> ToolFailure<E> {
    pub fn new(err: ToolError, echo: E) -> Self {
        let kind = err.kind();
        let error = err.to_string();
        let (available_currencies_sample, timestamp) = match err {
            ToolError::UnknownTargetCurrency {
                available,
                timestamp,
                ..
            } => (Some(available), Some(timestamp)),
            _ => (None, None),
        };
        ToolFailure {
            error,
            kind,
            available_currencies_sample,
            timestamp,
            echo,
        }
    }
}

impl<T, E> ToolResult<T, E> {
    /// Normalizes the outcome of a tool body into a response.
    pub fn from_outcome(outcome: Result<T, ToolError>, echo: E) -> Self {
        match outcome {
            Ok(payload) => ToolResult::Success(payload),
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "Tool call failed");
                ToolResult::Failure(ToolFailure::new(err, echo))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            ToolResult::Success(payload) => Some(payload),
            ToolResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ToolFailure<E>> {
        match self {
            ToolResult::Success(_) => None,
            ToolResult::Failure(failure) => Some(failure),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, P> {
    success: bool,
    #[serde(flatten)]
    payload: &'a P,
}

impl<T: Serialize, E: Serialize> Serialize for ToolResult<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ToolResult::Success(payload) => Envelope {
                success: true,
                payload,
            }
            .serialize(serializer),
            ToolResult::Failure(failure) => Envelope {
                success: false,
                payload: failure,
            }
            .serialize(serializer),
        }
    }
}

/// Entry point used by callers: owns a rate provider and exposes the three tools.
pub struct CurrencyTools<P> {
    provider: P,
}

impl<P: RateProvider> CurrencyTools<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn get_exchange_rate(
        &self,
        request: &ExchangeRateRequest,
    ) -> ToolResult<ExchangeRate, RateEcho> {
        exchange_rate::get_exchange_rate(&self.provider, request).await
    }

    pub async fn convert_currency(
        &self,
        request: &ConvertCurrencyRequest,
    ) -> ToolResult<Conversion, ConversionEcho> {
        convert::convert_currency(&self.provider, request).await
    }

    pub async fn list_available_currencies(&self) -> ToolResult<CurrencyListing, ListingEcho> {
        list::list_available_currencies(&self.provider).await
    }

    pub async fn call(&self, call: &ToolCall) -> ToolOutput {
        catalog::dispatch(&self.provider, call).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::{CurrencyCode, FetchError, RateProvider, RateSnapshot};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const TIMESTAMP: &str = "Fri, 27 Mar 2020 00:00:01 +0000";

    pub enum Behavior {
        Rates(Vec<(&'static str, f64)>),
        ConnectionFailure,
        ProviderError(&'static str),
    }

    /// In-memory provider that records how often it was asked for rates.
    pub struct MockProvider {
        behavior: Behavior,
        pub call_count: AtomicUsize,
    }

    impl MockProvider {
        pub fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn with_rates(rates: &[(&'static str, f64)]) -> Self {
            Self::new(Behavior::Rates(rates.to_vec()))
        }

        pub fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn latest(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Rates(rates) => Ok(RateSnapshot {
                    base: base.to_string(),
                    rates: rates.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
                    last_update: TIMESTAMP.to_string(),
                }),
                Behavior::ConnectionFailure => {
                    Err(FetchError::ConnectionFailure("connection refused".into()))
                }
                Behavior::ProviderError(reason) => {
                    Err(FetchError::ProviderError(reason.to_string()))
                }
            }
        }
    }
}
