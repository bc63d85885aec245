//! Error taxonomy shared by the validators, the rate fetcher and the tools.

use serde::Serialize;

/// Caller-fixable input problems. Raised before any network call is made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Currency code must be exactly 3 characters, got '{0}'")]
    InvalidCurrencyCode(String),

    #[error("Amount must be greater than 0, got {0}")]
    NonPositiveAmount(f64),

    #[error("Invalid tool call: {0}")]
    MalformedCall(String),
}

/// Failures while retrieving a rate snapshot from the provider.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to connect to exchange rate API: {0}")]
    ConnectionFailure(String),

    #[error("API error: {0}")]
    ProviderError(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL, it embeds the API key
        FetchError::ConnectionFailure(err.without_url().to_string())
    }
}

/// Everything a tool operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Currency {code} not found")]
    UnknownTargetCurrency {
        code: String,
        available: Vec<String>,
        timestamp: String,
    },
}

/// Stable machine-readable label for a failure, serialized into failure payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ValidationError,
    ConnectionFailure,
    ProviderError,
    UnknownTargetCurrency,
}

impl ToolError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ToolError::Validation(_) => FailureKind::ValidationError,
            ToolError::Fetch(FetchError::ConnectionFailure(_)) => FailureKind::ConnectionFailure,
            ToolError::Fetch(FetchError::ProviderError(_)) => FailureKind::ProviderError,
            ToolError::UnknownTargetCurrency { .. } => FailureKind::UnknownTargetCurrency,
        }
    }
}
