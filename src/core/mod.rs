//! Core currency abstractions, validation and configuration

pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod names;
pub mod rates;

// Re-export main types for cleaner imports
pub use currency::{
    ConversionRequest, ConvertCurrencyRequest, CurrencyCode, ExchangeRateRequest, RateQuery,
};
pub use error::{FailureKind, FetchError, ToolError, ValidationError};
pub use rates::{RateProvider, RateSnapshot};
