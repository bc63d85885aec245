//! Tool descriptions for agent-side tool selection, and dispatch of a
//! serialized tool call to the matching operation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    Conversion, ConversionEcho, CurrencyListing, ExchangeRate, ListingEcho, RateEcho, ToolResult,
    convert, exchange_rate, list,
};
use crate::core::{
    ConvertCurrencyRequest, ExchangeRateRequest, FailureKind, RateProvider, ValidationError,
};

pub const GET_EXCHANGE_RATE: &str = "get_exchange_rate";
pub const CONVERT_CURRENCY: &str = "convert_currency";
pub const LIST_AVAILABLE_CURRENCIES: &str = "list_available_currencies";

#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: GET_EXCHANGE_RATE,
            description: "Get the current exchange rate between two currencies, \
                          including the inverse rate.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "base_currency": {
                        "type": "string",
                        "minLength": 3,
                        "maxLength": 3,
                        "description": "Base currency code (e.g. USD)"
                    },
                    "target_currency": {
                        "type": "string",
                        "minLength": 3,
                        "maxLength": 3,
                        "description": "Target currency code (e.g. RUB)"
                    }
                },
                "required": ["base_currency", "target_currency"]
            }),
        },
        ToolSpec {
            name: CONVERT_CURRENCY,
            description: "Convert an amount from one currency to another using the \
                          latest rate. Returns the converted amount and the rate used.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "amount": {
                        "type": "number",
                        "exclusiveMinimum": 0,
                        "description": "Amount to convert"
                    },
                    "from_currency": {
                        "type": "string",
                        "minLength": 3,
                        "maxLength": 3,
                        "description": "Source currency code (e.g. USD)"
                    },
                    "to_currency": {
                        "type": "string",
                        "minLength": 3,
                        "maxLength": 3,
                        "description": "Target currency code (e.g. RUB)"
                    }
                },
                "required": ["amount", "from_currency", "to_currency"]
            }),
        },
        ToolSpec {
            name: LIST_AVAILABLE_CURRENCIES,
            description: "List available currency codes with names and their rate \
                          against USD.",
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// One tool invocation, e.g. `{"tool": "convert_currency", "arguments": {...}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(tool: &str, arguments: Value) -> Self {
        Self {
            tool: tool.to_string(),
            arguments,
        }
    }
}

/// A call that never reached an operation.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedCall {
    pub success: bool,
    pub error: String,
    pub kind: FailureKind,
    pub tool: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    ExchangeRate(ToolResult<ExchangeRate, RateEcho>),
    Conversion(ToolResult<Conversion, ConversionEcho>),
    Listing(ToolResult<CurrencyListing, ListingEcho>),
    Rejected(RejectedCall),
}

impl ToolOutput {
    pub fn is_success(&self) -> bool {
        match self {
            ToolOutput::ExchangeRate(r) => r.is_success(),
            ToolOutput::Conversion(r) => r.is_success(),
            ToolOutput::Listing(r) => r.is_success(),
            ToolOutput::Rejected(_) => false,
        }
    }

    fn rejected(tool: &str, err: ValidationError) -> Self {
        tracing::warn!(%tool, error = %err, "Rejected tool call");
        ToolOutput::Rejected(RejectedCall {
            success: false,
            error: err.to_string(),
            kind: FailureKind::ValidationError,
            tool: tool.to_string(),
        })
    }
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(call: &ToolCall) -> Result<T, ValidationError> {
    serde_json::from_value(call.arguments.clone())
        .map_err(|e| ValidationError::MalformedCall(format!("{}: {e}", call.tool)))
}

pub async fn dispatch(provider: &dyn RateProvider, call: &ToolCall) -> ToolOutput {
    tracing::debug!(tool = %call.tool, "Dispatching tool call");
    match call.tool.as_str() {
        GET_EXCHANGE_RATE => match parse_arguments::<ExchangeRateRequest>(call) {
            Ok(request) => ToolOutput::ExchangeRate(
                exchange_rate::get_exchange_rate(provider, &request).await,
            ),
            Err(err) => ToolOutput::rejected(&call.tool, err),
        },
        CONVERT_CURRENCY => match parse_arguments::<ConvertCurrencyRequest>(call) {
            Ok(request) => {
                ToolOutput::Conversion(convert::convert_currency(provider, &request).await)
            }
            Err(err) => ToolOutput::rejected(&call.tool, err),
        },
        LIST_AVAILABLE_CURRENCIES => {
            ToolOutput::Listing(list::list_available_currencies(provider).await)
        }
        other => ToolOutput::rejected(
            other,
            ValidationError::MalformedCall(format!("unknown tool '{other}'")),
        ),
    }
}
