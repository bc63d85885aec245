use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::config::{API_KEY_ENV, ProviderConfig};
use crate::core::{CurrencyCode, FetchError, RateProvider, RateSnapshot};

/// Client for the `v6` API of exchangerate-api.com.
///
/// Every call goes to the network; nothing is cached between calls.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            timeout,
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(
            &config.base_url,
            config.api_key.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_utc: Option<String>,
    conversion_rates: Option<BTreeMap<String, f64>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn latest(&self, base: &CurrencyCode) -> Result<RateSnapshot, FetchError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            FetchError::ProviderError(format!("API key is not configured, set {API_KEY_ENV}"))
        })?;

        let url = format!("{}/{}/latest/{}", self.base_url, api_key, base);
        debug!("Requesting rates from {}/***/latest/{}", self.base_url, base);

        let client = reqwest::Client::builder()
            .user_agent("currex/0.1")
            .timeout(self.timeout)
            .build()?;
        let response = client.get(&url).send().await?;

        let status = response.status();
        debug!(%status, "Received exchange rate response");
        let text = response.text().await?;

        let data: LatestResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) if status.is_success() => {
                warn!(error = ?e, "Failed to parse exchange rate response");
                return Err(FetchError::ProviderError(format!(
                    "Failed to parse response for {base}: {e}"
                )));
            }
            Err(_) => {
                warn!(%status, "Exchange rate API returned an error status");
                return Err(FetchError::ProviderError(format!("HTTP error: {status}")));
            }
        };

        if data.result != "success" {
            let reason = data.error_type.unwrap_or_else(|| "Unknown error".to_string());
            warn!(%reason, "Exchange rate API reported a failure");
            return Err(FetchError::ProviderError(reason));
        }
        if !status.is_success() {
            return Err(FetchError::ProviderError(format!("HTTP error: {status}")));
        }

        let rates = data.conversion_rates.ok_or_else(|| {
            FetchError::ProviderError(format!("Missing conversion_rates for {base}"))
        })?;
        let last_update = data.time_last_update_utc.ok_or_else(|| {
            FetchError::ProviderError(format!("Missing time_last_update_utc for {base}"))
        })?;

        Ok(RateSnapshot {
            base: data.base_code.unwrap_or_else(|| base.to_string()),
            rates,
            last_update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";
    const MOCK_JSON: &str = r#"{
        "result": "success",
        "time_last_update_utc": "Fri, 27 Mar 2020 00:00:01 +0000",
        "base_code": "USD",
        "conversion_rates": {
            "USD": 1,
            "EUR": 0.9013,
            "RUB": 90.0
        }
    }"#;

    async fn create_mock_server(base: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/{API_KEY}/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(uri: &str) -> ExchangeRateApiProvider {
        ExchangeRateApiProvider::new(uri, Some(API_KEY), Duration::from_secs(5))
    }

    fn usd() -> CurrencyCode {
        CurrencyCode::parse("USD").unwrap()
    }

    #[tokio::test]
    async fn test_successful_fetch() {
        let mock_server = create_mock_server("USD", 200, MOCK_JSON).await;

        let snapshot = provider(&mock_server.uri()).latest(&usd()).await.unwrap();
        assert_eq!(snapshot.base, "USD");
        assert_eq!(snapshot.rates.len(), 3);
        assert_eq!(snapshot.rates["RUB"], 90.0);
        assert_eq!(snapshot.rates["USD"], 1.0);
        assert_eq!(snapshot.last_update, "Fri, 27 Mar 2020 00:00:01 +0000");
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = create_mock_server("USD", 200, MOCK_JSON).await;
        let uri = format!("{}/", mock_server.uri());

        assert!(provider(&uri).latest(&usd()).await.is_ok());
    }

    #[tokio::test]
    async fn test_every_call_hits_the_network() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/{API_KEY}/latest/USD")))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_JSON))
            .expect(2)
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri());
        provider.latest(&usd()).await.unwrap();
        provider.latest(&usd()).await.unwrap();
    }

    #[tokio::test]
    async fn test_provider_reports_error() {
        let body = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let mock_server = create_mock_server("XYZ", 404, body).await;

        let base = CurrencyCode::parse("XYZ").unwrap();
        let err = provider(&mock_server.uri()).latest(&base).await.unwrap_err();
        assert!(matches!(err, FetchError::ProviderError(ref r) if r == "unsupported-code"));
        assert_eq!(err.to_string(), "API error: unsupported-code");
    }

    #[tokio::test]
    async fn test_error_without_error_type() {
        let mock_server = create_mock_server("USD", 200, r#"{"result": "error"}"#).await;

        let err = provider(&mock_server.uri()).latest(&usd()).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: Unknown error");
    }

    #[tokio::test]
    async fn test_http_error_without_json_body() {
        let mock_server = create_mock_server("USD", 500, "oops").await;

        let err = provider(&mock_server.uri()).latest(&usd()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error: HTTP error: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server("USD", 200, r#"{"rates": {}}"#).await;

        let err = provider(&mock_server.uri()).latest(&usd()).await.unwrap_err();
        assert!(matches!(err, FetchError::ProviderError(_)));
        assert!(
            err.to_string()
                .contains("Failed to parse response for USD")
        );
    }

    #[tokio::test]
    async fn test_missing_rates_in_success_response() {
        let body = r#"{"result": "success", "time_last_update_utc": "now"}"#;
        let mock_server = create_mock_server("USD", 200, body).await;

        let err = provider(&mock_server.uri()).latest(&usd()).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: Missing conversion_rates for USD");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_provider_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_JSON))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider =
            ExchangeRateApiProvider::new(&mock_server.uri(), None, Duration::from_secs(5));
        let err = provider.latest(&usd()).await.unwrap_err();
        assert!(matches!(err, FetchError::ProviderError(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        // Nothing listens on the discard port
        let provider = provider("http://127.0.0.1:9");

        let err = provider.latest(&usd()).await.unwrap_err();
        assert!(matches!(err, FetchError::ConnectionFailure(_)));
        assert!(!err.to_string().contains(API_KEY));
    }

    #[tokio::test]
    async fn test_timeout_is_connection_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(MOCK_JSON)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let provider = ExchangeRateApiProvider::new(
            &mock_server.uri(),
            Some(API_KEY),
            Duration::from_millis(50),
        );
        let err = provider.latest(&usd()).await.unwrap_err();
        assert!(matches!(err, FetchError::ConnectionFailure(_)));
    }
}
