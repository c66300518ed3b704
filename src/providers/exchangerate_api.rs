use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::conversion::{ConversionProvider, ConversionResult};
use crate::core::error::{FetchError, FetchResult};
use crate::core::CurrencyCode;

/// Pair conversion through the ExchangeRate-API `v6` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(from: CurrencyCode, to: CurrencyCode, amount: Decimal) -> String {
        format!("pair/{}/{}/{}", from, to, amount.normalize())
    }
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    result: String,
    conversion_result: Option<f64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

#[async_trait]
impl ConversionProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateConvert",
        skip_all,
        fields(from = %from, to = %to, amount = %amount)
    )]
    async fn convert(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: Decimal,
    ) -> FetchResult<ConversionResult> {
        let endpoint = Self::endpoint(from, to, amount);
        // The key is part of the path, keep it out of the logs
        debug!("Requesting conversion from {}/v6/***/{}", self.base_url, endpoint);
        let url = format!("{}/v6/{}/{}", self.base_url, self.api_key, endpoint);

        let client = reqwest::Client::builder().user_agent("xconv/1.0").build()?;
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Http(response.status()));
        }

        let text = response.text().await?;
        let data: PairResponse = serde_json::from_str(&text)?;

        if data.result != "success" {
            return Err(FetchError::Rejected(
                data.error_type.unwrap_or(data.result),
            ));
        }

        let value = data
            .conversion_result
            .ok_or_else(|| FetchError::Rejected("missing conversion_result".to_string()))?;
        let amount = Decimal::try_from(value)
            .map_err(|e| FetchError::Rejected(format!("unrepresentable result {value}: {e}")))?;

        Ok(ConversionResult {
            currency: to,
            amount,
        })
    }
}
