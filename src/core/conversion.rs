//! Currency conversion abstractions

use super::currency::CurrencyCode;
use super::error::{FetchError, FetchResult};
use super::format::format_currency;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};

/// A single conversion as entered by the user. The amount stays raw text
/// until it is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: String,
}

impl ConversionRequest {
    pub fn new(from: CurrencyCode, to: CurrencyCode, amount: impl Into<String>) -> Self {
        ConversionRequest {
            from,
            to,
            amount: amount.into(),
        }
    }

    /// The numeric amount, if the text is present and parses as a number.
    pub fn amount(&self) -> FetchResult<Decimal> {
        let text = self.amount.trim();
        if text.is_empty() {
            return Err(FetchError::Validation(self.amount.clone()));
        }
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| FetchError::Validation(self.amount.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub currency: CurrencyCode,
    pub amount: Decimal,
}

/// Text written into the result field; `Blank` clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedAmount {
    Formatted(String),
    Blank,
}

impl FormattedAmount {
    pub fn as_text(&self) -> &str {
        match self {
            FormattedAmount::Formatted(text) => text,
            FormattedAmount::Blank => "",
        }
    }
}

#[async_trait]
pub trait ConversionProvider: Send + Sync {
    async fn convert(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: Decimal,
    ) -> FetchResult<ConversionResult>;
}

/// Validates requests, calls the conversion provider and turns the outcome
/// into display text.
#[derive(Clone)]
pub struct Converter {
    provider: Arc<dyn ConversionProvider>,
}

impl Converter {
    pub fn new(provider: Arc<dyn ConversionProvider>) -> Self {
        Converter { provider }
    }

    pub async fn convert(&self, request: &ConversionRequest) -> FormattedAmount {
        let amount = match request.amount() {
            Ok(amount) => amount,
            Err(e) => {
                debug!(error = %e, "Skipping conversion");
                return FormattedAmount::Blank;
            }
        };

        match self.provider.convert(request.from, request.to, amount).await {
            Ok(result) => FormattedAmount::Formatted(format_currency(result.amount, result.currency)),
            Err(e) => {
                error!(
                    error = %e,
                    from = %request.from,
                    to = %request.to,
                    "Conversion failed"
                );
                FormattedAmount::Blank
            }
        }
    }
}
