use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument, warn};

use crate::core::error::{FetchError, FetchResult};
use crate::core::rates::{DateWindow, RateHistoryProvider, RateOutcome, RatePoint, RateSeries};
use crate::core::CurrencyCode;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Daily reference rates from the Frankfurter API.
pub struct FrankfurterProvider {
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, base: CurrencyCode, target: CurrencyCode, window: DateWindow) -> String {
        format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url,
            window.start.format(DATE_FORMAT),
            window.end.format(DATE_FORMAT),
            base,
            target
        )
    }

    async fn request_series(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        window: DateWindow,
    ) -> FetchResult<RateSeries> {
        let url = self.url(base, target, window);
        debug!("Requesting rate history from {}", url);

        let client = reqwest::Client::builder().user_agent("xconv/1.0").build()?;
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Http(response.status()));
        }

        let text = response.text().await?;
        let data: FrankfurterResponse = serde_json::from_str(&text)?;

        let no_data = || FetchError::NoData {
            base: base.to_string(),
            target: target.to_string(),
        };

        let rates = data.rates.filter(|r| !r.is_empty()).ok_or_else(no_data)?;
        let points = extract_points(&rates, target);
        if points.is_empty() {
            return Err(no_data());
        }

        Ok(RateSeries {
            base,
            target,
            points,
        })
    }
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    #[serde(default)]
    rates: Option<BTreeMap<String, HashMap<String, f64>>>,
}

fn extract_points(
    rates: &BTreeMap<String, HashMap<String, f64>>,
    target: CurrencyCode,
) -> Vec<RatePoint> {
    let mut points: Vec<RatePoint> = rates
        .iter()
        .filter_map(|(day, by_currency)| {
            let date = match NaiveDate::parse_from_str(day, DATE_FORMAT) {
                Ok(date) => date,
                Err(e) => {
                    debug!(day = %day, error = %e, "Skipping unparseable date");
                    return None;
                }
            };
            by_currency
                .get(target.code())
                .map(|rate| RatePoint { date, rate: *rate })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[async_trait]
impl RateHistoryProvider for FrankfurterProvider {
    #[instrument(
        name = "FrankfurterRatesFetch",
        skip_all,
        fields(base = %base, target = %target, as_of = %as_of)
    )]
    async fn fetch_rates(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        as_of: NaiveDate,
    ) -> RateOutcome {
        let window = DateWindow::trailing(as_of);
        match self.request_series(base, target, window).await {
            Ok(series) => {
                debug!(points = series.points.len(), "Received rate history");
                RateOutcome::Series(series)
            }
            Err(e) => {
                warn!(error = %e, "Rate history unavailable");
                RateOutcome::NoData
            }
        }
    }
}
