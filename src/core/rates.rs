//! Historical exchange rate abstractions

use super::currency::CurrencyCode;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

/// Length of the trailing window charted by the widget.
pub const HISTORY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Daily rates for one currency pair, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub points: Vec<RatePoint>,
}

impl RateSeries {
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RateOutcome {
    Series(RateSeries),
    NoData,
}

/// Inclusive date range ending on `as_of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn trailing(as_of: NaiveDate) -> Self {
        DateWindow {
            start: as_of - Duration::days(HISTORY_WINDOW_DAYS),
            end: as_of,
        }
    }
}

#[async_trait]
pub trait RateHistoryProvider: Send + Sync {
    /// Never fails: any problem with the lookup is reported as `RateOutcome::NoData`.
    async fn fetch_rates(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        as_of: NaiveDate,
    ) -> RateOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_window() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let window = DateWindow::trailing(as_of);
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(window.end, as_of);
    }

    #[test]
    fn test_series_accessors() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let series = RateSeries {
            base: "USD".parse().unwrap(),
            target: "EUR".parse().unwrap(),
            points: vec![
                RatePoint { date: day(4), rate: 0.9221 },
                RatePoint { date: day(5), rate: 0.9208 },
            ],
        };
        assert_eq!(series.dates().collect::<Vec<_>>(), vec![day(4), day(5)]);
        assert_eq!(series.rates().collect::<Vec<_>>(), vec![0.9221, 0.9208]);
        assert_eq!(
            RateOutcome::Series(series.clone()),
            RateOutcome::Series(series)
        );
    }
}
