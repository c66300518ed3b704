//! Rate history chart.
//!
//! The renderer owns the chart container and the single live chart inside it.
//! A chart is never updated in place: every new series destroys the previous
//! instance before the next one is created.

pub mod text;

use crate::core::{CurrencyCode, RateOutcome, RateSeries};
use std::sync::Arc;
use tracing::debug;

pub const CHART_TITLE: &str = "7-Day Exchange Rate History";
pub const PLACEHOLDER_MESSAGE: &str =
    "Work in progress: Chart feature is under development for this currency pair.";

/// Fixed look of the single dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub border_color: &'static str,
    pub fill: bool,
}

pub const RATE_LINE_STYLE: LineStyle = LineStyle {
    border_color: "#3e95cd",
    fill: false,
};

/// Everything a backend needs to draw one line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartConfig {
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub style: LineStyle,
}

impl LineChartConfig {
    pub fn for_series(series: &RateSeries) -> Self {
        LineChartConfig {
            title: CHART_TITLE.to_string(),
            dataset_label: dataset_label(series.base, series.target),
            labels: series
                .dates()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            data: series.rates().collect(),
            style: RATE_LINE_STYLE,
        }
    }
}

pub fn dataset_label(base: CurrencyCode, target: CurrencyCode) -> String {
    format!("{base} to {target}")
}

/// A chart instance created by a [`ChartBackend`].
pub trait LineChart: Send {
    fn config(&self) -> &LineChartConfig;

    fn draw(&self) -> String;

    /// Releases the backend resources held by this instance.
    fn destroy(&mut self);
}

pub trait ChartBackend: Send + Sync {
    fn create(&self, config: LineChartConfig) -> Box<dyn LineChart>;

    /// Number of instances created and not yet destroyed.
    fn live_charts(&self) -> usize;
}

/// Exclusive owner of one live chart. Dropping an undisposed handle disposes it.
pub struct ChartHandle {
    chart: Option<Box<dyn LineChart>>,
}

impl ChartHandle {
    fn new(chart: Box<dyn LineChart>) -> Self {
        ChartHandle { chart: Some(chart) }
    }

    pub fn chart(&self) -> Option<&dyn LineChart> {
        self.chart.as_deref()
    }

    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut chart) = self.chart.take() {
            debug!(label = %chart.config().dataset_label, "Destroying chart");
            chart.destroy();
        }
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// What occupies the chart container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSlot {
    /// A drawing surface, with or without a chart on it.
    Surface,
    Placeholder(String),
}

pub struct ChartRenderer {
    backend: Arc<dyn ChartBackend>,
    slot: ChartSlot,
    current: Option<ChartHandle>,
}

impl ChartRenderer {
    pub fn new(backend: Arc<dyn ChartBackend>) -> Self {
        ChartRenderer {
            backend,
            slot: ChartSlot::Surface,
            current: None,
        }
    }

    pub fn render(&mut self, outcome: RateOutcome, base: CurrencyCode, target: CurrencyCode) {
        match outcome {
            RateOutcome::NoData => self.show_placeholder(base, target),
            RateOutcome::Series(series) => self.show_series(&series),
        }
    }

    fn show_placeholder(&mut self, base: CurrencyCode, target: CurrencyCode) {
        debug!(pair = %dataset_label(base, target), "No rate history, showing placeholder");
        if let Some(handle) = self.current.take() {
            handle.dispose();
        }
        self.slot = ChartSlot::Placeholder(PLACEHOLDER_MESSAGE.to_string());
    }

    fn show_series(&mut self, series: &RateSeries) {
        if matches!(self.slot, ChartSlot::Placeholder(_)) {
            self.slot = ChartSlot::Surface;
        }
        if let Some(handle) = self.current.take() {
            handle.dispose();
        }
        let chart = self.backend.create(LineChartConfig::for_series(series));
        self.current = Some(ChartHandle::new(chart));
    }

    pub fn slot(&self) -> &ChartSlot {
        &self.slot
    }

    pub fn current_chart(&self) -> Option<&dyn LineChart> {
        self.current.as_ref().and_then(|h| h.chart())
    }

    pub fn live_charts(&self) -> usize {
        self.backend.live_charts()
    }

    /// Text for the chart container: the drawn chart, the placeholder, or
    /// nothing for an empty surface.
    pub fn view(&self) -> String {
        match (&self.slot, self.current_chart()) {
            (ChartSlot::Placeholder(message), _) => message.clone(),
            (ChartSlot::Surface, Some(chart)) => chart.draw(),
            (ChartSlot::Surface, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::text::TextChartBackend;
    use super::*;
    use crate::core::RatePoint;
    use chrono::NaiveDate;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn series(base: &str, target: &str, rates: &[f64]) -> RateSeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        RateSeries {
            base: code(base),
            target: code(target),
            points: rates
                .iter()
                .enumerate()
                .map(|(i, rate)| RatePoint {
                    date: start + chrono::Duration::days(i as i64),
                    rate: *rate,
                })
                .collect(),
        }
    }

    fn renderer() -> (Arc<TextChartBackend>, ChartRenderer) {
        let backend = Arc::new(TextChartBackend::new());
        let renderer = ChartRenderer::new(backend.clone());
        (backend, renderer)
    }

    #[test]
    fn test_initial_state_is_empty_surface() {
        let (backend, renderer) = renderer();
        assert_eq!(renderer.slot(), &ChartSlot::Surface);
        assert!(renderer.current_chart().is_none());
        assert_eq!(backend.live_charts(), 0);
        assert_eq!(renderer.view(), "");
    }

    #[test]
    fn test_series_creates_chart() {
        let (backend, mut renderer) = renderer();
        renderer.render(
            RateOutcome::Series(series("USD", "EUR", &[0.92, 0.93, 0.91])),
            code("USD"),
            code("EUR"),
        );

        assert_eq!(renderer.slot(), &ChartSlot::Surface);
        assert_eq!(backend.live_charts(), 1);

        let chart = renderer.current_chart().expect("chart should be live");
        let config = chart.config();
        assert_eq!(config.title, "7-Day Exchange Rate History");
        assert_eq!(config.dataset_label, "USD to EUR");
        assert_eq!(
            config.labels,
            vec!["2024-03-01", "2024-03-02", "2024-03-03"]
        );
        assert_eq!(config.data, vec![0.92, 0.93, 0.91]);
        assert_eq!(config.style.border_color, "#3e95cd");
        assert!(!config.style.fill);
    }

    #[test]
    fn test_no_data_shows_placeholder_only() {
        let (backend, mut renderer) = renderer();
        renderer.render(
            RateOutcome::Series(series("USD", "EUR", &[0.92, 0.93])),
            code("USD"),
            code("EUR"),
        );
        renderer.render(RateOutcome::NoData, code("USD"), code("ISK"));

        assert_eq!(
            renderer.slot(),
            &ChartSlot::Placeholder(PLACEHOLDER_MESSAGE.to_string())
        );
        assert!(renderer.current_chart().is_none());
        assert_eq!(backend.live_charts(), 0);
        assert_eq!(renderer.view(), PLACEHOLDER_MESSAGE);
    }

    #[test]
    fn test_replacing_series_keeps_one_live_chart() {
        let (backend, mut renderer) = renderer();
        renderer.render(
            RateOutcome::Series(series("USD", "EUR", &[0.92, 0.93])),
            code("USD"),
            code("EUR"),
        );
        renderer.render(
            RateOutcome::Series(series("USD", "GBP", &[0.79, 0.78, 0.80])),
            code("USD"),
            code("GBP"),
        );

        assert_eq!(backend.live_charts(), 1);
        assert_eq!(backend.created(), 2);
        assert_eq!(
            renderer.current_chart().unwrap().config().dataset_label,
            "USD to GBP"
        );
    }

    #[test]
    fn test_series_after_placeholder_restores_surface() {
        let (backend, mut renderer) = renderer();
        renderer.render(RateOutcome::NoData, code("USD"), code("EUR"));
        renderer.render(
            RateOutcome::Series(series("USD", "EUR", &[0.92])),
            code("USD"),
            code("EUR"),
        );

        assert_eq!(renderer.slot(), &ChartSlot::Surface);
        assert_eq!(backend.live_charts(), 1);
        assert!(!renderer.view().contains(PLACEHOLDER_MESSAGE));
    }

    #[test]
    fn test_dropping_renderer_disposes_chart() {
        let (backend, mut renderer) = renderer();
        renderer.render(
            RateOutcome::Series(series("EUR", "USD", &[1.08, 1.09])),
            code("EUR"),
            code("USD"),
        );
        assert_eq!(backend.live_charts(), 1);
        drop(renderer);
        assert_eq!(backend.live_charts(), 0);
    }
}
