//! The converter widget: its controls and the update cycle driven by UI events.

use crate::chart::{ChartBackend, ChartRenderer, ChartSlot};
use crate::core::config::DefaultsConfig;
use crate::core::{
    ConversionRequest, Converter, CurrencyCode, FormattedAmount, RateHistoryProvider,
    list_currencies,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Input events the widget reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SourceChanged(CurrencyCode),
    TargetChanged(CurrencyCode),
    AmountEdited(String),
    /// Initial load; the controls already hold their defaults.
    Ready,
}

/// Which part of the widget was just written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    ResultField,
    Chart,
}

/// A currency selection control.
#[derive(Debug, Clone)]
pub struct Select {
    options: Vec<CurrencyCode>,
    selected: CurrencyCode,
}

impl Select {
    fn populated(selected: CurrencyCode) -> Self {
        Select {
            options: list_currencies().to_vec(),
            selected,
        }
    }

    pub fn options(&self) -> &[CurrencyCode] {
        &self.options
    }

    pub fn value(&self) -> CurrencyCode {
        self.selected
    }
}

pub struct Widget {
    source: Select,
    target: Select,
    amount: String,
    result: String,
    chart: ChartRenderer,
}

impl Widget {
    pub fn new(defaults: &DefaultsConfig, backend: Arc<dyn ChartBackend>) -> Self {
        Widget {
            source: Select::populated(defaults.from),
            target: Select::populated(defaults.to),
            amount: defaults.amount.clone(),
            result: String::new(),
            chart: ChartRenderer::new(backend),
        }
    }

    pub fn source(&self) -> &Select {
        &self.source
    }

    pub fn target(&self) -> &Select {
        &self.target
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    fn apply(&mut self, event: &UiEvent) {
        match event {
            UiEvent::SourceChanged(code) => self.source.selected = *code,
            UiEvent::TargetChanged(code) => self.target.selected = *code,
            UiEvent::AmountEdited(text) => self.amount = text.clone(),
            UiEvent::Ready => {}
        }
    }

    fn request(&self) -> ConversionRequest {
        ConversionRequest::new(self.source.value(), self.target.value(), self.amount.clone())
    }

    pub fn view(&self) -> WidgetView {
        WidgetView {
            from: self.source.value(),
            to: self.target.value(),
            amount: self.amount.clone(),
            result: self.result.clone(),
            chart: self.chart.view(),
            has_placeholder: matches!(self.chart.slot(), ChartSlot::Placeholder(_)),
        }
    }
}

/// Point-in-time copy of everything on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: String,
    pub result: String,
    pub chart: String,
    pub has_placeholder: bool,
}

/// Runs one update cycle per event.
///
/// Every event spawns its own task and earlier in-flight updates are left
/// running, so a slow response may land after a newer one.
#[derive(Clone)]
pub struct Orchestrator {
    widget: Arc<Mutex<Widget>>,
    converter: Converter,
    rates: Arc<dyn RateHistoryProvider>,
    redraw: Option<mpsc::UnboundedSender<Redraw>>,
}

impl Orchestrator {
    pub fn new(
        widget: Widget,
        converter: Converter,
        rates: Arc<dyn RateHistoryProvider>,
    ) -> Self {
        Orchestrator {
            widget: Arc::new(Mutex::new(widget)),
            converter,
            rates,
            redraw: None,
        }
    }

    /// Sends a [`Redraw`] every time an update writes to the widget.
    pub fn with_redraw(mut self, redraw: mpsc::UnboundedSender<Redraw>) -> Self {
        self.redraw = Some(redraw);
        self
    }

    pub fn widget(&self) -> Arc<Mutex<Widget>> {
        Arc::clone(&self.widget)
    }

    pub async fn view(&self) -> WidgetView {
        self.widget.lock().await.view()
    }

    /// Applies `event` to the controls and schedules an update for the
    /// resulting inputs.
    pub async fn dispatch(&self, event: UiEvent) -> JoinHandle<()> {
        let request = {
            let mut widget = self.widget.lock().await;
            widget.apply(&event);
            widget.request()
        };
        debug!(?event, "Dispatching update");

        let this = self.clone();
        tokio::spawn(async move { this.update_all(request, Utc::now().date_naive()).await })
    }

    /// Converts the amount and refreshes the chart for one set of inputs.
    pub async fn update_all(&self, request: ConversionRequest, as_of: NaiveDate) {
        let (from, to) = (request.from, request.to);
        info!(%from, %to, amount = %request.amount, "Updating widget");

        let conversion = async {
            let text = match self.converter.convert(&request).await {
                FormattedAmount::Formatted(text) => text,
                FormattedAmount::Blank => String::new(),
            };
            self.widget.lock().await.result = text;
            self.notify(Redraw::ResultField);
        };

        let chart = async {
            let outcome = self.rates.fetch_rates(from, to, as_of).await;
            self.widget.lock().await.chart.render(outcome, from, to);
            self.notify(Redraw::Chart);
        };

        futures::join!(conversion, chart);
    }

    fn notify(&self, what: Redraw) {
        if let Some(tx) = &self.redraw {
            // The front end may already be gone when the last update lands
            let _ = tx.send(what);
        }
    }
}
