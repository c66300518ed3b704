pub mod chart;
pub mod cli;
pub mod core;
pub mod providers;
pub mod widget;

use crate::chart::{ChartBackend, text::TextChartBackend};
use crate::core::config::AppConfig;
use crate::core::{Converter, CurrencyCode};
use crate::widget::{Orchestrator, Widget};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub enum AppCommand {
    Currencies,
    Convert {
        from: Option<CurrencyCode>,
        to: Option<CurrencyCode>,
        amount: Option<String>,
    },
    Interactive,
}

/// Wires the providers and the chart backend into a widget ready for its first event.
pub fn build_orchestrator(config: &AppConfig, backend: Arc<dyn ChartBackend>) -> Orchestrator {
    let exchangerate = &config.providers.exchangerate;
    if exchangerate.api_key.is_empty() {
        warn!(
            "No ExchangeRate-API key configured, conversions will stay blank. Set providers.exchangerate.api_key or {}",
            crate::core::config::API_KEY_ENV
        );
    }
    let conversion = providers::ExchangeRateApiProvider::new(
        &exchangerate.base_url,
        &exchangerate.api_key,
    );
    let rates = providers::FrankfurterProvider::new(&config.providers.frankfurter.base_url);

    let widget = Widget::new(&config.defaults, backend);
    Orchestrator::new(widget, Converter::new(Arc::new(conversion)), Arc::new(rates))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    run_with_config(command, config).await
}

/// Runs a command against an already loaded config.
pub async fn run_with_config(command: AppCommand, mut config: AppConfig) -> Result<()> {
    debug!(
        frankfurter = %config.providers.frankfurter.base_url,
        exchangerate = %config.providers.exchangerate.base_url,
        defaults = ?config.defaults,
        "Loaded config"
    );

    match command {
        AppCommand::Currencies => {
            cli::currencies::run();
            Ok(())
        }
        AppCommand::Convert { from, to, amount } => {
            if let Some(from) = from {
                config.defaults.from = from;
            }
            if let Some(to) = to {
                config.defaults.to = to;
            }
            if let Some(amount) = amount {
                config.defaults.amount = amount;
            }
            let orchestrator = build_orchestrator(&config, Arc::new(TextChartBackend::new()));
            cli::convert::run(&orchestrator).await
        }
        AppCommand::Interactive => {
            let orchestrator = build_orchestrator(&config, Arc::new(TextChartBackend::new()));
            cli::interactive::run(orchestrator).await
        }
    }
}
