use super::ui;
use crate::widget::{Orchestrator, UiEvent};
use anyhow::{Context, Result};

/// Runs a single update cycle for the configured inputs and prints the widget.
pub async fn run(orchestrator: &Orchestrator) -> Result<()> {
    let spinner = ui::new_spinner("Fetching rates...");
    ui::with_spinner(&spinner, async {
        orchestrator.dispatch(UiEvent::Ready).await.await
    })
    .await
    .context("Update task failed")?;

    let view = orchestrator.view().await;
    println!("{}", ui::widget_text(&view));
    Ok(())
}
