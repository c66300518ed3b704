use super::ui;
use crate::core::CurrencyCode;
use crate::widget::{Orchestrator, UiEvent};
use anyhow::{Context, Result, anyhow};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

const HELP: &str = "Commands: from <CODE> | to <CODE> | amount <N> (or just <N>) | show | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Show);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    let currency = |arg: &str| -> Result<CurrencyCode> {
        if arg.is_empty() {
            return Err(anyhow!("Missing currency code"));
        }
        arg.parse()
    };

    match word.to_lowercase().as_str() {
        "from" => Ok(Command::Event(UiEvent::SourceChanged(currency(rest)?))),
        "to" => Ok(Command::Event(UiEvent::TargetChanged(currency(rest)?))),
        "amount" => Ok(Command::Event(UiEvent::AmountEdited(rest.to_string()))),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        // A bare number edits the amount field
        _ if rest.is_empty() => Ok(Command::Event(UiEvent::AmountEdited(word.to_string()))),
        _ => Err(anyhow!("Unknown command: {}", line)),
    }
}

/// Reads edits from stdin and redraws the widget as updates complete.
pub async fn run(orchestrator: Orchestrator) -> Result<()> {
    run_with_input(orchestrator, BufReader::new(tokio::io::stdin())).await
}

/// Event loop over any line source. `quit` leaves at once; end of input lets
/// in-flight updates land and draws the final state first.
async fn run_with_input<R>(orchestrator: Orchestrator, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let (tx, mut redraws) = mpsc::unbounded_channel();
    let orchestrator = orchestrator.with_redraw(tx);

    println!("{}", ui::style_text(HELP, ui::StyleType::Subtle));
    let mut updates: Vec<JoinHandle<()>> = vec![orchestrator.dispatch(UiEvent::Ready).await];

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!(pending = updates.len(), "Input closed, waiting for updates");
                    for update in updates.drain(..) {
                        update.await.context("Update task failed")?;
                    }
                    draw(&orchestrator).await;
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Event(event)) => {
                        updates.retain(|update| !update.is_finished());
                        updates.push(orchestrator.dispatch(event).await);
                    }
                    Ok(Command::Show) => draw(&orchestrator).await,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Quit) => break,
                    Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
                }
            }
            Some(first) = redraws.recv() => {
                let mut pending = vec![first];
                while let Ok(next) = redraws.try_recv() {
                    pending.push(next);
                }
                debug!(?pending, "Redrawing widget");
                draw(&orchestrator).await;
            }
        }
    }

    Ok(())
}

async fn draw(orchestrator: &Orchestrator) {
    ui::print_separator();
    println!("{}", ui::widget_text(&orchestrator.view().await));
}
