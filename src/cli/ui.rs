use crate::widget::WidgetView;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim().italic(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// The result field. An empty field is shown greyed out.
pub fn result_cell(result: &str) -> Cell {
    if result.is_empty() {
        Cell::new("—")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new(result)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right)
    }
}

/// Renders the widget: the conversion table followed by the chart container.
pub fn widget_text(view: &WidgetView) -> String {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("From"),
        header_cell("To"),
        header_cell("Amount"),
        header_cell("Converted"),
    ]);
    table.add_row(vec![
        Cell::new(view.from.to_string()),
        Cell::new(view.to.to_string()),
        Cell::new(&view.amount).set_alignment(CellAlignment::Right),
        result_cell(&view.result),
    ]);

    let chart = if view.has_placeholder {
        style_text(&view.chart, StyleType::Subtle)
    } else {
        view.chart.clone()
    };
    format!("{table}\n\n{chart}")
}

/// Creates a spinner shown while requests are in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Awaits `task` behind `spinner` and clears the spinner whatever the outcome.
pub async fn with_spinner<F: Future>(spinner: &ProgressBar, task: F) -> F::Output {
    let output = task.await;
    spinner.finish_and_clear();
    output
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
