//! Text-mode line charts for the terminal.

use super::{ChartBackend, LineChart, LineChartConfig};
use console::style;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const PLOT_HEIGHT: usize = 10;
const COLUMN_WIDTH: usize = 7;
const POINT: char = '●';
const TRACE: char = '·';
// Closest 256-colour match for the dataset border colour
const LINE_COLOR_256: u8 = 68;

#[derive(Debug, Default)]
struct Counters {
    created: AtomicUsize,
    live: AtomicUsize,
}

/// Backend drawing charts as plain text. Tracks how many instances are alive.
#[derive(Debug, Default, Clone)]
pub struct TextChartBackend {
    counters: Arc<Counters>,
}

impl TextChartBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of charts ever created by this backend.
    pub fn created(&self) -> usize {
        self.counters.created.load(Ordering::SeqCst)
    }
}

impl ChartBackend for TextChartBackend {
    fn create(&self, config: LineChartConfig) -> Box<dyn LineChart> {
        self.counters.created.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        Box::new(TextLineChart {
            config,
            counters: Some(Arc::clone(&self.counters)),
        })
    }

    fn live_charts(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }
}

struct TextLineChart {
    config: LineChartConfig,
    counters: Option<Arc<Counters>>,
}

impl LineChart for TextLineChart {
    fn config(&self) -> &LineChartConfig {
        &self.config
    }

    fn draw(&self) -> String {
        let mut out = String::new();
        out.push_str(&style(&self.config.title).bold().to_string());
        out.push('\n');
        out.push_str(
            &style(format!("── {}", self.config.dataset_label))
                .color256(LINE_COLOR_256)
                .to_string(),
        );
        out.push('\n');

        if self.config.data.is_empty() {
            return out;
        }

        let (min, max) = bounds(&self.config.data);
        let grid = plot(&self.config.data, min, max);
        let axis_width = format_rate(max).len().max(format_rate(min).len());

        for (row, cells) in grid.iter().enumerate() {
            let label = match row {
                0 => format_rate(max),
                r if r == PLOT_HEIGHT - 1 => format_rate(min),
                _ => String::new(),
            };
            let line: String = cells.iter().collect();
            out.push_str(&format!(
                "{label:>axis_width$} │{}\n",
                style(line.trim_end()).color256(LINE_COLOR_256)
            ));
        }

        out.push_str(&format!(
            "{:>axis_width$} └{}\n",
            "",
            "─".repeat(grid[0].len())
        ));
        let ticks: String = self
            .config
            .labels
            .iter()
            .map(|l| format!("{:<COLUMN_WIDTH$}", short_date(l)))
            .collect();
        out.push_str(&format!("{:>axis_width$}  {}\n", "", ticks.trim_end()));
        out
    }

    fn destroy(&mut self) {
        if let Some(counters) = self.counters.take() {
            counters.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

fn bounds(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

fn row_for(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (max - value) / (max - min) * (PLOT_HEIGHT - 1) as f64
    } else {
        ((PLOT_HEIGHT - 1) / 2) as f64
    }
}

/// Lays the series out on a character grid, one point every `COLUMN_WIDTH`
/// columns with interpolated trace marks in between.
fn plot(data: &[f64], min: f64, max: f64) -> Vec<Vec<char>> {
    let width = (data.len() - 1) * COLUMN_WIDTH + 1;
    let mut grid = vec![vec![' '; width]; PLOT_HEIGHT];

    for (i, pair) in data.windows(2).enumerate() {
        let (from, to) = (row_for(pair[0], min, max), row_for(pair[1], min, max));
        for step in 1..COLUMN_WIDTH {
            let t = step as f64 / COLUMN_WIDTH as f64;
            let row = (from + (to - from) * t).round() as usize;
            grid[row.min(PLOT_HEIGHT - 1)][i * COLUMN_WIDTH + step] = TRACE;
        }
    }
    for (i, value) in data.iter().enumerate() {
        let row = row_for(*value, min, max).round() as usize;
        grid[row.min(PLOT_HEIGHT - 1)][i * COLUMN_WIDTH] = POINT;
    }
    grid
}

fn format_rate(rate: f64) -> String {
    format!("{rate:.4}")
}

/// `2024-03-08` becomes `03-08`.
fn short_date(label: &str) -> &str {
    label.get(5..).unwrap_or(label)
}
