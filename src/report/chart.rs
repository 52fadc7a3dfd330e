//! Running-balance line chart drawn on a character canvas.
//!
//! Layout, top to bottom: title, y-axis label, plot rows with y tick labels,
//! x axis, x tick labels rotated 90 degrees (one character per line), x-axis
//! label.

use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};

use crate::balance::BalanceRow;

use super::format::format_money;

const MARKER: char = '●';
const GRID: char = '·';
const MIN_PLOT_WIDTH: usize = 10;
const MIN_PLOT_HEIGHT: usize = 3;
const TICK_LABEL_FORMAT: &str = "%m-%d %H:%M";
/// Minimum distance, in columns, between two x ticks.
const TICK_SPACING: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Total width in terminal cells, labels included.
    pub width: usize,
    /// Number of plot rows.
    pub height: usize,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub currency_symbol: String,
}

impl ChartOptions {
    pub fn new(width: usize, height: usize, currency_symbol: impl Into<String>) -> Self {
        let currency_symbol = currency_symbol.into();
        let y_label = if currency_symbol.is_empty() {
            "Running balance".to_string()
        } else {
            format!("Running balance ({currency_symbol})")
        };
        Self {
            width,
            height,
            title: "Balance over time".into(),
            x_label: "Date".into(),
            y_label,
            currency_symbol,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Point {
    col: usize,
    row: usize,
}

/// Renders the running balance of `rows` against their timestamps.
///
/// Returns `None` for an empty series; callers show the empty-ledger message
/// instead of a chart.
pub fn render_chart(rows: &[BalanceRow], options: &ChartOptions) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let height = options.height.max(MIN_PLOT_HEIGHT);
    let values: Vec<f64> = rows
        .iter()
        .map(|row| row.running_balance.to_f64().unwrap_or_default())
        .collect();
    let (low, high) = value_range(&values);

    let tick_rows = [0, (height - 1) / 2, height - 1];
    let tick_labels: Vec<String> = tick_rows
        .iter()
        .map(|&row| {
            let value = high - (high - low) * row as f64 / (height - 1) as f64;
            format_money(
                Decimal::from_f64(value).unwrap_or_default(),
                &options.currency_symbol,
            )
        })
        .collect();
    let label_width = tick_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let plot_width = options
        .width
        .saturating_sub(label_width + 2)
        .max(MIN_PLOT_WIDTH);

    let columns = x_positions(rows, plot_width);
    let points: Vec<Point> = columns
        .iter()
        .zip(&values)
        .map(|(&col, &value)| Point {
            col,
            row: value_row(value, low, high, height),
        })
        .collect();
    let x_ticks = pick_x_ticks(&columns);

    let mut canvas = vec![vec![' '; plot_width]; height];
    for &row in &tick_rows {
        canvas[row].iter_mut().for_each(|cell| *cell = GRID);
    }
    for &(_, col) in &x_ticks {
        canvas.iter_mut().for_each(|line| line[col] = GRID);
    }
    for pair in points.windows(2) {
        draw_segment(&mut canvas, pair[0], pair[1]);
    }
    for point in &points {
        canvas[point.row][point.col] = MARKER;
    }

    let total_width = label_width + 2 + plot_width;
    let mut lines = vec![center(&options.title, total_width), options.y_label.clone()];

    for (row, cells) in canvas.iter().enumerate() {
        let tick = tick_rows.iter().position(|&tick_row| tick_row == row);
        let label = tick.map(|idx| tick_labels[idx].as_str()).unwrap_or("");
        let axis = if tick.is_some() { '┤' } else { '│' };
        let plot: String = cells.iter().collect();
        lines.push(format!("{label:>label_width$} {axis}{plot}"));
    }

    let mut axis: Vec<char> = vec!['─'; plot_width];
    for &(_, col) in &x_ticks {
        axis[col] = '┬';
    }
    lines.push(format!(
        "{:>label_width$} └{}",
        "",
        axis.iter().collect::<String>()
    ));

    let rotated: Vec<(usize, Vec<char>)> = x_ticks
        .iter()
        .map(|&(idx, col)| {
            let text = rows[idx].entry.timestamp.format(TICK_LABEL_FORMAT).to_string();
            (col, text.chars().collect())
        })
        .collect();
    let depth = rotated.iter().map(|(_, chars)| chars.len()).max().unwrap_or(0);
    for depth_idx in 0..depth {
        let mut line = vec![' '; plot_width];
        for (col, chars) in &rotated {
            if let Some(&ch) = chars.get(depth_idx) {
                line[*col] = ch;
            }
        }
        lines.push(format!(
            "{:>label_width$}  {}",
            "",
            line.iter().collect::<String>()
        ));
    }
    lines.push(center(&options.x_label, total_width));

    Some(
        lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (high - low).abs() < f64::EPSILON {
        (low - 1.0, high + 1.0)
    } else {
        (low, high)
    }
}

fn value_row(value: f64, low: f64, high: f64, height: usize) -> usize {
    let ratio = (high - value) / (high - low);
    ((ratio * (height - 1) as f64).round() as usize).min(height - 1)
}

/// Columns proportional to elapsed time; evenly spaced when every entry
/// shares the same second.
fn x_positions(rows: &[BalanceRow], plot_width: usize) -> Vec<usize> {
    let last_col = (plot_width - 1) as f64;
    let first = rows.iter().map(|row| row.entry.timestamp).min();
    let last = rows.iter().map(|row| row.entry.timestamp).max();
    let span = match (first, last) {
        (Some(first), Some(last)) => last.signed_duration_since(first).num_seconds(),
        _ => 0,
    };

    if rows.len() == 1 {
        return vec![plot_width / 2];
    }

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let ratio = match first {
                Some(first) if span > 0 => {
                    row.entry.timestamp.signed_duration_since(first).num_seconds() as f64
                        / span as f64
                }
                _ => idx as f64 / (rows.len() - 1) as f64,
            };
            ((ratio * last_col).round() as usize).min(plot_width - 1)
        })
        .collect()
}

/// Picks `(row index, column)` pairs to label, keeping labels apart.
fn pick_x_ticks(columns: &[usize]) -> Vec<(usize, usize)> {
    let mut ticks: Vec<(usize, usize)> = Vec::new();
    for (idx, &col) in columns.iter().enumerate() {
        match ticks.last() {
            Some(&(_, last)) if col < last + TICK_SPACING => {}
            _ => ticks.push((idx, col)),
        }
    }
    ticks
}

fn draw_segment(canvas: &mut [Vec<char>], from: Point, to: Point) {
    let (mut col, mut row) = (from.col as i64, from.row as i64);
    let (end_col, end_row) = (to.col as i64, to.row as i64);
    let delta_col = (end_col - col).abs();
    let delta_row = -(end_row - row).abs();
    let step_col = if col < end_col { 1 } else { -1 };
    let step_row = if row < end_row { 1 } else { -1 };
    let mut err = delta_col + delta_row;

    while col != end_col || row != end_row {
        let (prev_col, prev_row) = (col, row);
        let doubled = 2 * err;
        if doubled >= delta_row {
            err += delta_row;
            col += step_col;
        }
        if doubled <= delta_col {
            err += delta_col;
            row += step_row;
        }
        let glyph = match (col - prev_col, row - prev_row) {
            (0, _) => '│',
            (_, 0) => '─',
            (dc, dr) if (dc > 0) == (dr < 0) => '╱',
            _ => '╲',
        };
        canvas[row as usize][col as usize] = glyph;
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}
