// Output formatting for the queue table

use crate::config::QueueConfig;
use crate::models::{Color, FieldTable};
use crate::query::QueueSnapshot;
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

/// Shown when a job has no value for a field (it left the queue mid-run)
pub const PLACEHOLDER: &str = "[empty]";

/// A resolved table cell: the raw text plus the color it should be painted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
}

impl Cell {
    /// Text with color codes applied
    pub fn render(&self) -> String {
        match self.color {
            Some(color) => color.paint(&self.text),
            None => self.text.clone(),
        }
    }
}

/// Table rendering options
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Fit the table into this many columns by truncating wide cells
    pub max_width: Option<usize>,
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, falling back to the COLUMNS environment
/// variable and then a default of 120.
pub fn get_terminal_width() -> usize {
    let detected = terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w);
    let columns = std::env::var("COLUMNS").ok();
    choose_terminal_width(detected, columns.as_deref())
}

fn choose_terminal_width(detected: Option<u16>, columns: Option<&str>) -> usize {
    if let Some(w) = detected {
        if w > 0 {
            return w as usize;
        }
    }

    if let Some(cols) = columns {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Resolve the cell for one (field, job) pair.
///
/// Missing values become the placeholder. Coloring only applies to fields
/// with a color rule, and the placeholder is colored like any other value.
pub fn resolve_cell(config: &QueueConfig, table: &FieldTable, field: &str, job: &str) -> Cell {
    let text = table.get(field, job).unwrap_or(PLACEHOLDER).to_string();
    let color = config.color_rule(field).and_then(|rule| rule.color_for(&text));
    Cell { text, color }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` down to `width` characters, marking the cut with ".."
fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width <= 2 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 2).collect();
    out.push_str("..");
    out
}

/// Shrink the widest columns, one character at a time, until the row fits.
/// No column gets narrower than its header.
fn fit_widths(widths: &mut [usize], minimums: &[usize], max_width: usize) {
    let separators = widths.len().saturating_sub(1);
    loop {
        let total: usize = widths.iter().sum::<usize>() + separators;
        if total <= max_width {
            return;
        }
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(i, w)| **w > minimums[*i])
            .max_by_key(|(_, w)| **w)
            .map(|(i, _)| i);
        match widest {
            Some(i) => widths[i] -= 1,
            None => return,
        }
    }
}

/// Pad already-truncated text to `width`; the last column is not padded
fn pad(rendered: String, visible: usize, width: usize, last: bool) -> String {
    if last || visible >= width {
        rendered
    } else {
        format!("{}{}", rendered, " ".repeat(width - visible))
    }
}

/// Format the queue as a table: bold header, separator, one row per job.
///
/// Columns follow the configured field order and rows follow job discovery
/// order. Colors are always emitted, whether or not stdout is a terminal.
pub fn format_queue_table(config: &QueueConfig, snapshot: &QueueSnapshot, options: &TableOptions) -> String {
    let headers: Vec<&str> = config.fields().iter().map(|f| f.name.as_str()).collect();

    let rows: Vec<Vec<Cell>> = snapshot
        .jobs
        .iter()
        .map(|job| {
            headers
                .iter()
                .map(|field| resolve_cell(config, &snapshot.table, field, job))
                .collect()
        })
        .collect();

    // First pass: natural widths
    let minimums: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    let mut widths = minimums.clone();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(&cell.text));
        }
    }

    if let Some(max_width) = options.max_width {
        fit_widths(&mut widths, &minimums, max_width);
    }

    let last = headers.len().saturating_sub(1);
    let mut output = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let text = truncate(header, widths[i]);
            let visible = display_width(&text);
            pad(format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET), visible, widths[i], i == last)
        })
        .collect();
    output.push_str(&header_line.join(" "));
    output.push('\n');

    let total_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                // Color is picked from the full value, then the text is cut
                let shown = Cell {
                    text: truncate(&cell.text, widths[i]),
                    color: cell.color,
                };
                let visible = display_width(&shown.text);
                pad(shown.render(), visible, widths[i], i == last)
            })
            .collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }

    output
}
