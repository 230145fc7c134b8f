//! Turns the core display model into coloured terminal text.
//!
//! Borderless layout with fixed geometry: every column is 16 characters,
//! 14 of content and 2 of gap. Labels stay unstyled so the values carry
//! the emphasis.

use colored::{Color, Colorize};
use skycast_core::table::{Cell, DisplayRow, DisplayTable, Span, SpanStyle};
use skycast_core::TemperatureBand;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMN_WIDTH: usize = 16;
const COLUMN_GAP: usize = 2;
const CONTENT_WIDTH: usize = COLUMN_WIDTH - COLUMN_GAP;

/// Render the table model to a printable string, one line per row.
pub fn render(table: &DisplayTable) -> String {
    let lines: Vec<String> = table
        .rows
        .iter()
        .map(|row| match row {
            DisplayRow::Spanned { label, value } => render_spanned(label, value),
            DisplayRow::Columns { label, cells } => render_columns(label, cells),
        })
        .collect();

    lines.join("\n")
}

/// Spanning values (location, day headers) ignore the column grid and are
/// never truncated.
fn render_spanned(label: &str, value: &Cell) -> String {
    format!("{}{}", pad(label, COLUMN_WIDTH), paint_cell(value))
}

fn render_columns(label: &str, cells: &[Cell]) -> String {
    let mut line = pad(label, COLUMN_WIDTH);

    for (i, cell) in cells.iter().enumerate() {
        let fitted = fit(cell);
        let painted = paint_cell(&fitted);

        if i + 1 == cells.len() {
            line.push_str(&painted);
        } else {
            // Pad on the plain text; escape codes have no width.
            let width = UnicodeWidthStr::width(fitted.text().as_str());
            line.push_str(&painted);
            line.push_str(&" ".repeat(COLUMN_WIDTH.saturating_sub(width)));
        }
    }

    line
}

fn paint_cell(cell: &Cell) -> String {
    cell.spans
        .iter()
        .map(|span| match span.style {
            SpanStyle::Value => span.text.as_str().bright_white().bold().to_string(),
            SpanStyle::Banded(band) => span
                .text
                .as_str()
                .color(band_color(band))
                .bold()
                .to_string(),
        })
        .collect()
}

/// Shrink an over-wide single-span cell to the column content width.
/// Multi-span cells (min | max) are narrow by construction and left alone.
fn fit(cell: &Cell) -> Cell {
    if let [span] = cell.spans.as_slice() {
        if UnicodeWidthStr::width(span.text.as_str()) > CONTENT_WIDTH {
            return Cell {
                spans: vec![Span {
                    text: truncate_to_width(&span.text, CONTENT_WIDTH),
                    style: span.style,
                }],
            };
        }
    }
    cell.clone()
}

/// Cut to a display width, ending with an ellipsis when anything was cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(w)))
}

/// Terminal colour for each temperature band, coldest blue to hottest white.
fn band_color(band: TemperatureBand) -> Color {
    match band {
        TemperatureBand::Freezing => Color::Blue,
        TemperatureBand::Cold => Color::BrightBlue,
        TemperatureBand::Chilly => Color::Cyan,
        TemperatureBand::Cool => Color::BrightCyan,
        TemperatureBand::Mild => Color::Green,
        TemperatureBand::Warm => Color::BrightGreen,
        TemperatureBand::Hot => Color::Yellow,
        TemperatureBand::VeryHot => Color::BrightYellow,
        TemperatureBand::Scorching => Color::Red,
        TemperatureBand::Extreme => Color::White,
    }
}
