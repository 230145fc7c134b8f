//! Row-oriented display model for forecast tables.
//!
//! The presenter shapes fetched (and filtered) data into labeled rows of
//! styled spans. It never touches terminal colours itself; the renderer in
//! the binary decides what each style means.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::bands::{self, TemperatureBand};
use crate::error::WeatherError;
use crate::model::{ForecastHorizon, ForecastPoint, ForecastResult};

/// How a span should be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Regular emphasized value text.
    Value,
    /// Temperature text coloured by its band.
    Banded(TemperatureBand),
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    fn value(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::Value,
        }
    }

    fn banded(text: impl Into<String>, band: TemperatureBand) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::Banded(band),
        }
    }
}

/// One table cell. Usually a single span; split cells (min | max) carry
/// several, each styled on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub spans: Vec<Span>,
}

impl Cell {
    fn value(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::value(text)],
        }
    }

    /// The cell's text with styling stripped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// One labeled row.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayRow {
    /// A single value spanning every sample column.
    Spanned { label: &'static str, value: Cell },
    /// One cell per sample column.
    Columns { label: &'static str, cells: Vec<Cell> },
}

impl DisplayRow {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayRow::Spanned { label, .. } | DisplayRow::Columns { label, .. } => *label,
        }
    }
}

/// The full table model handed to the renderer, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTable {
    pub rows: Vec<DisplayRow>,
}

/// Shape a forecast into display rows.
///
/// Shaping the same input twice yields the same table. Fails with
/// `EmptyResult` when a filtered series has nothing left to show; the
/// message names the city and suggests the windows that would.
pub fn present(
    result: &ForecastResult,
    horizon: ForecastHorizon,
) -> Result<DisplayTable, WeatherError> {
    match result {
        ForecastResult::Current { location, point } => Ok(current_table(location, point)),
        ForecastResult::Series { city, points } => match horizon {
            ForecastHorizon::Week => week_table(city, points),
            _ => day_table(city, points),
        },
    }
}

fn current_table(location: &str, point: &ForecastPoint) -> DisplayTable {
    let rows = vec![
        DisplayRow::Columns {
            label: "Location:",
            cells: vec![Cell::value(location)],
        },
        DisplayRow::Columns {
            label: "Weather:",
            cells: vec![Cell::value(point.description.as_str())],
        },
        DisplayRow::Columns {
            label: "Temperature:",
            cells: vec![temperature_cell(point.temperature_c)],
        },
        DisplayRow::Columns {
            label: "Feels Like:",
            cells: vec![temperature_cell(point.feels_like_c)],
        },
        DisplayRow::Columns {
            label: "Min | Max:",
            cells: vec![min_max_cell(point.temp_min_c, point.temp_max_c)],
        },
        DisplayRow::Columns {
            label: "Wind Speed:",
            cells: vec![Cell::value(format_wind(point.wind_speed_mps))],
        },
        DisplayRow::Columns {
            label: "Humidity:",
            cells: vec![Cell::value(format_humidity(point.humidity_pct))],
        },
    ];

    DisplayTable { rows }
}

/// Single-day layout: one date header, one column per 3-hour sample.
fn day_table(city: &str, points: &[ForecastPoint]) -> Result<DisplayTable, WeatherError> {
    let Some(first) = points.first() else {
        return Err(WeatherError::EmptyResult(format!(
            "Cannot get 3 hour weather for {city}. \
             Try using 'skycast <city> tomorrow' or 'skycast <city> now'."
        )));
    };

    let mut rows = vec![
        DisplayRow::Spanned {
            label: "Location:",
            value: Cell::value(city),
        },
        DisplayRow::Spanned {
            label: "Date:",
            value: Cell::value(format_date(first.timestamp.date())),
        },
        DisplayRow::Columns {
            label: "Time:",
            cells: map_cells(points, |p| Cell::value(format_hour(p.timestamp))),
        },
    ];
    rows.extend(sample_rows(points));

    Ok(DisplayTable { rows })
}

/// Week layout: one column per day, each dated individually.
fn week_table(city: &str, points: &[ForecastPoint]) -> Result<DisplayTable, WeatherError> {
    if points.is_empty() {
        return Err(WeatherError::EmptyResult(format!(
            "Cannot get week weather for {city}. \
             Try using 'skycast <city> now|today|tomorrow'."
        )));
    }

    let mut rows = vec![
        DisplayRow::Spanned {
            label: "Location:",
            value: Cell::value(city),
        },
        DisplayRow::Columns {
            label: "Date:",
            cells: map_cells(points, |p| Cell::value(format_date(p.timestamp.date()))),
        },
    ];
    rows.extend(sample_rows(points));

    Ok(DisplayTable { rows })
}

/// The per-sample attribute rows shared by the day and week layouts.
fn sample_rows(points: &[ForecastPoint]) -> Vec<DisplayRow> {
    vec![
        DisplayRow::Columns {
            label: "Weather:",
            cells: map_cells(points, |p| Cell::value(p.description.as_str())),
        },
        DisplayRow::Columns {
            label: "Temperature:",
            cells: map_cells(points, |p| temperature_cell(p.temperature_c)),
        },
        DisplayRow::Columns {
            label: "Feels Like:",
            cells: map_cells(points, |p| temperature_cell(p.feels_like_c)),
        },
        DisplayRow::Columns {
            label: "Wind Speed:",
            cells: map_cells(points, |p| Cell::value(format_wind(p.wind_speed_mps))),
        },
        DisplayRow::Columns {
            label: "Humidity:",
            cells: map_cells(points, |p| Cell::value(format_humidity(p.humidity_pct))),
        },
    ]
}

fn map_cells(points: &[ForecastPoint], f: impl Fn(&ForecastPoint) -> Cell) -> Vec<Cell> {
    points.iter().map(f).collect()
}

/// Whole-degree display with the band marker, e.g. "● 21°C". The band is
/// classified from the raw value, not the rounded one.
fn temperature_cell(temp_c: f64) -> Cell {
    let band = bands::classify(temp_c);
    Cell {
        spans: vec![Span::banded(
            format!("● {}°C", round_degrees(temp_c)),
            band,
        )],
    }
}

/// Min and max halves styled independently; "--" when the sample has none.
fn min_max_cell(min_c: Option<f64>, max_c: Option<f64>) -> Cell {
    Cell {
        spans: vec![degree_span(min_c), Span::value(" | "), degree_span(max_c)],
    }
}

fn degree_span(temp_c: Option<f64>) -> Span {
    match temp_c {
        Some(t) => Span::banded(format!("{}°C", round_degrees(t)), bands::classify(t)),
        None => Span::value("--"),
    }
}

fn round_degrees(temp_c: f64) -> i64 {
    temp_c.round() as i64
}

fn format_wind(speed_mps: f64) -> String {
    format!("{speed_mps}m/s")
}

fn format_humidity(humidity_pct: u8) -> String {
    format!("{humidity_pct}%")
}

/// Calendar-day label, e.g. "Mon 24th Aug 2026".
fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {} {}",
        date.format("%a"),
        ordinal(date.day()),
        date.format("%b"),
        date.format("%Y")
    )
}

/// English ordinal day of month. 11th, 12th and 13th stay on "th".
fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

/// Time-of-day label, e.g. "3 pm".
fn format_hour(ts: NaiveDateTime) -> String {
    ts.format("%-I %P").to_string()
}
