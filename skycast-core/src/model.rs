use std::fmt;

use anyhow::anyhow;
use chrono::NaiveDateTime;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Where the forecast should be looked up.
///
/// `Here` and `City` come straight from the command line; `Coordinates` is
/// what location resolution turns `Here` into before anything is fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSpec {
    Here,
    City(String),
    Coordinates(Coordinates),
}

/// The requested forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastHorizon {
    Now,
    Today,
    Tomorrow,
    Week,
}

impl ForecastHorizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastHorizon::Now => "now",
            ForecastHorizon::Today => "today",
            ForecastHorizon::Tomorrow => "tomorrow",
            ForecastHorizon::Week => "week",
        }
    }

    pub const fn all() -> &'static [ForecastHorizon] {
        &[
            ForecastHorizon::Now,
            ForecastHorizon::Today,
            ForecastHorizon::Tomorrow,
            ForecastHorizon::Week,
        ]
    }

    /// Upstream API path for this window. `now` reads the single-sample
    /// current-conditions endpoint, everything else the 3-hourly feed.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ForecastHorizon::Now => "weather",
            _ => "forecast",
        }
    }
}

impl fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ForecastHorizon {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "now" => Ok(ForecastHorizon::Now),
            "today" => Ok(ForecastHorizon::Today),
            "tomorrow" => Ok(ForecastHorizon::Tomorrow),
            "week" => Ok(ForecastHorizon::Week),
            other => Err(anyhow!(
                "Unknown forecast type '{other}'. Supported types: now, today, tomorrow, week."
            )),
        }
    }
}

/// One upstream data sample, already converted to metric units.
///
/// Timestamps are wall-clock times at the forecast location, without an
/// offset. `temp_min_c`/`temp_max_c` only carry values for the
/// current-conditions sample; 3-hourly samples leave them empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: Option<f64>,
    pub temp_max_c: Option<f64>,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
}

/// A fetched forecast, before or after horizon filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastResult {
    /// Single current-conditions sample (`now`).
    Current {
        location: String,
        point: ForecastPoint,
    },
    /// 3-hourly samples (`today`, `tomorrow`, `week`), ascending by timestamp.
    Series {
        city: String,
        points: Vec<ForecastPoint>,
    },
}
