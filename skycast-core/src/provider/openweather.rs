use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::WeatherError;
use crate::model::{Coordinates, ForecastHorizon, ForecastPoint, ForecastResult, LocationSpec};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeatherMap client.
///
/// Picks the upstream endpoint from the requested horizon and shapes the
/// decoded payload into domain types. Results are unfiltered; horizon
/// filtering happens afterwards.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Fetch the raw forecast for an already-resolved location.
    pub async fn fetch(
        &self,
        location: &LocationSpec,
        horizon: ForecastHorizon,
    ) -> Result<ForecastResult, WeatherError> {
        let body = self.get(horizon.endpoint(), location).await?;

        match horizon {
            ForecastHorizon::Now => decode_current(&body),
            _ => decode_series(&body),
        }
    }

    async fn get(&self, endpoint: &str, location: &LocationSpec) -> Result<String, WeatherError> {
        let url = format!("{BASE_URL}/{endpoint}");

        let mut query = location_query(location)?;
        query.push(("units", "metric".to_owned()));
        query.push(("appid", self.api_key.clone()));

        debug!(endpoint, "requesting weather data");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(WeatherError::network("the weather service"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(WeatherError::network("the weather service"))?;

        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        Ok(body)
    }
}

/// Query parameters selecting the location. `Here` must have been resolved
/// to coordinates before a fetch is attempted.
fn location_query(
    location: &LocationSpec,
) -> Result<Vec<(&'static str, String)>, WeatherError> {
    match location {
        LocationSpec::City(name) => Ok(vec![("q", name.clone())]),
        LocationSpec::Coordinates(Coordinates { lat, lng }) => {
            Ok(vec![("lat", lat.to_string()), ("lon", lng.to_string())])
        }
        LocationSpec::Here => Err(WeatherError::LocationUnavailable {
            reason: "the current location was never resolved to coordinates".to_owned(),
        }),
    }
}

/// Map a non-success reply onto the error taxonomy. A 404 means the city
/// name was rejected; everything else is a generic upstream failure.
fn upstream_error(status: StatusCode, body: &str) -> WeatherError {
    let message = upstream_message(body).unwrap_or_else(|| truncate_body(body));

    if status == StatusCode::NOT_FOUND {
        WeatherError::LocationNotFound { message }
    } else {
        WeatherError::Upstream { status, message }
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn upstream_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwErrorBody>(body).ok()?.message
}

fn decode_current(body: &str) -> Result<ForecastResult, WeatherError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|source| WeatherError::MalformedResponse {
            payload: "current conditions",
            source,
        })?;

    let point = ForecastPoint {
        timestamp: unix_to_naive(parsed.dt),
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        temp_min_c: parsed.main.temp_min,
        temp_max_c: parsed.main.temp_max,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        description: first_description(&parsed.weather),
    };

    Ok(ForecastResult::Current {
        location: parsed.name,
        point,
    })
}

fn decode_series(body: &str) -> Result<ForecastResult, WeatherError> {
    let parsed: OwForecastResponse =
        serde_json::from_str(body).map_err(|source| WeatherError::MalformedResponse {
            payload: "forecast",
            source,
        })?;

    let mut points: Vec<ForecastPoint> = parsed.list.into_iter().map(point_from_entry).collect();
    points.sort_by_key(|p| p.timestamp);

    Ok(ForecastResult::Series {
        city: parsed.city.name,
        points,
    })
}

fn point_from_entry(entry: OwForecastEntry) -> ForecastPoint {
    // Prefer the wall-clock text; the epoch field is the fallback.
    let timestamp = entry
        .dt_txt
        .as_deref()
        .and_then(parse_dt_txt)
        .unwrap_or_else(|| unix_to_naive(entry.dt));

    ForecastPoint {
        timestamp,
        temperature_c: entry.main.temp,
        feels_like_c: entry.main.feels_like,
        temp_min_c: None,
        temp_max_c: None,
        humidity_pct: entry.main.humidity,
        wind_speed_mps: entry.wind.speed,
        description: first_description(&entry.weather),
    }
}

fn first_description(weather: &[OwWeather]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Upstream `dt_txt` wall-clock text, e.g. "2026-08-23 12:00:00".
fn parse_dt_txt(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
}

fn unix_to_naive(ts: i64) -> NaiveDateTime {
    DateTime::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .naive_utc()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: Option<String>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}
