//! Upstream weather data access.
//!
//! OpenWeatherMap is the sole data source: the current-conditions endpoint
//! serves `now`, the 3-hourly 5-day feed serves every other window.

pub mod openweather;

pub use openweather::OpenWeatherClient;
