//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Command-token and current-location resolution
//! - The OpenWeatherMap client and horizon filtering
//! - The row-oriented table model handed to the renderer
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod bands;
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod location;
pub mod model;
pub mod provider;
pub mod table;

pub use bands::TemperatureBand;
pub use config::Config;
pub use error::WeatherError;
pub use location::LocationResolver;
pub use model::{Coordinates, ForecastHorizon, ForecastPoint, ForecastResult, LocationSpec};
pub use provider::OpenWeatherClient;
pub use table::DisplayTable;
