//! Credentials handling.

use crate::error::WeatherError;

const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key.
    pub api_key: String,
}

impl Config {
    /// Load from the process environment, autoloading a `.env` file from the
    /// working directory first when one exists. An empty value counts as
    /// unset.
    pub fn from_env() -> Result<Self, WeatherError> {
        dotenv::dotenv().ok();

        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(WeatherError::MissingApiKey)?;

        Ok(Self { api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers set, empty and unset so nothing else races on the
    // environment variable.
    #[test]
    fn reads_key_from_environment() {
        unsafe { std::env::set_var(API_KEY_VAR, "test-key") };
        let cfg = Config::from_env().expect("key is set");
        assert_eq!(cfg.api_key, "test-key");

        unsafe { std::env::set_var(API_KEY_VAR, "") };
        assert!(Config::from_env().is_err());

        unsafe { std::env::remove_var(API_KEY_VAR) };
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }
}
