use anyhow::Result;
use chrono::Local;
use clap::Parser;
use skycast_core::{
    command, filter, table, Config, ForecastHorizon, ForecastResult, LocationResolver,
    OpenWeatherClient,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Command line tool to get the weather forecast"
)]
pub struct Cli {
    /// City to get the forecast for, or 'here' for the current location.
    /// Quote city names containing spaces.
    #[arg(default_value = "here")]
    pub location: String,

    /// Forecast window.
    #[arg(
        default_value = "now",
        value_parser = ["now", "today", "tomorrow", "week"],
        ignore_case = true
    )]
    pub forecast: String,

    /// Disable coloured output.
    #[arg(long = "no-colour")]
    pub no_colour: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if self.no_colour {
            colored::control::set_override(false);
        }

        let config = Config::from_env()?;

        let location_token = self.location.to_lowercase();
        let forecast_token = self.forecast.to_lowercase();
        let horizon = ForecastHorizon::try_from(forecast_token.as_str())?;
        let (spec, horizon) = command::resolve(&location_token, horizon);

        let resolver = LocationResolver::over_http();
        let location = resolver.resolve(spec).await?;

        let client = OpenWeatherClient::new(config.api_key);
        let fetched = client.fetch(&location, horizon).await?;

        let result = match fetched {
            ForecastResult::Series { city, points } => ForecastResult::Series {
                city,
                points: filter::select(points, horizon, Local::now().date_naive()),
            },
            current => current,
        };

        let table = table::present(&result, horizon)?;
        println!("{}", render::render(&table));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_here_and_now() {
        let cli = Cli::try_parse_from(["skycast"]).unwrap();
        assert_eq!(cli.location, "here");
        assert_eq!(cli.forecast, "now");
        assert!(!cli.no_colour);
    }

    #[test]
    fn city_and_forecast_are_positional() {
        let cli = Cli::try_parse_from(["skycast", "london", "tomorrow"]).unwrap();
        assert_eq!(cli.location, "london");
        assert_eq!(cli.forecast, "tomorrow");
    }

    #[test]
    fn forecast_token_is_case_insensitive() {
        assert!(Cli::try_parse_from(["skycast", "london", "WEEK"]).is_ok());
    }

    #[test]
    fn unknown_forecast_tokens_are_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["skycast", "london", "yesterday"]).is_err());
    }

    #[test]
    fn no_colour_flag_parses() {
        let cli = Cli::try_parse_from(["skycast", "here", "now", "--no-colour"]).unwrap();
        assert!(cli.no_colour);
    }
}
