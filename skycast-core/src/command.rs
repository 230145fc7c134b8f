//! Positional-argument disambiguation.

use crate::model::{ForecastHorizon, LocationSpec};

/// Resolve the two positional tokens into a location and a forecast window.
///
/// The location slot is overloaded: `here` means the current machine's
/// location, and a bare horizon keyword (`skycast week`) also means here,
/// overriding whatever sits in the forecast slot. Anything else is taken as
/// a city name. The overload wins over the city fallback, so a city
/// literally named "now" is not reachable from the command line.
///
/// Tokens are expected to be lower-cased by the caller.
pub fn resolve(location: &str, horizon: ForecastHorizon) -> (LocationSpec, ForecastHorizon) {
    if location == "here" {
        (LocationSpec::Here, horizon)
    } else if let Ok(overridden) = ForecastHorizon::try_from(location) {
        (LocationSpec::Here, overridden)
    } else {
        (LocationSpec::City(location.to_owned()), horizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_and_horizon_pass_through() {
        let (spec, horizon) = resolve("paris", ForecastHorizon::Tomorrow);
        assert_eq!(spec, LocationSpec::City("paris".to_owned()));
        assert_eq!(horizon, ForecastHorizon::Tomorrow);
    }

    #[test]
    fn here_keeps_the_requested_horizon() {
        let (spec, horizon) = resolve("here", ForecastHorizon::Week);
        assert_eq!(spec, LocationSpec::Here);
        assert_eq!(horizon, ForecastHorizon::Week);
    }

    #[test]
    fn horizon_keyword_in_the_location_slot_overrides_the_horizon() {
        let (spec, horizon) = resolve("week", ForecastHorizon::Now);
        assert_eq!(spec, LocationSpec::Here);
        assert_eq!(horizon, ForecastHorizon::Week);
    }

    #[test]
    fn multi_word_cities_stay_cities() {
        let (spec, horizon) = resolve("new york", ForecastHorizon::Now);
        assert_eq!(spec, LocationSpec::City("new york".to_owned()));
        assert_eq!(horizon, ForecastHorizon::Now);
    }
}
