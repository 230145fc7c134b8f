//! Error taxonomy for a single invocation.
//!
//! Every variant is fatal: the first failure aborts the invocation and its
//! `Display` text is what the user sees in place of the table.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error(
        "WEATHER_API_KEY is not set.\n\
         Hint: export it in your shell or put WEATHER_API_KEY=<key> in a .env file."
    )]
    MissingApiKey,

    /// Transport failure reaching an external service.
    #[error("Could not reach {service}. Please make sure you are connected to the internet.")]
    NetworkUnavailable {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The network was reachable but the public IP could not be turned into
    /// coordinates.
    #[error("Could not determine your current location: {reason}")]
    LocationUnavailable { reason: String },

    /// Upstream rejected the city name. `message` is the upstream text,
    /// passed through verbatim.
    #[error("{message}\nPlease check the spelling and try again.")]
    LocationNotFound { message: String },

    /// Any other non-success reply from the weather service.
    #[error("The weather service returned an error (status {status}): {message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },

    /// A 2xx reply whose body did not decode as the expected payload.
    #[error("Failed to decode the {payload} response from the weather service")]
    MalformedResponse {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Filtering left nothing to display. Not a system fault; the message
    /// carries the per-horizon fallback suggestion.
    #[error("{0}")]
    EmptyResult(String),
}

impl WeatherError {
    /// Wrap a transport failure against the named external service.
    pub(crate) fn network(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::NetworkUnavailable { service, source }
    }
}
