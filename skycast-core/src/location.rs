//! Current-location resolution via public-IP geolocation.
//!
//! `here` is resolved in two hops: discover the machine's public IPv4
//! address, then ask a geolocation service for the coordinates it is
//! registered at. Both hops sit behind traits so the resolver can be
//! exercised without the network.

use std::fmt::Debug;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::WeatherError;
use crate::model::{Coordinates, LocationSpec};

const IPIFY_URL: &str = "https://api.ipify.org";
const IPINFO_URL: &str = "https://ipinfo.io";

/// Discovers the public IPv4 address of the machine we are running on.
#[async_trait]
pub trait IpLookup: Send + Sync + Debug {
    async fn public_ip(&self) -> Result<Ipv4Addr, WeatherError>;
}

/// Maps an IPv4 address to approximate coordinates.
#[async_trait]
pub trait GeoLookup: Send + Sync + Debug {
    async fn locate(&self, ip: Ipv4Addr) -> Result<Coordinates, WeatherError>;
}

/// `IpLookup` backed by api.ipify.org.
#[derive(Debug, Clone)]
pub struct IpifyClient {
    http: Client,
}

impl IpifyClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for IpifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

#[async_trait]
impl IpLookup for IpifyClient {
    async fn public_ip(&self) -> Result<Ipv4Addr, WeatherError> {
        let res = self
            .http
            .get(IPIFY_URL)
            .query(&[("format", "json")])
            .send()
            .await
            .map_err(WeatherError::network("the IP discovery service"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(WeatherError::network("the IP discovery service"))?;

        if !status.is_success() {
            return Err(WeatherError::LocationUnavailable {
                reason: format!("IP discovery failed with status {status}"),
            });
        }

        let parsed: IpifyResponse =
            serde_json::from_str(&body).map_err(|_| WeatherError::LocationUnavailable {
                reason: "IP discovery returned an unexpected response".to_owned(),
            })?;

        parsed
            .ip
            .parse()
            .map_err(|_| WeatherError::LocationUnavailable {
                reason: format!("IP discovery returned an unusable address: {}", parsed.ip),
            })
    }
}

/// `GeoLookup` backed by ipinfo.io.
#[derive(Debug, Clone)]
pub struct IpinfoClient {
    http: Client,
}

impl IpinfoClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for IpinfoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpinfoResponse {
    /// Comma-separated "latitude,longitude". Absent for addresses the
    /// service has no fix for.
    loc: Option<String>,
}

#[async_trait]
impl GeoLookup for IpinfoClient {
    async fn locate(&self, ip: Ipv4Addr) -> Result<Coordinates, WeatherError> {
        let url = format!("{IPINFO_URL}/{ip}/json");
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(WeatherError::network("the geolocation service"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(WeatherError::network("the geolocation service"))?;

        if !status.is_success() {
            return Err(WeatherError::LocationUnavailable {
                reason: format!("geolocation lookup failed with status {status}"),
            });
        }

        let parsed: IpinfoResponse =
            serde_json::from_str(&body).map_err(|_| WeatherError::LocationUnavailable {
                reason: "the geolocation service returned an unexpected response".to_owned(),
            })?;

        let loc = parsed.loc.ok_or_else(|| WeatherError::LocationUnavailable {
            reason: format!("no coordinates known for {ip}"),
        })?;

        parse_loc(&loc).ok_or_else(|| WeatherError::LocationUnavailable {
            reason: format!("could not parse coordinates '{loc}'"),
        })
    }
}

/// Split a "lat,lng" pair as sent in the geolocation `loc` field.
fn parse_loc(loc: &str) -> Option<Coordinates> {
    let (lat, lng) = loc.split_once(',')?;
    Some(Coordinates {
        lat: lat.trim().parse().ok()?,
        lng: lng.trim().parse().ok()?,
    })
}

/// Resolves `here` into coordinates; explicit locations pass through.
#[derive(Debug)]
pub struct LocationResolver {
    ip: Box<dyn IpLookup>,
    geo: Box<dyn GeoLookup>,
}

impl LocationResolver {
    pub fn new(ip: Box<dyn IpLookup>, geo: Box<dyn GeoLookup>) -> Self {
        Self { ip, geo }
    }

    /// Resolver wired to the real ipify/ipinfo services.
    pub fn over_http() -> Self {
        Self::new(Box::new(IpifyClient::new()), Box::new(IpinfoClient::new()))
    }

    /// Turn a location spec into something fetchable. `Here` becomes
    /// coordinates through the two lookups; city names and explicit
    /// coordinates come back untouched.
    pub async fn resolve(&self, spec: LocationSpec) -> Result<LocationSpec, WeatherError> {
        match spec {
            LocationSpec::Here => {
                debug!("resolving current location via public IP");
                let ip = self.ip.public_ip().await?;
                debug!(%ip, "discovered public address");
                let coords = self.geo.locate(ip).await?;
                debug!(lat = coords.lat, lng = coords.lng, "geolocated");
                Ok(LocationSpec::Coordinates(coords))
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedIp(Ipv4Addr);

    #[async_trait]
    impl IpLookup for FixedIp {
        async fn public_ip(&self) -> Result<Ipv4Addr, WeatherError> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct FixedGeo(Coordinates);

    #[async_trait]
    impl GeoLookup for FixedGeo {
        async fn locate(&self, _ip: Ipv4Addr) -> Result<Coordinates, WeatherError> {
            Ok(self.0)
        }
    }

    /// Fails both lookups; used to prove they are not consulted.
    #[derive(Debug)]
    struct Untouchable;

    #[async_trait]
    impl IpLookup for Untouchable {
        async fn public_ip(&self) -> Result<Ipv4Addr, WeatherError> {
            Err(WeatherError::LocationUnavailable {
                reason: "IP lookup should not run".to_owned(),
            })
        }
    }

    #[async_trait]
    impl GeoLookup for Untouchable {
        async fn locate(&self, _ip: Ipv4Addr) -> Result<Coordinates, WeatherError> {
            Err(WeatherError::LocationUnavailable {
                reason: "geolocation should not run".to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn here_resolves_through_both_lookups() {
        let coords = Coordinates { lat: 51.5072, lng: -0.1276 };
        let resolver = LocationResolver::new(
            Box::new(FixedIp(Ipv4Addr::new(203, 0, 113, 7))),
            Box::new(FixedGeo(coords)),
        );

        let resolved = resolver.resolve(LocationSpec::Here).await.unwrap();
        assert_eq!(resolved, LocationSpec::Coordinates(coords));
    }

    #[tokio::test]
    async fn city_names_pass_through_without_lookups() {
        let resolver = LocationResolver::new(Box::new(Untouchable), Box::new(Untouchable));

        let resolved = resolver
            .resolve(LocationSpec::City("london".to_owned()))
            .await
            .unwrap();
        assert_eq!(resolved, LocationSpec::City("london".to_owned()));
    }

    #[tokio::test]
    async fn geolocation_failure_is_fatal() {
        let resolver = LocationResolver::new(
            Box::new(FixedIp(Ipv4Addr::new(203, 0, 113, 7))),
            Box::new(Untouchable),
        );

        let err = resolver.resolve(LocationSpec::Here).await.unwrap_err();
        assert!(matches!(err, WeatherError::LocationUnavailable { .. }));
    }

    #[test]
    fn loc_field_parses_into_coordinates() {
        let coords = parse_loc("51.5072,-0.1276").unwrap();
        assert_eq!(coords.lat, 51.5072);
        assert_eq!(coords.lng, -0.1276);

        assert!(parse_loc("").is_none());
        assert!(parse_loc("51.5072").is_none());
        assert!(parse_loc("north,south").is_none());
    }
}
