//! Country lookup through the ipgeolocation.io API.

use super::CountryResolver;
use crate::Result;
use core::net::IpAddr;
use core::time::Duration;
use serde::Deserialize;

const LOG_TARGET: &str = "     geo";

/// Public endpoint of the ipgeolocation.io service.
pub const DEFAULT_GEOLOCATION_URL: &str = "https://api.ipgeolocation.io";

#[derive(Debug, Deserialize)]
struct GeoResponse {
    country_code2: Option<String>,
}

/// Resolves the visitor's country from their IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocationClient {
    client: reqwest::Client,
    base_url: String,
    visitor_ip: Option<IpAddr>,
}

impl IpGeolocationClient {
    /// Create a client for the service at `base_url`, giving up on requests after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("menu-visibility/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            visitor_ip: None,
        })
    }

    /// Set the address whose country is looked up.
    #[must_use]
    pub const fn with_visitor_ip(mut self, ip: IpAddr) -> Self {
        self.visitor_ip = Some(ip);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the two-letter country code for `ip`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success statuses, and malformed bodies
    pub async fn lookup(&self, api_key: &str, ip: IpAddr) -> Result<Option<String>> {
        let url = format!("{}/ipgeo", self.base_url.trim_end_matches('/'));
        let ip = ip.to_string();

        let body: GeoResponse = self
            .client
            .get(url)
            .query(&[("apiKey", api_key), ("ip", ip.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body.country_code2.filter(|code| !code.trim().is_empty()))
    }
}

impl CountryResolver for IpGeolocationClient {
    async fn resolve_country(&self, api_key: Option<&str>) -> Option<String> {
        let Some(api_key) = api_key.map(str::trim).filter(|key| !key.is_empty()) else {
            log::warn!(target: LOG_TARGET, "No geolocation API key configured, visitor country is unknown");
            return None;
        };

        let Some(ip) = self.visitor_ip else {
            log::warn!(target: LOG_TARGET, "No visitor IP address available, visitor country is unknown");
            return None;
        };

        match self.lookup(api_key, ip).await {
            Ok(Some(country)) => Some(country),
            Ok(None) => {
                log::warn!(target: LOG_TARGET, "Geolocation response for {ip} has no country code");
                None
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not geolocate {ip}: {e:#}");
                None
            }
        }
    }
}
