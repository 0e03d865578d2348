use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::models::Coordinate;
use agriscout_core::error::{AgriError, Result};
use agriscout_core::ports::Geocoder;

const USER_AGENT: &str = concat!("agriscout/", env!("CARGO_PKG_VERSION"));

/// Nominatim reverse geocoder.
///
/// Requests `{base_url}?format=json&lat=..&lon=..&zoom=18&addressdetails=1`
/// and uses the `display_name` of the answer.
pub struct NominatimGeocoder {
    /// Reverse endpoint (e.g., "https://nominatim.openstreetmap.org/reverse")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a geocoder for the given reverse endpoint
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AgriError::upstream("geocoder", format!("Failed to build client: {}", e)))?;

        Ok(Self { base_url: base_url.into(), client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Strict lookup; any failure is returned as an error
    pub async fn lookup(&self, coordinate: Coordinate) -> Result<String> {
        let lat = coordinate.lat.to_string();
        let lon = coordinate.lng.to_string();
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", "18"),
                ("addressdetails", "1"),
            ],
        )
        .map_err(|e| AgriError::upstream("geocoder", format!("Invalid URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AgriError::upstream("geocoder", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AgriError::upstream(
                "geocoder",
                format!("Unexpected status {}", response.status()),
            ));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| AgriError::upstream("geocoder", format!("Invalid response: {}", e)))?;

        body.display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AgriError::upstream("geocoder", "Response has no display_name"))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, coordinate: Coordinate) -> String {
        match self.lookup(coordinate).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(
                    lat = coordinate.lat,
                    lng = coordinate.lng,
                    error = %e,
                    "Reverse geocoding failed, using coordinates"
                );
                coordinate.display_short()
            }
        }
    }
}

/// Subset of the Nominatim reverse response
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}
