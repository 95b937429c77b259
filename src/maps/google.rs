use std::time::Duration;

use axum::async_trait;
use serde_json::Value;
use tracing::debug;

use super::types::{
    Coordinates, Endpoint, GeocodeError, GeocodedAddress, MatrixOutcome, ModeTimes, TravelMode,
};
use super::MapsClient;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Google Maps client for the Geocoding and Distance Matrix APIs.
pub struct GoogleMaps {
    http: reqwest::Client,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(api_key: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl MapsClient for GoogleMaps {
    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError> {
        if address.trim().is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let response = self
            .http
            .get(GEOCODE_URL)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        debug!(address, status = body["status"].as_str().unwrap_or("?"), "geocode response");
        parse_geocode(&body, address)
    }

    async fn distance_matrix(
        &self,
        origin: &Endpoint,
        destination: &Endpoint,
        mode: TravelMode,
    ) -> MatrixOutcome {
        let response = self
            .http
            .get(DISTANCE_MATRIX_URL)
            .query(&[
                ("origins", origin.as_query().as_str()),
                ("destinations", destination.as_query().as_str()),
                ("mode", mode.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await;

        let body: Value = match response {
            Ok(r) => match r.json().await {
                Ok(v) => v,
                Err(e) => return MatrixOutcome::ApiError(e.to_string()),
            },
            Err(e) => return MatrixOutcome::ApiError(e.to_string()),
        };

        parse_matrix(&body)
    }
}

/// Pull the first result out of a geocoding response body. The queried
/// address stands in when the provider omits `formatted_address`.
fn parse_geocode(body: &Value, queried: &str) -> Result<GeocodedAddress, GeocodeError> {
    let status = body["status"].as_str().unwrap_or("UNKNOWN");
    let results = body["results"].as_array();

    let result = match (status, results) {
        ("OK", Some(rs)) if !rs.is_empty() => &rs[0],
        _ => return Err(GeocodeError::NotFound(status.to_string())),
    };

    let location = &result["geometry"]["location"];
    let (lat, lng) = match (location["lat"].as_f64(), location["lng"].as_f64()) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(GeocodeError::Request("missing geometry.location".into())),
    };

    let formatted_address = result["formatted_address"]
        .as_str()
        .unwrap_or(queried)
        .to_string();
    let place_id = result["place_id"].as_str().map(str::to_string);
    let types = result["types"]
        .as_array()
        .map(|ts| {
            ts.iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Ok(GeocodedAddress {
        formatted_address,
        coords: Coordinates { lat, lng },
        place_id,
        types,
    })
}

/// Classify a distance-matrix response body for one mode.
fn parse_matrix(body: &Value) -> MatrixOutcome {
    let status = body["status"].as_str().unwrap_or("UNKNOWN");
    if status != "OK" {
        return MatrixOutcome::ApiError(status.to_string());
    }

    let element = &body["rows"][0]["elements"][0];
    match (
        element["duration"]["text"].as_str(),
        element["distance"]["text"].as_str(),
    ) {
        (Some(duration), Some(distance)) => MatrixOutcome::Times(ModeTimes {
            duration: duration.to_string(),
            distance: distance.to_string(),
        }),
        _ => MatrixOutcome::Unavailable,
    }
}
