use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locations::dto::LocationResponse;
use crate::maps::{ModeTimes, TravelMode};

/// Body for a travel-time comparison. The candidate is given either as a
/// free-text address or as an explicit coordinate pair.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub saved_location_id: Uuid,
    pub new_address: Option<String>,
    pub new_lat: Option<f64>,
    pub new_lng: Option<f64>,
}

/// The candidate endpoint as it was actually compared.
#[derive(Debug, Serialize)]
pub struct ComparedCandidate {
    /// Formatted address when the candidate went through the geocoder.
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub new_location: ComparedCandidate,
    pub saved_location: LocationResponse,
    /// Always complete over all four modes.
    pub results: BTreeMap<TravelMode, ModeTimes>,
}

/// Query parameters for the legacy duration-only endpoint.
#[derive(Debug, Deserialize)]
pub struct TravelTimesQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}
