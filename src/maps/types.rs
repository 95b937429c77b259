use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A latitude/longitude pair as returned by the geocoder or stored on a
/// saved location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// The four transport modes queried for every comparison, in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Bicycling,
        TravelMode::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

/// One side of a distance-matrix query: either free text the provider will
/// geocode itself, or an already-resolved coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Address(String),
    Coords(Coordinates),
}

impl Endpoint {
    /// The value placed in the provider's origins/destinations parameter.
    pub fn as_query(&self) -> String {
        match self {
            Endpoint::Address(addr) => addr.clone(),
            Endpoint::Coords(c) => format!("{},{}", c.lat, c.lng),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Endpoint::Address(addr) => addr.trim().is_empty(),
            Endpoint::Coords(_) => false,
        }
    }
}

/// Duration/distance text for a single mode, exactly as the provider
/// formatted it (or one of the fallback literals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeTimes {
    pub duration: String,
    pub distance: String,
}

/// A successfully geocoded address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub formatted_address: String,
    pub coords: Coordinates,
    pub place_id: Option<String>,
    pub types: Vec<String>,
}

/// Structured negative result from geocoding. The client converts every
/// failure path into one of these; it never panics or leaks transport errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeocodeError {
    #[error("no address provided")]
    EmptyAddress,

    #[error("address not found: {0}")]
    NotFound(String),

    #[error("geocoding request failed: {0}")]
    Request(String),
}

/// Precondition failure: a travel-time query was attempted with an endpoint
/// that has no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("origin and destination must both be provided")]
pub struct MissingEndpoint;

/// Outcome of one distance-matrix query for one mode.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixOutcome {
    /// Status OK with a parseable duration/distance pair.
    Times(ModeTimes),
    /// Status OK but the expected fields were missing.
    Unavailable,
    /// Non-OK status, transport failure or malformed body.
    ApiError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_inside_range_are_valid() {
        for (lat, lng) in [
            (0.0, 0.0),
            (-90.0, -180.0),
            (90.0, 180.0),
            (40.7128, -74.0060),
        ] {
            assert!(Coordinates { lat, lng }.is_valid(), "({lat}, {lng})");
        }
    }

    #[test]
    fn coordinates_outside_range_are_invalid() {
        for (lat, lng) in [
            (200.0, 0.0),
            (-90.1, 0.0),
            (0.0, 180.5),
            (0.0, -181.0),
            (91.0, 181.0),
        ] {
            assert!(!Coordinates { lat, lng }.is_valid(), "({lat}, {lng})");
        }
    }

    #[test]
    fn endpoint_query_formats_coordinates() {
        let e = Endpoint::Coords(Coordinates { lat: 40.5, lng: -73.25 });
        assert_eq!(e.as_query(), "40.5,-73.25");

        let e = Endpoint::Address("Boston".into());
        assert_eq!(e.as_query(), "Boston");
    }

    #[test]
    fn empty_endpoint_detection() {
        assert!(Endpoint::Address("   ".into()).is_empty());
        assert!(!Endpoint::Address("Boston".into()).is_empty());
        assert!(!Endpoint::Coords(Coordinates { lat: 0.0, lng: 0.0 }).is_empty());
    }

    #[test]
    fn travel_mode_serializes_lowercase() {
        let json = serde_json::to_string(&TravelMode::Bicycling).unwrap();
        assert_eq!(json, "\"bicycling\"");
        assert_eq!(TravelMode::Transit.as_str(), "transit");
    }
}
