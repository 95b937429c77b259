use std::collections::BTreeMap;

use axum::async_trait;

mod google;
mod types;

pub use google::GoogleMaps;
pub use types::{
    Coordinates, Endpoint, GeocodeError, GeocodedAddress, MatrixOutcome, MissingEndpoint,
    ModeTimes, TravelMode,
};

/// External geocoding/routing provider. Behind a trait object so handlers and
/// tests can swap in a fake.
#[async_trait]
pub trait MapsClient: Send + Sync {
    /// Resolve a free-text address. Every failure path becomes a
    /// `GeocodeError` value; this never panics.
    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError>;

    /// Query duration/distance for a single mode between two endpoints.
    async fn distance_matrix(
        &self,
        origin: &Endpoint,
        destination: &Endpoint,
        mode: TravelMode,
    ) -> MatrixOutcome;
}

/// Query all four modes and absorb each mode's failure independently. The
/// result is always a complete mode-keyed mapping: a failing mode degrades to
/// the literal fallback texts without touching the others. An empty endpoint
/// is rejected before any provider query.
pub async fn travel_matrix(
    maps: &dyn MapsClient,
    origin: &Endpoint,
    destination: &Endpoint,
) -> Result<BTreeMap<TravelMode, ModeTimes>, MissingEndpoint> {
    if origin.is_empty() || destination.is_empty() {
        return Err(MissingEndpoint);
    }

    let mut results = BTreeMap::new();
    for mode in TravelMode::ALL {
        let times = match maps.distance_matrix(origin, destination, mode).await {
            MatrixOutcome::Times(t) => t,
            MatrixOutcome::Unavailable => ModeTimes {
                duration: "Unavailable".into(),
                distance: "Unavailable".into(),
            },
            MatrixOutcome::ApiError(err) => {
                tracing::warn!(mode = mode.as_str(), error = %err, "distance matrix query failed");
                ModeTimes {
                    duration: "API error".into(),
                    distance: "API error".into(),
                }
            }
        };
        results.insert(mode, times);
    }
    Ok(results)
}
