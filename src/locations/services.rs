use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    locations::repo::{Location, LocationStore},
    maps::{GeocodeError, MapsClient},
};

/// Geocode the address, validate the returned coordinates and persist the
/// provider's formatted address. Nothing is written when verification fails.
pub async fn create_verified(
    maps: &dyn MapsClient,
    store: &dyn LocationStore,
    user_id: Uuid,
    name: &str,
    address: &str,
) -> ApiResult<Location> {
    let geocoded = maps.geocode(address).await.map_err(|e| {
        warn!(user_id = %user_id, error = %e, "address verification failed");
        match e {
            GeocodeError::Request(_) => {
                ApiError::ExternalApi("Address verification is temporarily unavailable.".into())
            }
            _ => ApiError::Validation(
                "Could not verify the address. Please check and try again.".into(),
            ),
        }
    })?;

    if !geocoded.coords.is_valid() {
        return Err(ApiError::InvalidCoordinates);
    }

    let location = store
        .insert(
            user_id,
            name,
            &geocoded.formatted_address,
            geocoded.coords.lat,
            geocoded.coords.lng,
        )
        .await?;

    info!(user_id = %user_id, location_id = %location.id, "location saved");
    Ok(location)
}

#[cfg(test)]
mod tests {
    use axum::async_trait;

    use super::*;
    use crate::locations::repo::testing::MemoryStore;
    use crate::maps::{
        Coordinates, Endpoint, GeocodedAddress, MatrixOutcome, ModeTimes, TravelMode,
    };

    struct StubMaps {
        ok: bool,
    }

    #[async_trait]
    impl MapsClient for StubMaps {
        async fn geocode(&self, _address: &str) -> Result<GeocodedAddress, GeocodeError> {
            if self.ok {
                Ok(GeocodedAddress {
                    formatted_address: "Brooklyn, NY, USA".into(),
                    coords: Coordinates { lat: 40.6782, lng: -73.9442 },
                    place_id: None,
                    types: vec![],
                })
            } else {
                Err(GeocodeError::NotFound("ZERO_RESULTS".into()))
            }
        }

        async fn distance_matrix(
            &self,
            _origin: &Endpoint,
            _destination: &Endpoint,
            _mode: TravelMode,
        ) -> MatrixOutcome {
            MatrixOutcome::Times(ModeTimes {
                duration: "30 mins".into(),
                distance: "5.2 km".into(),
            })
        }
    }

    #[tokio::test]
    async fn created_location_reads_back_with_geocoded_fields() {
        let maps = StubMaps { ok: true };
        let store = MemoryStore::default();
        let user_id = Uuid::new_v4();

        let created = create_verified(&maps, &store, user_id, "Home", "brooklyn")
            .await
            .unwrap();

        let found = store
            .find_for_owner(created.id, user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Home");
        assert_eq!(found.address, "Brooklyn, NY, USA");
        assert_eq!(
            found.coordinates(),
            Some(Coordinates { lat: 40.6782, lng: -73.9442 })
        );
    }

    #[tokio::test]
    async fn failed_verification_persists_nothing() {
        let maps = StubMaps { ok: false };
        let store = MemoryStore::default();

        let err = create_verified(&maps, &store, Uuid::new_v4(), "Home", "nowhere")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.rows().is_empty());
    }
}
