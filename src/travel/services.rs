use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    locations::repo::{Location, LocationStore},
    maps::{travel_matrix, Coordinates, Endpoint, GeocodeError, MapsClient},
    state::AppState,
    travel::dto::{CompareRequest, CompareResponse, ComparedCandidate},
};

pub async fn compare_with_saved(
    state: &AppState,
    user_id: Uuid,
    req: CompareRequest,
) -> ApiResult<CompareResponse> {
    compare(
        state.maps.as_ref(),
        &state.db,
        state.config.compare_address_fallback,
        user_id,
        req,
    )
    .await
}

/// Compare travel times between a candidate location and one of the caller's
/// saved locations. All validation happens before any distance-matrix call.
pub(crate) async fn compare(
    maps: &dyn MapsClient,
    locations: &dyn LocationStore,
    address_fallback: bool,
    user_id: Uuid,
    req: CompareRequest,
) -> ApiResult<CompareResponse> {
    let (candidate_address, candidate_coords) = resolve_candidate(maps, &req).await?;

    // Missing and foreign-owned ids fail identically.
    let saved = locations
        .find_for_owner(req.saved_location_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Saved location not found".into()))?;

    let destination = saved_endpoint(&saved, address_fallback)?;
    let origin = Endpoint::Coords(candidate_coords);

    let results = travel_matrix(maps, &origin, &destination)
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    info!(user_id = %user_id, saved_location_id = %saved.id, "travel comparison completed");
    Ok(CompareResponse {
        new_location: ComparedCandidate {
            address: candidate_address,
            latitude: candidate_coords.lat,
            longitude: candidate_coords.lng,
        },
        saved_location: saved.into(),
        results,
    })
}

/// Resolve the candidate side of the comparison to validated coordinates.
/// Address input goes through the geocoder; explicit coordinates are range
/// checked without any network call.
pub(crate) async fn resolve_candidate(
    maps: &dyn MapsClient,
    req: &CompareRequest,
) -> ApiResult<(Option<String>, Coordinates)> {
    if let Some(address) = req.new_address.as_deref().map(str::trim) {
        if address.is_empty() {
            return Err(ApiError::Validation(
                "New location address must not be empty.".into(),
            ));
        }
        let geocoded = maps.geocode(address).await.map_err(|e| {
            warn!(error = %e, "candidate address verification failed");
            match e {
                GeocodeError::Request(_) => ApiError::ExternalApi(
                    "Address verification is temporarily unavailable.".into(),
                ),
                _ => ApiError::Validation(
                    "Could not verify the new location address. Please check and try again."
                        .into(),
                ),
            }
        })?;
        if !geocoded.coords.is_valid() {
            return Err(ApiError::InvalidCoordinates);
        }
        return Ok((Some(geocoded.formatted_address), geocoded.coords));
    }

    match (req.new_lat, req.new_lng) {
        (Some(lat), Some(lng)) => {
            let coords = Coordinates { lat, lng };
            if !coords.is_valid() {
                return Err(ApiError::InvalidCoordinates);
            }
            Ok((None, coords))
        }
        _ => Err(ApiError::Validation(
            "Either new_address or new_lat/new_lng is required.".into(),
        )),
    }
}

/// Pick the saved side of the comparison. A stored coordinate pair must be in
/// range; a location without coordinates is rejected unless the address
/// fallback policy is enabled.
pub(crate) fn saved_endpoint(loc: &Location, address_fallback: bool) -> ApiResult<Endpoint> {
    match loc.coordinates() {
        Some(coords) if coords.is_valid() => Ok(Endpoint::Coords(coords)),
        Some(_) => Err(ApiError::InvalidCoordinates),
        None if address_fallback => Ok(Endpoint::Address(loc.address.clone())),
        None => Err(ApiError::Validation(
            "Saved location has no verified coordinates.".into(),
        )),
    }
}
